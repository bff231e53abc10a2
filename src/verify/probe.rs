use reqwest::blocking::Client;
use reqwest::redirect::Policy;

use crate::config::VerifyConfig;
use crate::error::Result;
use crate::records::RecordStore;

/// Result of a single liveness check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The server answered with this HTTP status
    Status(u16),
    /// No response: connection, TLS or timeout failure
    Failed(String),
}

impl ProbeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Status(status) if (200..400).contains(status))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    pub url: String,
    pub outcome: ProbeOutcome,
}

/// Something that can check whether a URL still resolves
pub trait Probe {
    fn probe(&self, url: &str) -> ProbeOutcome;
}

/// HEAD request prober backed by a blocking reqwest client
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    pub fn new(config: &VerifyConfig) -> Result<Self> {
        let redirect = if config.follow_redirects {
            Policy::default()
        } else {
            Policy::none()
        };

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .redirect(redirect)
            .build()?;

        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Probe for HttpProbe {
    fn probe(&self, url: &str) -> ProbeOutcome {
        match self.client.head(url).send() {
            Ok(response) => ProbeOutcome::Status(response.status().as_u16()),
            Err(e) => ProbeOutcome::Failed(e.to_string()),
        }
    }
}

/// Probe every stored URL once, in store order.
///
/// Failures are logged and the run moves on to the next URL.
pub fn verify<P: Probe>(store: &RecordStore, probe: &P) -> Vec<ProbeReport> {
    let mut reports = Vec::with_capacity(store.len());

    for note in store {
        let outcome = probe.probe(&note.url);
        match &outcome {
            ProbeOutcome::Status(status) if outcome.is_success() => {
                log::info!("{} -> {}", note.url, status);
            }
            ProbeOutcome::Status(status) => {
                log::warn!("{} -> {}", note.url, status);
            }
            ProbeOutcome::Failed(reason) => {
                log::warn!("{} failed: {}", note.url, reason);
            }
        }
        reports.push(ProbeReport {
            url: note.url.clone(),
            outcome,
        });
    }

    let alive = reports.iter().filter(|r| r.outcome.is_success()).count();
    log::info!("Verified {} URLs: {} alive, {} not", reports.len(), alive, reports.len() - alive);

    reports
}
