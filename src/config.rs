use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{ExportError, Result};

/// Omnivore import state written for every row
pub const DEFAULT_STATE: &str = "SUCCEEDED";

/// Per-request timeout for URL verification
pub const DEFAULT_TIMEOUT_SECS: u64 = 8;

/// Runtime configuration, optionally loaded from a TOML file
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "snake_case")]
pub struct Config {
    pub export: ExportConfig,
    pub verify: VerifyConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "snake_case")]
pub struct ExportConfig {
    /// Value of the `state` column
    pub state: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            state: DEFAULT_STATE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "snake_case")]
pub struct VerifyConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
    pub follow_redirects: bool,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: concat!("enex-omnivore/", env!("CARGO_PKG_VERSION")).to_string(),
            follow_redirects: true,
        }
    }
}

impl VerifyConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load configuration from `path`, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let content = fs::read_to_string(path)?;
                Self::from_toml(&content)?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.verify.timeout_secs == 0 {
            return Err(ExportError::Config(
                "verify.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.export.state.trim().is_empty() {
            return Err(ExportError::Config("export.state must not be empty".to_string()));
        }
        Ok(())
    }
}
