//! Error types for the export pipeline

use thiserror::Error;

use crate::timestamp::TimestampError;

/// Errors that abort an export or verification run
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Malformed ENEX document: {0}")]
    InvalidDocument(String),

    #[error("Invalid {field} timestamp for {url}: {source}")]
    Timestamp {
        url: String,
        field: &'static str,
        #[source]
        source: TimestampError,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ExportError>;
