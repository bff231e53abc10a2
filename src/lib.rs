pub mod config;
pub mod error;
pub mod evernote;
pub mod omnivore;
pub mod pipeline;
pub mod records;
pub mod timestamp;
pub mod verify;

pub use config::Config;
pub use error::{ExportError, Result};
