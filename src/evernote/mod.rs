//! Evernote import module
//!
//! Reads Evernote .enex export files into [`Note`] records.
//! Extracted per note:
//! - Title
//! - Tags
//! - Created/updated timestamps (raw text)
//! - Source URL from the note attributes

mod import;
mod models;

pub use import::*;
pub use models::*;
