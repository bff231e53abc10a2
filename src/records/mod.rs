//! Deduplicating record store
//!
//! Evernote exports often hold the same bookmark several times, e.g. clipped
//! again later with more tags. Notes are keyed by source URL and the variant
//! carrying the most tags is kept; ties keep the first one seen.

mod store;

pub use store::*;
