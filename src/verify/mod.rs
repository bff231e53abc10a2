//! URL verification
//!
//! Sends one HEAD request per stored URL and reports what came back.
//! No retries; a dead link is reported and the run continues.

mod probe;

pub use probe::*;
