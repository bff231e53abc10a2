//! Run driver: ENEX file → record store → CSV or verification.
//!
//! Each run owns exactly one `RecordStore` and one `Counters`; nothing
//! outlives the call.

use std::io::Write;
use std::path::Path;

use crate::config::Config;
use crate::error::Result;
use crate::evernote::EnexDocument;
use crate::omnivore::write_csv;
use crate::records::{Counters, RecordStore};
use crate::timestamp::to_epoch_millis;
use crate::verify::{verify, HttpProbe, ProbeReport};

/// Dry-run statistics for an export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPreview {
    pub note_count: usize,
    pub record_count: usize,
    pub empty_urls: usize,
    pub duplicates: usize,
    /// Tags across the records that would be exported
    pub tag_count: usize,
    pub warnings: Vec<String>,
}

/// Feed every note of `document` through the dedup merge, in document order
pub fn collect_records(document: &EnexDocument) -> (RecordStore, Counters) {
    let mut store = RecordStore::new();
    let mut counters = Counters::default();

    for note in document.notes() {
        store.merge(note, &mut counters);
    }

    (store, counters)
}

/// Log the end-of-run totals
pub fn report_summary(store: &RecordStore, counters: &Counters) {
    log::info!(
        "Processed {} notes: {} records, {} without URL, {} duplicates",
        counters.notes_seen,
        store.len(),
        counters.empty_urls,
        counters.duplicates
    );
}

/// Convert an .enex file to Omnivore CSV written to `out`
pub fn run_export<W: Write>(enex_path: &Path, config: &Config, out: W) -> Result<Counters> {
    let document = EnexDocument::open(enex_path)?;
    log::debug!("Parsed {} notes from {}", document.note_count(), enex_path.display());

    let (store, counters) = collect_records(&document);
    write_csv(&store, &config.export, out)?;
    report_summary(&store, &counters);

    Ok(counters)
}

/// Check every unique source URL of an .enex file instead of exporting
pub fn run_verify(enex_path: &Path, config: &Config) -> Result<Vec<ProbeReport>> {
    let document = EnexDocument::open(enex_path)?;
    let (store, counters) = collect_records(&document);

    let probe = HttpProbe::new(&config.verify)?;
    let reports = verify(&store, &probe);
    report_summary(&store, &counters);

    Ok(reports)
}

/// Summarize what an export would contain without writing CSV
pub fn preview(document: &EnexDocument) -> ExportPreview {
    let (store, counters) = collect_records(document);

    let mut warnings = Vec::new();
    if counters.notes_seen == 0 {
        warnings.push("No notes found in ENEX file".to_string());
    }
    if counters.empty_urls > 0 {
        warnings.push(format!("{} notes have no source URL and will be skipped", counters.empty_urls));
    }
    let untimed = store
        .iter()
        .filter(|n| to_epoch_millis(&n.created).is_err() || to_epoch_millis(&n.updated).is_err())
        .count();
    if untimed > 0 {
        warnings.push(format!(
            "{} records have a missing or unparsable created/updated timestamp",
            untimed
        ));
    }

    ExportPreview {
        note_count: counters.notes_seen,
        record_count: store.len(),
        empty_urls: counters.empty_urls,
        duplicates: counters.duplicates,
        tag_count: store.iter().map(|n| n.tag_count()).sum(),
        warnings,
    }
}

/// Open an .enex file and preview it
pub fn preview_file(enex_path: &Path) -> Result<ExportPreview> {
    let document = EnexDocument::open(enex_path)?;
    Ok(preview(&document))
}
