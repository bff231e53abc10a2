//! Omnivore CSV export
//!
//! Writes the four-timestamp-and-labels schema Omnivore's CSV importer
//! expects: https://docs.omnivore.app/using/importing.html#importing-csv-files

use std::io::Write;

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::config::ExportConfig;
use crate::error::{ExportError, Result};
use crate::evernote::Note;
use crate::records::RecordStore;
use crate::timestamp::to_epoch_millis;

/// Header line written before any row
pub const CSV_HEADER: &str = "url,state,labels,saved_at,published_at";

/// One normalized output row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub url: String,
    pub state: String,
    pub labels: String,
    pub saved_at: i64,
    pub published_at: i64,
}

impl ExportRow {
    fn from_note(note: &Note, state: &str) -> Result<Self> {
        let saved_at = to_epoch_millis(&note.created).map_err(|source| ExportError::Timestamp {
            url: note.url.clone(),
            field: "created",
            source,
        })?;
        let published_at =
            to_epoch_millis(&note.updated).map_err(|source| ExportError::Timestamp {
                url: note.url.clone(),
                field: "updated",
                source,
            })?;

        Ok(Self {
            url: note.url.clone(),
            state: state.to_string(),
            labels: format_labels(&note.tags),
            saved_at,
            published_at,
        })
    }
}

/// Render tags as Omnivore's label list: `[tag1,tag2]`.
///
/// Whitespace and quote characters are stripped from each tag, since the
/// importer splits on commas inside the brackets and does not unquote.
pub fn format_labels(tags: &[String]) -> String {
    let cleaned: Vec<String> = tags
        .iter()
        .map(|tag| {
            tag.chars()
                .filter(|c| !c.is_whitespace() && *c != '\'' && *c != '"')
                .collect()
        })
        .collect();
    format!("[{}]", cleaned.join(","))
}

fn quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Normalize every stored note. Fails on the first bad timestamp so that no
/// partial file is ever produced.
pub fn build_rows(store: &RecordStore, config: &ExportConfig) -> Result<Vec<ExportRow>> {
    store
        .iter()
        .map(|note| ExportRow::from_note(note, &config.state))
        .collect()
}

/// Write the store as Omnivore CSV, returning the number of rows written
pub fn write_csv<W: Write>(store: &RecordStore, config: &ExportConfig, mut out: W) -> Result<usize> {
    let rows = build_rows(store, config)?;

    writeln!(out, "{}", CSV_HEADER)?;

    // Text columns are always quoted, timestamps never; quoting is done
    // here since no csv quote style splits by column
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(out);

    for row in &rows {
        writer.write_record([
            quoted(&row.url),
            quoted(&row.state),
            quoted(&row.labels),
            row.saved_at.to_string(),
            row.published_at.to_string(),
        ])?;
    }
    writer.flush()?;

    log::info!("Wrote {} rows", rows.len());
    Ok(rows.len())
}
