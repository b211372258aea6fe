//! Extraction-status indexes and the merge join that pairs them.
//!
//! The acquisition step writes one status index per side:
//!
//! ```text
//! current: archive_id,url_id,current_url,site_status,site_message,extraction_message
//! archive: archive_id,url_id,date,archive_url,site_status,site_message,extraction_message
//! ```
//!
//! Both are ordered by numeric `url_id`. One seed may appear several times in
//! the archive index, once per snapshot date.

use crate::error::StoreError;
use crate::table::read_rows;
use fidelity_core::{CaptureSide, IndexEntry, Side};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// One row of an extraction-status index, tagged with its side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionStatusRow {
    pub archive_id: String,
    pub url_id: u64,
    pub url: String,
    pub capture: CaptureSide,
    pub site_status: String,
    pub site_message: String,
    pub extraction_message: String,
}

impl ExtractionStatusRow {
    /// Capture-set file name the acquisition step uses for this row.
    pub fn capture_file_name(&self) -> String {
        match self.capture.date() {
            Some(date) => format!("{}.{}.{}.csv", self.archive_id, self.url_id, date),
            None => format!("{}.{}.csv", self.archive_id, self.url_id),
        }
    }

    fn extracted(&self, success_status: &str) -> bool {
        self.extraction_message == success_status
    }
}

#[derive(Debug, Deserialize)]
struct RawStatusRow {
    archive_id: String,
    url_id: String,
    #[serde(default)]
    date: Option<String>,
    #[serde(alias = "current_url", alias = "archive_url")]
    url: String,
    #[serde(default)]
    site_status: String,
    #[serde(default)]
    site_message: String,
    #[serde(default)]
    extraction_message: String,
}

/// Read an extraction-status index for one side.
///
/// Archive rows must carry a `date`; `url_id` must be a non-negative integer.
pub fn read_extraction_index(
    path: impl AsRef<Path>,
    side: Side,
) -> Result<Vec<ExtractionStatusRow>, StoreError> {
    let path = path.as_ref();
    let raw: Vec<RawStatusRow> = read_rows(path)?;
    let mut rows = Vec::with_capacity(raw.len());
    for (position, row) in raw.into_iter().enumerate() {
        // data rows start on line 2
        let line = position + 2;
        let invalid = |message: String| StoreError::InvalidRow {
            path: path.display().to_string(),
            row: line,
            message,
        };

        let url_id = row
            .url_id
            .trim()
            .parse::<u64>()
            .map_err(|_| invalid(format!("url_id `{}` is not an integer", row.url_id)))?;
        let capture = match side {
            Side::Current => CaptureSide::Current,
            Side::Archive => match row.date.filter(|d| !d.is_empty()) {
                Some(date) => CaptureSide::Archive { date: Some(date) },
                None => return Err(invalid("archive row has no date".to_string())),
            },
        };
        rows.push(ExtractionStatusRow {
            archive_id: row.archive_id,
            url_id,
            url: row.url,
            capture,
            site_status: row.site_status,
            site_message: row.site_message,
            extraction_message: row.extraction_message,
        });
    }
    Ok(rows)
}

/// Join the two status indexes into identity-index entries.
///
/// Walks both indexes in step. The archive cursor advances past rows that
/// are behind the current cursor or failed extraction; the current cursor
/// advances past rows that are behind the archive cursor or failed
/// extraction. On agreement a pair is emitted and only the archive cursor
/// moves, so every successful snapshot of a seed pairs with its live
/// capture. Either index running out ends the join.
pub fn pair_indexes(
    current: &[ExtractionStatusRow],
    archive: &[ExtractionStatusRow],
    success_status: &str,
) -> Vec<IndexEntry> {
    let mut entries = Vec::new();
    let (mut ci, mut ai) = (0, 0);

    while let (Some(cur), Some(arc)) = (current.get(ci), archive.get(ai)) {
        if cur.url_id > arc.url_id || !arc.extracted(success_status) {
            ai += 1;
        } else if cur.url_id < arc.url_id || !cur.extracted(success_status) {
            ci += 1;
        } else {
            debug!(url_id = cur.url_id, date = ?arc.capture.date(), "paired");
            entries.push(IndexEntry {
                current_url: cur.url.clone(),
                archive_url: arc.url.clone(),
                current_file_name: cur.capture_file_name(),
                archive_file_name: arc.capture_file_name(),
                archive_date: arc.capture.date().map(str::to_string),
                current_extraction_status: cur.extraction_message.clone(),
                archive_extraction_status: arc.extraction_message.clone(),
            });
            ai += 1;
        }
    }

    entries
}
