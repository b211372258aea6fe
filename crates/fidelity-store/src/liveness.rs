//! Seed liveness summary over an extraction-status index.
//!
//! Both index shapes carry `site_status` (`LIVE`, `REDIRECT`, `FAIL`) and a
//! free-text `site_message`. Seeds are bucketed from those two columns; the
//! other columns are carried through untouched when buckets are written out.

use crate::error::StoreError;
use crate::table::{RaggedTable, cell, write_atomically};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const STATUS_LIVE: &str = "LIVE";
const STATUS_REDIRECT: &str = "REDIRECT";
const REDIRECT_MESSAGE: &str = "Redirected to";
const URL_ERROR_PREFIX: &str = "URLError";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LivenessBucket {
    Live,
    Redirect,
    HttpError(u16),
    UrlError,
    Unclassified,
}

impl LivenessBucket {
    pub fn label(self) -> String {
        match self {
            Self::Live => "live".to_string(),
            Self::Redirect => "redirect".to_string(),
            Self::HttpError(code) => format!("http_{code}"),
            Self::UrlError => "url_error".to_string(),
            Self::Unclassified => "unclassified".to_string(),
        }
    }
}

fn http_error_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*HTTPError:\s*(\d{3})\b").expect("http-error regex must compile")
    })
}

/// Bucket one seed from its site status and message.
pub fn classify_liveness(site_status: &str, site_message: &str) -> LivenessBucket {
    if let Some(code) = http_error_re()
        .captures(site_message)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
    {
        return LivenessBucket::HttpError(code);
    }
    if site_message.trim_start().starts_with(URL_ERROR_PREFIX) {
        return LivenessBucket::UrlError;
    }
    if site_status == STATUS_REDIRECT || site_message.contains(REDIRECT_MESSAGE) {
        return LivenessBucket::Redirect;
    }
    if site_status == STATUS_LIVE {
        return LivenessBucket::Live;
    }
    LivenessBucket::Unclassified
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketCount {
    pub bucket: String,
    pub count: usize,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LivenessSummary {
    pub total: usize,
    pub buckets: Vec<BucketCount>,
}

/// A status index with every row bucketed, in file order.
#[derive(Debug, Clone)]
pub struct LivenessTable {
    headers: csv::StringRecord,
    rows: Vec<(LivenessBucket, csv::StringRecord)>,
}

impl LivenessTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn summary(&self) -> LivenessSummary {
        let mut counts: BTreeMap<LivenessBucket, usize> = BTreeMap::new();
        for (bucket, _) in &self.rows {
            *counts.entry(*bucket).or_default() += 1;
        }
        let total = self.rows.len();
        let buckets = counts
            .into_iter()
            .map(|(bucket, count)| BucketCount {
                bucket: bucket.label(),
                count,
                percent: if total == 0 {
                    0.0
                } else {
                    count as f64 * 100.0 / total as f64
                },
            })
            .collect();
        LivenessSummary { total, buckets }
    }
}

/// Read and bucket an extraction-status index.
pub fn summarize_liveness(path: impl AsRef<Path>) -> Result<LivenessTable, StoreError> {
    let path = path.as_ref();
    let table = RaggedTable::read(path)?;
    let column = |name: &str| {
        table.column(name).ok_or_else(|| StoreError::MissingColumn {
            path: path.display().to_string(),
            column: name.to_string(),
        })
    };
    let status_col = Some(column("site_status")?);
    let message_col = Some(column("site_message")?);

    let rows = table
        .records
        .into_iter()
        .map(|record| {
            let bucket = classify_liveness(cell(&record, status_col), cell(&record, message_col));
            (bucket, record)
        })
        .collect();
    Ok(LivenessTable {
        headers: table.headers,
        rows,
    })
}

/// `<stem>_<bucket>.csv`
pub fn bucket_file_name(stem: &str, bucket: LivenessBucket) -> String {
    format!("{stem}_{}.csv", bucket.label())
}

/// Write one CSV per bucket present in `table`, each with the input header.
pub fn write_liveness_buckets(
    table: &LivenessTable,
    out_dir: impl AsRef<Path>,
    stem: &str,
) -> Result<Vec<PathBuf>, StoreError> {
    let mut grouped: BTreeMap<LivenessBucket, Vec<&csv::StringRecord>> = BTreeMap::new();
    for (bucket, record) in &table.rows {
        grouped.entry(*bucket).or_default().push(record);
    }

    let mut written = Vec::with_capacity(grouped.len());
    for (bucket, records) in grouped {
        let path = out_dir.as_ref().join(bucket_file_name(stem, bucket));
        write_atomically(&path, |writer| {
            writer.write_record(&table.headers)?;
            for record in records {
                writer.write_record(record)?;
            }
            Ok(())
        })?;
        written.push(path);
    }
    Ok(written)
}
