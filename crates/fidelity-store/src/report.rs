//! Correspondence report: one quoted CSV row per compared page pair.

use crate::error::StoreError;
use crate::table::{ensure_parent, read_rows, writer_builder};
use fidelity_core::{PageReport, ReportSink};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Report columns, in emission order.
pub const REPORT_HEADER: [&str; 9] = [
    "current_url",
    "current_file_name",
    "archive_url",
    "archive_file_name",
    "current_requests",
    "archive_requests",
    "matched_requests",
    "erroring_requests",
    "correspondence",
];

/// Streams report rows to a CSV sink.
///
/// The header is written when the writer is created, so even a run with no
/// readable pair leaves a well-formed (header-only) report.
pub struct ReportWriter<W: Write> {
    writer: csv::Writer<W>,
    label: PathBuf,
}

impl ReportWriter<BufWriter<File>> {
    /// Create (or truncate) a report file.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        ensure_parent(path)?;
        let file = File::create(path).map_err(|e| StoreError::io(path, e))?;
        Self::new(BufWriter::new(file), path)
    }
}

impl<W: Write> ReportWriter<W> {
    pub fn new(inner: W, label: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let label = label.into();
        let mut writer = writer_builder().from_writer(inner);
        writer
            .write_record(REPORT_HEADER)
            .map_err(|e| StoreError::csv(&label, e))?;
        Ok(Self { writer, label })
    }

    /// Finish and hand back the underlying writer.
    pub fn into_inner(mut self) -> Result<W, StoreError> {
        self.finish()?;
        self.writer.into_inner().map_err(|e| {
            StoreError::io(
                &self.label,
                std::io::Error::new(e.error().kind(), e.error().to_string()),
            )
        })
    }
}

impl<W: Write> ReportSink for ReportWriter<W> {
    type Error = StoreError;

    fn emit(&mut self, report: &PageReport) -> Result<(), Self::Error> {
        let current_total = report.current_total.to_string();
        let archive_total = report.archive_total.to_string();
        let matched = report.matched.to_string();
        let errors = report.errors.to_string();
        // `Display` for f64 is the shortest text that parses back to the same value.
        let correspondence = report.correspondence.to_string();
        self.writer
            .write_record([
                report.current_url.as_str(),
                report.current_locator.as_str(),
                report.archive_url.as_str(),
                report.archive_locator.as_str(),
                current_total.as_str(),
                archive_total.as_str(),
                matched.as_str(),
                errors.as_str(),
                correspondence.as_str(),
            ])
            .map_err(|e| StoreError::csv(&self.label, e))
    }

    fn finish(&mut self) -> Result<(), Self::Error> {
        self.writer
            .flush()
            .map_err(|e| StoreError::io(&self.label, e))
    }
}

/// One parsed report row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReportRow {
    pub current_url: String,
    pub current_file_name: String,
    pub archive_url: String,
    pub archive_file_name: String,
    pub current_requests: usize,
    pub archive_requests: usize,
    pub matched_requests: usize,
    pub erroring_requests: usize,
    pub correspondence: f64,
}

/// Read a report written by [`ReportWriter`].
pub fn read_report(path: impl AsRef<Path>) -> Result<Vec<ReportRow>, StoreError> {
    read_rows(path.as_ref())
}
