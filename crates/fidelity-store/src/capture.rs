//! Capture-record sets: one CSV file per page visit.
//!
//! Live captures carry `archive_id,url_id,url,resource_type,status_code`;
//! archived captures add a `date` column. Columns resolve by header name, so
//! both shapes load into [`CaptureRecord`] and row order is preserved. A row
//! cut short by the capture tool keeps its URL; absent cells read as blank.

use crate::error::StoreError;
use crate::table::{RaggedTable, cell};
use fidelity_core::{CaptureRecord, CaptureSource, PageIdentity, Side};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read one capture-record set from a CSV file.
pub fn read_capture_set(path: impl AsRef<Path>) -> Result<Vec<CaptureRecord>, StoreError> {
    let path = path.as_ref();
    let table = RaggedTable::read(path)?;
    let url = table.column("url").ok_or_else(|| StoreError::MissingColumn {
        path: path.display().to_string(),
        column: "url".to_string(),
    })?;
    let status = table.column("status_code");
    let resource_type = table.column("resource_type");

    let records: Vec<CaptureRecord> = table
        .records
        .iter()
        .map(|row| {
            CaptureRecord::new(
                cell(row, Some(url)),
                cell(row, status),
                cell(row, resource_type),
            )
        })
        .collect();
    debug!(path = %path.display(), records = records.len(), "capture set loaded");
    Ok(records)
}

/// Capture sets stored as files under one directory per side.
#[derive(Debug, Clone)]
pub struct CsvCaptureStore {
    current_dir: PathBuf,
    archive_dir: PathBuf,
}

impl CsvCaptureStore {
    pub fn new(current_dir: impl Into<PathBuf>, archive_dir: impl Into<PathBuf>) -> Self {
        Self {
            current_dir: current_dir.into(),
            archive_dir: archive_dir.into(),
        }
    }

    pub fn path_for(&self, page: &PageIdentity) -> PathBuf {
        let dir = match page.side() {
            Side::Current => &self.current_dir,
            Side::Archive => &self.archive_dir,
        };
        dir.join(&page.locator)
    }
}

impl CaptureSource for CsvCaptureStore {
    type Error = StoreError;

    fn load(&mut self, page: &PageIdentity) -> Result<Vec<CaptureRecord>, Self::Error> {
        read_capture_set(self.path_for(page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::testing::TempDir;

    #[test]
    fn reads_current_and_archive_shapes() {
        let dir = TempDir::new("capture-shapes");
        let current = dir.write(
            "1.7.csv",
            "\"archive_id\",\"url_id\",\"url\",\"resource_type\",\"status_code\"\n\
             \"1\",\"7\",\"http://x.com/\",\"document\",\"200\"\n\
             \"1\",\"7\",\"http://x.com/a.js\",\"script\",\"404\"\n",
        );
        let archive = dir.write(
            "1.7.20200101000000.csv",
            "archive_id,url_id,date,url,resource_type,status_code\n\
             1,7,20200101000000,https://web.archive.org/web/20200101000000/http://x.com/,document,200\n",
        );

        let current = read_capture_set(current).expect("current capture should parse");
        assert_eq!(
            current,
            vec![
                CaptureRecord::new("http://x.com/", "200", "document"),
                CaptureRecord::new("http://x.com/a.js", "404", "script"),
            ]
        );

        let archive = read_capture_set(archive).expect("archive capture should parse");
        assert_eq!(archive.len(), 1);
        assert_eq!(archive[0].status_code, "200");
    }

    #[test]
    fn blank_status_is_kept_as_empty_token() {
        let dir = TempDir::new("capture-blank");
        let path = dir.write(
            "blank.csv",
            "url,resource_type,status_code\nhttp://x.com/a.js,script,\n",
        );
        let records = read_capture_set(path).expect("capture should parse");
        assert_eq!(records[0].status_code, "");
    }

    #[test]
    fn short_row_does_not_drop_the_capture() {
        let dir = TempDir::new("capture-short");
        let path = dir.write(
            "1.3.csv",
            "archive_id,url_id,url,resource_type,status_code\n\
             1,3,http://x.com/a.js,script,200\n\
             1,3,http://x.com/b.css\n",
        );
        let records = read_capture_set(path).expect("short row should not fail the set");
        assert_eq!(
            records,
            vec![
                CaptureRecord::new("http://x.com/a.js", "200", "script"),
                CaptureRecord::new("http://x.com/b.css", "", ""),
            ]
        );
    }

    #[test]
    fn capture_without_url_column_is_rejected() {
        let dir = TempDir::new("capture-no-url");
        let path = dir.write("1.4.csv", "archive_id,url_id,status_code\n1,4,200\n");
        assert!(matches!(
            read_capture_set(path),
            Err(StoreError::MissingColumn { column, .. }) if column == "url"
        ));
    }

    #[test]
    fn header_only_file_is_an_empty_capture() {
        let dir = TempDir::new("capture-empty");
        let path = dir.write("empty.csv", "archive_id,url_id,url,resource_type,status_code\n");
        let records = read_capture_set(path).expect("header-only capture should parse");
        assert!(records.is_empty());
    }

    #[test]
    fn store_resolves_locator_per_side() {
        let dir = TempDir::new("capture-store");
        dir.write("curr/1.1.csv", "url,status_code\nhttp://x.com/a.js,200\n");
        std::fs::create_dir_all(dir.path().join("arch")).expect("archive dir");

        let mut store = CsvCaptureStore::new(dir.path().join("curr"), dir.path().join("arch"));
        let current = PageIdentity::current("http://x.com/", "1.1.csv");
        let archive = PageIdentity::archive("http://x.com/", "1.1.csv", None);

        assert_eq!(store.load(&current).expect("current exists").len(), 1);
        match store.load(&archive) {
            Err(StoreError::Io { path, .. }) => assert!(path.contains("arch")),
            other => panic!("expected missing archive file, got {other:?}"),
        }
    }
}
