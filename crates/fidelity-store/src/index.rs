//! Identity index files.
//!
//! Header: `current_url,archive_url,current_file_name,archive_file_name`,
//! optionally followed by `archive_date`, `current_extraction_status` and
//! `archive_extraction_status`. Index files written by the pairing step list
//! only successfully extracted pairs, so an absent status column reads as the
//! success literal.

use crate::error::StoreError;
use crate::table::{read_rows, write_atomically};
use fidelity_core::IndexEntry;
use serde::Deserialize;
use std::path::Path;

const INDEX_HEADER: [&str; 7] = [
    "current_url",
    "archive_url",
    "current_file_name",
    "archive_file_name",
    "archive_date",
    "current_extraction_status",
    "archive_extraction_status",
];

#[derive(Debug, Deserialize)]
struct IndexRow {
    current_url: String,
    archive_url: String,
    current_file_name: String,
    archive_file_name: String,
    #[serde(default)]
    archive_date: Option<String>,
    #[serde(default)]
    current_extraction_status: Option<String>,
    #[serde(default)]
    archive_extraction_status: Option<String>,
}

impl IndexRow {
    fn into_entry(self, success_status: &str) -> IndexEntry {
        IndexEntry {
            current_url: self.current_url,
            archive_url: self.archive_url,
            current_file_name: self.current_file_name,
            archive_file_name: self.archive_file_name,
            archive_date: self.archive_date.filter(|d| !d.is_empty()),
            current_extraction_status: self
                .current_extraction_status
                .unwrap_or_else(|| success_status.to_string()),
            archive_extraction_status: self
                .archive_extraction_status
                .unwrap_or_else(|| success_status.to_string()),
        }
    }
}

/// Read an identity index, in file order.
pub fn read_identity_index(
    path: impl AsRef<Path>,
    success_status: &str,
) -> Result<Vec<IndexEntry>, StoreError> {
    let rows: Vec<IndexRow> = read_rows(path.as_ref())?;
    Ok(rows
        .into_iter()
        .map(|row| row.into_entry(success_status))
        .collect())
}

/// Write an identity index with every column filled.
pub fn write_identity_index(
    path: impl AsRef<Path>,
    entries: &[IndexEntry],
) -> Result<(), StoreError> {
    write_atomically(path.as_ref(), |writer| {
        writer.write_record(INDEX_HEADER)?;
        for entry in entries {
            writer.write_record([
                entry.current_url.as_str(),
                entry.archive_url.as_str(),
                entry.current_file_name.as_str(),
                entry.archive_file_name.as_str(),
                entry.archive_date.as_deref().unwrap_or(""),
                entry.current_extraction_status.as_str(),
                entry.archive_extraction_status.as_str(),
            ])?;
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::testing::TempDir;
    use fidelity_core::SUCCESS_STATUS;

    #[test]
    fn four_column_index_reads_as_successful() {
        let dir = TempDir::new("index-legacy");
        let path = dir.write(
            "index.csv",
            "\"current_url\",\"archive_url\",\"current_file_name\",\"archive_file_name\"\n\
             \"http://x.com/\",\"https://web.archive.org/web/2020/http://x.com/\",\"1.1.csv\",\"1.1.2020.csv\"\n",
        );
        let entries = read_identity_index(&path, SUCCESS_STATUS).expect("index should parse");
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_eligible(SUCCESS_STATUS));
        assert_eq!(entries[0].archive_date, None);
    }

    #[test]
    fn status_columns_are_honoured() {
        let dir = TempDir::new("index-status");
        let path = dir.write(
            "index.csv",
            "current_url,archive_url,current_file_name,archive_file_name,current_extraction_status,archive_extraction_status\n\
             http://x.com/,http://a/,1.1.csv,1.1.2020.csv,Extraction successful,Extraction unsuccessful\n",
        );
        let entries = read_identity_index(&path, SUCCESS_STATUS).expect("index should parse");
        assert!(!entries[0].is_eligible(SUCCESS_STATUS));
        assert_eq!(entries[0].archive_extraction_status, "Extraction unsuccessful");
    }

    #[test]
    fn written_index_reads_back() {
        let dir = TempDir::new("index-write");
        let path = dir.path().join("index.csv");
        let entries = vec![IndexEntry {
            current_url: "http://x.com/".to_string(),
            archive_url: "https://web.archive.org/web/2020/http://x.com/".to_string(),
            current_file_name: "1.1.csv".to_string(),
            archive_file_name: "1.1.2020.csv".to_string(),
            archive_date: Some("2020".to_string()),
            current_extraction_status: SUCCESS_STATUS.to_string(),
            archive_extraction_status: SUCCESS_STATUS.to_string(),
        }];
        write_identity_index(&path, &entries).expect("index should write");
        let read = read_identity_index(&path, SUCCESS_STATUS).expect("index should parse");
        assert_eq!(read, entries);
    }
}
