//! Identity index: which live capture corresponds to which archived capture.

use crate::record::PageIdentity;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One identity-index row.
///
/// Status fields hold the acquisition collaborator's extraction message; an
/// entry is eligible only when both equal the configured success literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub current_url: String,
    pub archive_url: String,
    pub current_file_name: String,
    pub archive_file_name: String,
    #[serde(default)]
    pub archive_date: Option<String>,
    pub current_extraction_status: String,
    pub archive_extraction_status: String,
}

impl IndexEntry {
    pub fn is_eligible(&self, success_status: &str) -> bool {
        self.current_extraction_status == success_status
            && self.archive_extraction_status == success_status
    }

    pub fn to_pair(&self) -> PagePair {
        PagePair {
            current: PageIdentity::current(&self.current_url, &self.current_file_name),
            archive: PageIdentity::archive(
                &self.archive_url,
                &self.archive_file_name,
                self.archive_date.clone(),
            ),
        }
    }
}

/// The unit of comparison: a live page and its archived counterpart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagePair {
    pub current: PageIdentity,
    pub archive: PageIdentity,
}

/// Page pairs for every entry whose two sides extracted successfully, in
/// index order, plus the number of entries skipped.
pub fn eligible_pairs(entries: &[IndexEntry], success_status: &str) -> (Vec<PagePair>, usize) {
    let mut pairs = Vec::with_capacity(entries.len());
    let mut skipped = 0;
    for entry in entries {
        if entry.is_eligible(success_status) {
            pairs.push(entry.to_pair());
        } else {
            debug!(
                current = %entry.current_file_name,
                archive = %entry.archive_file_name,
                current_status = %entry.current_extraction_status,
                archive_status = %entry.archive_extraction_status,
                "skipping index entry without successful extraction on both sides"
            );
            skipped += 1;
        }
    }
    (pairs, skipped)
}
