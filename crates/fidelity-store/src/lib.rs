//! # fidelity-store
//!
//! CSV persistence around the correspondence engine.
//!
//! This crate provides:
//! - capture-record-set loading (`CsvCaptureStore`, a `CaptureSource`)
//! - identity-index read/write
//! - extraction-status indexes and the merge join that pairs them
//! - the report emitter (`ReportWriter`, a `ReportSink`) and report reader
//! - the seed liveness summary
//! - archived-snapshot selection, one per seed
//!
//! ## Data flow
//!
//! ```text
//! current index ─┐
//!                ├─ pair_indexes ─▶ identity index ─▶ BatchDriver ─▶ report
//! archive index ─┘                 capture sets ────────┘
//! ```

pub mod capture;
pub mod error;
pub mod index;
pub mod liveness;
pub mod pairing;
pub mod report;
pub mod selection;
mod table;

pub use capture::{CsvCaptureStore, read_capture_set};
pub use error::StoreError;
pub use index::{read_identity_index, write_identity_index};
pub use liveness::{
    BucketCount, LivenessBucket, LivenessSummary, LivenessTable, bucket_file_name,
    classify_liveness, summarize_liveness, write_liveness_buckets,
};
pub use pairing::{ExtractionStatusRow, pair_indexes, read_extraction_index};
pub use report::{REPORT_HEADER, ReportRow, ReportWriter, read_report};
pub use selection::{
    ARCHIVED_URL_HEADER, ArchivedUrl, read_archived_urls, select_archived, write_archived_urls,
};
