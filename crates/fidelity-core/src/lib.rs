//! # fidelity-core
//!
//! The correspondence engine: given a live ("current") capture of a page's
//! network requests and an archived replay of the same page, measure how well
//! the archive reproduces the live request set.
//!
//! This crate is **I/O-free**. Capture sets arrive through a [`CaptureSource`]
//! and report rows leave through a [`ReportSink`]; file formats live in
//! `fidelity-store`.
//!
//! ## Pipeline
//!
//! ```text
//! IndexEntry            ← identity index row (current ↔ archive)
//!     │  eligible_pairs
//! PagePair              ← both sides extracted successfully
//!     │  CaptureSource::load (×2)
//! CaptureRecord sets
//!     │  match_requests      (partial-ratio > threshold, first max wins)
//! MatchOutcome          ← matched pairs + missing archived records
//!     │  classify_pair       (status mismatch, 302 tolerated)
//! PageTally
//!     │  PageReport::from_tally
//! PageReport            ← correspondence = (matched - errors) / matched
//!     │  ReportSink::emit
//! ```

pub mod aggregate;
pub mod batch;
pub mod classify;
pub mod config;
pub mod error;
pub mod index;
pub mod matcher;
pub mod record;
pub mod similarity;

pub use aggregate::{PageReport, PageTally};
pub use batch::{
    BatchDriver, BatchError, BatchSummary, CaptureSource, PairFailure, ReportSink, compare_captures,
};
pub use classify::{PairClass, REDIRECT_STATUS, classify_pair, classify_statuses};
pub use config::{EngineConfig, SUCCESS_STATUS};
pub use error::ConfigError;
pub use index::{IndexEntry, PagePair, eligible_pairs};
pub use matcher::{DEFAULT_THRESHOLD, MatchOutcome, MatchedPair, match_requests};
pub use record::{CaptureRecord, CaptureSide, PageIdentity, Side};
pub use similarity::{partial_ratio, partial_ratio_chars};
