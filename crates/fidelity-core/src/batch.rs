//! Batch driver: runs the engine over every page pair of an identity index.
//!
//! ```text
//! ReadingIndex ─▶ ForPair ─┬─ load ok ─▶ Matching ▶ Classifying ▶ Aggregating ▶ Emitting ─┐
//!                  ▲       └─ load failed (logged, recorded) ──────────────────────────────┤
//!                  └───────────────────────────────────────────────────────────────────────┘
//!                                                                  index exhausted ─▶ Done
//! ```
//!
//! Pairs run one at a time in index order, so rows reach the sink in index
//! order. An unreadable capture set costs only its own pair. The only way a
//! batch stops early is a failing sink.

use crate::aggregate::{PageReport, PageTally};
use crate::config::EngineConfig;
use crate::index::{IndexEntry, PagePair, eligible_pairs};
use crate::matcher::match_requests;
use crate::record::{CaptureRecord, PageIdentity, Side};
use serde::Serialize;
use tracing::{info, warn};

/// Supplies capture-record sets by locator.
pub trait CaptureSource {
    type Error: std::fmt::Display;

    /// Load the records of one page capture, preserving their stored order.
    fn load(&mut self, page: &PageIdentity) -> Result<Vec<CaptureRecord>, Self::Error>;
}

/// Receives report rows in index order.
pub trait ReportSink {
    type Error: std::error::Error + 'static;

    fn emit(&mut self, report: &PageReport) -> Result<(), Self::Error>;

    /// Flush everything emitted so far. Called once, after the last pair.
    fn finish(&mut self) -> Result<(), Self::Error>;
}

/// A page pair whose capture set could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairFailure {
    pub side: Side,
    pub locator: String,
    pub reason: String,
}

impl std::fmt::Display for PairFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unreadable {} capture {}: {}",
            self.side, self.locator, self.reason
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BatchError<E: std::error::Error + 'static> {
    #[error("report sink failed: {0}")]
    Sink(#[source] E),
}

/// What a finished batch did.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub entries_read: usize,
    pub ineligible: usize,
    pub compared: usize,
    pub failures: Vec<PairFailure>,
    #[serde(skip)]
    correspondence_sum: f64,
}

impl BatchSummary {
    /// Mean correspondence over compared pairs, if any were compared.
    pub fn mean_correspondence(&self) -> Option<f64> {
        if self.compared == 0 {
            None
        } else {
            Some(self.correspondence_sum / self.compared as f64)
        }
    }
}

/// Compare one page pair whose capture sets are already loaded.
pub fn compare_captures(
    pair: &PagePair,
    archive: &[CaptureRecord],
    current: &[CaptureRecord],
    config: &EngineConfig,
) -> PageReport {
    let outcome = match_requests(archive, current, config.threshold());
    let tally = PageTally::from_outcome(&outcome, current.len(), config.tolerated_status_codes());
    PageReport::from_tally(pair, &tally)
}

pub struct BatchDriver<'c> {
    config: &'c EngineConfig,
}

impl<'c> BatchDriver<'c> {
    pub fn new(config: &'c EngineConfig) -> Self {
        Self { config }
    }

    /// Filter index entries to eligible pairs, then run them.
    pub fn run_index<S, K>(
        &self,
        entries: &[IndexEntry],
        source: &mut S,
        sink: &mut K,
    ) -> Result<BatchSummary, BatchError<K::Error>>
    where
        S: CaptureSource,
        K: ReportSink,
    {
        let (pairs, ineligible) = eligible_pairs(entries, self.config.success_status());
        info!(
            entries = entries.len(),
            eligible = pairs.len(),
            ineligible,
            "identity index read"
        );
        let mut summary = self.run_pairs(&pairs, source, sink)?;
        summary.entries_read = entries.len();
        summary.ineligible = ineligible;
        Ok(summary)
    }

    /// Run already-eligible pairs in order.
    pub fn run_pairs<S, K>(
        &self,
        pairs: &[PagePair],
        source: &mut S,
        sink: &mut K,
    ) -> Result<BatchSummary, BatchError<K::Error>>
    where
        S: CaptureSource,
        K: ReportSink,
    {
        let mut summary = BatchSummary {
            entries_read: pairs.len(),
            ..BatchSummary::default()
        };

        for pair in pairs {
            let (archive, current) = match load_pair(pair, source) {
                Ok(records) => records,
                Err(failure) => {
                    warn!(
                        current = %pair.current.locator,
                        archive = %pair.archive.locator,
                        "{failure}; pair skipped"
                    );
                    summary.failures.push(failure);
                    continue;
                }
            };

            let report = compare_captures(pair, &archive, &current, self.config);
            info!(
                current = %report.current_locator,
                archive = %report.archive_locator,
                current_requests = report.current_total,
                archive_requests = report.archive_total,
                matched = report.matched,
                missing = report.missing,
                errors = report.errors,
                correspondence = report.correspondence,
                "pair compared"
            );
            sink.emit(&report).map_err(BatchError::Sink)?;
            summary.compared += 1;
            summary.correspondence_sum += report.correspondence;
        }

        sink.finish().map_err(BatchError::Sink)?;
        Ok(summary)
    }
}

fn load_pair<S: CaptureSource>(
    pair: &PagePair,
    source: &mut S,
) -> Result<(Vec<CaptureRecord>, Vec<CaptureRecord>), PairFailure> {
    let archive = load_side(&pair.archive, source)?;
    let current = load_side(&pair.current, source)?;
    Ok((archive, current))
}

fn load_side<S: CaptureSource>(
    page: &PageIdentity,
    source: &mut S,
) -> Result<Vec<CaptureRecord>, PairFailure> {
    source.load(page).map_err(|e| PairFailure {
        side: page.side(),
        locator: page.locator.clone(),
        reason: e.to_string(),
    })
}
