//! Per-page correspondence aggregation.
//!
//! Counts only grow through [`PageTally::record_match`] and
//! [`PageTally::record_missing`], so `errors <= matched <= archive_total`
//! holds for every tally and the correspondence ratio stays in [0, 1].

use crate::classify::{PairClass, classify_pair};
use crate::index::PagePair;
use crate::matcher::MatchOutcome;
use serde::Serialize;
use tracing::debug;

/// Running match/miss/error counts for one page pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageTally {
    current_total: usize,
    matched: usize,
    missing: usize,
    tolerated: usize,
    errors: usize,
}

impl PageTally {
    pub fn new(current_total: usize) -> Self {
        Self {
            current_total,
            ..Self::default()
        }
    }

    /// Fold a match outcome, classifying each matched pair.
    pub fn from_outcome(
        outcome: &MatchOutcome<'_>,
        current_total: usize,
        tolerated_codes: &[String],
    ) -> Self {
        let mut tally = Self::new(current_total);
        for pair in &outcome.matched {
            let class = classify_pair(pair, tolerated_codes);
            if class.is_error() {
                debug!(
                    archive_url = %pair.archive.url,
                    archive_status = %pair.archive.status_code,
                    current_url = %pair.current.url,
                    current_status = %pair.current.status_code,
                    "status mismatch"
                );
            }
            tally.record_match(class);
        }
        for archived in &outcome.missing {
            debug!(archive_url = %archived.url, "archived request not found in current capture");
            tally.record_missing();
        }
        tally
    }

    pub fn record_match(&mut self, class: PairClass) {
        self.matched += 1;
        match class {
            PairClass::Consistent => {}
            PairClass::Tolerated => self.tolerated += 1,
            PairClass::Error => self.errors += 1,
        }
    }

    pub fn record_missing(&mut self) {
        self.missing += 1;
    }

    pub fn current_total(&self) -> usize {
        self.current_total
    }

    pub fn archive_total(&self) -> usize {
        self.matched + self.missing
    }

    pub fn matched(&self) -> usize {
        self.matched
    }

    pub fn missing(&self) -> usize {
        self.missing
    }

    pub fn tolerated(&self) -> usize {
        self.tolerated
    }

    pub fn errors(&self) -> usize {
        self.errors
    }

    /// Fraction of matched requests that are error-free.
    ///
    /// Exactly `0.0` when nothing matched.
    pub fn correspondence(&self) -> f64 {
        if self.matched == 0 {
            return 0.0;
        }
        (self.matched - self.errors) as f64 / self.matched as f64
    }
}

/// Aggregate result for one page pair; one report row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageReport {
    pub current_url: String,
    pub current_locator: String,
    pub archive_url: String,
    pub archive_locator: String,
    pub archive_date: Option<String>,
    pub current_total: usize,
    pub archive_total: usize,
    pub matched: usize,
    pub missing: usize,
    pub tolerated: usize,
    pub errors: usize,
    pub correspondence: f64,
}

impl PageReport {
    pub fn from_tally(pair: &PagePair, tally: &PageTally) -> Self {
        Self {
            current_url: pair.current.url.clone(),
            current_locator: pair.current.locator.clone(),
            archive_url: pair.archive.url.clone(),
            archive_locator: pair.archive.locator.clone(),
            archive_date: pair.archive.capture.date().map(str::to_string),
            current_total: tally.current_total(),
            archive_total: tally.archive_total(),
            matched: tally.matched(),
            missing: tally.missing(),
            tolerated: tally.tolerated(),
            errors: tally.errors(),
            correspondence: tally.correspondence(),
        }
    }
}
