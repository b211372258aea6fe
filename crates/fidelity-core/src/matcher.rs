//! Request matching between an archived capture and a live capture.
//!
//! Every archived record independently selects its best live candidate by
//! case-insensitive partial-ratio similarity of URLs. Selection is:
//!
//! - highest score wins;
//! - on a tie, the candidate that comes first in the live record order wins;
//! - the winner is a match only when its score is strictly above the
//!   threshold, otherwise the archived record is *missing*.
//!
//! Two archived records may select the same live record. That duplication is
//! kept: each selection is classified on its own.

use crate::record::CaptureRecord;
use crate::similarity::partial_ratio_chars;

/// Default match threshold: a score must be strictly greater than this.
pub const DEFAULT_THRESHOLD: u8 = 90;

/// One archived record paired with the live record it selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchedPair<'a> {
    pub archive: &'a CaptureRecord,
    pub current: &'a CaptureRecord,
    /// Position of `current` in the live record order.
    pub current_index: usize,
    pub score: u8,
}

/// Result of matching one archived capture against one live capture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchOutcome<'a> {
    /// Matches in archived record order.
    pub matched: Vec<MatchedPair<'a>>,
    /// Archived records with no live candidate above the threshold.
    pub missing: Vec<&'a CaptureRecord>,
}

impl MatchOutcome<'_> {
    pub fn match_count(&self) -> usize {
        self.matched.len()
    }

    pub fn missing_count(&self) -> usize {
        self.missing.len()
    }
}

/// Match every archived record against the live records.
///
/// `current` order is significant: it decides ties. Callers that need
/// reproducible results must supply it in a stable order (the store keeps
/// file order).
pub fn match_requests<'a>(
    archive: &'a [CaptureRecord],
    current: &'a [CaptureRecord],
    threshold: u8,
) -> MatchOutcome<'a> {
    let current_urls: Vec<Vec<char>> = current.iter().map(|r| lowered_chars(&r.url)).collect();

    let mut outcome = MatchOutcome::default();
    for archived in archive {
        let archived_url = lowered_chars(&archived.url);
        match best_candidate(&archived_url, &current_urls) {
            Some((index, score)) if score > threshold => {
                outcome.matched.push(MatchedPair {
                    archive: archived,
                    current: &current[index],
                    current_index: index,
                    score,
                });
            }
            _ => outcome.missing.push(archived),
        }
    }
    outcome
}

/// Index and score of the first highest-scoring candidate.
fn best_candidate(url: &[char], candidates: &[Vec<char>]) -> Option<(usize, u8)> {
    let mut best: Option<(usize, u8)> = None;
    for (index, candidate) in candidates.iter().enumerate() {
        let score = partial_ratio_chars(url, candidate);
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((index, score));
            if score == 100 {
                break;
            }
        }
    }
    best
}

fn lowered_chars(url: &str) -> Vec<char> {
    url.to_lowercase().chars().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(url: &str, status: &str) -> CaptureRecord {
        CaptureRecord::new(url, status, "script")
    }

    #[test]
    fn identical_url_matches() {
        let archive = vec![rec("http://x.com/a.js", "200")];
        let current = vec![rec("http://x.com/a.js", "200")];
        let outcome = match_requests(&archive, &current, DEFAULT_THRESHOLD);
        assert_eq!(outcome.match_count(), 1);
        assert_eq!(outcome.missing_count(), 0);
        assert_eq!(outcome.matched[0].score, 100);
    }

    #[test]
    fn empty_current_side_leaves_everything_missing() {
        let archive = vec![rec("http://x.com/a.js", "200"), rec("http://x.com/b.css", "200")];
        let outcome = match_requests(&archive, &[], DEFAULT_THRESHOLD);
        assert_eq!(outcome.match_count(), 0);
        assert_eq!(outcome.missing_count(), 2);
    }

    #[test]
    fn empty_archive_side_matches_nothing() {
        let current = vec![rec("http://x.com/a.js", "200")];
        let outcome = match_requests(&[], &current, DEFAULT_THRESHOLD);
        assert_eq!(outcome, MatchOutcome::default());
    }

    #[test]
    fn url_comparison_ignores_case() {
        let archive = vec![rec("HTTP://X.COM/A.JS", "200")];
        let current = vec![rec("http://x.com/a.js", "200")];
        let outcome = match_requests(&archive, &current, DEFAULT_THRESHOLD);
        assert_eq!(outcome.match_count(), 1);
    }

    #[test]
    fn score_equal_to_threshold_is_missing() {
        let archive = vec![rec("abcdefghij", "200")];
        let current = vec![rec("abcdefghiX", "200")];
        let outcome = match_requests(&archive, &current, DEFAULT_THRESHOLD);
        assert_eq!(outcome.match_count(), 0);
        assert_eq!(outcome.missing_count(), 1);
    }

    #[test]
    fn score_above_threshold_matches() {
        let archive = vec![rec("abcdefghijk", "200")];
        let current = vec![rec("abcdefghijX", "200")];
        let outcome = match_requests(&archive, &current, DEFAULT_THRESHOLD);
        assert_eq!(outcome.match_count(), 1);
        assert_eq!(outcome.matched[0].score, 91);
    }

    #[test]
    fn highest_score_wins_over_earlier_candidate() {
        let archive = vec![rec("abcdefghijk", "200")];
        let current = vec![rec("abcdefghijX", "404"), rec("abcdefghijk", "200")];
        let outcome = match_requests(&archive, &current, DEFAULT_THRESHOLD);
        assert_eq!(outcome.matched[0].current_index, 1);
        assert_eq!(outcome.matched[0].score, 100);
    }

    #[test]
    fn tie_selects_first_candidate_in_current_order() {
        let archive = vec![rec("http://x.com/a.js", "200")];
        let current = vec![
            rec("http://x.com/a.js?v=1", "404"),
            rec("http://x.com/a.js?v=2", "200"),
        ];
        let outcome = match_requests(&archive, &current, DEFAULT_THRESHOLD);
        assert_eq!(outcome.matched[0].current_index, 0);
        assert_eq!(outcome.matched[0].current.status_code, "404");

        let reversed: Vec<CaptureRecord> = current.iter().rev().cloned().collect();
        let outcome = match_requests(&archive, &reversed, DEFAULT_THRESHOLD);
        assert_eq!(outcome.matched[0].current.status_code, "200");
    }

    #[test]
    fn two_archived_records_may_select_the_same_current_record() {
        let archive = vec![
            rec("http://x.com/a.js", "200"),
            rec("http://x.com/a.js", "404"),
        ];
        let current = vec![rec("http://x.com/a.js", "200")];
        let outcome = match_requests(&archive, &current, DEFAULT_THRESHOLD);
        assert_eq!(outcome.match_count(), 2);
        assert!(outcome.matched.iter().all(|pair| pair.current_index == 0));
    }

    #[test]
    fn matching_is_deterministic() {
        let archive = vec![
            rec("http://x.com/a.js", "200"),
            rec("http://x.com/img/logo.png", "200"),
            rec("http://tracker.example/pixel.gif", "200"),
        ];
        let current = vec![
            rec("http://x.com/img/logo.png?cache=1", "200"),
            rec("http://x.com/a.js", "304"),
        ];
        let first = match_requests(&archive, &current, DEFAULT_THRESHOLD);
        let second = match_requests(&archive, &current, DEFAULT_THRESHOLD);
        assert_eq!(first, second);
    }
}
