//! Status classification of matched request pairs.

use crate::matcher::MatchedPair;
use serde::Serialize;

/// Redirect status that never counts as an error on either side.
pub const REDIRECT_STATUS: &str = "302";

/// Classification of one matched pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PairClass {
    /// Both sides report the same status token.
    Consistent,
    /// Statuses differ, but one side carries a tolerated (redirect) status.
    Tolerated,
    /// Statuses differ with no tolerated status on either side.
    Error,
}

impl PairClass {
    pub fn is_error(self) -> bool {
        self == Self::Error
    }
}

/// Classify a matched pair.
///
/// Status codes are opaque tokens compared for exact textual equality; a
/// blank status is a token like any other. A tolerated code on *either* side
/// suppresses the error.
pub fn classify_pair(pair: &MatchedPair<'_>, tolerated: &[String]) -> PairClass {
    classify_statuses(&pair.archive.status_code, &pair.current.status_code, tolerated)
}

pub fn classify_statuses(archive: &str, current: &str, tolerated: &[String]) -> PairClass {
    if archive == current {
        return PairClass::Consistent;
    }
    let is_tolerated = |code: &str| tolerated.iter().any(|t| t == code);
    if is_tolerated(archive) || is_tolerated(current) {
        PairClass::Tolerated
    } else {
        PairClass::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn redirect_only() -> Vec<String> {
        vec![REDIRECT_STATUS.to_string()]
    }

    #[test]
    fn equal_codes_are_consistent() {
        assert_eq!(
            classify_statuses("200", "200", &redirect_only()),
            PairClass::Consistent
        );
        assert_eq!(classify_statuses("", "", &redirect_only()), PairClass::Consistent);
    }

    #[test]
    fn redirect_on_either_side_is_never_an_error() {
        assert!(!classify_statuses("302", "200", &redirect_only()).is_error());
        assert!(!classify_statuses("200", "302", &redirect_only()).is_error());
        assert_eq!(
            classify_statuses("302", "404", &redirect_only()),
            PairClass::Tolerated
        );
    }

    #[test]
    fn differing_codes_are_errors() {
        assert!(classify_statuses("404", "200", &redirect_only()).is_error());
        assert!(classify_statuses("200", "404", &redirect_only()).is_error());
        assert!(classify_statuses("301", "200", &redirect_only()).is_error());
    }

    #[test]
    fn blank_status_differs_from_a_real_code() {
        assert!(classify_statuses("", "200", &redirect_only()).is_error());
    }

    #[test]
    fn codes_compare_as_text() {
        assert!(classify_statuses("200", "200.0", &redirect_only()).is_error());
        assert!(classify_statuses("302.0", "200", &redirect_only()).is_error());
    }

    #[test]
    fn without_tolerated_codes_redirect_mismatch_is_an_error() {
        assert!(classify_statuses("302", "200", &[]).is_error());
    }
}
