//! Capture records and page identities.

use serde::{Deserialize, Serialize};

/// One observed resource request from a single page visit.
///
/// `status_code` is an opaque token: it is compared textually and may be
/// blank when the request failed below HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureRecord {
    pub url: String,
    #[serde(default)]
    pub status_code: String,
    #[serde(default)]
    pub resource_type: String,
}

impl CaptureRecord {
    pub fn new(
        url: impl Into<String>,
        status_code: impl Into<String>,
        resource_type: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            status_code: status_code.into(),
            resource_type: resource_type.into(),
        }
    }
}

/// Which side of a comparison a capture belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Current,
    Archive,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Current => write!(f, "current"),
            Self::Archive => write!(f, "archive"),
        }
    }
}

/// Side of a capture together with the data only that side carries.
///
/// Archived captures are pinned to a snapshot date; live captures are not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "side", rename_all = "snake_case")]
pub enum CaptureSide {
    Current,
    Archive { date: Option<String> },
}

impl CaptureSide {
    pub fn side(&self) -> Side {
        match self {
            Self::Current => Side::Current,
            Self::Archive { .. } => Side::Archive,
        }
    }

    pub fn date(&self) -> Option<&str> {
        match self {
            Self::Current => None,
            Self::Archive { date } => date.as_deref(),
        }
    }
}

/// One side of a page pair: the page URL and where its capture set lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageIdentity {
    pub url: String,
    /// Capture-set locator, opaque to the engine (a file name for the CSV store).
    pub locator: String,
    pub capture: CaptureSide,
}

impl PageIdentity {
    pub fn current(url: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            locator: locator.into(),
            capture: CaptureSide::Current,
        }
    }

    pub fn archive(
        url: impl Into<String>,
        locator: impl Into<String>,
        date: Option<String>,
    ) -> Self {
        Self {
            url: url.into(),
            locator: locator.into(),
            capture: CaptureSide::Archive { date },
        }
    }

    pub fn side(&self) -> Side {
        self.capture.side()
    }
}
