//! Engine configuration.
//!
//! Every knob defaults to the reference policy, so an absent config file and
//! an empty one behave the same:
//!
//! ```toml
//! [matching]
//! threshold = 90
//!
//! [classification]
//! tolerated_status_codes = ["302"]
//!
//! [index]
//! success_status = "Extraction successful"
//! ```

use crate::classify::REDIRECT_STATUS;
use crate::error::ConfigError;
use crate::matcher::DEFAULT_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Extraction message the acquisition collaborator writes on success.
pub const SUCCESS_STATUS: &str = "Extraction successful";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub matching: MatchingConfig,
    pub classification: ClassificationConfig,
    pub index: IndexConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchingConfig {
    /// A candidate matches only when its score is strictly greater.
    pub threshold: u8,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassificationConfig {
    pub tolerated_status_codes: Vec<String>,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            tolerated_status_codes: vec![REDIRECT_STATUS.to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    pub success_status: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            success_status: SUCCESS_STATUS.to_string(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text, &path.display().to_string())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.matching.threshold > 100 {
            return Err(ConfigError::Invalid(format!(
                "matching.threshold must be within 0..=100, got {}",
                self.matching.threshold
            )));
        }
        if self.index.success_status.is_empty() {
            return Err(ConfigError::Invalid(
                "index.success_status must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn threshold(&self) -> u8 {
        self.matching.threshold
    }

    pub fn tolerated_status_codes(&self) -> &[String] {
        &self.classification.tolerated_status_codes
    }

    pub fn success_status(&self) -> &str {
        &self.index.success_status
    }
}
