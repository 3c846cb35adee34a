//! Engine policy configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What happens to awarded points when an admin rejects a checklist item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionPolicy {
    /// Points and the completed count stay as awarded at submission time.
    #[default]
    RetainPoints,
    /// Points and the completed count awarded at submission are withdrawn,
    /// so a later resubmission can earn them again.
    ReversePoints,
}

/// Error returned when a configuration document cannot be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON for [`EngineConfig`].
    #[error("invalid engine configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// `max_write_attempts` must allow at least one attempt.
    #[error("max_write_attempts must be at least 1")]
    ZeroWriteAttempts,
}

/// Policy knobs for the lifecycle services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Point handling on checklist rejection.
    pub rejection_policy: RejectionPolicy,
    /// Upper bound on read-modify-write attempts when a concurrent writer
    /// changed the record between read and write.
    pub max_write_attempts: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rejection_policy: RejectionPolicy::RetainPoints,
            max_write_attempts: 3,
        }
    }
}

impl EngineConfig {
    /// Creates a configuration that withdraws points on rejection.
    #[must_use]
    pub fn reversing() -> Self {
        Self {
            rejection_policy: RejectionPolicy::ReversePoints,
            ..Self::default()
        }
    }

    /// Creates a configuration that never retries a conflicting write.
    #[must_use]
    pub fn single_attempt() -> Self {
        Self {
            max_write_attempts: 1,
            ..Self::default()
        }
    }

    /// Loads a configuration from a JSON document. Missing fields fall back
    /// to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::ZeroWriteAttempts`] when no write attempt is allowed.
    pub fn from_json_str(document: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(document)?;
        if config.max_write_attempts == 0 {
            return Err(ConfigError::ZeroWriteAttempts);
        }
        Ok(config)
    }

    /// Returns the number of write attempts, never less than one.
    #[must_use]
    pub fn write_attempts(&self) -> u32 {
        self.max_write_attempts.max(1)
    }
}
