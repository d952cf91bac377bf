//! Controller configuration and its persisted form

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while validating or (de)serializing a configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Auto-activation is enabled with a zero delay")]
    ZeroAutoActivationDelay,

    #[error("Unsupported config version: {0}")]
    UnsupportedVersion(u32),

    #[error("Failed to serialize config: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize config: {0}")]
    DeserializationFailed(String),
}

/// Completion controller settings
///
/// Passed explicitly to the controller; there is no global instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// Format version (for future migrations)
    pub version: u32,
    /// Start the activation timer after activation-worthy characters
    pub auto_activation_enabled: bool,
    /// Delay before the activation timer fires, in milliseconds
    pub auto_activation_delay_ms: u64,
    /// Insert a sole match without showing the popup
    pub auto_insert_single_choice: bool,
    /// Insert parameter placeholders and track them for functions and templates
    pub parameter_assistance: bool,
    /// Hide a visible popup when the prefix becomes empty (otherwise show everything)
    pub hide_on_empty_prefix: bool,
    /// Hide the popup when provider cycling wraps back to the first provider
    pub hide_on_cycle_wrap: bool,
}

impl CompletionConfig {
    /// Current version of the config format
    pub const CURRENT_VERSION: u32 = 1;

    pub const DEFAULT_DELAY_MS: u64 = 200;

    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            auto_activation_enabled: true,
            auto_activation_delay_ms: Self::DEFAULT_DELAY_MS,
            auto_insert_single_choice: true,
            parameter_assistance: true,
            hide_on_empty_prefix: true,
            hide_on_cycle_wrap: true,
        }
    }

    pub fn auto_activation_delay(&self) -> Duration {
        Duration::from_millis(self.auto_activation_delay_ms)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.version != Self::CURRENT_VERSION {
            return Err(ConfigError::UnsupportedVersion(self.version));
        }
        if self.auto_activation_enabled && self.auto_activation_delay_ms == 0 {
            return Err(ConfigError::ZeroAutoActivationDelay);
        }
        Ok(())
    }

    /// Serializes to JSON
    pub fn to_json(&self) -> ConfigResult<String> {
        serde_json::to_string(self).map_err(|e| ConfigError::SerializationFailed(e.to_string()))
    }

    /// Deserializes and validates JSON
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;
        config.validate().inspect_err(|e| {
            warn!("Rejected completion config: {}", e);
        })?;
        Ok(config)
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self::new()
    }
}
