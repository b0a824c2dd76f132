//! Navigator timing and capacity configuration.
//!
//! Every field has a default, so an empty TOML document is a valid
//! configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Errors loading or validating a [`NavigatorConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The TOML text could not be parsed into a configuration.
    #[error("invalid navigator config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A bounded container was configured with capacity zero.
    #[error("'{field}' must be greater than zero")]
    ZeroCapacity { field: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    /// Delay between the start of a transition and its commit.
    pub commit_delay_ms: u64,
    /// Delay between the commit and clearing the path highlight.
    pub highlight_clear_delay_ms: u64,
    /// Stagger increment between business-logic step enqueues.
    pub step_stagger_ms: u64,
    pub history_capacity: usize,
    pub step_queue_capacity: usize,
    pub path_history_capacity: usize,
    /// Screen to start on. Defaults to the entry interface of the network.
    pub initial_screen: Option<String>,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        NavigatorConfig {
            commit_delay_ms: 300,
            highlight_clear_delay_ms: 1000,
            step_stagger_ms: 150,
            history_capacity: 10,
            step_queue_capacity: 20,
            path_history_capacity: 5,
            initial_screen: None,
        }
    }
}

impl NavigatorConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: NavigatorConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject zero-capacity containers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let capacities = [
            ("history_capacity", self.history_capacity),
            ("step_queue_capacity", self.step_queue_capacity),
            ("path_history_capacity", self.path_history_capacity),
        ];
        for (field, value) in capacities {
            if value == 0 {
                return Err(ConfigError::ZeroCapacity { field });
            }
        }
        Ok(())
    }

    pub fn commit_delay(&self) -> Duration {
        Duration::from_millis(self.commit_delay_ms)
    }

    pub fn highlight_clear_delay(&self) -> Duration {
        Duration::from_millis(self.highlight_clear_delay_ms)
    }

    pub fn step_stagger(&self) -> Duration {
        Duration::from_millis(self.step_stagger_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = NavigatorConfig::from_toml_str("").unwrap();
        assert_eq!(config, NavigatorConfig::default());
        assert_eq!(config.history_capacity, 10);
        assert_eq!(config.step_queue_capacity, 20);
        assert_eq!(config.path_history_capacity, 5);
    }

    #[test]
    fn test_partial_override() {
        let config = NavigatorConfig::from_toml_str(
            "commit_delay_ms = 50\ninitial_screen = \"login\"\n",
        )
        .unwrap();
        assert_eq!(config.commit_delay(), Duration::from_millis(50));
        assert_eq!(config.highlight_clear_delay_ms, 1000);
        assert_eq!(config.initial_screen.as_deref(), Some("login"));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = NavigatorConfig::from_toml_str("step_queue_capacity = 0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ZeroCapacity {
                field: "step_queue_capacity"
            }
        ));
    }

    #[test]
    fn test_bad_type_is_parse_error() {
        let err = NavigatorConfig::from_toml_str("commit_delay_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
