//! Transaction settings for exactly-once JDBC destinations

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;

/// Commit attempts used when none are configured
pub const DEFAULT_TX_MAX_COMMIT_ATTEMPTS: u32 = 3;

/// Exactly-once group embedded in destination properties.
///
/// Both fields are optional; the getters return the effective values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, JsonSchema)]
pub struct JdbcExactlyOnceProperties {
    /// Maximum transaction commit attempts (default: 3)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub tx_max_commit_attempts: Option<u32>,

    /// Transaction timeout in seconds (default: none)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub tx_timeout_seconds: Option<u32>,
}

impl JdbcExactlyOnceProperties {
    /// Effective maximum commit attempts
    pub fn tx_max_commit_attempts(&self) -> u32 {
        self.tx_max_commit_attempts
            .unwrap_or(DEFAULT_TX_MAX_COMMIT_ATTEMPTS)
    }

    /// Set maximum commit attempts
    pub fn set_tx_max_commit_attempts(&mut self, attempts: Option<u32>) {
        self.tx_max_commit_attempts = attempts;
    }

    /// Effective transaction timeout in seconds, if any
    pub fn tx_timeout_seconds(&self) -> Option<u32> {
        self.tx_timeout_seconds
    }

    /// Set transaction timeout in seconds
    pub fn set_tx_timeout_seconds(&mut self, seconds: Option<u32>) {
        self.tx_timeout_seconds = seconds;
    }

    /// Resolved view for the sink's commit logic
    pub fn options(&self) -> ExactlyOnceOptions {
        ExactlyOnceOptions {
            max_commit_attempts: self.tx_max_commit_attempts(),
            timeout: self
                .tx_timeout_seconds()
                .map(|secs| Duration::from_secs(u64::from(secs))),
        }
    }
}

/// Resolved exactly-once settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExactlyOnceOptions {
    pub max_commit_attempts: u32,
    /// `None` means transactions never time out
    pub timeout: Option<Duration>,
}

impl Default for ExactlyOnceOptions {
    fn default() -> Self {
        JdbcExactlyOnceProperties::default().options()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let props = JdbcExactlyOnceProperties::default();
        assert_eq!(props.tx_max_commit_attempts(), 3);
        assert_eq!(props.tx_timeout_seconds(), None);
        assert_eq!(
            props.options(),
            ExactlyOnceOptions {
                max_commit_attempts: 3,
                timeout: None,
            }
        );
    }

    #[test]
    fn test_setters() {
        let mut props = JdbcExactlyOnceProperties::default();
        props.set_tx_max_commit_attempts(Some(5));
        props.set_tx_timeout_seconds(Some(30));
        assert_eq!(props.tx_max_commit_attempts(), 5);
        assert_eq!(props.options().timeout, Some(Duration::from_secs(30)));

        props.set_tx_max_commit_attempts(None);
        assert_eq!(props.tx_max_commit_attempts(), DEFAULT_TX_MAX_COMMIT_ATTEMPTS);
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let props = JdbcExactlyOnceProperties {
            tx_max_commit_attempts: Some(0),
            tx_timeout_seconds: None,
        };
        assert!(props.validate().is_err());
    }

    #[test]
    fn test_deserialize_partial() {
        let props: JdbcExactlyOnceProperties =
            serde_json::from_value(serde_json::json!({ "tx_timeout_seconds": 60 })).unwrap();
        assert_eq!(props.tx_max_commit_attempts(), 3);
        assert_eq!(props.tx_timeout_seconds(), Some(60));
    }
}
