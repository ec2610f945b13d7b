//! Deriver configuration and the process-wide key constants.

use crate::error::{Error, Result};
use crate::canonical::utf16_len;
use serde::{Deserialize, Serialize};

/// Key returned when there is no event to derive from.
pub const TRIVIAL_PARTITION_KEY: &str = "0";

/// Longest key returned verbatim, in UTF-16 code units.
pub const MAX_PARTITION_KEY_LENGTH: usize = 256;

/// Length of a hashed key: 64 digest bytes, two hex characters each.
pub const DIGEST_HEX_LEN: usize = 128;

/// How a present-but-falsy event is treated.
///
/// Two historical behaviors exist. They only differ for events such as `0`,
/// `false` or `""`: the strict rule hashes their JSON form, the legacy rule
/// maps them to the trivial key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FalsyEventPolicy {
    /// Only an absent or `null` event yields the trivial key.
    #[default]
    AbsentOrNull,
    /// Any falsy event yields the trivial key.
    AnyFalsy,
}

/// Immutable settings for a [`PartitionKeyDeriver`](crate::PartitionKeyDeriver).
///
/// Deserializable so hosts can embed it in their own configuration files;
/// missing fields take the defaults below.
///
/// ```rust
/// use dpk::{DeriverConfig, FalsyEventPolicy};
///
/// let config: DeriverConfig = serde_json::from_str(r#"{"falsy_event": "any_falsy"}"#).unwrap();
/// assert_eq!(config.falsy_event, FalsyEventPolicy::AnyFalsy);
/// assert_eq!(config.max_key_length, dpk::MAX_PARTITION_KEY_LENGTH);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeriverConfig {
    /// Returned when the event is absent (and, per policy, falsy).
    pub trivial_key: String,
    /// Candidates longer than this are hashed.
    pub max_key_length: usize,
    pub falsy_event: FalsyEventPolicy,
}

impl Default for DeriverConfig {
    fn default() -> Self {
        Self {
            trivial_key: TRIVIAL_PARTITION_KEY.to_string(),
            max_key_length: MAX_PARTITION_KEY_LENGTH,
            falsy_event: FalsyEventPolicy::default(),
        }
    }
}

impl DeriverConfig {
    /// Default settings with the legacy falsy-event rule.
    pub fn legacy() -> Self {
        Self {
            falsy_event: FalsyEventPolicy::AnyFalsy,
            ..Self::default()
        }
    }

    pub fn with_trivial_key(mut self, key: impl Into<String>) -> Self {
        self.trivial_key = key.into();
        self
    }

    pub fn with_max_key_length(mut self, max: usize) -> Self {
        self.max_key_length = max;
        self
    }

    pub fn with_falsy_event(mut self, policy: FalsyEventPolicy) -> Self {
        self.falsy_event = policy;
        self
    }

    /// Checks the settings are usable.
    ///
    /// # Errors
    ///
    /// `Error::InvalidConfig` if the max length is zero, or the trivial key is
    /// empty or longer than the max length.
    pub fn validate(&self) -> Result<()> {
        if self.max_key_length == 0 {
            return Err(Error::InvalidConfig(
                "max_key_length must be greater than zero".to_string(),
            ));
        }
        if self.trivial_key.is_empty() {
            return Err(Error::InvalidConfig(
                "trivial_key must not be empty".to_string(),
            ));
        }
        if utf16_len(&self.trivial_key) > self.max_key_length {
            return Err(Error::InvalidConfig(format!(
                "trivial_key exceeds max_key_length ({})",
                self.max_key_length
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_constants() {
        let config = DeriverConfig::default();
        assert_eq!(config.trivial_key, "0");
        assert_eq!(config.max_key_length, 256);
        assert_eq!(config.falsy_event, FalsyEventPolicy::AbsentOrNull);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_legacy_policy() {
        assert_eq!(DeriverConfig::legacy().falsy_event, FalsyEventPolicy::AnyFalsy);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(DeriverConfig::default().with_max_key_length(0).validate().is_err());
        assert!(DeriverConfig::default().with_trivial_key("").validate().is_err());

        let err = DeriverConfig::default()
            .with_max_key_length(2)
            .with_trivial_key("abc")
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: DeriverConfig = serde_json::from_str(r#"{"max_key_length": 64}"#).unwrap();
        assert_eq!(config.max_key_length, 64);
        assert_eq!(config.trivial_key, TRIVIAL_PARTITION_KEY);
        assert_eq!(config.falsy_event, FalsyEventPolicy::AbsentOrNull);
    }
}
