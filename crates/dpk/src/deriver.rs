//! Partition key derivation.
//!
//! Resolution order, first match wins:
//!
//! 1. No event (or, per [`FalsyEventPolicy`], a null/falsy one): the trivial key
//! 2. A truthy `partitionKey` that fits in the max length: returned as text
//! 3. A truthy `partitionKey` that is too long: SHA3-512 of its text
//! 4. Otherwise: SHA3-512 of the canonical JSON of the whole event

use crate::candidate::{is_truthy, Candidate};
use crate::canonical::{to_canonical_string, utf16_len};
use crate::config::{DeriverConfig, FalsyEventPolicy};
use crate::digest::sha3_512_hex;
use crate::error::Result;
use crate::shape::{shape_of, Shape};
use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;
use tracing::{debug, trace};

/// Derives partition keys from events.
///
/// Implementations are stateless and thread-safe, so one deriver can serve
/// every producer in a process.
pub trait KeyDeriver: Send + Sync + 'static {
    /// Derives a key from an event already lowered to JSON.
    fn derive_value(&self, event: Option<&Value>) -> Result<String>;

    /// Derives a key from any serializable event.
    ///
    /// # Errors
    ///
    /// `Error::Serialization` if the event cannot be represented as JSON.
    fn derive<T>(&self, event: Option<&T>) -> Result<String>
    where
        T: Serialize + ?Sized,
        Self: Sized;
}

/// The standard deriver: explicit key when short enough, SHA3-512 otherwise.
#[derive(Clone, Debug, Default)]
pub struct PartitionKeyDeriver {
    config: DeriverConfig,
}

impl PartitionKeyDeriver {
    /// Creates a deriver with validated settings.
    pub fn new(config: DeriverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DeriverConfig {
        &self.config
    }

    fn is_trivial(&self, event: &Value) -> bool {
        match self.config.falsy_event {
            FalsyEventPolicy::AbsentOrNull => event.is_null(),
            FalsyEventPolicy::AnyFalsy => !is_truthy(event),
        }
    }

    // A NaN or infinite event lowers to `null` but is still present: it is
    // hashed as `null` unless the legacy rule treats it (NaN only) as falsy.
    fn derive_non_finite(&self, f: f64) -> String {
        if self.config.falsy_event == FalsyEventPolicy::AnyFalsy && f.is_nan() {
            trace!("NaN event, using trivial key");
            return self.config.trivial_key.clone();
        }
        debug!(value = f, "non-finite event, hashing as null");
        sha3_512_hex(&to_canonical_string(&Value::Null))
    }
}

impl KeyDeriver for PartitionKeyDeriver {
    fn derive_value(&self, event: Option<&Value>) -> Result<String> {
        let event = match event {
            Some(event) if !self.is_trivial(event) => event,
            _ => {
                trace!(policy = ?self.config.falsy_event, "no event, using trivial key");
                return Ok(self.config.trivial_key.clone());
            }
        };

        let text = match Candidate::from_event(event).into_text() {
            Some(text) => {
                let len = utf16_len(&text);
                if len <= self.config.max_key_length {
                    trace!(len, "using explicit partition key");
                    return Ok(text.into_owned());
                }
                debug!(
                    len,
                    max = self.config.max_key_length,
                    "partition key too long, hashing"
                );
                text
            }
            None => {
                trace!("no usable partition key, hashing event");
                Cow::Owned(to_canonical_string(event))
            }
        };

        Ok(sha3_512_hex(&text))
    }

    fn derive<T>(&self, event: Option<&T>) -> Result<String>
    where
        T: Serialize + ?Sized,
        Self: Sized,
    {
        let Some(event) = event else {
            return self.derive_value(None);
        };
        let value = serde_json::to_value(event)?;
        if value.is_null() {
            if let Shape::NonFinite(f) = shape_of(event) {
                return Ok(self.derive_non_finite(f));
            }
        }
        self.derive_value(Some(&value))
    }
}

/// Derives a key with the default settings.
///
/// ```rust
/// use serde_json::json;
///
/// let key = dpk::deterministic_partition_key(Some(&json!({"partitionKey": {"badKey": 998}}))).unwrap();
/// assert_eq!(key, r#"{"badKey":998}"#);
/// ```
pub fn deterministic_partition_key<T>(event: Option<&T>) -> Result<String>
where
    T: Serialize + ?Sized,
{
    PartitionKeyDeriver::default().derive(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::is_digest;
    use serde_json::json;

    #[test]
    fn test_absent_event() {
        let deriver = PartitionKeyDeriver::default();
        assert_eq!(deriver.derive_value(None).unwrap(), "0");
        assert_eq!(deriver.derive_value(Some(&Value::Null)).unwrap(), "0");
    }

    #[test]
    fn test_falsy_event_policies() {
        let strict = PartitionKeyDeriver::default();
        let legacy = PartitionKeyDeriver::new(DeriverConfig::legacy()).unwrap();

        for event in [json!(0), json!(false), json!("")] {
            let key = strict.derive_value(Some(&event)).unwrap();
            assert!(is_digest(&key), "strict rule should hash {}", event);
            assert_eq!(key, sha3_512_hex(&to_canonical_string(&event)));
            assert_eq!(legacy.derive_value(Some(&event)).unwrap(), "0");
        }
    }

    #[test]
    fn test_custom_config() {
        let config = DeriverConfig::default()
            .with_trivial_key("none")
            .with_max_key_length(4);
        let deriver = PartitionKeyDeriver::new(config).unwrap();

        assert_eq!(deriver.derive_value(None).unwrap(), "none");
        assert_eq!(deriver.derive_value(Some(&json!({"partitionKey": "abcd"}))).unwrap(), "abcd");
        assert_eq!(
            deriver.derive_value(Some(&json!({"partitionKey": "abcde"}))).unwrap(),
            sha3_512_hex("abcde")
        );
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        assert!(PartitionKeyDeriver::new(DeriverConfig::default().with_max_key_length(0)).is_err());
    }

    #[test]
    fn test_length_counts_utf16_units() {
        let deriver = PartitionKeyDeriver::new(DeriverConfig::default().with_max_key_length(4)).unwrap();
        // Two crabs are four UTF-16 units.
        assert_eq!(deriver.derive_value(Some(&json!({"partitionKey": "🦀🦀"}))).unwrap(), "🦀🦀");
        assert!(is_digest(
            &deriver.derive_value(Some(&json!({"partitionKey": "🦀🦀a"}))).unwrap()
        ));
    }

    #[test]
    fn test_non_finite_event_is_hashed_as_null() {
        let strict = PartitionKeyDeriver::default();
        let legacy = PartitionKeyDeriver::new(DeriverConfig::legacy()).unwrap();
        let null_digest = sha3_512_hex("null");

        assert_eq!(strict.derive(Some(&f64::NAN)).unwrap(), null_digest);
        assert_eq!(strict.derive(Some(&f64::INFINITY)).unwrap(), null_digest);
        assert_eq!(strict.derive(Some(&f32::NEG_INFINITY)).unwrap(), null_digest);

        // NaN is falsy, infinity is not
        assert_eq!(legacy.derive(Some(&f64::NAN)).unwrap(), "0");
        assert_eq!(legacy.derive(Some(&f64::INFINITY)).unwrap(), null_digest);
    }

    #[test]
    fn test_unit_event_is_trivial() {
        let deriver = PartitionKeyDeriver::default();
        assert_eq!(deriver.derive(Some(&())).unwrap(), "0");
        assert_eq!(deriver.derive(Some(&None::<f64>)).unwrap(), "0");
    }
}
