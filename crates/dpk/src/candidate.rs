//! The partition key candidate carried by an event.

use crate::canonical::to_canonical_string;
use serde_json::Value;
use std::borrow::Cow;

/// Field an event uses to carry an explicit partition key.
pub const PARTITION_KEY_FIELD: &str = "partitionKey";

/// Shape of an event's `partitionKey`, resolved once per derivation.
#[derive(Clone, Debug, PartialEq)]
pub enum Candidate<'a> {
    /// The event is not an object, has no key, or the key is falsy.
    Absent,
    /// A truthy string key.
    Text(&'a str),
    /// A truthy key of any other JSON type.
    Other(&'a Value),
}

impl<'a> Candidate<'a> {
    /// Inspects `event` for a usable `partitionKey`.
    pub fn from_event(event: &'a Value) -> Self {
        match event.get(PARTITION_KEY_FIELD) {
            Some(key) if is_truthy(key) => match key {
                Value::String(s) => Candidate::Text(s),
                other => Candidate::Other(other),
            },
            _ => Candidate::Absent,
        }
    }

    /// The key as text: strings as-is, everything else as canonical JSON.
    ///
    /// Returns `None` for `Absent`.
    pub fn into_text(self) -> Option<Cow<'a, str>> {
        match self {
            Candidate::Absent => None,
            Candidate::Text(s) => Some(Cow::Borrowed(s)),
            Candidate::Other(value) => Some(Cow::Owned(to_canonical_string(value))),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Candidate::Absent)
    }
}

/// JavaScript truthiness over JSON values.
///
/// `null`, `false`, zero and the empty string are falsy. Arrays and objects
/// are truthy even when empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!(-0.0), json!("")] {
            assert!(!is_truthy(&falsy), "{} should be falsy", falsy);
        }
        for truthy in [json!(true), json!(1), json!(-0.5), json!("0"), json!([]), json!({})] {
            assert!(is_truthy(&truthy), "{} should be truthy", truthy);
        }
    }

    #[test]
    fn test_from_event_string_key() {
        let event = json!({"partitionKey": "abc"});
        assert_eq!(Candidate::from_event(&event), Candidate::Text("abc"));
    }

    #[test]
    fn test_from_event_other_key() {
        let event = json!({"partitionKey": {"badKey": 998}});
        let candidate = Candidate::from_event(&event);
        assert_eq!(candidate, Candidate::Other(&json!({"badKey": 998})));
        assert_eq!(candidate.into_text().unwrap(), r#"{"badKey":998}"#);
    }

    #[test]
    fn test_from_event_absent() {
        for event in [
            json!({}),
            json!({"partitionKey": ""}),
            json!({"partitionKey": 0}),
            json!({"partitionKey": null}),
            json!({"partitionKey": false}),
            json!({"other": "abc"}),
            json!("donald_duck"),
            json!([1, 2, 3]),
            json!(42),
        ] {
            let candidate = Candidate::from_event(&event);
            assert!(candidate.is_absent(), "{} should have no candidate", event);
            assert_eq!(candidate.into_text(), None);
        }
    }
}
