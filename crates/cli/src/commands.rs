//! Key derivation from command-line input.

use anyhow::Context;
use dpk::{KeyDeriver, PartitionKeyDeriver};
use serde_json::Value;
use std::io::Read;

/// Where the event JSON comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventSource {
    /// No event at all.
    Absent,
    /// JSON passed as an argument.
    Inline(String),
    /// JSON read from the supplied reader (stdin).
    Reader,
}

/// Parses the event from `source` and derives its key.
///
/// `reader` is only consumed for `EventSource::Reader`.
pub fn derive_key<R: Read>(
    deriver: &PartitionKeyDeriver,
    source: EventSource,
    reader: R,
) -> anyhow::Result<String> {
    let event: Option<Value> = match source {
        EventSource::Absent => None,
        EventSource::Inline(text) => {
            Some(serde_json::from_str(&text).context("event argument is not valid JSON")?)
        }
        EventSource::Reader => {
            Some(serde_json::from_reader(reader).context("stdin is not valid JSON")?)
        }
    };

    let key = deriver
        .derive_value(event.as_ref())
        .context("failed to derive partition key")?;
    Ok(key)
}
