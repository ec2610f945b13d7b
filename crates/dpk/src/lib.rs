//! Deterministic partition keys for event records.
//!
//! This crate derives a bounded string key from an arbitrary event so that a
//! producer can route records to partitions consistently:
//! - An explicit `partitionKey` field is used as-is when short enough
//! - Non-string keys are rendered as canonical JSON first
//! - Oversized or missing keys fall back to a SHA3-512 hex digest
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//!
//! let key = dpk::deterministic_partition_key(Some(&json!({ "partitionKey": "order-42" }))).unwrap();
//! assert_eq!(key, "order-42");
//!
//! let trivial = dpk::deterministic_partition_key::<serde_json::Value>(None).unwrap();
//! assert_eq!(trivial, dpk::TRIVIAL_PARTITION_KEY);
//! ```

pub mod candidate;
pub mod canonical;
pub mod config;
pub mod deriver;
pub mod digest;
pub mod error;
pub mod shape;

pub use candidate::Candidate;
pub use config::{
    DeriverConfig, FalsyEventPolicy, DIGEST_HEX_LEN, MAX_PARTITION_KEY_LENGTH,
    TRIVIAL_PARTITION_KEY,
};
pub use deriver::{deterministic_partition_key, KeyDeriver, PartitionKeyDeriver};
pub use error::{Error, Result};
