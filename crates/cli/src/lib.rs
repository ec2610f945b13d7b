//! Developer CLI for deriving partition keys.
//!
//! A convenience for inspecting keys by hand; producers call the `dpk`
//! library directly.
//!
//! Provides:
//! - Deriving a key from a JSON event given as an argument or on stdin
//! - Overriding the deriver settings from flags
//! - Debug logging of the resolution branch

pub mod commands;
pub mod config;

pub use commands::{derive_key, EventSource};
pub use config::CliConfig;
