//! Command-line arguments and their mapping onto deriver settings.

use crate::commands::{derive_key, EventSource};
use anyhow::Context;
use clap::Parser;
use dpk::{
    DeriverConfig, FalsyEventPolicy, PartitionKeyDeriver, MAX_PARTITION_KEY_LENGTH,
    TRIVIAL_PARTITION_KEY,
};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

/// Derive a deterministic partition key from a JSON event.
#[derive(Debug, Parser)]
#[command(name = "dpk", version, about)]
pub struct CliConfig {
    /// Event as a JSON document. Omit it to derive the key of an absent event.
    #[arg(conflicts_with = "stdin")]
    pub event: Option<String>,

    /// Read the event JSON from standard input.
    #[arg(long)]
    pub stdin: bool,

    /// Map every falsy event (0, false, "") to the trivial key.
    #[arg(long)]
    pub legacy_falsy: bool,

    /// Longest key returned verbatim; longer keys are hashed.
    #[arg(long, default_value_t = MAX_PARTITION_KEY_LENGTH)]
    pub max_length: usize,

    /// Key returned for an absent event.
    #[arg(long, default_value = TRIVIAL_PARTITION_KEY)]
    pub trivial_key: String,

    /// Log the resolution branch to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliConfig {
    pub fn deriver_config(&self) -> DeriverConfig {
        let policy = if self.legacy_falsy {
            FalsyEventPolicy::AnyFalsy
        } else {
            FalsyEventPolicy::AbsentOrNull
        };
        DeriverConfig::default()
            .with_trivial_key(self.trivial_key.clone())
            .with_max_key_length(self.max_length)
            .with_falsy_event(policy)
    }

    pub fn event_source(&self) -> EventSource {
        match (&self.event, self.stdin) {
            (Some(text), _) => EventSource::Inline(text.clone()),
            (None, true) => EventSource::Reader,
            (None, false) => EventSource::Absent,
        }
    }

    /// Derives the key and prints it on stdout.
    pub fn run(&self) -> anyhow::Result<()> {
        init_logging(self.verbose);

        let deriver =
            PartitionKeyDeriver::new(self.deriver_config()).context("invalid deriver settings")?;
        let key = derive_key(&deriver, self.event_source(), io::stdin().lock())?;

        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", key)?;
        Ok(())
    }
}

// Logs go to stderr so stdout carries only the key.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
