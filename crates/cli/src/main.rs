//! CLI entry point for dpk.

use clap::Parser;
use dpk_cli::CliConfig;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();
    config.run()
}
