//! CLI entry point for odd-color cell detection

use clap::Parser;
use oddcell::io::cli::{Cli, FileProcessor};
use tracing_subscriber::EnvFilter;

fn main() -> oddcell::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::builder()
        .with_default_directive(cli.log_level().into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut processor = FileProcessor::new(cli)?;
    processor.process()?;
    Ok(())
}
