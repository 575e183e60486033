//! zmk-build CLI - local containerized ZMK firmware builds
//!
//! Entry point for the zmk-build command-line application.

use anyhow::Result;
use clap::Parser;

use zmk_build::cli::output::{display_error, OutputConfig};
use zmk_build::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Apply output configuration globally
    let output_config = OutputConfig::new(cli.quiet, cli.json, cli.verbose);
    output_config.apply_global();

    // Initialize tracing subscriber; RUST_LOG refines the -v level
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(output_config.log_level().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Run the command and handle errors
    match cli.run().await {
        Ok(()) => Ok(()),
        Err(e) => {
            display_error(&e);
            std::process::exit(1);
        }
    }
}
