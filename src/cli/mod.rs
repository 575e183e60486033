//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no business logic - that belongs in the [`crate::core`] module.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

/// Build ZMK firmware locally in the ZMK build container
///
/// Reads build.yaml, selects a board/shield target and runs west inside
/// Docker (or Podman). Firmware ends up in manual_build/artifacts/output/.
#[derive(Parser, Debug)]
#[command(name = "zmk-build")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
Examples:
  # Interactive mode (default)
  zmk-build

  # Build by index number
  zmk-build -n 1

  # Build by shield name (partial match)
  zmk-build -s nice_dongle

  # Build by board and shield
  zmk-build -b nice_nano_v2 -s \"nice_dongle dongle_display\"

  # List available configurations
  zmk-build -l")]
pub struct Cli {
    /// Build configuration number (1-based index)
    #[arg(short, long, value_name = "N")]
    pub number: Option<usize>,

    /// Shield name (or partial match)
    #[arg(short, long, value_name = "SHIELD")]
    pub shield: Option<String>,

    /// Board name (exact match, case-insensitive)
    #[arg(short, long, value_name = "BOARD")]
    pub board: Option<String>,

    /// List available build configurations and exit
    #[arg(short, long)]
    pub list: bool,

    /// Delete the local west workspace and artifacts so dependencies are re-downloaded
    #[arg(long, visible_alias = "clean-deps")]
    pub clean: bool,

    /// Print the container command without running it
    #[arg(long)]
    pub dry_run: bool,

    /// Print the keymap layer header and exit
    #[arg(long)]
    pub print_layers: bool,

    /// Workspace root (defaults to the nearest directory containing build.yaml)
    #[arg(short, long, env = "ZMK_BUILD_WORKSPACE", value_name = "PATH")]
    pub workspace: Option<PathBuf>,

    /// Container image
    #[arg(long, env = "ZMK_BUILD_IMAGE", value_name = "IMAGE")]
    pub image: Option<String>,

    /// Container runtime (docker or podman)
    #[arg(long, env = "ZMK_BUILD_RUNTIME", value_name = "RUNTIME")]
    pub runtime: Option<String>,

    /// Enable verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors and the build itself
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format for scripting (with --list)
    #[arg(long, global = true)]
    pub json: bool,
}

impl Cli {
    /// Execute the CLI command
    pub async fn run(self) -> Result<()> {
        if self.print_layers {
            return commands::layers::execute();
        }

        let current_dir = std::env::current_dir()?;
        let workspace =
            crate::core::settings::discover_workspace(self.workspace.as_deref(), &current_dir);
        tracing::debug!("Workspace root: {}", workspace.display());

        if self.list {
            return commands::list::execute(&workspace, self.json);
        }

        let options = commands::build::BuildOptions {
            number: self.number,
            shield: self.shield,
            board: self.board,
            clean: self.clean,
            dry_run: self.dry_run,
            image: self.image,
            runtime: self.runtime,
        };
        commands::build::execute(&workspace, options).await
    }
}
