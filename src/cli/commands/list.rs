//! CLI implementation for `--list`
//!
//! Prints the numbered build matrix, or a JSON array with `--json`.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::targets::{BuildMatrix, BuildTarget};
use crate::info_println;

use crate::cli::output;

/// JSON row for one target
#[derive(Debug, Serialize)]
struct ListEntry<'a> {
    number: usize,
    #[serde(flatten)]
    target: &'a BuildTarget,
}

/// Execute the list mode
pub fn execute(workspace: &Path, json: bool) -> Result<()> {
    let matrix = BuildMatrix::load(workspace)?;

    if json {
        println!("{}", render_json(&matrix)?);
        return Ok(());
    }

    info_println!("{}", output::banner());
    print!("{}", matrix.render_listing());
    Ok(())
}

fn render_json(matrix: &BuildMatrix) -> Result<String> {
    let entries: Vec<ListEntry<'_>> = matrix
        .include
        .iter()
        .enumerate()
        .map(|(idx, target)| ListEntry {
            number: idx + 1,
            target,
        })
        .collect();
    serde_json::to_string_pretty(&entries).context("Failed to serialize build list")
}
