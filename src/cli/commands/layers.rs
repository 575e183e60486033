//! CLI implementation for `--print-layers`

use anyhow::Result;

use crate::core::layers::render_header;

/// Print the keymap layer header to stdout
pub fn execute() -> Result<()> {
    print!("{}", render_header());
    Ok(())
}
