//! Output formatting
//!
//! This module provides the global output mode (quiet/json/verbose),
//! status prefixes and the banners printed around a build.

use std::sync::OnceLock;

use crate::error::BuildError;

static OUTPUT_CONFIG: OnceLock<OutputConfig> = OnceLock::new();

/// Output mode chosen on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Suppress informational output
    pub quiet: bool,
    /// Machine-readable output where supported
    pub json: bool,
    /// Verbosity level (`-v` count)
    pub verbose: u8,
}

impl OutputConfig {
    /// Create an output configuration
    pub fn new(quiet: bool, json: bool, verbose: u8) -> Self {
        Self {
            quiet,
            json,
            verbose,
        }
    }

    /// Install as the process-wide output configuration
    ///
    /// Only the first call has an effect.
    pub fn apply_global(self) {
        let _ = OUTPUT_CONFIG.set(self);
    }

    /// The process-wide configuration, or the default if none was applied
    pub fn global() -> Self {
        OUTPUT_CONFIG.get().copied().unwrap_or_default()
    }

    /// Whether informational messages should be printed
    pub fn shows_info(&self) -> bool {
        !self.quiet && !self.json
    }

    /// Default tracing directive for the verbosity level
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            _ => tracing::Level::DEBUG,
        }
    }
}

/// Print an informational line unless output is quiet or JSON
#[macro_export]
macro_rules! info_println {
    ($($arg:tt)*) => {
        if $crate::cli::output::OutputConfig::global().shows_info() {
            println!($($arg)*);
        }
    };
}

/// Print an error and its causes to stderr
pub fn display_error(err: &anyhow::Error) {
    if let Some(BuildError::Interrupted) = err.downcast_ref::<BuildError>() {
        eprintln!("\n\n{err}");
        return;
    }
    eprintln!("{} Error: {err}", status::ERROR);
    for cause in err.chain().skip(1) {
        eprintln!("  caused by: {cause}");
    }
}

/// Horizontal rule used around build banners
pub fn rule() -> String {
    "=".repeat(60)
}

/// Tool banner printed at startup
pub fn banner() -> &'static str {
    "╔════════════════════════════════════════════╗\n\
     ║   ZMK Local Build (container)              ║\n\
     ╚════════════════════════════════════════════╝"
}

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";

    /// Warning prefix (yellow triangle)
    pub const WARNING: &str = "⚠";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shows_info() {
        assert!(OutputConfig::new(false, false, 0).shows_info());
        assert!(!OutputConfig::new(true, false, 0).shows_info());
        assert!(!OutputConfig::new(false, true, 0).shows_info());
    }

    #[test]
    fn test_log_level() {
        assert_eq!(OutputConfig::new(false, false, 0).log_level(), tracing::Level::WARN);
        assert_eq!(OutputConfig::new(false, false, 1).log_level(), tracing::Level::INFO);
        assert_eq!(OutputConfig::new(false, false, 3).log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_banner_lines_have_equal_width() {
        let widths: Vec<usize> = banner().lines().map(|l| l.chars().count()).collect();
        assert_eq!(widths.len(), 3);
        assert!(widths.iter().all(|w| *w == widths[0]));
    }
}
