//! Build command implementation
//!
//! Selects a target from build.yaml, prepares the host directories, runs
//! west inside the build container and collects the firmware image.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::cli::output::{self, status};
use crate::config::layout::Layout;
use crate::core::artifact::collect_firmware;
use crate::core::clean::{clean_workspace, prepare_workspace};
use crate::core::command::{build_command, BuildCommand, CommandOptions};
use crate::core::select::{self, parse_choice, Choice, Selected, Selector};
use crate::core::settings::{Settings, SettingsFile, SettingsOverrides};
use crate::core::targets::BuildMatrix;
use crate::error::{BuildError, SelectionError};
use crate::info_println;
use crate::infra::container::{self, RunOutcome};

/// Build options
#[derive(Debug, Default)]
pub struct BuildOptions {
    /// Build configuration number (1-based)
    pub number: Option<usize>,
    /// Shield filter (substring)
    pub shield: Option<String>,
    /// Board filter (exact)
    pub board: Option<String>,
    /// Clean the west workspace and artifacts first
    pub clean: bool,
    /// Print the command without running it
    pub dry_run: bool,
    /// Container image override
    pub image: Option<String>,
    /// Container runtime override
    pub runtime: Option<String>,
}

/// Execute the build command
pub async fn execute(workspace: &Path, options: BuildOptions) -> Result<()> {
    info_println!("{}", output::banner());

    let matrix = BuildMatrix::load(workspace)?;
    let selector = Selector::from_flags(options.number, options.shield, options.board);

    let Some(selected) = choose_target(&matrix, &selector)? else {
        println!("Exiting...");
        return Ok(());
    };
    let target = selected.target;
    tracing::info!("Selected build #{}: {target}", selected.number);

    let settings_file = SettingsFile::load(workspace)?;
    let overrides = SettingsOverrides {
        image: options.image,
        runtime: options.runtime,
    };
    let settings = Settings::resolve(&overrides, &settings_file)?;
    let layout = Layout::new(workspace);

    let command = build_command(
        target,
        &layout,
        &CommandOptions {
            runtime: settings.runtime,
            image: settings.image.clone(),
            module_name: settings.module_name.clone(),
            has_module_manifest: workspace.join("zephyr").join("module.yml").is_file(),
        },
    );

    if options.dry_run {
        if options.clean {
            info_println!("\nWould clean: manual_build/west-workspace/ and manual_build/artifacts/");
        }
        print_command(target.primary_name(), &command);
        info_println!("Dry run: container not started");
        return Ok(());
    }

    prepare_workspace(&layout).context("Failed to prepare manual_build/")?;
    if options.clean {
        info_println!("\nCleaning dependency workspace and build artifacts");
        let result = clean_workspace(&layout).context("Failed to clean manual_build/")?;
        for dir in &result.removed {
            info_println!("  Cleaned {}/", layout.relative(dir).display());
        }
        info_println!();
    }

    settings.runtime.locate()?;
    print_command(target.primary_name(), &command);

    let outcome = container::run(&command.argv()).await?;
    match outcome {
        RunOutcome::Success => {
            info_println!("\n{}", output::rule());
            info_println!("{} Build completed successfully!", status::SUCCESS);
            info_println!("{}\n", output::rule());
        }
        RunOutcome::Failed(code) => {
            let reason = code.map_or_else(
                || "terminated by signal".to_string(),
                |c| format!("with error code {c}"),
            );
            eprintln!("\n{}", output::rule());
            eprintln!("{} Build failed {reason}", status::ERROR);
            eprintln!("{}\n", output::rule());
            bail!("Build failed for {target}");
        }
        RunOutcome::Interrupted => {
            return Err(BuildError::Interrupted.into());
        }
    }

    let firmware = command.firmware_path();
    info_println!("Original output: {}", firmware.display());

    match collect_firmware(&layout, &firmware, target)? {
        Some(collected) => {
            let relative = layout.relative(&collected.path);
            println!("{} Firmware copied to: {}", status::SUCCESS, relative.display());
            info_println!("  Size: {} bytes", collected.size);
            info_println!("  SHA-256: {}", collected.sha256);
            info_println!("\nTo flash: Copy the firmware to your board's USB drive");
            info_println!("  File: {}", relative.display());
        }
        None => {
            eprintln!(
                "{} Source file not found: {}",
                status::WARNING,
                firmware.display()
            );
        }
    }

    Ok(())
}

/// Resolve the selector to a target; `None` when the user quits
fn choose_target<'a>(matrix: &'a BuildMatrix, selector: &Selector) -> Result<Option<Selected<'a>>> {
    match selector {
        Selector::Number(number) => {
            let selected = select::by_number(matrix, *number)?;
            info_println!("\nSelected build #{}", selected.number);
            Ok(Some(selected))
        }
        Selector::Criteria { shield, board } => {
            match select::by_criteria(matrix, shield.as_deref(), board.as_deref()) {
                Ok(selected) => {
                    info_println!("\nFound matching build #{}:", selected.number);
                    info_println!("  {}", selected.target);
                    Ok(Some(selected))
                }
                Err(e @ SelectionError::NoMatch { .. }) => {
                    eprintln!("\nAvailable configurations:");
                    eprint!("{}", matrix.render_listing());
                    Err(e.into())
                }
                Err(e) => Err(e.into()),
            }
        }
        Selector::Interactive => {
            print!("{}", matrix.render_listing());
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut out = io::stdout();
            let choice = prompt_choice(&mut input, &mut out, matrix.len())
                .context("Failed to read selection")?;
            Ok(choice.and_then(|number| matrix.get(number).map(|target| Selected { number, target })))
        }
    }
}

/// Ask for a build number until a valid one is entered
///
/// Returns `None` on `q` or end of input.
fn prompt_choice<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    count: usize,
) -> io::Result<Option<usize>> {
    loop {
        write!(out, "Select build configuration (1-{count}) or 'q' to quit: ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(None);
        }

        match parse_choice(&line, count) {
            Choice::Number(n) => return Ok(Some(n)),
            Choice::Quit => return Ok(None),
            Choice::OutOfRange => writeln!(out, "Please enter a number between 1 and {count}")?,
            Choice::Invalid => writeln!(out, "Invalid input. Please enter a number.")?,
        }
    }
}

fn print_command(name: &str, command: &BuildCommand) {
    info_println!("\n{}", output::rule());
    info_println!("Building: {name}");
    info_println!("{}\n", output::rule());
    info_println!("Running: {}", command.summary());
    info_println!("Image: {}", command.image);
    info_println!("\nFull command string:\n{}\n", command.script);
}
