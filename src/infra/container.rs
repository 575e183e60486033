//! Container runtime invocation (Docker/Podman)
//!
//! Locates the runtime binary and runs a prepared argv with inherited stdio,
//! so west's output streams straight to the terminal.

use std::fmt;
use std::path::PathBuf;
use std::process::Stdio;
use std::str::FromStr;

use tokio::process::Command;

use crate::error::ContainerError;

/// Container runtime type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerRuntime {
    /// Docker container runtime
    Docker,
    /// Podman container runtime
    Podman,
}

impl ContainerRuntime {
    /// Get the command name for this runtime
    pub fn command(&self) -> &'static str {
        match self {
            ContainerRuntime::Docker => "docker",
            ContainerRuntime::Podman => "podman",
        }
    }

    /// Locate the runtime binary on PATH
    pub fn locate(&self) -> Result<PathBuf, ContainerError> {
        which::which(self.command()).map_err(|_| ContainerError::RuntimeNotFound {
            runtime: self.command().to_string(),
        })
    }
}

impl fmt::Display for ContainerRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command())
    }
}

impl FromStr for ContainerRuntime {
    type Err = ContainerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "docker" => Ok(Self::Docker),
            "podman" => Ok(Self::Podman),
            _ => Err(ContainerError::UnknownRuntime { name: s.to_string() }),
        }
    }
}

/// Bind mount for a container volume
#[derive(Debug, Clone, PartialEq)]
pub struct MountConfig {
    /// Host path to mount
    pub host_path: PathBuf,
    /// Container path to mount to
    pub container_path: PathBuf,
}

impl MountConfig {
    /// Create a new bind mount
    pub fn new(host_path: PathBuf, container_path: PathBuf) -> Self {
        Self {
            host_path,
            container_path,
        }
    }

    /// Value for `-v`, e.g. `/home/me/cfg:/repo`
    pub fn to_volume_arg(&self) -> String {
        format!(
            "{}:{}",
            self.host_path.display(),
            self.container_path.display()
        )
    }
}

/// How a container run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Exited with status 0
    Success,
    /// Exited non-zero; `None` when killed by a signal
    Failed(Option<i32>),
    /// Ctrl-C was pressed; the container process was killed
    Interrupted,
}

/// Run `argv` (runtime binary first) with inherited stdio
///
/// Ctrl-C kills the child instead of leaving it running detached.
pub async fn run(argv: &[String]) -> Result<RunOutcome, ContainerError> {
    let Some((program, args)) = argv.split_first() else {
        return Err(ContainerError::SpawnFailed {
            runtime: String::new(),
            error: "empty command".to_string(),
        });
    };

    let spawn_err = |e: std::io::Error| ContainerError::SpawnFailed {
        runtime: program.clone(),
        error: e.to_string(),
    };

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .kill_on_drop(true)
        .spawn()
        .map_err(spawn_err)?;

    tracing::debug!("Spawned {program} (pid {:?})", child.id());

    tokio::select! {
        status = child.wait() => {
            let status = status.map_err(spawn_err)?;
            if status.success() {
                Ok(RunOutcome::Success)
            } else {
                Ok(RunOutcome::Failed(status.code()))
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted, stopping {program}");
            if let Err(e) = child.kill().await {
                tracing::warn!("Failed to kill {program}: {e}");
            }
            Ok(RunOutcome::Interrupted)
        }
    }
}
