//! Container build command construction
//!
//! Turns a [`BuildTarget`] into the argv of a `docker run` (or `podman run`)
//! invocation whose shell script prepares the west workspace and runs
//! `west build`. Nothing here touches the filesystem except the
//! `zephyr/module.yml` check done by the caller.

use std::path::PathBuf;

use super::targets::BuildTarget;
use crate::config::defaults::{ECHOED_ARGS, FIRMWARE_IMAGE};
use crate::config::layout::{Layout, CONTAINER_OUT, CONTAINER_REPO, CONTAINER_WORKSPACE};
use crate::infra::container::{ContainerRuntime, MountConfig};

/// Inputs that do not come from the build target
#[derive(Debug, Clone)]
pub struct CommandOptions {
    /// Container runtime
    pub runtime: ContainerRuntime,
    /// Container image
    pub image: String,
    /// Directory name of the repo's module inside the west workspace
    pub module_name: String,
    /// Whether the repo ships `zephyr/module.yml`
    pub has_module_manifest: bool,
}

/// A fully resolved container invocation
#[derive(Debug, Clone, PartialEq)]
pub struct BuildCommand {
    /// Runtime binary
    pub runtime: ContainerRuntime,
    /// Volume mounts, in argv order
    pub mounts: Vec<MountConfig>,
    /// Container image
    pub image: String,
    /// Script passed to `sh -c`
    pub script: String,
    /// Host build directory
    pub host_build_dir: PathBuf,
}

impl BuildCommand {
    /// Full argv, starting with the runtime binary
    pub fn argv(&self) -> Vec<String> {
        let mut args = vec![
            self.runtime.command().to_string(),
            "run".to_string(),
            "--rm".to_string(),
        ];
        for mount in &self.mounts {
            args.push("-v".to_string());
            args.push(mount.to_volume_arg());
        }
        args.push("-w".to_string());
        args.push(CONTAINER_WORKSPACE.to_string());
        args.push(self.image.clone());
        args.push("sh".to_string());
        args.push("-c".to_string());
        args.push(self.script.clone());
        args
    }

    /// Leading argv entries shown before the script, e.g. `docker run --rm -v ...`
    pub fn summary(&self) -> String {
        let argv = self.argv();
        format!("{}...", argv[..ECHOED_ARGS.min(argv.len())].join(" "))
    }

    /// Host path of the firmware image this build produces
    pub fn firmware_path(&self) -> PathBuf {
        self.host_build_dir.join(FIRMWARE_IMAGE)
    }
}

/// Build the container invocation for `target`
pub fn build_command(target: &BuildTarget, layout: &Layout, options: &CommandOptions) -> BuildCommand {
    let dir_name = target.build_dir_name();
    let mounts = vec![
        MountConfig::new(layout.root().to_path_buf(), PathBuf::from(CONTAINER_REPO)),
        MountConfig::new(layout.west_workspace(), PathBuf::from(CONTAINER_WORKSPACE)),
        MountConfig::new(layout.artifacts(), PathBuf::from(CONTAINER_OUT)),
    ];

    let mut steps = prepare_steps(&options.module_name);
    steps.push(west_build(target, &dir_name, options));

    let command = BuildCommand {
        runtime: options.runtime,
        mounts,
        image: options.image.clone(),
        script: steps.join(" && "),
        host_build_dir: layout.build_dir(&dir_name),
    };
    tracing::debug!("Build script: {}", command.script);
    command
}

/// Workspace preparation: copy config and module, init and update west
fn prepare_steps(module: &str) -> Vec<String> {
    let ws = CONTAINER_WORKSPACE;
    let repo = CONTAINER_REPO;
    vec![
        format!("mkdir -p {ws} {CONTAINER_OUT}"),
        format!("cd {ws}"),
        // west init -l needs the manifest repo inside the workspace
        format!("rm -rf {ws}/config && cp -R {repo}/config {ws}/config"),
        format!("rm -rf {ws}/{module} && mkdir -p {ws}/{module}/zephyr"),
        format!("if [ -d {repo}/boards ]; then cp -R {repo}/boards {ws}/{module}/; fi"),
        format!("if [ -d {repo}/dts ]; then cp -R {repo}/dts {ws}/{module}/; fi"),
        format!(
            "if [ -f {repo}/zephyr/module.yml ]; then cp {repo}/zephyr/module.yml {ws}/{module}/zephyr/module.yml; fi"
        ),
        format!("[ -d .west ] || west init -l {ws}/config"),
        format!("cd {ws}"),
        // Dependencies are fetched once and kept until --clean
        "if [ ! -d zmk ]; then west update; fi".to_string(),
        "west zephyr-export".to_string(),
    ]
}

/// The `west build` line for one target
fn west_build(target: &BuildTarget, dir_name: &str, options: &CommandOptions) -> String {
    let ws = CONTAINER_WORKSPACE;
    let mut parts = vec![format!(
        "west build -s zmk/app -d \"{CONTAINER_OUT}/{dir_name}\" -b {} --pristine",
        target.board
    )];

    // Snippets are west flags and must precede the CMake separator
    if let Some(snippet) = target.snippet.as_deref().filter(|s| !s.is_empty()) {
        parts.push(format!("-S \"{snippet}\""));
    }

    parts.push("--".to_string());
    parts.push(format!("-DZMK_CONFIG={ws}/config"));

    if options.has_module_manifest {
        parts.push(format!("-DZMK_EXTRA_MODULES={ws}/{}", options.module_name));
    }

    if let Some(shield) = &target.shield {
        parts.push(format!("-DSHIELD=\"{shield}\""));
    }

    if let Some(args) = target.cmake_args.as_deref().filter(|s| !s.is_empty()) {
        parts.push(args.to_string());
    }

    parts.join(" ")
}
