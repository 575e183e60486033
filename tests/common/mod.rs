//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

use assert_fs::fixture::ChildPath;
use std::path::PathBuf;
use std::process::{Child, Command, Output, Stdio};
use tempfile::TempDir;

/// Test project context
///
/// Creates a temporary ZMK config repository and runs the zmk-build binary
/// against it.
pub struct TestProject {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

impl TestProject {
    /// Create a new test project in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Create a project with [`SAMPLE_BUILD_YAML`] and a `config/` directory
    pub fn with_sample_matrix() -> Self {
        let project = Self::new();
        project.create_file("build.yaml", SAMPLE_BUILD_YAML);
        project.create_file("config/west.yml", SAMPLE_WEST_YML);
        project
    }

    /// Get the path to the test project directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the test project
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Create a directory in the test project
    pub fn create_dir(&self, name: &str) {
        let path = self.dir.path().join(name);
        std::fs::create_dir_all(path).expect("Failed to create directory");
    }

    /// Check if a file exists in the test project
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Run zmk-build in the project directory with closed stdin
    pub fn run(&self, args: &[&str]) -> Output {
        self.run_with_stdin(args, "")
    }

    /// Run zmk-build in the project directory feeding `stdin`
    pub fn run_with_stdin(&self, args: &[&str], stdin: &str) -> Output {
        self.run_with(args, stdin, &[])
    }

    /// Run zmk-build with extra environment variables
    pub fn run_with(&self, args: &[&str], stdin: &str, envs: &[(&str, String)]) -> Output {
        use std::io::Write;

        let mut child = self
            .command(args, envs)
            .stdin(Stdio::piped())
            .spawn()
            .expect("Failed to execute zmk-build");
        {
            let mut pipe = child.stdin.take().expect("stdin is piped");
            // The binary may exit before reading (e.g. --list)
            let _ = pipe.write_all(stdin.as_bytes());
        }
        child.wait_with_output().expect("Failed to wait for zmk-build")
    }

    /// Start zmk-build without waiting for it
    #[allow(dead_code)]
    pub fn spawn_with(&self, args: &[&str], envs: &[(&str, String)]) -> Child {
        self.command(args, envs)
            .stdin(Stdio::null())
            .spawn()
            .expect("Failed to execute zmk-build")
    }

    /// A path in the project for `assert_fs` assertions
    #[allow(dead_code)]
    pub fn child(&self, name: &str) -> ChildPath {
        ChildPath::new(self.dir.path().join(name))
    }

    fn command(&self, args: &[&str], envs: &[(&str, String)]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_zmk-build"));
        cmd.current_dir(self.dir.path())
            .args(args)
            .env_remove("ZMK_BUILD_WORKSPACE")
            .env_remove("ZMK_BUILD_IMAGE")
            .env_remove("ZMK_BUILD_RUNTIME")
            .env_remove("RUST_LOG")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        for (key, value) in envs {
            cmd.env(key, value);
        }
        cmd
    }
}

/// Install a fake container runtime named `name` into `bin/` of the project
///
/// The fake records its argv in `runtime-args.txt`, writes `zmk.uf2` into
/// `{out}/{build_dir}/zephyr/` where `{out}` is the host side of the `/out`
/// mount, and exits with `exit_code`. Returns a PATH value with `bin/` first.
#[cfg(unix)]
#[allow(dead_code)]
pub fn install_fake_runtime(project: &TestProject, name: &str, build_dir: &str, exit_code: i32) -> String {
    let script = format!(
        r#"#!/bin/sh
printf '%s\n' "$@" > "{log}"
out=""
prev=""
for arg in "$@"; do
  if [ "$prev" = "-v" ]; then
    case "$arg" in
      *:/out) out="${{arg%:/out}}" ;;
    esac
  fi
  prev="$arg"
done
if [ {exit_code} -eq 0 ]; then
  mkdir -p "$out/{build_dir}/zephyr"
  printf 'UF2' > "$out/{build_dir}/zephyr/zmk.uf2"
fi
exit {exit_code}
"#,
        log = project.path().join("runtime-args.txt").display(),
    );
    write_runtime_script(project, name, &script)
}

/// Install a fake runtime that records its argv, touches `runtime-started`
/// and then sleeps until killed
#[cfg(unix)]
#[allow(dead_code)]
pub fn install_hanging_runtime(project: &TestProject, name: &str) -> String {
    let script = format!(
        "#!/bin/sh\nprintf '%s\\n' \"$@\" > \"{log}\"\nprintf started > \"{marker}\"\nexec sleep 30\n",
        log = project.path().join("runtime-args.txt").display(),
        marker = project.path().join("runtime-started").display(),
    );
    write_runtime_script(project, name, &script)
}

/// Write an executable script to `bin/{name}` and return a PATH with `bin/` first
#[cfg(unix)]
#[allow(dead_code)]
pub fn write_runtime_script(project: &TestProject, name: &str, script: &str) -> String {
    use std::os::unix::fs::PermissionsExt;

    let bin = project.path().join("bin");
    std::fs::create_dir_all(&bin).expect("Failed to create bin/");
    let path = bin.join(name);
    std::fs::write(&path, script).expect("Failed to write fake runtime");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("Failed to chmod fake runtime");

    let system_path = std::env::var("PATH").unwrap_or_default();
    format!("{}:{system_path}", bin.display())
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Stdout of a run as a string
#[allow(dead_code)]
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Stderr of a run as a string
#[allow(dead_code)]
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Sample build matrix for testing
#[allow(dead_code)]
pub const SAMPLE_BUILD_YAML: &str = r#"
include:
  - board: nice_nano_v2
    shield: charybdis_left
  - board: nice_nano_v2
    shield: charybdis_right
    snippet: studio-rpc-usb-uart
    cmake-args: -DCONFIG_ZMK_STUDIO=y
  - board: nice_nano_v2
    shield: nice_dongle dongle_display
  - board: seeeduino_xiao_ble
    shield: charybdis_left
"#;

/// Sample west manifest for testing
#[allow(dead_code)]
pub const SAMPLE_WEST_YML: &str = r#"
manifest:
  remotes:
    - name: zmkfirmware
      url-base: https://github.com/zmkfirmware
  projects:
    - name: zmk
      remote: zmkfirmware
      revision: main
      import: app/west.yml
  self:
    path: config
"#;
