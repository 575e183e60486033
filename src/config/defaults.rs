//! Default configuration values

/// Container image providing west and the ARM toolchain
pub const DEFAULT_IMAGE: &str = "zmkfirmware/zmk-build-arm:stable";

/// Container runtime used when neither flag, env nor settings choose one
pub const DEFAULT_RUNTIME: &str = "docker";

/// Name of the module directory the repo's boards are copied into
pub const DEFAULT_MODULE_NAME: &str = "zmk-config-charybdis";

/// Build matrix file at the workspace root
pub const BUILD_MATRIX_FILE: &str = "build.yaml";

/// Optional per-workspace settings file
pub const SETTINGS_FILE: &str = "zmk-build.toml";

/// Firmware image produced by `west build`, relative to the build directory
pub const FIRMWARE_IMAGE: &str = "zephyr/zmk.uf2";

/// Extension of the copied firmware image
pub const FIRMWARE_EXTENSION: &str = "uf2";

/// Number of leading argv entries echoed before the script
pub const ECHOED_ARGS: usize = 7;
