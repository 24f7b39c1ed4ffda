//! Path utilities for patchbay configuration files

use std::path::PathBuf;

/// Get the directory holding patchbay profiles
///
/// Returns: `{config_dir}/patchbay`, falling back to `./patchbay` when the
/// platform reports no config directory.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("patchbay")
}

/// Get the default path for a profile file
///
/// # Arguments
/// * `filename` - Profile file name (e.g., "devices.yaml")
pub fn default_config_path(filename: &str) -> PathBuf {
    default_config_dir().join(filename)
}
