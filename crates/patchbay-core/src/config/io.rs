//! YAML profile I/O
//!
//! Loading never fails: a missing or unreadable profile yields defaults so a
//! device can still come up with a stereo pair on its first channels.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Load a profile from a YAML file, falling back to `T::default()`
///
/// ```ignore
/// let config: SoundDeviceConfig = load_config(Path::new("devices.yaml"));
/// ```
pub fn load_config<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        log::info!("load_config: {:?} doesn't exist, using defaults", path);
        return T::default();
    }

    let parsed = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile {:?}", path))
        .and_then(|contents| {
            serde_yaml::from_str::<T>(&contents)
                .with_context(|| format!("Failed to parse profile {:?}", path))
        });

    match parsed {
        Ok(config) => {
            log::info!("load_config: Loaded {:?}", path);
            config
        }
        Err(e) => {
            log::warn!("load_config: {:#}, using defaults", e);
            T::default()
        }
    }
}

/// Save a profile to a YAML file, creating parent directories as needed
pub fn save_config<T>(config: &T, path: &Path) -> Result<()>
where
    T: Serialize,
{
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create profile directory: {:?}", parent))?;
    }

    let yaml = serde_yaml::to_string(config).context("Failed to serialize profile to YAML")?;
    std::fs::write(path, yaml).with_context(|| format!("Failed to write profile: {:?}", path))?;

    log::info!("save_config: Saved {:?}", path);
    Ok(())
}
