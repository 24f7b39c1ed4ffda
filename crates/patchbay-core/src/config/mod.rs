//! Configuration for patchbay devices
//!
//! - Generic YAML profile loading/saving
//! - Default profile locations
//! - Sound device profiles (parameters plus channel routes)
//!
//! # Usage
//!
//! ```ignore
//! use patchbay_core::config::{default_config_path, load_config, SoundDeviceConfig};
//!
//! let config: SoundDeviceConfig = load_config(&default_config_path("devices.yaml"));
//! let device = config.build()?;
//! ```

mod io;
mod paths;
mod profile;

pub use io::{load_config, save_config};
pub use paths::{default_config_dir, default_config_path};
pub use profile::{RouteConfig, SoundDeviceConfig};
