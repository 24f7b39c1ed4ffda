//! Patchbay Core - channel routing and buffer composition for sound devices

pub mod config;
pub mod device;
pub mod types;

pub use types::*;
