//! Sound device profiles
//!
//! A profile stores a device's parameters together with the channel routes
//! the user picked for it:
//!
//! ```yaml
//! device:
//!   internal_name: "hw:CARD=Scarlett"
//!   display_name: "Scarlett 4i4"
//!   host_api: ALSA
//!   num_input_channels: 4
//!   num_output_channels: 4
//!   sample_rate: 48000.0
//!   frames_per_buffer: 256
//! outputs:
//!   - path: Master
//!     base: 0
//!     count: 2
//!   - path: Headphones
//!     base: 2
//!     count: 2
//! inputs:
//!   - path: !VinylControl 0
//!     base: 0
//!     count: 2
//! ```

use serde::{Deserialize, Serialize};

use crate::device::{
    AudioInput, AudioOutput, ChannelGroup, DeviceParameters, InputPath, OutputPath, SoundDevice,
    SoundDeviceResult,
};

/// A single route from a logical path to a physical channel range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteConfig<P> {
    pub path: P,
    pub base: usize,
    pub count: usize,
}

impl<P> RouteConfig<P> {
    pub fn new(path: P, base: usize, count: usize) -> Self {
        Self { path, base, count }
    }
}

/// Saved configuration for one sound device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundDeviceConfig {
    pub device: DeviceParameters,
    pub outputs: Vec<RouteConfig<OutputPath>>,
    pub inputs: Vec<RouteConfig<InputPath>>,
}

impl Default for SoundDeviceConfig {
    /// Master on the first stereo pair of an unknown card
    fn default() -> Self {
        Self {
            device: DeviceParameters::default(),
            outputs: vec![RouteConfig::new(OutputPath::Master, 0, 2)],
            inputs: Vec::new(),
        }
    }
}

impl SoundDeviceConfig {
    /// Build a stopped device from this profile
    ///
    /// Parameters are validated first; a fatal configuration error aborts the
    /// build. Routes the device rejects (clashes, out-of-range or empty
    /// channel groups, a path routed twice) are logged and skipped so the remaining routes still
    /// come up.
    pub fn build(&self) -> SoundDeviceResult<SoundDevice> {
        let mut params = self.device.clone();
        params.validate()?;

        let mut device = SoundDevice::new(params);

        for route in &self.outputs {
            let Some(channels) = ChannelGroup::try_new(route.base, route.count) else {
                log::warn!("Skipping output {}: empty channel group", route.path);
                continue;
            };
            skip_rejected(device.add_output(AudioOutput::new(route.path, channels)))?;
        }

        for route in &self.inputs {
            let Some(channels) = ChannelGroup::try_new(route.base, route.count) else {
                log::warn!("Skipping input {}: empty channel group", route.path);
                continue;
            };
            skip_rejected(device.add_input(AudioInput::new(route.path, channels)))?;
        }

        log::info!(
            "Built {} with {} of {} outputs and {} of {} inputs",
            device.internal_name(),
            device.registry().outputs().len(),
            self.outputs.len(),
            device.registry().inputs().len(),
            self.inputs.len()
        );
        Ok(device)
    }
}

/// Binding rejections are recoverable; anything fatal still propagates
fn skip_rejected(result: SoundDeviceResult<()>) -> SoundDeviceResult<()> {
    match result {
        Err(e) if e.is_fatal() => Err(e),
        _ => Ok(()),
    }
}
