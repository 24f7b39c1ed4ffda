//! One physical sound card: parameters plus channel bindings
//!
//! The device is split by phase. [`SoundDevice`] is the stopped device: the
//! control plane may change parameters and bind or clear streams.
//! [`SoundDevice::start_stream`] consumes it and hands back a
//! [`StreamingDevice`], which only exposes the per-cycle compositors and the
//! logical stream buffers. Bindings cannot change while a stream runs because
//! the streaming type has no way to reach them mutably.

use super::compositor;
use super::error::{SoundDeviceError, SoundDeviceResult};
use super::params::DeviceParameters;
use super::registry::ChannelRegistry;
use super::stream::{AudioInput, AudioOutput, InputPath, OutputPath};
use crate::types::{Sample, StereoBuffer};

/// A stopped sound device
#[derive(Debug, Clone, Default)]
pub struct SoundDevice {
    params: DeviceParameters,
    registry: ChannelRegistry,
}

impl SoundDevice {
    pub fn new(params: DeviceParameters) -> Self {
        Self {
            params,
            registry: ChannelRegistry::new(),
        }
    }

    pub fn params(&self) -> &DeviceParameters {
        &self.params
    }

    pub fn registry(&self) -> &ChannelRegistry {
        &self.registry
    }

    pub fn internal_name(&self) -> &str {
        self.params.internal_name()
    }

    pub fn set_display_name(&mut self, name: impl Into<String>) {
        self.params.set_display_name(name);
    }

    pub fn set_host_api(&mut self, api: impl Into<String>) {
        self.params.set_host_api(api);
    }

    pub fn set_sample_rate(&mut self, sample_rate: f64) {
        self.params.set_sample_rate(sample_rate);
    }

    pub fn set_frames_per_buffer(&mut self, frames_per_buffer: usize) -> SoundDeviceResult<()> {
        self.params.set_frames_per_buffer(frames_per_buffer)
    }

    /// Change the number of physical output channels
    ///
    /// Every bound output must still fit: a count that would cut into one is
    /// rejected with `ExcessiveOutputChannel` naming the first such output,
    /// and zero is a `FatalConfiguration`. Nothing changes on failure.
    pub fn set_num_output_channels(&mut self, channels: usize) -> SoundDeviceResult<()> {
        if channels == 0 {
            return Err(SoundDeviceError::FatalConfiguration(format!(
                "{} must keep at least one output channel",
                self.params.internal_name()
            )));
        }
        if let Some(bound) = self
            .registry
            .outputs()
            .iter()
            .map(AudioOutput::channels)
            .find(|group| !group.fits_within(channels))
        {
            return Err(SoundDeviceError::ExcessiveOutputChannel {
                base: bound.base(),
                count: bound.count(),
                available: channels,
            });
        }
        self.params.set_num_output_channels(channels);
        Ok(())
    }

    /// Change the number of physical input channels
    ///
    /// Same rules as [`SoundDevice::set_num_output_channels`], checked against
    /// the bound inputs.
    pub fn set_num_input_channels(&mut self, channels: usize) -> SoundDeviceResult<()> {
        if channels == 0 {
            return Err(SoundDeviceError::FatalConfiguration(format!(
                "{} must keep at least one input channel",
                self.params.internal_name()
            )));
        }
        if let Some(bound) = self
            .registry
            .inputs()
            .iter()
            .map(AudioInput::channels)
            .find(|group| !group.fits_within(channels))
        {
            return Err(SoundDeviceError::ExcessiveInputChannel {
                base: bound.base(),
                count: bound.count(),
                available: channels,
            });
        }
        self.params.set_num_input_channels(channels);
        Ok(())
    }

    /// Bind a logical output to this device's output channels
    pub fn add_output(&mut self, output: AudioOutput) -> SoundDeviceResult<()> {
        let channels = output.channels();
        let path = output.path();
        self.registry
            .bind_output(output, self.params.num_output_channels())
            .inspect(|_| {
                log::debug!(
                    "{}: bound output {} to {}",
                    self.params.internal_name(),
                    path,
                    channels
                )
            })
            .inspect_err(|e| {
                log::warn!("{}: rejected output {}: {}", self.params.internal_name(), path, e)
            })
    }

    /// Bind a logical input to this device's input channels
    pub fn add_input(&mut self, input: AudioInput) -> SoundDeviceResult<()> {
        let channels = input.channels();
        let path = input.path();
        self.registry
            .bind_input(input, self.params.num_input_channels())
            .inspect(|_| {
                log::debug!("{}: bound input {} to {}", self.params.internal_name(), path, channels)
            })
            .inspect_err(|e| {
                log::warn!("{}: rejected input {}: {}", self.params.internal_name(), path, e)
            })
    }

    pub fn clear_outputs(&mut self) {
        self.registry.clear_outputs();
    }

    pub fn clear_inputs(&mut self) {
        self.registry.clear_inputs();
    }

    /// Hand the device to the real-time side
    pub fn start_stream(self) -> StreamingDevice {
        log::info!(
            "{} [{}]: streaming {} outputs, {} inputs at {}Hz, {} frames (~{:.1}ms)",
            self.params.display_name(),
            self.params.host_api(),
            self.registry.outputs().len(),
            self.registry.inputs().len(),
            self.params.sample_rate(),
            self.params.frames_per_buffer(),
            self.params.latency_ms()
        );
        StreamingDevice { device: self }
    }
}

impl PartialEq for SoundDevice {
    fn eq(&self, other: &Self) -> bool {
        self.internal_name() == other.internal_name()
    }
}

impl PartialEq<str> for SoundDevice {
    fn eq(&self, other: &str) -> bool {
        self.internal_name() == other
    }
}

impl PartialEq<&str> for SoundDevice {
    fn eq(&self, other: &&str) -> bool {
        self.internal_name() == *other
    }
}

/// A sound device whose stream is running
///
/// Owned by the real-time side. Channel bindings and parameters are
/// read-only; only the contents of the logical stream buffers change.
#[derive(Debug)]
pub struct StreamingDevice {
    device: SoundDevice,
}

impl StreamingDevice {
    pub fn params(&self) -> &DeviceParameters {
        &self.device.params
    }

    pub fn registry(&self) -> &ChannelRegistry {
        &self.device.registry
    }

    /// Stereo buffer a producer fills for `path`
    pub fn output_buffer_mut(&mut self, path: OutputPath) -> Option<&mut StereoBuffer> {
        self.device
            .registry
            .output_mut(path)
            .map(AudioOutput::buffer_mut)
    }

    /// Stereo buffer a consumer reads for `path`
    pub fn input_buffer(&self, path: InputPath) -> Option<&StereoBuffer> {
        self.device.registry.input(path).map(AudioInput::buffer)
    }

    /// Interleave all bound outputs into `destination`
    ///
    /// `frame_size` is the number of channels in the driver's output buffer.
    pub fn compose_output(
        &self,
        destination: &mut [Sample],
        frames_to_compose: usize,
        frames_read_offset: usize,
        frame_size: usize,
    ) {
        compositor::compose_output(
            self.device.registry.outputs(),
            destination,
            frames_to_compose,
            frames_read_offset,
            frame_size,
        );
    }

    /// De-interleave `source` into all bound inputs
    pub fn compose_input(
        &mut self,
        source: &[Sample],
        frames_to_push: usize,
        frames_write_offset: usize,
        frame_size: usize,
    ) {
        compositor::compose_input(
            self.device.registry.inputs_mut(),
            source,
            frames_to_push,
            frames_write_offset,
            frame_size,
        );
    }

    /// Silence all bound inputs for a cycle without input data
    pub fn clear_input(&mut self, frames_to_push: usize, frames_write_offset: usize) {
        compositor::clear_input(
            self.device.registry.inputs_mut(),
            frames_to_push,
            frames_write_offset,
        );
    }

    /// Stop the stream and give the device back to the control plane
    pub fn stop_stream(self) -> SoundDevice {
        log::info!("{}: stream stopped", self.device.params.display_name());
        self.device
    }
}
