//! Channel registry: the bound logical streams of one device
//!
//! Outputs may never share a physical channel. Inputs may: the same physical
//! input can feed several logical consumers (e.g. vinyl control and a
//! microphone monitor).

use super::channel::ChannelWidth;
use super::error::{SoundDeviceError, SoundDeviceResult};
use super::stream::{AudioInput, AudioOutput, InputPath, OutputPath};

/// Ordered collections of bound output and input streams
///
/// Insertion order is preserved and is the order the compositors visit
/// streams in.
#[derive(Debug, Clone, Default)]
pub struct ChannelRegistry {
    outputs: Vec<AudioOutput>,
    inputs: Vec<AudioInput>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an output stream
    ///
    /// Fails with `DuplicateOutputChannel` if the range overlaps any bound
    /// output, then with `ExcessiveOutputChannel` if it reaches past
    /// `num_output_channels`, then with `DuplicateOutputPath` if another
    /// output already carries the same path. The registry is unchanged on
    /// failure.
    pub fn bind_output(
        &mut self,
        output: AudioOutput,
        num_output_channels: usize,
    ) -> SoundDeviceResult<()> {
        let channels = output.channels();

        if self
            .outputs
            .iter()
            .any(|bound| channels.clashes_with(&bound.channels()))
        {
            return Err(SoundDeviceError::DuplicateOutputChannel {
                base: channels.base(),
                count: channels.count(),
            });
        }

        if !channels.fits_within(num_output_channels) {
            return Err(SoundDeviceError::ExcessiveOutputChannel {
                base: channels.base(),
                count: channels.count(),
                available: num_output_channels,
            });
        }

        if self.output(output.path()).is_some() {
            return Err(SoundDeviceError::DuplicateOutputPath(output.path()));
        }

        self.outputs.push(output);
        Ok(())
    }

    /// Bind an input stream
    ///
    /// Overlapping inputs are allowed. Fails with `ExcessiveInputChannel` if
    /// the range reaches past `num_input_channels`, and with
    /// `UnsupportedInputWidth` for ranges wider than a stereo pair. Each path
    /// may only be fed once (`DuplicateInputPath`); the physical channels may
    /// be shared.
    pub fn bind_input(
        &mut self,
        input: AudioInput,
        num_input_channels: usize,
    ) -> SoundDeviceResult<()> {
        let channels = input.channels();

        if !channels.fits_within(num_input_channels) {
            return Err(SoundDeviceError::ExcessiveInputChannel {
                base: channels.base(),
                count: channels.count(),
                available: num_input_channels,
            });
        }

        if let ChannelWidth::Wide(count) = channels.width() {
            return Err(SoundDeviceError::UnsupportedInputWidth { count });
        }

        if self.input(input.path()).is_some() {
            return Err(SoundDeviceError::DuplicateInputPath(input.path()));
        }

        self.inputs.push(input);
        Ok(())
    }

    pub fn clear_outputs(&mut self) {
        self.outputs.clear();
    }

    pub fn clear_inputs(&mut self) {
        self.inputs.clear();
    }

    pub fn outputs(&self) -> &[AudioOutput] {
        &self.outputs
    }

    pub fn outputs_mut(&mut self) -> &mut [AudioOutput] {
        &mut self.outputs
    }

    pub fn inputs(&self) -> &[AudioInput] {
        &self.inputs
    }

    pub fn inputs_mut(&mut self) -> &mut [AudioInput] {
        &mut self.inputs
    }

    /// First bound output carrying `path`
    pub fn output(&self, path: OutputPath) -> Option<&AudioOutput> {
        self.outputs.iter().find(|o| o.path() == path)
    }

    pub fn output_mut(&mut self, path: OutputPath) -> Option<&mut AudioOutput> {
        self.outputs.iter_mut().find(|o| o.path() == path)
    }

    /// First bound input feeding `path`
    pub fn input(&self, path: InputPath) -> Option<&AudioInput> {
        self.inputs.iter().find(|i| i.path() == path)
    }

    pub fn input_mut(&mut self, path: InputPath) -> Option<&mut AudioInput> {
        self.inputs.iter_mut().find(|i| i.path() == path)
    }
}
