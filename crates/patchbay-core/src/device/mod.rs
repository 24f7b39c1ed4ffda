//! Per-device channel routing and buffer composition
//!
//! A sound device exposes an interleaved physical channel layout. Logical
//! streams are always stereo and are bound to ranges of that layout:
//!
//! - **Control plane**: configures [`DeviceParameters`] and binds or clears
//!   streams on a stopped [`SoundDevice`]
//! - **Audio thread**: calls the compositors on a [`StreamingDevice`] once per
//!   hardware cycle, reading bindings but never changing them
//!
//! # Example Usage
//!
//! ```ignore
//! use patchbay_core::device::{
//!     AudioOutput, ChannelGroup, DeviceParameters, OutputPath, SoundDevice,
//! };
//!
//! let mut device = SoundDevice::new(DeviceParameters::new("hw:0", 2, 4));
//! device.set_frames_per_buffer(256)?;
//! device.add_output(AudioOutput::new(OutputPath::Master, ChannelGroup::stereo(0)))?;
//! device.add_output(AudioOutput::new(OutputPath::Headphones, ChannelGroup::stereo(2)))?;
//!
//! let mut stream = device.start_stream();
//! // in the driver callback:
//! stream.compose_output(output, frames, 0, 4);
//! ```

mod channel;
pub mod compositor;
mod error;
mod params;
mod registry;
mod sound_device;
mod stream;

pub use channel::{ChannelGroup, ChannelWidth};
pub use error::{SoundDeviceError, SoundDeviceResult};
pub use params::DeviceParameters;
pub use registry::ChannelRegistry;
pub use sound_device::{SoundDevice, StreamingDevice};
pub use stream::{AudioInput, AudioOutput, InputPath, OutputPath};
