//! Device parameters
//!
//! Passive, validated state describing one physical sound card. The values
//! come from device enumeration and the user's saved profile; the
//! compositors rely on the frames-per-buffer bound holding everywhere.

use serde::{Deserialize, Serialize};

use super::error::{SoundDeviceError, SoundDeviceResult};
use crate::types::{DEFAULT_SAMPLE_RATE, MAX_BUFFER_LEN};

/// Sample rate, period size, channel counts and identity of a sound card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceParameters {
    /// Stable identifier reported by the host API (used for equality)
    internal_name: String,
    /// Human-readable device name
    display_name: String,
    /// Host API the device belongs to (e.g. "ALSA", "JACK", "CoreAudio")
    host_api: String,
    num_input_channels: usize,
    num_output_channels: usize,
    sample_rate: f64,
    frames_per_buffer: usize,
}

impl Default for DeviceParameters {
    fn default() -> Self {
        Self {
            internal_name: "Unknown Soundcard".to_string(),
            display_name: "Unknown Soundcard".to_string(),
            host_api: "Unknown API".to_string(),
            num_input_channels: 2,
            num_output_channels: 2,
            sample_rate: DEFAULT_SAMPLE_RATE,
            frames_per_buffer: 0,
        }
    }
}

impl DeviceParameters {
    /// Parameters for a named device with the given channel counts
    pub fn new(internal_name: impl Into<String>, inputs: usize, outputs: usize) -> Self {
        let internal_name = internal_name.into();
        Self {
            display_name: internal_name.clone(),
            internal_name,
            num_input_channels: inputs,
            num_output_channels: outputs,
            ..Default::default()
        }
    }

    pub fn internal_name(&self) -> &str {
        &self.internal_name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn host_api(&self) -> &str {
        &self.host_api
    }

    pub fn num_input_channels(&self) -> usize {
        self.num_input_channels
    }

    pub fn num_output_channels(&self) -> usize {
        self.num_output_channels
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn frames_per_buffer(&self) -> usize {
        self.frames_per_buffer
    }

    pub fn set_internal_name(&mut self, name: impl Into<String>) {
        self.internal_name = name.into();
    }

    pub fn set_display_name(&mut self, name: impl Into<String>) {
        self.display_name = name.into();
    }

    pub fn set_host_api(&mut self, api: impl Into<String>) {
        self.host_api = api.into();
    }

    pub fn set_num_input_channels(&mut self, channels: usize) {
        self.num_input_channels = channels;
    }

    pub fn set_num_output_channels(&mut self, channels: usize) {
        self.num_output_channels = channels;
    }

    /// Set the sample rate
    ///
    /// Non-positive and non-finite rates fall back to 44.1kHz instead of
    /// being rejected.
    pub fn set_sample_rate(&mut self, sample_rate: f64) {
        self.sample_rate = if sample_rate > 0.0 && sample_rate.is_finite() {
            sample_rate
        } else {
            log::debug!(
                "Sample rate {} unusable for {}, using {}Hz",
                sample_rate,
                self.internal_name,
                DEFAULT_SAMPLE_RATE
            );
            DEFAULT_SAMPLE_RATE
        };
    }

    /// Set the period size in frames
    ///
    /// A period must fit a stereo stream buffer (`frames * 2 <= MAX_BUFFER_LEN`).
    /// Anything larger is a `FatalConfiguration` error: the device must not be
    /// started with it.
    pub fn set_frames_per_buffer(&mut self, frames_per_buffer: usize) -> SoundDeviceResult<()> {
        if frames_per_buffer
            .checked_mul(2)
            .map_or(true, |samples| samples > MAX_BUFFER_LEN)
        {
            return Err(SoundDeviceError::FatalConfiguration(format!(
                "{} frames per buffer exceeds the {} sample limit for {}",
                frames_per_buffer, MAX_BUFFER_LEN, self.internal_name
            )));
        }
        self.frames_per_buffer = frames_per_buffer;
        Ok(())
    }

    /// Re-apply the setter rules to values that bypassed them (e.g. loaded
    /// from a profile)
    pub fn validate(&mut self) -> SoundDeviceResult<()> {
        if self.num_input_channels == 0 || self.num_output_channels == 0 {
            return Err(SoundDeviceError::FatalConfiguration(format!(
                "{} reports {} inputs and {} outputs; both must be at least 1",
                self.internal_name, self.num_input_channels, self.num_output_channels
            )));
        }
        self.set_sample_rate(self.sample_rate);
        self.set_frames_per_buffer(self.frames_per_buffer)
    }

    /// One-way latency of a single period in milliseconds
    pub fn latency_ms(&self) -> f64 {
        (self.frames_per_buffer as f64 / self.sample_rate) * 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = DeviceParameters::default();
        assert_eq!(params.internal_name(), "Unknown Soundcard");
        assert_eq!(params.host_api(), "Unknown API");
        assert_eq!(params.num_input_channels(), 2);
        assert_eq!(params.num_output_channels(), 2);
        assert_eq!(params.sample_rate(), 44100.0);
        assert_eq!(params.frames_per_buffer(), 0);
    }

    #[test]
    fn test_invalid_sample_rate_falls_back() {
        let mut params = DeviceParameters::default();

        params.set_sample_rate(48000.0);
        assert_eq!(params.sample_rate(), 48000.0);

        params.set_sample_rate(0.0);
        assert_eq!(params.sample_rate(), 44100.0);

        params.set_sample_rate(48000.0);
        params.set_sample_rate(-10.0);
        assert_eq!(params.sample_rate(), 44100.0);

        params.set_sample_rate(f64::NAN);
        assert_eq!(params.sample_rate(), 44100.0);
    }

    #[test]
    fn test_frames_per_buffer_bound() {
        let mut params = DeviceParameters::default();

        assert!(params.set_frames_per_buffer(MAX_BUFFER_LEN / 2).is_ok());
        assert_eq!(params.frames_per_buffer(), MAX_BUFFER_LEN / 2);

        let err = params.set_frames_per_buffer(MAX_BUFFER_LEN / 2 + 1).unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(params.frames_per_buffer(), MAX_BUFFER_LEN / 2);

        assert!(params.set_frames_per_buffer(usize::MAX).unwrap_err().is_fatal());
    }

    #[test]
    fn test_validate_catches_loaded_values() {
        let yaml = "internal_name: hw:1\nsample_rate: -1.0\nframes_per_buffer: 100000\n";
        let mut params: DeviceParameters = serde_yaml::from_str(yaml).unwrap();

        assert!(params.validate().unwrap_err().is_fatal());
        assert_eq!(params.sample_rate(), 44100.0);
        assert_eq!(params.num_output_channels(), 2);
    }

    #[test]
    fn test_validate_rejects_zero_channels() {
        let yaml = "internal_name: hw:2\nnum_output_channels: 0\n";
        let mut params: DeviceParameters = serde_yaml::from_str(yaml).unwrap();
        assert!(params.validate().unwrap_err().is_fatal());

        let mut params = DeviceParameters::new("hw:3", 0, 2);
        assert!(params.validate().unwrap_err().is_fatal());

        let mut params = DeviceParameters::new("hw:4", 1, 1);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_latency() {
        let mut params = DeviceParameters::new("hw:0", 2, 2);
        params.set_sample_rate(48000.0);
        params.set_frames_per_buffer(480).unwrap();
        assert!((params.latency_ms() - 10.0).abs() < 1e-9);
    }
}
