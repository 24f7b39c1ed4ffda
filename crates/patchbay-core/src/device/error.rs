//! Sound device error types

use thiserror::Error;

use super::stream::{InputPath, OutputPath};

/// Errors returned by sound device configuration and channel binding
///
/// Every variant except [`SoundDeviceError::FatalConfiguration`] is local:
/// the registry is left unchanged and the caller may retry with a different
/// channel range.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SoundDeviceError {
    /// A new output binding overlaps a channel range that is already bound
    #[error("Output channels (base {base}, count {count}) clash with an existing output")]
    DuplicateOutputChannel { base: usize, count: usize },

    /// An output binding reaches past the device's physical output channels
    #[error("Output channels (base {base}, count {count}) exceed the device's {available} output channels")]
    ExcessiveOutputChannel {
        base: usize,
        count: usize,
        available: usize,
    },

    /// An input binding reaches past the device's physical input channels
    #[error("Input channels (base {base}, count {count}) exceed the device's {available} input channels")]
    ExcessiveInputChannel {
        base: usize,
        count: usize,
        available: usize,
    },

    /// Another output already carries this path
    #[error("Output {0} is already bound")]
    DuplicateOutputPath(OutputPath),

    /// Another input already feeds this path
    #[error("Input {0} is already bound")]
    DuplicateInputPath(InputPath),

    /// Logical inputs carry at most two channels
    #[error("Input streams carry at most 2 channels, got {count}")]
    UnsupportedInputWidth { count: usize },

    /// Device configuration that must never reach the real-time path
    #[error("Fatal device configuration: {0}")]
    FatalConfiguration(String),
}

impl SoundDeviceError {
    /// Whether this error must abort device initialisation
    pub fn is_fatal(&self) -> bool {
        matches!(self, SoundDeviceError::FatalConfiguration(_))
    }
}

/// Result type for sound device operations
pub type SoundDeviceResult<T> = Result<T, SoundDeviceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_configuration_errors_are_fatal() {
        assert!(SoundDeviceError::FatalConfiguration("too big".into()).is_fatal());
        assert!(!SoundDeviceError::DuplicateOutputChannel { base: 0, count: 2 }.is_fatal());
        assert!(!SoundDeviceError::UnsupportedInputWidth { count: 4 }.is_fatal());
        assert!(!SoundDeviceError::DuplicateOutputPath(OutputPath::Master).is_fatal());
    }

    #[test]
    fn test_messages_name_the_channel_span() {
        let err = SoundDeviceError::ExcessiveOutputChannel {
            base: 2,
            count: 2,
            available: 3,
        };
        assert_eq!(
            err.to_string(),
            "Output channels (base 2, count 2) exceed the device's 3 output channels"
        );
    }
}
