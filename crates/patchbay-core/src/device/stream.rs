//! Logical stream descriptors
//!
//! A logical stream is always stereo. Its descriptor pairs the stereo buffer
//! with the physical channel group it is routed to and a path naming what the
//! stream carries.

use serde::{Deserialize, Serialize};

use super::channel::ChannelGroup;
use crate::types::StereoBuffer;

/// What a logical output stream carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputPath {
    Master,
    Headphones,
    Bus(usize),
    Deck(usize),
}

/// What a logical input stream feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputPath {
    Microphone(usize),
    Auxiliary(usize),
    VinylControl(usize),
    RecordBroadcast,
}

impl std::fmt::Display for OutputPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputPath::Master => write!(f, "Master"),
            OutputPath::Headphones => write!(f, "Headphones"),
            OutputPath::Bus(i) => write!(f, "Bus {}", i + 1),
            OutputPath::Deck(i) => write!(f, "Deck {}", i + 1),
        }
    }
}

impl std::fmt::Display for InputPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputPath::Microphone(i) => write!(f, "Microphone {}", i + 1),
            InputPath::Auxiliary(i) => write!(f, "Auxiliary {}", i + 1),
            InputPath::VinylControl(i) => write!(f, "Vinyl Control {}", i + 1),
            InputPath::RecordBroadcast => write!(f, "Record/Broadcast"),
        }
    }
}

/// A logical output stream bound to physical output channels
///
/// Producers fill `buffer` ahead of each cycle; the output compositor reads it.
#[derive(Debug, Clone)]
pub struct AudioOutput {
    path: OutputPath,
    channels: ChannelGroup,
    buffer: StereoBuffer,
}

impl AudioOutput {
    /// Create an output with a pre-allocated, silent stream buffer
    pub fn new(path: OutputPath, channels: ChannelGroup) -> Self {
        Self::with_buffer(path, channels, StereoBuffer::for_stream())
    }

    /// Create an output around an existing buffer
    pub fn with_buffer(path: OutputPath, channels: ChannelGroup, buffer: StereoBuffer) -> Self {
        Self {
            path,
            channels,
            buffer,
        }
    }

    pub fn path(&self) -> OutputPath {
        self.path
    }

    pub fn channels(&self) -> ChannelGroup {
        self.channels
    }

    pub fn buffer(&self) -> &StereoBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut StereoBuffer {
        &mut self.buffer
    }
}

/// A logical input stream bound to physical input channels
///
/// The input compositor writes `buffer`; consumers read it after each cycle.
#[derive(Debug, Clone)]
pub struct AudioInput {
    path: InputPath,
    channels: ChannelGroup,
    buffer: StereoBuffer,
}

impl AudioInput {
    /// Create an input with a pre-allocated, silent stream buffer
    pub fn new(path: InputPath, channels: ChannelGroup) -> Self {
        Self::with_buffer(path, channels, StereoBuffer::for_stream())
    }

    /// Create an input around an existing buffer
    pub fn with_buffer(path: InputPath, channels: ChannelGroup, buffer: StereoBuffer) -> Self {
        Self {
            path,
            channels,
            buffer,
        }
    }

    pub fn path(&self) -> InputPath {
        self.path
    }

    pub fn channels(&self) -> ChannelGroup {
        self.channels
    }

    pub fn buffer(&self) -> &StereoBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut StereoBuffer {
        &mut self.buffer
    }
}
