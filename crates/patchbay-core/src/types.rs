//! Common types for patchbay
//!
//! This module contains the fundamental sample types shared by the channel
//! registry and the compositors, including the fixed-shape stereo buffer that
//! every logical stream uses.

use std::ops::{Index, IndexMut};

/// Maximum length of any sample buffer handled by a device (in samples)
///
/// A frame of a logical stream is two samples, so the largest period a device
/// may be configured with is `MAX_BUFFER_LEN / 2` frames.
pub const MAX_BUFFER_LEN: usize = 160_000;

/// Maximum number of frames a logical stream buffer holds
pub const MAX_STREAM_FRAMES: usize = MAX_BUFFER_LEN / 2;

/// Default sample rate used when a device reports no usable rate
pub const DEFAULT_SAMPLE_RATE: f64 = 44100.0;

/// Audio sample type (32-bit float, as delivered by the driver)
pub type Sample = f32;

/// A single stereo sample (left and right channels)
///
/// Uses `#[repr(C)]` to ensure predictable memory layout: [left, right].
/// This enables zero-copy conversion between `&[StereoSample]` and `&[f32]`
/// (interleaved format) using bytemuck.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct StereoSample {
    pub left: Sample,
    pub right: Sample,
}

impl StereoSample {
    /// Create a new stereo sample
    #[inline]
    pub fn new(left: Sample, right: Sample) -> Self {
        Self { left, right }
    }

    /// Create a silent stereo sample
    #[inline]
    pub fn silence() -> Self {
        Self::default()
    }

    /// Plain arithmetic mean of both channels (no clipping or scaling)
    #[inline]
    pub fn downmix(&self) -> Sample {
        (self.left + self.right) / 2.0
    }

    /// Get a channel by index (0 = left, anything else = right)
    #[inline]
    pub fn channel(&self, index: usize) -> Sample {
        if index == 0 {
            self.left
        } else {
            self.right
        }
    }

    /// Get the peak amplitude (max of abs(left), abs(right))
    #[inline]
    pub fn peak(&self) -> Sample {
        self.left.abs().max(self.right.abs())
    }
}

/// A buffer of stereo samples
///
/// Every logical stream owns one of these regardless of how many physical
/// channels it is routed to. The compositors address it as interleaved
/// `[L, R, L, R, ...]` storage through a zero-copy view.
#[derive(Debug, Clone)]
pub struct StereoBuffer {
    samples: Vec<StereoSample>,
}

impl StereoBuffer {
    /// Create a buffer filled with silence
    pub fn silence(len: usize) -> Self {
        Self {
            samples: vec![StereoSample::silence(); len],
        }
    }

    /// Create a buffer sized for the largest period a device can run with
    pub fn for_stream() -> Self {
        Self::silence(MAX_STREAM_FRAMES)
    }

    /// Create a buffer from interleaved samples [L, R, L, R, ...]
    pub fn from_interleaved(interleaved: &[Sample]) -> Self {
        assert!(interleaved.len() % 2 == 0, "Interleaved buffer must have even length");
        let samples = interleaved
            .chunks_exact(2)
            .map(|chunk| StereoSample::new(chunk[0], chunk[1]))
            .collect();
        Self { samples }
    }

    /// Get the number of stereo samples (frames) in the buffer
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the buffer is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Fill the buffer with silence
    pub fn fill_silence(&mut self) {
        self.samples.fill(StereoSample::silence());
    }

    /// Get a slice of the samples
    #[inline]
    pub fn as_slice(&self) -> &[StereoSample] {
        &self.samples
    }

    /// Get a mutable slice of the samples
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [StereoSample] {
        &mut self.samples
    }

    /// Get a zero-copy view of samples as interleaved f32 [L, R, L, R, ...]
    #[inline]
    pub fn as_interleaved(&self) -> &[Sample] {
        bytemuck::cast_slice(&self.samples)
    }

    /// Get a zero-copy mutable view of samples as interleaved f32 [L, R, L, R, ...]
    #[inline]
    pub fn as_interleaved_mut(&mut self) -> &mut [Sample] {
        bytemuck::cast_slice_mut(&mut self.samples)
    }

    /// Get the peak amplitude in the buffer
    pub fn peak(&self) -> Sample {
        self.samples.iter().map(|s| s.peak()).fold(0.0, Sample::max)
    }
}

impl Index<usize> for StereoBuffer {
    type Output = StereoSample;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.samples[index]
    }
}

impl IndexMut<usize> for StereoBuffer {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.samples[index]
    }
}

impl Default for StereoBuffer {
    fn default() -> Self {
        Self::for_stream()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downmix_is_plain_mean() {
        assert_eq!(StereoSample::new(2.0, 4.0).downmix(), 3.0);
        assert_eq!(StereoSample::new(-1.0, 1.0).downmix(), 0.0);
    }

    #[test]
    fn test_stereo_buffer_from_interleaved() {
        let interleaved = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let buffer = StereoBuffer::from_interleaved(&interleaved);

        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer[0].left, 1.0);
        assert_eq!(buffer[0].right, 2.0);
        assert_eq!(buffer[2].left, 5.0);
        assert_eq!(buffer[2].right, 6.0);
    }

    #[test]
    fn test_interleaved_view_matches_layout() {
        let mut buffer = StereoBuffer::silence(2);
        buffer[1] = StereoSample::new(0.25, -0.5);

        assert_eq!(buffer.as_interleaved(), &[0.0, 0.0, 0.25, -0.5]);

        buffer.as_interleaved_mut()[0] = 1.0;
        assert_eq!(buffer[0].left, 1.0);
        assert_eq!(buffer.peak(), 1.0);
    }

    #[test]
    fn test_stream_buffer_holds_max_period() {
        let buffer = StereoBuffer::for_stream();
        assert_eq!(buffer.len(), MAX_STREAM_FRAMES);
        assert_eq!(buffer.as_interleaved().len(), MAX_BUFFER_LEN);
    }
}
