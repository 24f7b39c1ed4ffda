//! Real-time buffer compositors
//!
//! These run once per hardware cycle on the audio thread. They never
//! allocate, lock or log; they only read the bound stream descriptors and
//! write into buffers that already exist. Registry invariants keep every
//! index in bounds, and slice indexing turns any broken precondition into a
//! panic instead of a stray write.
//!
//! ```text
//!  output:  [L R][L R]...  per stream  ──►  [c0 c1 c2 c3][c0 c1 c2 c3]...
//!  input:   [c0 c1 c2 c3][c0 c1 c2 c3]...  ──►  [L R][L R]...  per stream
//! ```

use super::channel::ChannelWidth;
use super::stream::{AudioInput, AudioOutput};
use crate::types::Sample;

/// Interleave bound output streams into the device's output buffer
///
/// Zeroes `frames_to_compose * frame_size` samples of `destination`, then
/// writes each output's frames starting at `frames_read_offset` of its
/// stereo buffer into its channel group. `frame_size` is the device's
/// physical output channel count.
pub fn compose_output(
    outputs: &[AudioOutput],
    destination: &mut [Sample],
    frames_to_compose: usize,
    frames_read_offset: usize,
    frame_size: usize,
) {
    let destination = &mut destination[..frames_to_compose * frame_size];
    destination.fill(0.0);
    if destination.is_empty() {
        return;
    }

    for output in outputs {
        let channels = output.channels();
        let base = channels.base();
        let source =
            &output.buffer().as_slice()[frames_read_offset..frames_read_offset + frames_to_compose];
        let frames = destination.chunks_exact_mut(frame_size).zip(source);

        match channels.width() {
            ChannelWidth::Mono => {
                for (frame, sample) in frames {
                    frame[base] = sample.downmix();
                }
            }
            ChannelWidth::Stereo => {
                for (frame, sample) in frames {
                    frame[base] = sample.left;
                    frame[base + 1] = sample.right;
                }
            }
            ChannelWidth::Wide(count) => {
                for (frame, sample) in frames {
                    for (c, slot) in frame[base..base + count].iter_mut().enumerate() {
                        *slot = sample.channel(c % 2);
                    }
                }
            }
        }
    }
}

/// De-interleave the device's input buffer into bound input streams
///
/// Writes `frames_to_push` frames into each input's stereo buffer starting
/// at `frames_write_offset`. `frame_size` is the device's physical input
/// channel count. Mono inputs only write the left channel.
pub fn compose_input(
    inputs: &mut [AudioInput],
    interleaved_source: &[Sample],
    frames_to_push: usize,
    frames_write_offset: usize,
    frame_size: usize,
) {
    // A single stereo input on a stereo device is a straight copy
    if frame_size == 2 && inputs.len() == 1 && inputs[0].channels().width() == ChannelWidth::Stereo
    {
        let start = frames_write_offset * 2;
        let len = frames_to_push * 2;
        inputs[0].buffer_mut().as_interleaved_mut()[start..start + len]
            .copy_from_slice(&interleaved_source[..len]);
        return;
    }

    let source = &interleaved_source[..frames_to_push * frame_size];
    if source.is_empty() {
        return;
    }

    for input in inputs.iter_mut() {
        let channels = input.channels();
        let base = channels.base();
        let width = channels.width();
        let destination = &mut input.buffer_mut().as_mut_slice()
            [frames_write_offset..frames_write_offset + frames_to_push];

        for (sample, frame) in destination.iter_mut().zip(source.chunks_exact(frame_size)) {
            match width {
                ChannelWidth::Mono => {
                    sample.left = frame[base];
                }
                // Wider groups never pass the registry; only a pair is read
                ChannelWidth::Stereo | ChannelWidth::Wide(_) => {
                    sample.left = frame[base];
                    sample.right = frame[base + 1];
                }
            }
        }
    }
}

/// Silence `frames_to_push` frames of every input from `frames_write_offset`
///
/// Used for cycles in which the device delivered no input data.
pub fn clear_input(inputs: &mut [AudioInput], frames_to_push: usize, frames_write_offset: usize) {
    let start = frames_write_offset * 2;
    let end = start + frames_to_push * 2;
    for input in inputs.iter_mut() {
        input.buffer_mut().as_interleaved_mut()[start..end].fill(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::channel::ChannelGroup;
    use crate::device::stream::{InputPath, OutputPath};
    use crate::types::{StereoBuffer, StereoSample};

    fn output_with(channels: ChannelGroup, frames: &[(f32, f32)]) -> AudioOutput {
        let mut out = AudioOutput::new(OutputPath::Master, channels);
        for (i, &(l, r)) in frames.iter().enumerate() {
            out.buffer_mut()[i] = StereoSample::new(l, r);
        }
        out
    }

    fn input(channels: ChannelGroup) -> AudioInput {
        AudioInput::new(InputPath::Microphone(0), channels)
    }

    #[test]
    fn test_empty_registry_composes_silence() {
        let mut dest = vec![9.0; 4 * 6];
        compose_output(&[], &mut dest, 4, 0, 6);
        assert!(dest.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_compose_only_touches_requested_region() {
        let mut dest = vec![9.0; 10];
        compose_output(&[], &mut dest, 2, 0, 4);
        assert_eq!(&dest[..8], &[0.0; 8]);
        assert_eq!(&dest[8..], &[9.0, 9.0]);
    }

    #[test]
    fn test_mono_output_downmixes() {
        let outputs = [output_with(ChannelGroup::mono(1), &[(2.0, 4.0), (-1.0, 0.0)])];
        let mut dest = vec![7.0; 2 * 3];

        compose_output(&outputs, &mut dest, 2, 0, 3);

        assert_eq!(dest, vec![0.0, 3.0, 0.0, 0.0, -0.5, 0.0]);
    }

    #[test]
    fn test_stereo_output_copies_unchanged() {
        let outputs = [output_with(ChannelGroup::stereo(2), &[(0.1, -0.2), (0.3, -0.4)])];
        let mut dest = vec![7.0; 2 * 4];

        compose_output(&outputs, &mut dest, 2, 0, 4);

        assert_eq!(dest, vec![0.0, 0.0, 0.1, -0.2, 0.0, 0.0, 0.3, -0.4]);
    }

    #[test]
    fn test_wide_output_cycles_stored_channels() {
        let outputs = [output_with(ChannelGroup::new(0, 3), &[(1.0, 2.0)])];
        let mut dest = vec![7.0; 4];

        compose_output(&outputs, &mut dest, 1, 0, 4);

        assert_eq!(dest, vec![1.0, 2.0, 1.0, 0.0]);
    }

    #[test]
    fn test_output_read_offset() {
        let outputs = [output_with(
            ChannelGroup::stereo(0),
            &[(1.0, 1.5), (2.0, 2.5), (3.0, 3.5), (4.0, 4.5)],
        )];
        let mut dest = vec![0.0; 4];

        compose_output(&outputs, &mut dest, 2, 2, 2);

        assert_eq!(dest, vec![3.0, 3.5, 4.0, 4.5]);
    }

    #[test]
    fn test_multiple_outputs_share_frame() {
        let outputs = [
            output_with(ChannelGroup::stereo(0), &[(0.5, 0.25)]),
            output_with(ChannelGroup::mono(3), &[(1.0, 0.0)]),
        ];
        let mut dest = vec![7.0; 5];

        compose_output(&outputs, &mut dest, 1, 0, 5);

        assert_eq!(dest, vec![0.5, 0.25, 0.0, 0.5, 0.0]);
    }

    #[test]
    fn test_general_input_deinterleaves() {
        // 4-channel device, 2 frames
        let source = [0.0, 1.0, 2.0, 3.0, 10.0, 11.0, 12.0, 13.0];
        let mut inputs = [input(ChannelGroup::stereo(2)), input(ChannelGroup::mono(1))];

        compose_input(&mut inputs, &source, 2, 1, 4);

        let stereo = inputs[0].buffer();
        assert_eq!(stereo[0], StereoSample::silence());
        assert_eq!(stereo[1], StereoSample::new(2.0, 3.0));
        assert_eq!(stereo[2], StereoSample::new(12.0, 13.0));

        let mono = inputs[1].buffer();
        assert_eq!(mono[1], StereoSample::new(1.0, 0.0));
        assert_eq!(mono[2], StereoSample::new(11.0, 0.0));
    }

    #[test]
    fn test_mono_input_leaves_right_channel() {
        let source = [5.0, 6.0];
        let mut inputs = [input(ChannelGroup::mono(0)), input(ChannelGroup::mono(1))];
        inputs[0].buffer_mut()[0] = StereoSample::new(9.0, 9.0);

        compose_input(&mut inputs, &source, 1, 0, 2);

        assert_eq!(inputs[0].buffer()[0], StereoSample::new(5.0, 9.0));
        assert_eq!(inputs[1].buffer()[0], StereoSample::new(6.0, 0.0));
    }

    #[test]
    fn test_fast_path_matches_general_path() {
        let source: Vec<f32> = (0..64).map(|i| i as f32 * 0.125 - 3.0).collect();

        let mut fast = [input(ChannelGroup::stereo(0))];
        compose_input(&mut fast, &source, 32, 5, 2);

        // A second stream forces the general path; the overlap is legal for inputs
        let mut general = [input(ChannelGroup::stereo(0)), input(ChannelGroup::stereo(0))];
        compose_input(&mut general, &source, 32, 5, 2);

        let to_bits = |stream: &AudioInput| -> Vec<u32> {
            stream
                .buffer()
                .as_interleaved()
                .iter()
                .map(|s| s.to_bits())
                .collect()
        };
        let fast_bits = to_bits(&fast[0]);
        for stream in &general {
            assert_eq!(to_bits(stream), fast_bits);
        }
    }

    #[test]
    fn test_clear_input_zeroes_exact_window() {
        let mut inputs = [input(ChannelGroup::stereo(0)), input(ChannelGroup::mono(1))];
        for stream in inputs.iter_mut() {
            *stream.buffer_mut() = StereoBuffer::from_interleaved(&[1.0; 16]);
        }

        clear_input(&mut inputs, 3, 2);

        for stream in &inputs {
            let samples = stream.buffer().as_interleaved();
            assert_eq!(&samples[..4], &[1.0; 4]);
            assert_eq!(&samples[4..10], &[0.0; 6]);
            assert_eq!(&samples[10..], &[1.0; 6]);
        }
    }

    #[test]
    fn test_zero_frames_is_a_no_op() {
        let mut inputs = [input(ChannelGroup::stereo(0))];
        compose_input(&mut inputs, &[], 0, 0, 4);
        clear_input(&mut inputs, 0, 0);

        let outputs = [output_with(ChannelGroup::stereo(0), &[(1.0, 1.0)])];
        let mut dest: Vec<f32> = Vec::new();
        compose_output(&outputs, &mut dest, 0, 0, 2);
        assert!(dest.is_empty());
    }
}
