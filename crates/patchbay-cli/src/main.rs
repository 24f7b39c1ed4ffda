//! route-report - load a device profile and run one diagnostic cycle
//!
//! Builds the sound device described by a profile, prints its routing
//! table, then pushes one period of test levels through the output and
//! input compositors the way a driver callback would.
//!
//! ## Usage
//!
//! ```text
//! route-report [PROFILE]
//! ```
//!
//! Without `PROFILE`, `{config_dir}/patchbay/devices.yaml` is used (missing
//! profiles fall back to a master route on the first stereo pair).
//! A profile with a fatal configuration error aborts start-up with a
//! non-zero exit status before any stream is started.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};

use patchbay_core::config::{default_config_path, load_config, SoundDeviceConfig};
use patchbay_core::device::{SoundDevice, StreamingDevice};
use patchbay_core::{Sample, StereoSample};

const PROFILE_FILENAME: &str = "devices.yaml";

/// Period used when the profile leaves frames-per-buffer unset
const FALLBACK_FRAMES: usize = 256;

fn main() -> ExitCode {
    // Initialize logger - set RUST_LOG=debug for verbose output
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| default_config_path(PROFILE_FILENAME));

    let config: SoundDeviceConfig = load_config(&path);
    let device = config
        .build()
        .with_context(|| format!("Refusing to start device from {:?}", path))?;

    print_routes(&device);

    let mut stream = device.start_stream();
    run_cycle(&mut stream);
    stream.stop_stream();

    Ok(())
}

fn print_routes(device: &SoundDevice) {
    let params = device.params();
    println!(
        "{} ({}) via {}: {} in / {} out @ {}Hz",
        params.display_name(),
        params.internal_name(),
        params.host_api(),
        params.num_input_channels(),
        params.num_output_channels(),
        params.sample_rate()
    );
    for output in device.registry().outputs() {
        println!("  out  {:<16} -> {}", output.path().to_string(), output.channels());
    }
    for input in device.registry().inputs() {
        println!("  in   {:<16} <- {}", input.path().to_string(), input.channels());
    }
}

/// Compose one period of outputs, loop it back as input and report peaks
fn run_cycle(stream: &mut StreamingDevice) {
    let frames = match stream.params().frames_per_buffer() {
        0 => FALLBACK_FRAMES,
        n => n,
    };
    let out_channels = stream.params().num_output_channels();
    let in_channels = stream.params().num_input_channels();

    // Each output gets a distinct level so misroutes are visible
    let paths: Vec<_> = stream.registry().outputs().iter().map(|o| o.path()).collect();
    for (i, path) in paths.into_iter().enumerate() {
        let level = (i + 1) as Sample * 0.1;
        if let Some(buffer) = stream.output_buffer_mut(path) {
            for sample in &mut buffer.as_mut_slice()[..frames] {
                *sample = StereoSample::new(level, -level);
            }
        }
    }

    let mut device_out = vec![0.0; frames * out_channels];
    stream.compose_output(&mut device_out, frames, 0, out_channels);
    println!("Output peaks per physical channel:");
    for ch in 0..out_channels {
        println!("  {:>2}: {:.3}", ch + 1, channel_peak(&device_out, ch, out_channels));
    }

    // Loop physical outputs back onto as many physical inputs as exist
    let mut device_in = vec![0.0; frames * in_channels];
    for (frame_in, frame_out) in device_in
        .chunks_exact_mut(in_channels.max(1))
        .zip(device_out.chunks_exact(out_channels.max(1)))
    {
        let shared = in_channels.min(out_channels);
        frame_in[..shared].copy_from_slice(&frame_out[..shared]);
    }

    stream.compose_input(&device_in, frames, 0, in_channels);
    println!("Input peaks per logical stream:");
    for input in stream.registry().inputs() {
        let peak = input.buffer().as_slice()[..frames]
            .iter()
            .map(StereoSample::peak)
            .fold(0.0, Sample::max);
        println!("  {:<16} {:.3}", input.path().to_string(), peak);
    }
}

fn channel_peak(interleaved: &[Sample], channel: usize, frame_size: usize) -> Sample {
    interleaved
        .iter()
        .skip(channel)
        .step_by(frame_size)
        .fold(0.0, |peak, s| peak.max(s.abs()))
}
