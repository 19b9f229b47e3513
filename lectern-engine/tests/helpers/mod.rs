//! Audio test file generation utilities
//!
//! Generates deterministic WAV files with known durations so merge and
//! recorder tests can assert exact timeline math.

#![allow(dead_code)]

use hound::{SampleFormat, WavSpec, WavWriter};
use std::f32::consts::PI;
use std::path::Path;

/// Standard test sample rate (44.1 kHz)
pub const TEST_SAMPLE_RATE: u32 = 44_100;

/// Route engine logs to the test output, honoring `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

fn stereo_spec() -> WavSpec {
    WavSpec {
        channels: 2,
        sample_rate: TEST_SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

/// Generate a silent stereo WAV file of exactly `duration_ms`
pub fn generate_silent_wav<P: AsRef<Path>>(path: P, duration_ms: u64) -> Result<(), hound::Error> {
    let mut writer = WavWriter::create(path, stereo_spec())?;
    let frames = (TEST_SAMPLE_RATE as u64 * duration_ms) / 1000;
    for _ in 0..frames * 2 {
        writer.write_sample(0i16)?;
    }
    writer.finalize()
}

/// Generate a stereo sine WAV file of exactly `duration_ms`
pub fn generate_sine_wav<P: AsRef<Path>>(
    path: P,
    duration_ms: u64,
    frequency_hz: f32,
    amplitude: f32,
) -> Result<(), hound::Error> {
    let mut writer = WavWriter::create(path, stereo_spec())?;
    let frames = (TEST_SAMPLE_RATE as u64 * duration_ms) / 1000;
    for frame in 0..frames {
        let t = frame as f32 / TEST_SAMPLE_RATE as f32;
        let value = (2.0 * PI * frequency_hz * t).sin() * amplitude;
        let quantized = (value * i16::MAX as f32) as i16;
        writer.write_sample(quantized)?; // left
        writer.write_sample(quantized)?; // right
    }
    writer.finalize()
}
