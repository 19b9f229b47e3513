//! Merged artifact writing
//!
//! The merged artifact is 16-bit PCM WAV. The writer takes its format
//! from the first decodable segment and accepts interleaved f32 frames.

use crate::{Error, Result};
use hound::{SampleFormat, WavSpec, WavWriter};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Incremental WAV writer for the merged artifact
pub struct ArtifactWriter {
    writer: WavWriter<BufWriter<File>>,
    channels: u16,
    sample_rate: u32,
    frames_written: u64,
}

impl ArtifactWriter {
    /// Create the output file, truncating any previous artifact
    pub fn create(path: &Path, sample_rate: u32, channels: u16) -> Result<Self> {
        let spec = WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let writer = WavWriter::create(path, spec)
            .map_err(|e| Error::Encode(format!("Failed to create {}: {}", path.display(), e)))?;
        Ok(Self {
            writer,
            channels,
            sample_rate,
            frames_written: 0,
        })
    }

    /// Append interleaved f32 samples, clamped to `[-1.0, 1.0]`
    pub fn write_samples(&mut self, samples: &[f32]) -> Result<()> {
        for &sample in samples {
            let quantized = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
            self.writer
                .write_sample(quantized)
                .map_err(|e| Error::Encode(format!("Failed to write sample: {}", e)))?;
        }
        if self.channels > 0 {
            self.frames_written += (samples.len() / self.channels as usize) as u64;
        }
        Ok(())
    }

    /// Sample rate of the artifact format
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Channel count of the artifact format
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Total duration written so far, in milliseconds
    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        self.frames_written * 1000 / self.sample_rate as u64
    }

    /// Finalize the container header
    pub fn finalize(self) -> Result<()> {
        self.writer
            .finalize()
            .map_err(|e| Error::Encode(format!("Failed to finalize artifact: {}", e)))
    }
}
