//! Segment decoding using symphonia
//!
//! Decodes one captured segment to interleaved f32 PCM. The merge engine
//! concatenates these buffers, so the reader reports sample rate, channel
//! count, and duration alongside the samples.

use crate::{Error, Result};
use std::path::Path;
use symphonia::core::audio::{AudioBuffer, AudioBufferRef, Signal};
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::conv::IntoSample;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::sample::Sample;
use tracing::{debug, warn};

/// One fully decoded segment
#[derive(Debug, Clone)]
pub struct DecodedSegment {
    /// Interleaved PCM samples, channel order preserved from the source
    pub samples: Vec<f32>,
    /// Source sample rate
    pub sample_rate: u32,
    /// Source channel count
    pub channels: u16,
}

impl DecodedSegment {
    /// Number of frames (samples per channel)
    pub fn frames(&self) -> u64 {
        if self.channels == 0 {
            return 0;
        }
        (self.samples.len() / self.channels as usize) as u64
    }

    /// Segment duration in milliseconds, derived from the frame count
    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        self.frames() * 1000 / self.sample_rate as u64
    }
}

/// Decode an entire segment file to PCM
///
/// Locates the first track with a decodable audio codec; a file without
/// one is an `Error::Decode` the merge engine treats as skippable.
pub fn decode_segment(path: &Path) -> Result<DecodedSegment> {
    debug!("Decoding segment: {}", path.display());

    let file = std::fs::File::open(path)
        .map_err(|e| Error::Decode(format!("Failed to open {}: {}", path.display(), e)))?;

    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    // A file-extension hint helps the format registry guess the container
    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| Error::Decode(format!("Failed to probe format: {}", e)))?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| Error::Decode("No audio track found".to_string()))?;

    let track_id = track.id;
    let codec_params = track.codec_params.clone();

    let sample_rate = codec_params
        .sample_rate
        .ok_or_else(|| Error::Decode("Sample rate not found".to_string()))?;
    let channels = codec_params
        .channels
        .map(|c| c.count() as u16)
        .ok_or_else(|| Error::Decode("Channel count not found".to_string()))?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|e| Error::Decode(format!("Failed to create decoder: {}", e)))?;

    let mut samples = Vec::new();
    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => {
                warn!("Error reading packet from {}: {}", path.display(), e);
                break;
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => interleave_to_f32(&decoded, &mut samples),
            Err(e) => {
                warn!("Decode error in {}: {}", path.display(), e);
                continue;
            }
        }
    }

    let decoded = DecodedSegment {
        samples,
        sample_rate,
        channels,
    };
    debug!(
        "Decoded {} frames ({} ms) from {}",
        decoded.frames(),
        decoded.duration_ms(),
        path.display()
    );
    Ok(decoded)
}

/// Interleave a decoded buffer into f32 output, whatever the source
/// sample format
fn interleave_to_f32(decoded: &AudioBufferRef, output: &mut Vec<f32>) {
    match decoded {
        AudioBufferRef::F32(buf) => interleave(buf, output),
        AudioBufferRef::F64(buf) => interleave(buf, output),
        AudioBufferRef::S32(buf) => interleave(buf, output),
        AudioBufferRef::S24(buf) => interleave(buf, output),
        AudioBufferRef::S16(buf) => interleave(buf, output),
        AudioBufferRef::S8(buf) => interleave(buf, output),
        AudioBufferRef::U32(buf) => interleave(buf, output),
        AudioBufferRef::U24(buf) => interleave(buf, output),
        AudioBufferRef::U16(buf) => interleave(buf, output),
        AudioBufferRef::U8(buf) => interleave(buf, output),
    }
}

fn interleave<S>(buf: &AudioBuffer<S>, output: &mut Vec<f32>)
where
    S: Sample + IntoSample<f32>,
{
    let channels = buf.spec().channels.count();
    let frames = buf.frames();
    output.reserve(frames * channels);

    for frame in 0..frames {
        for ch in 0..channels {
            output.push(buf.chan(ch)[frame].into_sample());
        }
    }
}
