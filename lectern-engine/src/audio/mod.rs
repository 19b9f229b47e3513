//! Media layer for the merge engine
//!
//! Reads captured segments through symphonia (any container/codec the
//! default registry probes) and writes the continuous merged artifact as
//! 16-bit PCM WAV through hound. No transcoding or resampling beyond the
//! decode-to-PCM step.

mod reader;
mod writer;

pub use reader::{decode_segment, DecodedSegment};
pub use writer::ArtifactWriter;
