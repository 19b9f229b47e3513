//! Merge engine
//!
//! Rebuilds one continuous-timeline artifact from a lecture's encrypted
//! segments. Every call is a from-scratch rebuild over already-closed
//! files; it is never an incremental append, so a merge interrupted at
//! any point is repaired by simply running it again.
//!
//! Pipeline: decrypt each segment to a transient sibling, decode in
//! capture order, append to the output with each segment's samples placed
//! at the running offset (the sum of prior segments' durations), finalize
//! the container, delete the transients, and encrypt the artifact in
//! place. The merged timeline is monotonically increasing and gap-free
//! across segment boundaries, so seeking and duration queries behave as
//! if it were one continuous recording.

use crate::audio::{decode_segment, ArtifactWriter};
use crate::cipher::Cipher;
use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Prefix for transient decrypted segment copies
const DECRYPTED_PREFIX: &str = "decrypted_";

/// Result of a merge request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Artifact was rebuilt and re-encrypted
    Merged(MergeReport),
    /// Nothing to do; any prior artifact was left untouched
    NoSegments,
}

/// Timeline accounting for a completed merge
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Segments copied into the artifact
    pub segments_merged: usize,
    /// Segments skipped for lacking a decodable audio track
    pub segments_skipped: usize,
    /// Start offset of each merged segment on the artifact timeline (ms)
    pub segment_offsets_ms: Vec<u64>,
    /// Total artifact duration: the sum of merged segment durations (ms)
    pub total_duration_ms: u64,
}

/// Deletes transient decrypted copies on every exit path
struct TransientGuard {
    files: Vec<PathBuf>,
}

impl Drop for TransientGuard {
    fn drop(&mut self) {
        for file in &self.files {
            if let Err(e) = fs::remove_file(file) {
                warn!("Failed to remove transient {}: {}", file.display(), e);
            }
        }
    }
}

/// Merge a lecture's encrypted segments into `target`
///
/// Segments are processed in the given (capture) order. The output format
/// is fixed from the first decodable segment; later segments with a
/// different sample rate or channel count are still copied (resampling is
/// out of scope) with a warning. Segments with no decodable audio track
/// are skipped, not fatal. An empty segment list yields
/// [`MergeOutcome::NoSegments`] without touching `target`; a list where
/// every segment is undecodable is an error, since there is nothing to
/// finalize.
pub fn merge_segments(segments: &[PathBuf], target: &Path, cipher: Cipher) -> Result<MergeOutcome> {
    if segments.is_empty() {
        debug!("Merge requested with no segments; leaving {} untouched", target.display());
        return Ok(MergeOutcome::NoSegments);
    }

    // 1. Decrypt every segment into a transient sibling file.
    let mut guard = TransientGuard { files: Vec::new() };
    let mut decrypted = Vec::with_capacity(segments.len());
    for segment in segments {
        let transient = transient_path(segment)?;
        cipher.decrypt_file(segment, &transient)?;
        guard.files.push(transient.clone());
        decrypted.push(transient);
    }

    // 2. Decode in capture order, appending at the running offset.
    let mut writer: Option<ArtifactWriter> = None;
    let mut report = MergeReport::default();
    let mut offset_ms: u64 = 0;

    for transient in &decrypted {
        let segment = match decode_segment(transient) {
            Ok(segment) => segment,
            Err(Error::Decode(reason)) => {
                warn!("Skipping segment {}: {}", transient.display(), reason);
                report.segments_skipped += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        report.segment_offsets_ms.push(offset_ms);
        if let Some(out) = writer.as_mut() {
            if segment.sample_rate != out.sample_rate() || segment.channels != out.channels() {
                warn!(
                    "Segment {} format {}Hz/{}ch differs from artifact format",
                    transient.display(),
                    segment.sample_rate,
                    segment.channels
                );
            }
            out.write_samples(&segment.samples)?;
        } else {
            // First decodable segment fixes the artifact format.
            let mut out = ArtifactWriter::create(target, segment.sample_rate, segment.channels)?;
            out.write_samples(&segment.samples)?;
            writer = Some(out);
        }

        // 3. Advance the running offset by this segment's duration.
        offset_ms += segment.duration_ms();
        report.segments_merged += 1;
    }

    // 4. Finalize the output container.
    let Some(out) = writer else {
        return Err(Error::Merge("no segment contained a decodable audio track".into()));
    };
    out.finalize()?;
    report.total_duration_ms = offset_ms;

    // 5. Transients are removed by the guard, including on error paths.
    drop(guard);

    // 6. Encrypt the finalized artifact in place.
    cipher.encrypt_file(target)?;

    info!(
        "Merged {} segments ({} skipped) into {} ({} ms)",
        report.segments_merged,
        report.segments_skipped,
        target.display(),
        report.total_duration_ms
    );
    Ok(MergeOutcome::Merged(report))
}

/// Handle for an in-flight background merge
///
/// The merge runs on the blocking pool so it never stalls capture of the
/// next segment. Hosts await this before enabling dependent actions
/// (export, delete); abandoning it abandons the result, not the work.
#[derive(Debug)]
pub struct MergeTask {
    handle: tokio::task::JoinHandle<Result<MergeOutcome>>,
}

impl MergeTask {
    pub(crate) fn from_handle(handle: tokio::task::JoinHandle<Result<MergeOutcome>>) -> Self {
        Self { handle }
    }

    /// Wait for the merge to finish
    pub async fn wait(self) -> Result<MergeOutcome> {
        self.handle
            .await
            .map_err(|e| Error::Merge(format!("merge task failed: {}", e)))?
    }
}

/// Spawn a merge of `segments` into `target` on the blocking pool
pub fn spawn_merge(segments: Vec<PathBuf>, target: PathBuf, cipher: Cipher) -> MergeTask {
    let handle =
        tokio::task::spawn_blocking(move || merge_segments(&segments, &target, cipher));
    MergeTask { handle }
}

/// Sibling path for a segment's transient decrypted copy
fn transient_path(segment: &Path) -> Result<PathBuf> {
    let name = segment
        .file_name()
        .ok_or_else(|| Error::InvalidInput(format!("invalid segment path {}", segment.display())))?;
    let parent = segment.parent().unwrap_or_else(|| Path::new("."));
    Ok(parent.join(format!("{}{}", DECRYPTED_PREFIX, name.to_string_lossy())))
}
