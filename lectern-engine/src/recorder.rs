//! Segment recorder lifecycle
//!
//! One [`LectureSession`] manages recording for one open lecture. The
//! session rebuilds its segment list and next index from a directory scan
//! on open, so segments captured before an app restart are never
//! overwritten: the next index is `max(existing) + 1` and gaps are
//! tolerated but never reused.
//!
//! The capture device is an exclusive resource; a session is either
//! `Idle` or `Capturing`, and `start()` while capturing is rejected.
//! Hosts open at most one capturing session per process.

use crate::cipher::Cipher;
use crate::merge::{spawn_merge, MergeOutcome, MergeTask};
use crate::{Error, Result};
use lectern_common::timewindow::strip_window_suffix;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Segment file name prefix inside a lecture folder
pub const SEGMENT_PREFIX: &str = "recording_";

/// Merged artifacts are written as WAV regardless of segment container
const ARTIFACT_EXT: &str = "wav";

/// External audio capture service (implemented by the platform)
///
/// `open` must begin producing a compressed audio file in a standard
/// container at `output`; the file must be complete and closed once the
/// returned handle's `stop` returns.
pub trait CaptureService: Send + Sync {
    fn open(&self, output: &Path) -> Result<Box<dyn CaptureHandle>>;
}

/// Handle to one in-flight capture
pub trait CaptureHandle: Send {
    /// Stop capturing and close the output file
    fn stop(self: Box<Self>) -> Result<()>;
}

enum RecorderState {
    Idle,
    Capturing {
        handle: Box<dyn CaptureHandle>,
        segment: PathBuf,
    },
}

/// Recording session scoped to one open lecture folder
pub struct LectureSession {
    lecture_dir: PathBuf,
    display_name: String,
    artifact_path: PathBuf,
    segment_ext: String,
    cipher: Cipher,
    capture: Box<dyn CaptureService>,
    segments: Vec<PathBuf>,
    next_index: u32,
    state: RecorderState,
    last_merge: Option<MergeTask>,
}

impl LectureSession {
    /// Open a session over a lecture folder, creating the folder if
    /// needed and rescanning any segments left by prior sessions.
    ///
    /// `segment_ext` is the container extension the capture service
    /// produces (e.g. `"wav"`, `"m4a"`).
    pub fn open(
        lecture_dir: impl Into<PathBuf>,
        segment_ext: &str,
        cipher: Cipher,
        capture: Box<dyn CaptureService>,
    ) -> Result<Self> {
        let lecture_dir = lecture_dir.into();
        fs::create_dir_all(&lecture_dir)?;

        let folder_name = lecture_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| Error::InvalidInput("lecture path has no folder name".into()))?;
        let display_name = strip_window_suffix(&folder_name);
        let artifact_path = lecture_dir.join(format!("{}.{}", display_name, ARTIFACT_EXT));

        let (segments, next_index) = scan_segments(&lecture_dir, segment_ext)?;
        debug!(
            "Opened lecture session {:?}: {} existing segments, next index {}",
            display_name,
            segments.len(),
            next_index
        );

        Ok(Self {
            lecture_dir,
            display_name,
            artifact_path,
            segment_ext: segment_ext.to_string(),
            cipher,
            capture,
            segments,
            next_index,
            state: RecorderState::Idle,
            last_merge: None,
        })
    }

    /// Lecture folder this session operates on
    pub fn lecture_dir(&self) -> &Path {
        &self.lecture_dir
    }

    /// Display name (composite folder name with the time suffix stripped)
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Path of the merged artifact (may not exist yet)
    pub fn artifact_path(&self) -> &Path {
        &self.artifact_path
    }

    /// Encrypted segments in capture order
    pub fn segments(&self) -> &[PathBuf] {
        &self.segments
    }

    /// True while the capture device is open
    pub fn is_capturing(&self) -> bool {
        matches!(self.state, RecorderState::Capturing { .. })
    }

    /// Allocate the next segment and open the capture service against it
    ///
    /// Starting while already capturing is a programming error and is
    /// rejected with [`Error::InvalidState`]; the in-flight capture is
    /// left running.
    pub fn start(&mut self) -> Result<()> {
        if self.is_capturing() {
            return Err(Error::InvalidState("capture already in progress".into()));
        }

        let segment = self.lecture_dir.join(format!(
            "{}{}.{}",
            SEGMENT_PREFIX, self.next_index, self.segment_ext
        ));
        let handle = self.capture.open(&segment)?;
        info!("Capturing segment {}", segment.display());

        self.next_index += 1;
        self.state = RecorderState::Capturing { handle, segment };
        Ok(())
    }

    /// Stop the capture, encrypt the finished segment, and kick off a
    /// background re-merge of all segments.
    ///
    /// The segment is encrypted synchronously; the merge runs as a tokio
    /// task the host awaits via [`wait_for_merge`](Self::wait_for_merge).
    /// Consecutive merges on the same artifact are chained so two rebuilds
    /// never interleave. Must be called within a tokio runtime.
    pub fn stop(&mut self) -> Result<()> {
        let state = std::mem::replace(&mut self.state, RecorderState::Idle);
        let RecorderState::Capturing { handle, segment } = state else {
            return Err(Error::InvalidState("no capture in progress".into()));
        };

        handle.stop()?;
        self.cipher.encrypt_file(&segment)?;
        info!("Closed and encrypted segment {}", segment.display());
        self.segments.push(segment);

        let previous = self.last_merge.take();
        let segments = self.segments.clone();
        let target = self.artifact_path.clone();
        let cipher = self.cipher;
        let handle = tokio::spawn(async move {
            if let Some(previous) = previous {
                // Sequence rebuilds of the same artifact.
                if let Err(e) = previous.wait().await {
                    warn!("Previous merge failed: {}", e);
                }
            }
            spawn_merge(segments, target, cipher).wait().await
        });
        self.last_merge = Some(MergeTask::from_handle(handle));
        Ok(())
    }

    /// Await the most recent background merge, if any
    ///
    /// Hosts call this before export or any other action that depends on
    /// the artifact being current.
    pub async fn wait_for_merge(&mut self) -> Result<Option<MergeOutcome>> {
        match self.last_merge.take() {
            Some(task) => task.wait().await.map(Some),
            None => Ok(None),
        }
    }

    /// Decrypt the merged artifact to a transient sibling for export
    ///
    /// The copy is named `"{displayName}-.wav"`; the caller hands it to
    /// the outside world and then removes it with
    /// [`remove_export_copy`](Self::remove_export_copy).
    pub fn export_artifact(&self) -> Result<PathBuf> {
        if !self.artifact_path.exists() {
            return Err(Error::NotFound(format!(
                "no merged artifact for {:?}",
                self.display_name
            )));
        }
        let export = self.export_path();
        self.cipher.decrypt_file(&self.artifact_path, &export)?;
        Ok(export)
    }

    /// Remove the transient export copy, if present
    pub fn remove_export_copy(&self) -> bool {
        fs::remove_file(self.export_path()).is_ok()
    }

    /// Stop any capture, await the in-flight merge, and recursively
    /// delete the lecture folder.
    ///
    /// Awaiting the merge replaces the fixed release-delay of earlier
    /// releases with an explicit completion signal, so deletion never
    /// races a rebuild. Returns `false` if the folder could not be
    /// removed.
    pub async fn delete(mut self) -> bool {
        let state = std::mem::replace(&mut self.state, RecorderState::Idle);
        if let RecorderState::Capturing { handle, .. } = state {
            if let Err(e) = handle.stop() {
                warn!("Failed to stop capture before delete: {}", e);
            }
        }
        if let Some(task) = self.last_merge.take() {
            if let Err(e) = task.wait().await {
                warn!("In-flight merge failed before delete: {}", e);
            }
        }

        match fs::remove_dir_all(&self.lecture_dir) {
            Ok(()) => {
                info!("Deleted lecture folder {}", self.lecture_dir.display());
                true
            }
            Err(e) => {
                warn!("Failed to delete {}: {}", self.lecture_dir.display(), e);
                false
            }
        }
    }

    fn export_path(&self) -> PathBuf {
        self.lecture_dir
            .join(format!("{}-.{}", self.display_name, ARTIFACT_EXT))
    }
}

/// Scan a lecture folder for existing `recording_*` segments
///
/// Returns the segments sorted by index and the next free index
/// (`max + 1`, or 1 for an empty folder). Gaps are preserved.
fn scan_segments(lecture_dir: &Path, segment_ext: &str) -> Result<(Vec<PathBuf>, u32)> {
    let suffix = format!(".{}", segment_ext);
    let mut indexed: Vec<(u32, PathBuf)> = Vec::new();

    for entry in fs::read_dir(lecture_dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        let Some(stem) = name.strip_prefix(SEGMENT_PREFIX) else {
            continue;
        };
        let Some(index) = stem.strip_suffix(&suffix) else {
            continue;
        };
        if let Ok(index) = index.parse::<u32>() {
            indexed.push((index, path));
        }
    }

    indexed.sort_by_key(|(index, _)| *index);
    let next_index = indexed.last().map(|(index, _)| index + 1).unwrap_or(1);
    let segments = indexed.into_iter().map(|(_, path)| path).collect();
    Ok((segments, next_index))
}
