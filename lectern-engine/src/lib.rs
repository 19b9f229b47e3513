//! # Lectern Recording Archive Engine
//!
//! Organizes recorded audio lectures into a hierarchical, file-backed
//! archive (module → week → day → lecture), captures audio in discrete
//! encrypted segments, and merges those segments into one continuous
//! playable artifact.
//!
//! **Architecture:** plain directories and files under an archive root, a
//! symphonia decode path feeding a WAV artifact writer, and a tokio task
//! for the off-interactive-path re-merge after every recording stop.

pub mod archive;
pub mod audio;
pub mod cipher;
pub mod conflict;
pub mod error;
pub mod merge;
pub mod recorder;

pub use archive::{ArchiveStore, CreateOutcome, ModuleMatch, ModuleRecord};
pub use cipher::Cipher;
pub use error::{Error, Result};
pub use merge::{MergeOutcome, MergeReport, MergeTask};
pub use recorder::{CaptureHandle, CaptureService, LectureSession};
