//! Hierarchical, file-backed archive store
//!
//! Maps the logical path (module, week, day, lecture) to on-disk folders
//! under `<root>/Modules` and owns the directory lifecycle for every node.
//! No database: a module is a folder with a small metadata record, weeks
//! and days are purely structural subfolders, and a lecture is a
//! composite-named folder holding its encrypted segments.

mod metadata;
mod query;
mod store;

pub use metadata::{ModuleMetadata, MODULE_INFO_FILE};
pub use query::{split_lecture_name, ModuleRecord};
pub use store::{ArchiveStore, CreateOutcome, ModuleMatch};

/// Fixed weekday folder names, created eagerly under every week
pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];
