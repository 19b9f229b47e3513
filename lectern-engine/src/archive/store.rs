//! Directory lifecycle for modules, weeks, days, and lectures

use super::metadata::ModuleMetadata;
use super::DAY_NAMES;
use crate::{Error, Result};
use lectern_common::timewindow::composite_name;
use lectern_common::{DisplayColor, TimeWindow};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Result of a module creation attempt
///
/// A name collision is a negative result the caller surfaces to the user,
/// not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    /// Module folder, metadata record, and week/day tree were created
    Created,
    /// A module with this name already exists; nothing was touched
    AlreadyExists,
}

/// Module lookup policy for query-by-name operations
///
/// Exact case-insensitive match is the contract. Substring match is the
/// behavior of early releases and exists only as an explicit opt-in for
/// hosts that still depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModuleMatch {
    /// Case-insensitive equality (the default)
    #[default]
    Exact,
    /// Deprecated case-insensitive "contains" lookup
    LegacySubstring,
}

/// File-backed archive store rooted at `<root>/Modules`
///
/// The store exclusively owns directory lifecycle. It does not enforce
/// lecture time-window exclusivity; callers run the conflict detector
/// before committing a new lecture slot.
#[derive(Debug, Clone)]
pub struct ArchiveStore {
    modules_dir: PathBuf,
}

impl ArchiveStore {
    /// Store over the given archive root (an opaque, host-supplied path)
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            modules_dir: root.as_ref().join("Modules"),
        }
    }

    /// The `Modules` directory this store manages
    pub fn modules_dir(&self) -> &Path {
        &self.modules_dir
    }

    /// Create a module folder with its metadata record and the full
    /// `weeks × 7` week/day tree.
    ///
    /// Returns [`CreateOutcome::AlreadyExists`] without touching anything
    /// if a module folder with this name is already present.
    pub fn create_module(
        &self,
        name: &str,
        weeks: u32,
        color: DisplayColor,
    ) -> Result<CreateOutcome> {
        if name.is_empty() || name.contains(std::path::MAIN_SEPARATOR) {
            return Err(Error::InvalidInput(format!("invalid module name {:?}", name)));
        }
        if weeks == 0 {
            return Err(Error::InvalidInput("module duration must be at least one week".into()));
        }

        fs::create_dir_all(&self.modules_dir)?;

        let module_dir = self.modules_dir.join(name);
        if module_dir.exists() {
            debug!("Module {:?} already exists", name);
            return Ok(CreateOutcome::AlreadyExists);
        }

        fs::create_dir(&module_dir)?;
        ModuleMetadata::new(color, weeks).write(&module_dir)?;

        for week in 1..=weeks {
            let week_dir = module_dir.join(format!("week{}", week));
            fs::create_dir(&week_dir)?;
            for day in DAY_NAMES {
                fs::create_dir(week_dir.join(day))?;
            }
        }

        info!("Created module {:?} with {} weeks", name, weeks);
        Ok(CreateOutcome::Created)
    }

    /// Recursively delete a module
    ///
    /// Returns `false` if the module does not exist or deletion fails.
    /// The caller is responsible for confirming destructive operations;
    /// the store deletes unconditionally once called.
    pub fn delete_module(&self, name: &str) -> bool {
        let module_dir = self.modules_dir.join(name);
        if !module_dir.is_dir() {
            return false;
        }
        match fs::remove_dir_all(&module_dir) {
            Ok(()) => {
                info!("Deleted module {:?}", name);
                true
            }
            Err(e) => {
                warn!("Failed to delete module {:?}: {}", name, e);
                false
            }
        }
    }

    /// Locate a module folder by name
    pub fn find_module(&self, query: &str, policy: ModuleMatch) -> Option<PathBuf> {
        let entries = fs::read_dir(&self.modules_dir).ok()?;
        let query_lower = query.to_lowercase();

        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let name_lower = entry.file_name().to_string_lossy().to_lowercase();
            let matched = match policy {
                ModuleMatch::Exact => name_lower == query_lower,
                ModuleMatch::LegacySubstring => name_lower.contains(&query_lower),
            };
            if matched {
                return Some(path);
            }
        }
        None
    }

    /// Locate a day folder under a module/week, `None` if any segment of
    /// the path is missing
    pub fn day_dir(
        &self,
        module_query: &str,
        week: u32,
        day: &str,
        policy: ModuleMatch,
    ) -> Option<PathBuf> {
        let module_dir = self.find_module(module_query, policy)?;
        let day_dir = module_dir.join(format!("week{}", week)).join(day);
        day_dir.is_dir().then_some(day_dir)
    }

    /// Create the composite-named lecture folder for a confirmed slot
    ///
    /// Module lookup is exact case-insensitive. Returns the day folder
    /// path on success (including when the lecture folder already
    /// existed), `None` if the module, week, or day is missing.
    pub fn create_lecture_folder(
        &self,
        module_query: &str,
        week: u32,
        day: &str,
        lecture_name: &str,
        window: TimeWindow,
    ) -> Option<PathBuf> {
        let day_dir = self.day_dir(module_query, week, day, ModuleMatch::Exact)?;
        let folder_name = composite_name(lecture_name, &window);
        let lecture_dir = day_dir.join(&folder_name);

        if lecture_dir.exists() {
            debug!("Lecture folder {:?} already exists", folder_name);
            return Some(day_dir);
        }

        match fs::create_dir(&lecture_dir) {
            Ok(()) => {
                info!("Created lecture folder {:?} in {}", folder_name, day_dir.display());
                Some(day_dir)
            }
            Err(e) => {
                warn!("Failed to create lecture folder {:?}: {}", folder_name, e);
                None
            }
        }
    }

    /// Locate an existing lecture folder by its full composite name
    pub fn lecture_dir(
        &self,
        module_query: &str,
        week: u32,
        day: &str,
        lecture_name: &str,
    ) -> Option<PathBuf> {
        let day_dir = self.day_dir(module_query, week, day, ModuleMatch::Exact)?;
        let lecture_dir = day_dir.join(lecture_name);
        lecture_dir.is_dir().then_some(lecture_dir)
    }

    /// Recursively delete one lecture folder (full composite name)
    ///
    /// Returns `false` if the lecture does not exist or deletion fails.
    pub fn delete_lecture(
        &self,
        module_query: &str,
        week: u32,
        day: &str,
        lecture_name: &str,
    ) -> bool {
        let Some(lecture_dir) = self.lecture_dir(module_query, week, day, lecture_name) else {
            return false;
        };
        match fs::remove_dir_all(&lecture_dir) {
            Ok(()) => {
                info!("Deleted lecture {:?}", lecture_name);
                true
            }
            Err(e) => {
                warn!("Failed to delete lecture {:?}: {}", lecture_name, e);
                false
            }
        }
    }
}
