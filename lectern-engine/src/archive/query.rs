//! Read-only archive traversal

use super::metadata::ModuleMetadata;
use super::store::{ArchiveStore, ModuleMatch};
use crate::Result;
use lectern_common::timewindow::split_composite_name;
use lectern_common::{DisplayColor, TimeWindow};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

/// One entry from a module listing
#[derive(Debug, Clone, Serialize)]
pub struct ModuleRecord {
    /// Absolute path of the module folder
    pub path: PathBuf,
    /// Module name (= folder name)
    pub name: String,
    /// Display color from the metadata record (black if unreadable)
    pub color: DisplayColor,
    /// Duration in weeks from the metadata record (0 if unreadable)
    pub weeks: u32,
}

impl ArchiveStore {
    /// Enumerate every module with its metadata
    ///
    /// A missing or malformed metadata record substitutes defaults for
    /// that entry; it never fails the whole listing. A missing `Modules`
    /// directory yields an empty list. Entries are sorted by name.
    pub fn read_all_modules(&self) -> Result<Vec<ModuleRecord>> {
        let entries = match fs::read_dir(self.modules_dir()) {
            Ok(entries) => entries,
            Err(_) => return Ok(Vec::new()),
        };

        let mut records = Vec::new();
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let metadata = ModuleMetadata::read(&path);
            records.push(ModuleRecord {
                name: entry.file_name().to_string_lossy().into_owned(),
                color: metadata.color,
                weeks: metadata.weeks,
                path,
            });
        }

        records.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(records)
    }

    /// List the composite lecture folder names in one day
    ///
    /// Empty list (not an error) if the module, week, or day is absent.
    /// Sorted for deterministic output.
    pub fn list_lectures(&self, module_query: &str, week: u32, day: &str) -> Vec<String> {
        let Some(day_dir) = self.day_dir(module_query, week, day, ModuleMatch::Exact) else {
            return Vec::new();
        };
        let Ok(entries) = fs::read_dir(&day_dir) else {
            return Vec::new();
        };

        let mut names: Vec<String> = entries
            .flatten()
            .filter(|entry| entry.path().is_dir())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

/// Split a composite lecture folder name into display name and window
///
/// Names without a parseable time suffix come back whole with no window.
pub fn split_lecture_name(folder_name: &str) -> (String, Option<TimeWindow>) {
    let (display, window) = split_composite_name(folder_name);
    (display.to_string(), window)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_lecture_name_variants() {
        let (name, window) = split_lecture_name("Intro__09:00 - 10:00");
        assert_eq!(name, "Intro");
        assert_eq!(window, Some(TimeWindow::new(540, 600)));

        let (name, window) = split_lecture_name("Untimed notes");
        assert_eq!(name, "Untimed notes");
        assert!(window.is_none());
    }
}
