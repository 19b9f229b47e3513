//! Per-module metadata record
//!
//! `module_info.txt` is a two-line plain-text record:
//!
//! ```text
//! Text Color: 1.000,0.000,0.000,1.000
//! Weeks: 12
//! ```
//!
//! The textual shape is preserved for read-compatibility with archives
//! written by earlier releases (which stored the color object's debug
//! representation). Reads fail soft: a missing or malformed record yields
//! black and zero weeks, never an error.

use crate::Result;
use lectern_common::DisplayColor;
use std::fs;
use std::path::Path;

/// Metadata record file name inside each module folder
pub const MODULE_INFO_FILE: &str = "module_info.txt";

const COLOR_PREFIX: &str = "Text Color:";
const WEEKS_PREFIX: &str = "Weeks:";

/// Parsed contents of a module's metadata record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModuleMetadata {
    pub color: DisplayColor,
    pub weeks: u32,
}

impl Default for ModuleMetadata {
    fn default() -> Self {
        Self {
            color: DisplayColor::BLACK,
            weeks: 0,
        }
    }
}

impl ModuleMetadata {
    pub fn new(color: DisplayColor, weeks: u32) -> Self {
        Self { color, weeks }
    }

    /// Write the record into `module_dir`, replacing any existing one.
    ///
    /// There is no partial-update API; the whole record is rewritten.
    pub fn write(&self, module_dir: &Path) -> Result<()> {
        let content = format!("{} {}\n{} {}\n", COLOR_PREFIX, self.color, WEEKS_PREFIX, self.weeks);
        fs::write(module_dir.join(MODULE_INFO_FILE), content)?;
        Ok(())
    }

    /// Read the record from `module_dir`, soft-failing to defaults.
    pub fn read(module_dir: &Path) -> ModuleMetadata {
        let path = module_dir.join(MODULE_INFO_FILE);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => {
                tracing::debug!("No readable {} in {}", MODULE_INFO_FILE, module_dir.display());
                return ModuleMetadata::default();
            }
        };

        let mut metadata = ModuleMetadata::default();
        for line in content.lines() {
            if let Some(field) = line.strip_prefix(COLOR_PREFIX) {
                metadata.color = DisplayColor::parse(field);
            } else if let Some(field) = line.strip_prefix(WEEKS_PREFIX) {
                metadata.weeks = field.trim().parse().unwrap_or(0);
            }
        }
        metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let metadata = ModuleMetadata::new(DisplayColor::RED, 12);
        metadata.write(dir.path()).unwrap();

        assert_eq!(ModuleMetadata::read(dir.path()), metadata);
    }

    #[test]
    fn missing_record_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let metadata = ModuleMetadata::read(dir.path());
        assert_eq!(metadata.color, DisplayColor::BLACK);
        assert_eq!(metadata.weeks, 0);
    }

    #[test]
    fn malformed_record_defaults_soft() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(MODULE_INFO_FILE),
            "Text Color: chartreuse\nWeeks: several\n",
        )
        .unwrap();

        let metadata = ModuleMetadata::read(dir.path());
        assert_eq!(metadata.color, DisplayColor::BLACK);
        assert_eq!(metadata.weeks, 0);
    }

    #[test]
    fn legacy_color_shape_is_readable() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(MODULE_INFO_FILE),
            "Text Color: Color(1.0, 0.0, 0.0, 1.0, sRGB IEC61966-2.1)\nWeeks: 3\n",
        )
        .unwrap();

        let metadata = ModuleMetadata::read(dir.path());
        assert_eq!(metadata.color, DisplayColor::RED);
        assert_eq!(metadata.weeks, 3);
    }
}
