//! Lecture time windows and composite folder names
//!
//! A lecture folder is named `"{displayName}__{HH:MM - HH:MM}"`. The time
//! suffix parses to a half-open window `[start, end)` in minutes since
//! midnight, which is the unit all overlap comparisons use.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between a lecture's display name and its time suffix
pub const NAME_SEPARATOR: &str = "__";

/// Trailing `"__HH:MM - HH:MM"` suffix, tolerant of stray whitespace
static WINDOW_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*_{2}\s*\d{2}:\d{2}\s*-\s*\d{2}:\d{2}$").unwrap());

/// Half-open lecture time window `[start, end)` in minutes since midnight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Start of the window (minutes since midnight)
    pub start_min: u32,

    /// End of the window (minutes since midnight)
    pub end_min: u32,
}

impl TimeWindow {
    /// Build a window from start/end in minutes since midnight
    pub fn new(start_min: u32, end_min: u32) -> Self {
        Self { start_min, end_min }
    }

    /// Parse a `"HH:MM - HH:MM"` window
    ///
    /// Returns `None` on any malformed input; callers recover locally
    /// (a sibling folder with an unreadable suffix simply cannot conflict).
    pub fn parse(text: &str) -> Option<Self> {
        let (start, end) = text.split_once('-')?;
        Some(Self {
            start_min: parse_clock(start.trim())?,
            end_min: parse_clock(end.trim())?,
        })
    }

    /// Half-open interval overlap: `[s1,e1)` and `[s2,e2)` conflict iff
    /// `s1 < e2 && s2 < e1`. Touching endpoints do not overlap, so a
    /// lecture ending at 10:00 never conflicts with one starting at 10:00.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start_min < other.end_min && other.start_min < self.end_min
    }

    /// Window length in minutes (zero if end precedes start)
    pub fn duration_min(&self) -> u32 {
        self.end_min.saturating_sub(self.start_min)
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02} - {:02}:{:02}",
            self.start_min / 60,
            self.start_min % 60,
            self.end_min / 60,
            self.end_min % 60
        )
    }
}

/// Parse `"HH:MM"` to minutes since midnight
fn parse_clock(text: &str) -> Option<u32> {
    let (hours, minutes) = text.split_once(':')?;
    let hours: u32 = hours.trim().parse().ok()?;
    let minutes: u32 = minutes.trim().parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// Build the composite lecture folder name `"{name}__{HH:MM - HH:MM}"`
pub fn composite_name(display_name: &str, window: &TimeWindow) -> String {
    format!("{}{}{}", display_name, NAME_SEPARATOR, window)
}

/// Split a composite folder name into display name and parsed window
///
/// A name without a well-formed suffix is returned whole, with no window.
pub fn split_composite_name(folder_name: &str) -> (&str, Option<TimeWindow>) {
    if let Some((display, suffix)) = folder_name.rsplit_once(NAME_SEPARATOR) {
        if let Some(window) = TimeWindow::parse(suffix) {
            return (display, Some(window));
        }
    }
    (folder_name, None)
}

/// Strip a trailing `"__HH:MM - HH:MM"` suffix from a lecture name
///
/// Used when deriving the merged artifact's file name from the lecture
/// folder name. Names without the suffix pass through unchanged.
pub fn strip_window_suffix(name: &str) -> String {
    WINDOW_SUFFIX.replace(name, "").into_owned()
}
