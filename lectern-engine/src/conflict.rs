//! Lecture time-window conflict detection
//!
//! Run before a new lecture slot is committed; the archive store itself
//! does not enforce window exclusivity.

use crate::archive::ArchiveStore;
use lectern_common::timewindow::split_composite_name;
use lectern_common::TimeWindow;
use tracing::debug;

/// Check a proposed window against the existing lectures in one day
///
/// Two windows `[s1,e1)` and `[s2,e2)` conflict iff `s1 < e2 && s2 < e1`;
/// touching endpoints (one lecture ending exactly when another starts) do
/// not conflict. A missing module, week, or day reports `false`, since a
/// nonexistent day trivially has no siblings. Sibling folders without a
/// parseable time suffix are ignored.
pub fn has_conflict(
    store: &ArchiveStore,
    module_query: &str,
    week: u32,
    day: &str,
    proposed: &TimeWindow,
) -> bool {
    for folder_name in store.list_lectures(module_query, week, day) {
        let (_, window) = split_composite_name(&folder_name);
        if let Some(existing) = window {
            if proposed.overlaps(&existing) {
                debug!(
                    "Proposed window {} conflicts with existing lecture {:?}",
                    proposed, folder_name
                );
                return true;
            }
        }
    }
    false
}
