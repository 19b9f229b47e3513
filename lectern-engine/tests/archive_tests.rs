//! Integration tests for the archive store and query/listing surface

use lectern_common::{DisplayColor, TimeWindow};
use lectern_engine::archive::{ArchiveStore, CreateOutcome, ModuleMatch, DAY_NAMES, MODULE_INFO_FILE};
use walkdir::WalkDir;

fn window(text: &str) -> TimeWindow {
    TimeWindow::parse(text).unwrap()
}

#[test]
fn create_module_provisions_full_week_day_tree() {
    let root = tempfile::tempdir().unwrap();
    let store = ArchiveStore::new(root.path());

    let outcome = store.create_module("CS101", 2, DisplayColor::RED).unwrap();
    assert_eq!(outcome, CreateOutcome::Created);

    // Exactly weeks * 7 day folders exist.
    let day_dirs = WalkDir::new(store.modules_dir().join("CS101"))
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_type().is_dir()
                && DAY_NAMES.contains(&e.file_name().to_string_lossy().as_ref())
        })
        .count();
    assert_eq!(day_dirs, 14);

    let records = store.read_all_modules().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "CS101");
    assert_eq!(records[0].weeks, 2);
    assert_eq!(records[0].color, DisplayColor::RED);
}

#[test]
fn duplicate_create_never_mutates_existing_module() {
    let root = tempfile::tempdir().unwrap();
    let store = ArchiveStore::new(root.path());

    store.create_module("CS101", 2, DisplayColor::RED).unwrap();
    let outcome = store
        .create_module("CS101", 9, DisplayColor::new(0.0, 0.0, 1.0, 1.0))
        .unwrap();
    assert_eq!(outcome, CreateOutcome::AlreadyExists);

    let records = store.read_all_modules().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].weeks, 2);
    assert_eq!(records[0].color, DisplayColor::RED);
    assert!(!store.modules_dir().join("CS101").join("week9").exists());
}

#[test]
fn zero_week_module_is_invalid_input() {
    let root = tempfile::tempdir().unwrap();
    let store = ArchiveStore::new(root.path());
    assert!(store.create_module("CS101", 0, DisplayColor::RED).is_err());
}

#[test]
fn malformed_metadata_defaults_without_failing_listing() {
    let root = tempfile::tempdir().unwrap();
    let store = ArchiveStore::new(root.path());

    store.create_module("CS101", 2, DisplayColor::RED).unwrap();
    std::fs::write(
        store.modules_dir().join("CS101").join(MODULE_INFO_FILE),
        "complete garbage\n",
    )
    .unwrap();

    let records = store.read_all_modules().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].color, DisplayColor::BLACK);
    assert_eq!(records[0].weeks, 0);
}

#[test]
fn empty_archive_lists_no_modules() {
    let root = tempfile::tempdir().unwrap();
    let store = ArchiveStore::new(root.path());
    assert!(store.read_all_modules().unwrap().is_empty());
}

#[test]
fn delete_module_then_relist() {
    let root = tempfile::tempdir().unwrap();
    let store = ArchiveStore::new(root.path());

    store.create_module("CS101", 1, DisplayColor::RED).unwrap();
    assert!(store.delete_module("CS101"));
    assert!(store.read_all_modules().unwrap().is_empty());

    // Already deleted: negative result, not an error.
    assert!(!store.delete_module("CS101"));
}

#[test]
fn create_and_list_lectures() {
    let root = tempfile::tempdir().unwrap();
    let store = ArchiveStore::new(root.path());
    store.create_module("CS101", 2, DisplayColor::RED).unwrap();

    let day_dir = store
        .create_lecture_folder("cs101", 1, "Monday", "Intro", window("09:00 - 10:00"))
        .expect("module lookup is case-insensitive");
    assert!(day_dir.ends_with("week1/Monday"));

    assert_eq!(
        store.list_lectures("CS101", 1, "Monday"),
        vec!["Intro__09:00 - 10:00".to_string()]
    );

    // Missing path segments are an empty list, not an error.
    assert!(store.list_lectures("CS101", 3, "Monday").is_empty());
    assert!(store.list_lectures("CS101", 1, "Someday").is_empty());
    assert!(store.list_lectures("PHYS", 1, "Monday").is_empty());
}

#[test]
fn module_lookup_is_exact_unless_legacy_opt_in() {
    let root = tempfile::tempdir().unwrap();
    let store = ArchiveStore::new(root.path());
    store.create_module("CS101", 1, DisplayColor::RED).unwrap();

    // Exact match: a prefix query finds nothing.
    assert!(store
        .create_lecture_folder("CS", 1, "Monday", "Intro", window("09:00 - 10:00"))
        .is_none());
    assert!(store.find_module("CS", ModuleMatch::Exact).is_none());

    // Deprecated substring lookup is an explicit opt-in.
    assert!(store.find_module("CS", ModuleMatch::LegacySubstring).is_some());
    assert!(store.find_module("s10", ModuleMatch::LegacySubstring).is_some());
}

#[test]
fn delete_lecture_then_again() {
    let root = tempfile::tempdir().unwrap();
    let store = ArchiveStore::new(root.path());
    store.create_module("CS101", 1, DisplayColor::RED).unwrap();
    store
        .create_lecture_folder("CS101", 1, "Friday", "Recap", window("14:00 - 15:00"))
        .unwrap();

    assert!(store.delete_lecture("CS101", 1, "Friday", "Recap__14:00 - 15:00"));
    assert!(store.list_lectures("CS101", 1, "Friday").is_empty());
    assert!(!store.delete_lecture("CS101", 1, "Friday", "Recap__14:00 - 15:00"));
}

#[test]
fn recreating_existing_lecture_folder_is_benign() {
    let root = tempfile::tempdir().unwrap();
    let store = ArchiveStore::new(root.path());
    store.create_module("CS101", 1, DisplayColor::RED).unwrap();

    let w = window("09:00 - 10:00");
    store
        .create_lecture_folder("CS101", 1, "Monday", "Intro", w)
        .unwrap();
    // Same slot again: still returns the day folder, nothing duplicated.
    assert!(store
        .create_lecture_folder("CS101", 1, "Monday", "Intro", w)
        .is_some());
    assert_eq!(store.list_lectures("CS101", 1, "Monday").len(), 1);
}
