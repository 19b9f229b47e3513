//! Integration tests for archive root resolution
//!
//! Note: Uses the serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate LECTERN_ROOT are marked with #[serial] so they run
//! sequentially, not in parallel.

use lectern_common::config::{default_archive_root, resolve_archive_root, ROOT_ENV_VAR};
use serial_test::serial;
use std::env;
use std::path::PathBuf;

#[test]
#[serial]
fn explicit_argument_wins_over_everything() {
    env::set_var(ROOT_ENV_VAR, "/tmp/lectern-env-root");

    let root = resolve_archive_root(Some("/tmp/lectern-explicit-root"));
    assert_eq!(root, PathBuf::from("/tmp/lectern-explicit-root"));

    env::remove_var(ROOT_ENV_VAR);
}

#[test]
#[serial]
fn env_var_wins_over_default() {
    env::set_var(ROOT_ENV_VAR, "/tmp/lectern-env-root");

    let root = resolve_archive_root(None);
    assert_eq!(root, PathBuf::from("/tmp/lectern-env-root"));

    env::remove_var(ROOT_ENV_VAR);
}

#[test]
#[serial]
fn empty_env_var_is_ignored() {
    env::set_var(ROOT_ENV_VAR, "");

    let root = resolve_archive_root(None);
    assert_ne!(root, PathBuf::new());

    env::remove_var(ROOT_ENV_VAR);
}

#[test]
#[serial]
fn no_overrides_falls_back_to_compiled_default() {
    env::remove_var(ROOT_ENV_VAR);

    let root = resolve_archive_root(None);
    assert!(!root.as_os_str().is_empty());

    // In the common case (no config file present) the resolver lands on
    // the compiled default for the platform.
    let config_file = dirs::config_dir().map(|d| d.join("lectern").join("config.toml"));
    let has_config_file = config_file.map(|p| p.exists()).unwrap_or(false)
        || (cfg!(target_os = "linux") && PathBuf::from("/etc/lectern/config.toml").exists());
    if !has_config_file {
        assert_eq!(root, default_archive_root());
    }
}
