//! Tests for SettingsStore
//!
//! These tests verify:
//! - Reading from missing, unreadable and populated files
//! - Updates merged and persisted through the backend
//! - Reset replacing everything with the defaults
//! - Failed writes leaving the persisted state untouched
//! - Concurrent updates not losing session tokens

use std::fs;
use std::sync::Arc;
use std::thread;

use envstore::config::Config;
use envstore::envfile::Settings;
use envstore::policy::default_settings;
use envstore::store::{Backend, FileBackend, MemoryBackend, SettingsStore};
use envstore::StoreError;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn settings(entries: &[(&str, &str)]) -> Settings {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn setup_temp_store() -> (TempDir, SettingsStore<FileBackend>) {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .env_path(temp_dir.path().join(".env"))
        .build();
    let store = SettingsStore::open(&config);
    (temp_dir, store)
}

fn memory_store(contents: &str) -> (Arc<MemoryBackend>, SettingsStore<Arc<MemoryBackend>>) {
    let backend = Arc::new(MemoryBackend::with_contents(contents));
    let store = SettingsStore::new(Arc::clone(&backend), default_settings());
    (backend, store)
}

// =============================================================================
// Read Tests
// =============================================================================

#[test]
fn test_read_missing_file_is_empty() {
    let (_temp, store) = setup_temp_store();
    assert!(store.read_all().is_empty());
}

#[test]
fn test_read_failure_is_empty() {
    let (backend, store) = memory_store("VPS=\"true\"\n");
    backend.set_fail_reads(true);

    assert!(store.read_all().is_empty());
}

#[test]
fn test_read_existing_file() {
    let (temp, store) = setup_temp_store();
    fs::write(
        temp.path().join(".env"),
        "# settings\nSESSION_ID='a;_;b'\nVPS=true\n\nbroken line\n",
    )
    .unwrap();

    assert_eq!(
        store.read_all(),
        settings(&[("SESSION_ID", "a;_;b"), ("VPS", "true")])
    );
}

#[test]
fn test_read_sees_external_changes() {
    let (temp, store) = setup_temp_store();
    let path = temp.path().join(".env");

    fs::write(&path, "A=1\n").unwrap();
    assert_eq!(store.read_all(), settings(&[("A", "1")]));

    fs::write(&path, "A=2\n").unwrap();
    assert_eq!(store.read_all(), settings(&[("A", "2")]));
}

// =============================================================================
// Update Tests
// =============================================================================

#[test]
fn test_update_creates_file() {
    let (temp, store) = setup_temp_store();

    let result = store.apply_update(&settings(&[("VPS", "true")])).unwrap();

    assert_eq!(result, settings(&[("VPS", "true")]));
    let contents = fs::read_to_string(temp.path().join(".env")).unwrap();
    assert_eq!(contents, "VPS=\"true\"\n");
}

#[test]
fn test_update_returns_full_mapping() {
    let (_backend, store) = memory_store("A=\"1\"\nB=\"2\"\n");

    let result = store.apply_update(&settings(&[("B", "3")])).unwrap();

    assert_eq!(result, settings(&[("A", "1"), ("B", "3")]));
    assert_eq!(store.read_all(), result);
}

#[test]
fn test_update_session_accumulates() {
    let (backend, store) = memory_store("SESSION_ID=\"a;_;b\"\n");

    store.apply_update(&settings(&[("SESSION_ID", "c")])).unwrap();

    assert_eq!(
        backend.contents().unwrap(),
        "SESSION_ID=\"a;_;b;_;c\"\n"
    );
}

#[test]
fn test_update_session_dedup() {
    let (backend, store) = memory_store("SESSION_ID=\"a;_;b\"\n");

    store.apply_update(&settings(&[("SESSION_ID", "b")])).unwrap();

    assert_eq!(backend.contents().unwrap(), "SESSION_ID=\"a;_;b\"\n");
}

#[test]
fn test_update_non_session_overwrites() {
    let (_backend, store) = memory_store("VPS=\"true\"\n");

    let result = store.apply_update(&settings(&[("VPS", "false")])).unwrap();

    assert_eq!(result, settings(&[("VPS", "false")]));
}

#[test]
fn test_empty_update_is_idempotent() {
    let (temp, store) = setup_temp_store();
    store
        .apply_update(&settings(&[("SESSION_ID", "a;_;b"), ("VPS", "true")]))
        .unwrap();
    let before = fs::read_to_string(temp.path().join(".env")).unwrap();

    store.apply_update(&Settings::new()).unwrap();

    let after = fs::read_to_string(temp.path().join(".env")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_update_drops_comments_and_normalizes() {
    let (temp, store) = setup_temp_store();
    let path = temp.path().join(".env");
    fs::write(&path, "# keep me?\nB='2'\nA=1\n").unwrap();

    store.apply_update(&Settings::new()).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "A=\"1\"\nB=\"2\"\n");
}

#[test]
fn test_update_on_file_with_byte_order_mark_accumulates() {
    let (temp, store) = setup_temp_store();
    let path = temp.path().join(".env");
    fs::write(&path, "\u{feff}SESSION_ID=\"a\"\n").unwrap();

    store.apply_update(&settings(&[("SESSION_ID", "b")])).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "SESSION_ID=\"a;_;b\"\n");
}

#[test]
fn test_update_after_read_failure_starts_from_empty() {
    let (backend, store) = memory_store("OLD=\"x\"\n");
    backend.set_fail_reads(true);

    let result = store.apply_update(&settings(&[("NEW", "y")])).unwrap();

    assert_eq!(result, settings(&[("NEW", "y")]));
}

// =============================================================================
// Reset Tests
// =============================================================================

#[test]
fn test_reset_from_empty() {
    let (_temp, store) = setup_temp_store();

    let result = store.reset_to_defaults().unwrap();

    assert_eq!(result, default_settings());
    assert_eq!(store.read_all(), default_settings());
}

#[test]
fn test_reset_discards_unrelated_keys() {
    let (_backend, store) = memory_store("SESSION_ID=\"mine\"\nCUSTOM=\"1\"\nVPS=\"false\"\n");

    let result = store.reset_to_defaults().unwrap();

    assert_eq!(result.len(), 3);
    assert!(!result.contains_key("CUSTOM"));
    assert_eq!(store.read_all(), default_settings());
}

#[test]
fn test_reset_uses_configured_defaults() {
    let backend = MemoryBackend::new();
    let store = SettingsStore::new(backend, settings(&[("ONLY", "this")]));

    store.reset_to_defaults().unwrap();

    assert_eq!(store.read_all(), settings(&[("ONLY", "this")]));
    assert_eq!(store.defaults(), &settings(&[("ONLY", "this")]));
}

// =============================================================================
// Write Failure Tests
// =============================================================================

#[test]
fn test_update_write_failure_surfaces_and_keeps_state() {
    let (backend, store) = memory_store("VPS=\"true\"\n");
    backend.set_fail_writes(true);

    let err = store.apply_update(&settings(&[("VPS", "false")])).unwrap_err();

    assert!(matches!(err, StoreError::Write { .. }));
    assert_eq!(backend.contents().unwrap(), "VPS=\"true\"\n");
}

#[test]
fn test_reset_write_failure_surfaces_and_keeps_state() {
    let (backend, store) = memory_store("CUSTOM=\"1\"\n");
    backend.set_fail_writes(true);

    let err = store.reset_to_defaults().unwrap_err();

    assert!(matches!(err, StoreError::Write { .. }));
    assert_eq!(store.read_all(), settings(&[("CUSTOM", "1")]));
}

#[test]
fn test_file_write_into_missing_directory_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing").join(".env");
    let store = SettingsStore::new(FileBackend::new(&path), default_settings());

    let err = store.apply_update(&settings(&[("A", "1")])).unwrap_err();

    match err {
        StoreError::Write { path: failed, .. } => assert_eq!(failed, path),
        other => panic!("Expected write error, got {:?}", other),
    }
    assert!(!path.exists());
}

#[test]
fn test_file_write_leaves_no_temp_files() {
    let (temp, store) = setup_temp_store();

    store.apply_update(&settings(&[("A", "1")])).unwrap();
    store.reset_to_defaults().unwrap();

    let entries: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

// =============================================================================
// Backend Tests
// =============================================================================

#[test]
fn test_memory_backend_starts_missing() {
    let backend = MemoryBackend::new();
    let err = backend.read().unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    assert_eq!(backend.contents(), None);
}

#[test]
fn test_file_backend_describe_is_path() {
    let backend = FileBackend::new("/tmp/some/.env");
    assert_eq!(backend.describe(), "/tmp/some/.env");
    assert_eq!(backend.path(), std::path::Path::new("/tmp/some/.env"));
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn test_concurrent_session_updates_all_kept() {
    let (_temp, store) = setup_temp_store();
    let store = Arc::new(store);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let token = format!("token{:02}", i);
                store
                    .apply_update(&settings(&[("SESSION_ID", token.as_str())]))
                    .unwrap();
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let stored = store.read_all()["SESSION_ID"].clone();
    let tokens = envstore::policy::tokens(&stored);
    assert_eq!(tokens.len(), 8);
    for i in 0..8 {
        assert!(tokens.contains(&format!("token{:02}", i).as_str()));
    }
}
