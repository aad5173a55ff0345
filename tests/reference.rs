//! Tests for reference id parsing, persistence and session lifecycle.
mod common;
use common::*;
use blocktree::prelude::*;
use std::sync::Arc;

fn settings() -> Settings {
    Settings {
        project_id: "001".to_string(),
        user_id: "3654823".to_string(),
        ..Settings::default()
    }
}

#[test]
fn test_parse_valid_id() {
    let id = ReferenceId::parse("001.3654823.1741177241").unwrap();
    assert_eq!(id.project_id, "001");
    assert_eq!(id.user_id, "3654823");
    assert_eq!(id.timestamp, 1_741_177_241);
    assert_eq!(id.to_string(), "001.3654823.1741177241");
    assert_eq!("001.3654823.1741177241".parse::<ReferenceId>().unwrap(), id);
}

#[test]
fn test_parse_rejects_wrong_shape() {
    assert_eq!(
        ReferenceId::parse("bad.id"),
        Err(FormatError::SegmentCount {
            id: "bad.id".to_string(),
            found: 2
        })
    );
    assert!(matches!(
        ReferenceId::parse("a.b.c.d"),
        Err(FormatError::SegmentCount { found: 4, .. })
    ));
    assert!(matches!(
        ReferenceId::parse("001.3654823.soon"),
        Err(FormatError::Timestamp { .. })
    ));
    for timestamp in ["+17", "", "-", " 17", "1_7"] {
        let id = format!("001.3654823.{}", timestamp);
        assert!(
            matches!(ReferenceId::parse(&id), Err(FormatError::Timestamp { .. })),
            "accepted {id}"
        );
    }
    assert_eq!(ReferenceId::parse("001.3654823.-5").unwrap().timestamp, -5);
}

#[test]
fn test_generate_uses_settings_and_clock() {
    let manager = ReferenceIdManager::with_clock(&settings(), MemoryStore::new(), || 1_700_000_000i64);
    assert_eq!(manager.generate().to_string(), "001.3654823.1700000000");
    assert_eq!(manager.partial(), "001.3654823");
    // Generating does not persist.
    assert!(manager.current().unwrap().is_none());
}

#[test]
fn test_get_or_create_is_idempotent() {
    let manager = ReferenceIdManager::with_clock(&settings(), MemoryStore::new(), ticking_clock(100));
    let first = manager.get_or_create().unwrap();
    let second = manager.get_or_create().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.timestamp, 100);
    assert_eq!(manager.current().unwrap(), Some(first));
}

#[test]
fn test_reset_starts_new_session() {
    let manager = ReferenceIdManager::with_clock(&settings(), MemoryStore::new(), ticking_clock(100));
    let before = manager.get_or_create().unwrap();
    let reset = manager.reset().unwrap();
    let after = manager.get_or_create().unwrap();

    assert_ne!(before, after);
    assert_eq!(reset, after);
}

#[test]
fn test_malformed_stored_id_is_replaced() {
    let store = Arc::new(MemoryStore::new());
    store.set("diogen_reference_id", "garbage").unwrap();

    let manager = ReferenceIdManager::with_clock(&settings(), Arc::clone(&store), || 5i64);
    assert!(matches!(manager.current(), Err(ReferenceError::Format(_))));

    let id = manager.get_or_create().unwrap();
    assert_eq!(id.timestamp, 5);
    assert_eq!(
        store.get("diogen_reference_id").unwrap().as_deref(),
        Some("001.3654823.5")
    );
}

#[test]
fn test_adopt_and_clear() {
    let manager = ReferenceIdManager::with_clock(&settings(), MemoryStore::new(), || 1i64);

    assert!(matches!(manager.adopt("001.3654823"), Err(ReferenceError::Format(_))));
    let adopted = manager.adopt("001.3654823.1741177241").unwrap();
    assert_eq!(manager.get_or_create().unwrap(), adopted);

    manager.clear().unwrap();
    assert!(manager.current().unwrap().is_none());
}

#[test]
fn test_scoped_storage_key() {
    let scoped = Settings {
        scoped_storage: true,
        ..settings()
    };
    let manager = ReferenceIdManager::with_clock(&scoped, MemoryStore::new(), || 1i64);
    assert_eq!(manager.key(), "diogen_reference_id.001.3654823");

    manager.get_or_create().unwrap();
    assert!(manager.store().get("diogen_reference_id").unwrap().is_none());
    assert!(manager.store().get(manager.key()).unwrap().is_some());
}

#[test]
fn test_file_store_survives_new_manager() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("storage.json");

    let first = ReferenceIdManager::with_clock(&settings(), FileStore::new(&path), || 10i64)
        .get_or_create()
        .unwrap();

    // A second manager over the same file sees the persisted session.
    let manager = ReferenceIdManager::with_clock(&settings(), FileStore::new(&path), || 20i64);
    assert_eq!(manager.get_or_create().unwrap(), first);

    let renewed = manager.reset().unwrap();
    assert_eq!(renewed.timestamp, 20);

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("001.3654823.20"));
}

#[test]
fn test_file_store_reports_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "not json").unwrap();

    let store = FileStore::new(&path);
    assert!(matches!(store.get("key"), Err(StoreError::Corrupt { .. })));
}
