//! Integration test for the SQLite key-value backend.
//!
//! Exercises: open_db, migrate, SqliteKvStore get/set, persistence across
//! connections, and the saved-profile store on top of it.

use std::sync::Arc;

use octoscope_core::db::{self, SqliteKvStore};
use octoscope_core::kv::PersistentKeyValueStore;
use octoscope_core::notify::Notification;
use octoscope_core::saved::{SavedProfileStore, SAVED_PROFILES_KEY};

fn temp_db_path() -> std::path::PathBuf {
    let dir = tempfile::TempDir::new().unwrap();
    dir.keep().join("test.db")
}

#[test]
fn kv_lifecycle() {
    let path = temp_db_path();
    let conn = db::open_db(&path).unwrap();

    let version: i64 = conn
        .query_row("SELECT MAX(version) FROM schema_version", [], |r| r.get(0))
        .unwrap();
    assert_eq!(version, 1, "schema_version should be 1");

    let journal: String = conn
        .query_row("PRAGMA journal_mode", [], |r| r.get(0))
        .unwrap();
    assert_eq!(journal, "wal", "journal_mode should be wal");

    let key_type: String = conn
        .query_row(
            "SELECT type FROM pragma_table_info('kv') WHERE name = 'key'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(key_type, "TEXT", "kv.key should be TEXT");

    let mut store = SqliteKvStore::from_connection(conn).unwrap();
    assert_eq!(store.get("missing").unwrap(), None);

    store.set("greeting", "hello").unwrap();
    assert_eq!(store.get("greeting").unwrap().as_deref(), Some("hello"));

    // Upsert replaces rather than duplicating.
    store.set("greeting", "hi").unwrap();
    assert_eq!(store.get("greeting").unwrap().as_deref(), Some("hi"));

    drop(store);
    let reopened = SqliteKvStore::open(&path).unwrap();
    assert_eq!(
        reopened.get("greeting").unwrap().as_deref(),
        Some("hi"),
        "value should persist across connections"
    );

    let rows: i64 = db::open_db(&path)
        .unwrap()
        .query_row("SELECT COUNT(*) FROM kv", [], |r| r.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn migration_is_idempotent() {
    let path = temp_db_path();
    drop(db::open_db(&path).unwrap());
    let conn = db::open_db(&path).unwrap();

    let versions: i64 = conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |r| r.get(0))
        .unwrap();
    assert_eq!(versions, 1, "reopening must not re-apply v1");
}

#[test]
fn saved_profiles_survive_restart() {
    let path = temp_db_path();
    let sink = Arc::new(|_: Notification| {});

    {
        let kv = SqliteKvStore::open(&path).unwrap();
        let mut store = SavedProfileStore::load(Box::new(kv), sink.clone());
        assert!(store.add("octocat"));
        assert!(store.add("GaearOn"));
        assert!(store.add("tj"));
        store.remove("tj").unwrap();
    }

    let kv = SqliteKvStore::open(&path).unwrap();
    assert_eq!(
        kv.get(SAVED_PROFILES_KEY).unwrap().as_deref(),
        Some(r#"["octocat","GaearOn"]"#)
    );

    let store = SavedProfileStore::load(Box::new(kv), sink);
    let names: Vec<&str> = store.profiles().iter().map(|p| p.as_str()).collect();
    assert_eq!(names, ["octocat", "GaearOn"]);
}
