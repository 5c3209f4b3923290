mod common;

use common::{FrozenClock, ScriptedPrompter};
use ghostscramble_core::db::{open_db, DB_FILE_NAME};
use ghostscramble_core::{
    decode_snapshot, encode_snapshot, SessionId, SessionRecord, SessionService, SessionStore,
    SnapshotStorage, SqliteSnapshotStorage, SESSIONS_KEY,
};
use std::collections::BTreeMap;

fn record(id: i64, title: &str, entries: &[(&str, &str)], reflection: &str) -> SessionRecord {
    let responses: BTreeMap<String, String> = entries
        .iter()
        .map(|(key, text)| (key.to_string(), text.to_string()))
        .collect();
    SessionRecord {
        id: SessionId::new(id),
        title: title.to_string(),
        date: "2026-02-01".to_string(),
        word_count: ghostscramble_core::count_words(responses.values(), reflection),
        responses,
        reflection: reflection.to_string(),
    }
}

#[test]
fn snapshot_roundtrip_preserves_order_and_fields() {
    let records = vec![
        record(3, "newest", &[("G", "one two"), ("S2", "a spiral")], "ends"),
        record(2, "middle", &[], ""),
        record(1, "oldest", &[("E", "the old house")], "  spaced  "),
    ];

    let encoded = encode_snapshot(&records).unwrap();
    assert_eq!(decode_snapshot(&encoded).unwrap(), records);
}

#[test]
fn decodes_snapshot_written_with_numeric_ids_and_camel_case_fields() {
    let raw = r#"[{"id":1718000000000,"title":"Old","date":"6/10/2024","entries":{"G":"hi there"},"reflection":"","wordCount":3}]"#;
    let records = decode_snapshot(raw).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, SessionId::new(1_718_000_000_000));
    assert_eq!(records[0].date, "6/10/2024");
    assert_eq!(records[0].word_count, 3);
}

#[test]
fn sessions_survive_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DB_FILE_NAME);

    let saved_id = {
        let conn = open_db(&path).unwrap();
        let store = SessionStore::load(SqliteSnapshotStorage::new(&conn)).unwrap();
        let mut service =
            SessionService::with_clock(store, ScriptedPrompter::default(), FrozenClock::at(5_000));
        service.draft_mut().set_response("R", "north").unwrap();
        service.draft_mut().set_reflection("moving on");
        service.draft_mut().set_title("Compass");
        service.save().unwrap()
    };

    let conn = open_db(&path).unwrap();
    let store = SessionStore::load(SqliteSnapshotStorage::new(&conn)).unwrap();
    assert_eq!(store.len(), 1);
    let restored = store.get(saved_id).unwrap();
    assert_eq!(restored.title, "Compass");
    assert_eq!(restored.responses.get("R").map(String::as_str), Some("north"));
    assert_eq!(restored.reflection, "moving on");
    assert_eq!(restored.word_count, 3);
}

#[test]
fn corrupt_snapshot_falls_back_to_empty_store_and_is_replaced_on_save() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_db(dir.path().join(DB_FILE_NAME)).unwrap();
    let storage = SqliteSnapshotStorage::new(&conn);
    storage.write(SESSIONS_KEY, "[{\"id\": oops").unwrap();

    let store = SessionStore::load(&storage).unwrap();
    assert!(store.is_empty());

    let mut service =
        SessionService::with_clock(store, ScriptedPrompter::default(), FrozenClock::at(9));
    service.draft_mut().set_title("Fresh start");
    let id = service.save().unwrap();

    let raw = storage.read(SESSIONS_KEY).unwrap().unwrap();
    let restored = decode_snapshot(&raw).unwrap();
    assert_eq!(restored.len(), 1);
    assert_eq!(restored[0].id, id);
}
