//! Durable, ordered collection of saved sessions.
//!
//! # Responsibility
//! - Restore the full session list from one stored snapshot at startup.
//! - Rewrite the full snapshot on every mutation.
//!
//! # Invariants
//! - Records are ordered newest first; new records are prepended.
//! - In-memory state changes only after the snapshot write succeeded.
//! - A malformed snapshot yields an empty store, never a startup failure.

use crate::model::session::{SessionId, SessionRecord};
use crate::repo::snapshot_storage::{RepoError, RepoResult, SnapshotStorage, SESSIONS_KEY};
use log::{error, info};

/// Saved sessions plus the storage they are mirrored to.
pub struct SessionStore<S: SnapshotStorage> {
    storage: S,
    records: Vec<SessionRecord>,
}

impl<S: SnapshotStorage> SessionStore<S> {
    /// Restores the store from `storage`.
    ///
    /// # Errors
    /// - Returns storage transport errors.
    /// - Malformed snapshots are logged and replaced by an empty store.
    pub fn load(storage: S) -> RepoResult<Self> {
        let records = match storage.read(SESSIONS_KEY)? {
            None => Vec::new(),
            Some(raw) => match decode_snapshot(&raw) {
                Ok(records) => records,
                Err(err) => {
                    error!(
                        "event=session_store_load module=repo status=error error_code=snapshot_decode_failed bytes={} error={}",
                        raw.len(),
                        err
                    );
                    Vec::new()
                }
            },
        };

        info!(
            "event=session_store_load module=repo status=ok records={}",
            records.len()
        );
        Ok(Self { storage, records })
    }

    /// Records, newest first.
    pub fn records(&self) -> &[SessionRecord] {
        &self.records
    }

    pub fn get(&self, id: SessionId) -> Option<&SessionRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns an id later than every stored id and not earlier than `now_ms`.
    pub fn next_id(&self, now_ms: i64) -> SessionId {
        let floor = self
            .records
            .iter()
            .map(|record| record.id.value().saturating_add(1))
            .max()
            .unwrap_or(i64::MIN);
        SessionId::new(now_ms.max(floor))
    }

    /// Prepends `record` and persists the new snapshot.
    pub fn prepend(&mut self, record: SessionRecord) -> RepoResult<()> {
        let mut next = Vec::with_capacity(self.records.len() + 1);
        next.push(record);
        next.extend(self.records.iter().cloned());
        self.replace(next)
    }

    /// Removes the first record with `id`; returns `false` when absent.
    ///
    /// Snapshots from older writers may repeat an id; only one record goes.
    pub fn remove(&mut self, id: SessionId) -> RepoResult<bool> {
        let Some(index) = self.records.iter().position(|record| record.id == id) else {
            return Ok(false);
        };

        let mut next = self.records.clone();
        next.remove(index);
        self.replace(next)?;
        Ok(true)
    }

    fn replace(&mut self, next: Vec<SessionRecord>) -> RepoResult<()> {
        let encoded = encode_snapshot(&next)?;
        self.storage.write(SESSIONS_KEY, &encoded)?;
        self.records = next;
        Ok(())
    }
}

/// Encodes records, in order, as the stored JSON snapshot.
pub fn encode_snapshot(records: &[SessionRecord]) -> RepoResult<String> {
    serde_json::to_string(records).map_err(|err| RepoError::Serialization(err.to_string()))
}

/// Decodes a stored JSON snapshot.
pub fn decode_snapshot(raw: &str) -> RepoResult<Vec<SessionRecord>> {
    serde_json::from_str(raw).map_err(|err| RepoError::InvalidData(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{decode_snapshot, encode_snapshot, SessionStore};
    use crate::model::session::{SessionId, SessionRecord};
    use crate::repo::snapshot_storage::{
        InMemorySnapshotStorage, RepoError, SnapshotStorage, SESSIONS_KEY,
    };
    use std::collections::BTreeMap;

    fn record(id: i64) -> SessionRecord {
        SessionRecord {
            id: SessionId::new(id),
            title: format!("session {id}"),
            date: "2026-01-01".to_string(),
            responses: BTreeMap::new(),
            reflection: String::new(),
            word_count: 0,
        }
    }

    #[test]
    fn next_id_is_strictly_greater_than_existing_ids() {
        let storage = InMemorySnapshotStorage::new();
        let mut store = SessionStore::load(&storage).unwrap();
        assert_eq!(store.next_id(100), SessionId::new(100));

        store.prepend(record(100)).unwrap();
        assert_eq!(store.next_id(100), SessionId::new(101));
        assert_eq!(store.next_id(50), SessionId::new(101));
        assert_eq!(store.next_id(500), SessionId::new(500));
    }

    #[test]
    fn removing_last_record_persists_empty_snapshot() {
        let storage = InMemorySnapshotStorage::new();
        let mut store = SessionStore::load(&storage).unwrap();
        store.prepend(record(1)).unwrap();
        assert!(store.remove(SessionId::new(1)).unwrap());

        let raw = storage.read(SESSIONS_KEY).unwrap().unwrap();
        assert_eq!(raw, "[]");
    }

    #[test]
    fn remove_drops_only_one_of_duplicate_ids() {
        let mut first = record(5);
        first.title = "first".to_string();
        let mut second = record(5);
        second.title = "second".to_string();
        let raw = encode_snapshot(&[record(9), first, second, record(1)]).unwrap();
        let storage = InMemorySnapshotStorage::with_entry(SESSIONS_KEY, raw);
        let mut store = SessionStore::load(&storage).unwrap();

        assert!(store.remove(SessionId::new(5)).unwrap());
        let titles: Vec<_> = store.records().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["session 9", "second", "session 1"]);

        let persisted = decode_snapshot(&storage.read(SESSIONS_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(persisted, store.records().to_vec());
    }

    #[test]
    fn malformed_snapshot_loads_as_empty_store() {
        let storage = InMemorySnapshotStorage::with_entry(SESSIONS_KEY, "{not json");
        let store = SessionStore::load(&storage).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn decode_rejects_records_missing_fields() {
        let err = decode_snapshot(r#"[{"id": 1, "title": "x"}]"#).unwrap_err();
        assert!(matches!(err, RepoError::InvalidData(_)));
    }
}
