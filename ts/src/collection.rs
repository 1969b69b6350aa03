//! Record collections stored as one JSON array under one key

use eyre::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::kv::KeyValueStore;

/// A record that can live in a [`Collection`]
pub trait Record: Serialize + DeserializeOwned + Clone + Send + 'static {
    /// Identity used for upsert and delete
    fn id(&self) -> &str;
}

/// Schema-less records, identified by their `"id"` field
impl Record for serde_json::Value {
    fn id(&self) -> &str {
        self.get("id").and_then(serde_json::Value::as_str).unwrap_or("")
    }
}

/// A typed collection persisted as a JSON array under a single key
///
/// Each operation is a full read-modify-write of the array. There is no
/// locking here: two writers sharing the same backend can lose updates.
pub struct Collection<T> {
    kv: Arc<dyn KeyValueStore>,
    key: String,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            kv: Arc::clone(&self.kv),
            key: self.key.clone(),
            _record: PhantomData,
        }
    }
}

impl<T: Record> Collection<T> {
    pub fn new(kv: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        debug!(%key, "Collection::new: called");
        Self {
            kv,
            key,
            _record: PhantomData,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the collection, treating unparseable content as empty
    ///
    /// Read failures from the backend are returned; only the parse step
    /// degrades to an empty collection.
    fn load(&self) -> Result<Vec<T>> {
        debug!(key = %self.key, "load: called");
        let Some(raw) = self.kv.get(&self.key)? else {
            debug!("load: key absent, empty collection");
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(records) => Ok(records),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Error parsing saved records, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    fn store(&self, records: &[T]) -> Result<()> {
        debug!(key = %self.key, count = records.len(), "store: called");
        let raw = serde_json::to_string(records).context("Failed to serialize records")?;
        self.kv.set(&self.key, &raw)
    }

    /// All records in insertion order; never fails
    pub fn list(&self) -> Vec<T> {
        debug!(key = %self.key, "list: called");
        self.load().unwrap_or_else(|e| {
            warn!(key = %self.key, error = %e, "Failed to read saved records, treating as empty");
            Vec::new()
        })
    }

    /// First record with a matching id
    pub fn get_by_id(&self, id: &str) -> Option<T> {
        debug!(%id, "get_by_id: called");
        self.list().into_iter().find(|r| r.id() == id)
    }

    /// Insert or replace by id
    ///
    /// An existing record keeps its position; a new one is appended.
    pub fn save(&self, record: T) -> Result<()> {
        debug!(id = %record.id(), "save: called");
        let mut records = self.load()?;

        match records.iter().position(|r| r.id() == record.id()) {
            Some(index) => {
                debug!(%index, "save: replacing existing record");
                records[index] = record;
            }
            None => {
                debug!("save: appending new record");
                records.push(record);
            }
        }

        self.store(&records)
    }

    /// Remove every record with a matching id; missing ids are a no-op
    pub fn delete_by_id(&self, id: &str) -> Result<()> {
        debug!(%id, "delete_by_id: called");
        let mut records = self.load()?;
        let before = records.len();
        records.retain(|r| r.id() != id);

        let removed = before - records.len();
        if removed > 0 {
            info!(%id, removed, "Deleted record");
        }

        self.store(&records)
    }

    pub fn len(&self) -> usize {
        self.list().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::{FileKv, MemoryKv};
    use serde::Deserialize;
    use tempfile::TempDir;

    const KEY: &str = "records";

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: String,
        body: String,
    }

    impl Record for Note {
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn note(id: &str, body: &str) -> Note {
        Note {
            id: id.to_string(),
            body: body.to_string(),
        }
    }

    fn memory_collection() -> (Arc<MemoryKv>, Collection<Note>) {
        let kv = Arc::new(MemoryKv::new());
        let collection = Collection::new(kv.clone() as Arc<dyn KeyValueStore>, KEY);
        (kv, collection)
    }

    #[test]
    fn test_list_absent_key_is_empty() {
        let (_kv, notes) = memory_collection();
        assert!(notes.list().is_empty());
        assert!(notes.is_empty());
    }

    #[test]
    fn test_list_unparseable_value_is_empty() {
        let (kv, notes) = memory_collection();
        kv.set(KEY, "{not json").unwrap();
        assert!(notes.list().is_empty());

        kv.set(KEY, r#"[{"id": 7}]"#).unwrap();
        assert!(notes.list().is_empty());
    }

    #[test]
    fn test_save_appends_in_insertion_order() {
        let (_kv, notes) = memory_collection();
        notes.save(note("a", "1")).unwrap();
        notes.save(note("b", "2")).unwrap();
        notes.save(note("c", "3")).unwrap();

        let ids: Vec<String> = notes.list().into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_save_same_id_replaces_in_place() {
        let (_kv, notes) = memory_collection();
        notes.save(note("a", "1")).unwrap();
        notes.save(note("b", "2")).unwrap();
        notes.save(note("c", "3")).unwrap();

        notes.save(note("b", "first")).unwrap();
        notes.save(note("b", "second")).unwrap();

        let all = notes.list();
        assert_eq!(all, vec![note("a", "1"), note("b", "second"), note("c", "3")]);
    }

    #[test]
    fn test_save_then_get_by_id_round_trips() {
        let (_kv, notes) = memory_collection();
        let n = note("x", "hello");
        notes.save(n.clone()).unwrap();

        assert_eq!(notes.get_by_id("x"), Some(n));
        assert_eq!(notes.get_by_id("y"), None);
    }

    #[test]
    fn test_delete_missing_id_leaves_collection_unchanged() {
        let (_kv, notes) = memory_collection();
        notes.save(note("a", "1")).unwrap();
        notes.save(note("b", "2")).unwrap();
        let before = notes.list();

        notes.delete_by_id("zzz").unwrap();

        assert_eq!(notes.list(), before);
    }

    #[test]
    fn test_delete_removes_every_match() {
        let (kv, notes) = memory_collection();
        kv.set(KEY, r#"[{"id":"a","body":"1"},{"id":"b","body":"2"},{"id":"a","body":"3"}]"#)
            .unwrap();

        notes.delete_by_id("a").unwrap();

        assert_eq!(notes.list(), vec![note("b", "2")]);
    }

    #[test]
    fn test_save_over_corrupt_value_starts_fresh() {
        let (kv, notes) = memory_collection();
        kv.set(KEY, "garbage").unwrap();

        notes.save(note("a", "1")).unwrap();

        assert_eq!(notes.list(), vec![note("a", "1")]);
    }

    #[test]
    fn test_stored_value_is_json_array() {
        let (kv, notes) = memory_collection();
        notes.save(note("a", "1")).unwrap();

        let raw = kv.get(KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["id"], "a");
    }

    #[test]
    fn test_file_backed_collection() {
        let temp = TempDir::new().unwrap();
        let kv: Arc<dyn KeyValueStore> = Arc::new(FileKv::open(temp.path()).unwrap());
        let notes: Collection<Note> = Collection::new(kv.clone(), KEY);
        notes.save(note("a", "1")).unwrap();

        let again: Collection<Note> = Collection::new(kv, KEY);
        assert_eq!(again.len(), 1);
    }

    #[test]
    fn test_value_records_use_id_field() {
        let (kv, _notes) = memory_collection();
        let values: Collection<serde_json::Value> = Collection::new(kv as Arc<dyn KeyValueStore>, KEY);
        values.save(serde_json::json!({"id": "v1", "anything": true})).unwrap();
        values.save(serde_json::json!({"id": "v1", "anything": false})).unwrap();

        let all = values.list();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0]["anything"], false);
    }
}
