use std::collections::HashMap;
use std::sync::RwLock;

use cairn_types::ObjectId;

use crate::error::{StoreError, StoreResult};
use crate::object::Object;
use crate::traits::ObjectStore;

/// In-memory, HashMap-based object store.
///
/// Intended for tests and embedding. Objects are kept in their canonical
/// encoding behind a `RwLock` and decoded on every read, exactly as the
/// filesystem store does.
pub struct InMemoryObjectStore {
    objects: RwLock<HashMap<ObjectId, Vec<u8>>>,
}

impl InMemoryObjectStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> usize {
        self.objects.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.read().expect("lock poisoned").is_empty()
    }

    /// Total encoded bytes across all stored objects.
    pub fn total_bytes(&self) -> u64 {
        self.objects
            .read()
            .expect("lock poisoned")
            .values()
            .map(|bytes| bytes.len() as u64)
            .sum()
    }

    /// Return a sorted list of all object IDs in the store.
    pub fn all_ids(&self) -> Vec<ObjectId> {
        let map = self.objects.read().expect("lock poisoned");
        let mut ids: Vec<ObjectId> = map.keys().copied().collect();
        ids.sort();
        ids
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectStore for InMemoryObjectStore {
    fn put(&self, object: &Object) -> StoreResult<()> {
        let mut map = self.objects.write().expect("lock poisoned");
        map.insert(object.id(), object.encode());
        Ok(())
    }

    fn get(&self, id: &ObjectId) -> StoreResult<Object> {
        let bytes = {
            let map = self.objects.read().expect("lock poisoned");
            map.get(id).cloned().ok_or(StoreError::NotFound(*id))?
        };
        Object::decode(bytes, *id).map_err(|source| StoreError::MalformedObject { id: *id, source })
    }

    fn exists(&self, id: &ObjectId) -> StoreResult<bool> {
        let map = self.objects.read().expect("lock poisoned");
        Ok(map.contains_key(id))
    }
}

impl std::fmt::Debug for InMemoryObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len();
        f.debug_struct("InMemoryObjectStore")
            .field("object_count", &count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cairn_types::ObjectKind;

    // -----------------------------------------------------------------------
    // Core put / get
    // -----------------------------------------------------------------------

    #[test]
    fn put_and_get_blob() {
        let store = InMemoryObjectStore::new();
        let obj = Object::blob("hello world");
        store.put(&obj).unwrap();

        let read_back = store.get(&obj.id()).unwrap();
        assert_eq!(read_back, obj);
    }

    #[test]
    fn put_and_get_tree() {
        let store = InMemoryObjectStore::new();
        let payload = format!("blob {} a.txt\n", Object::blob("a").id());
        let obj = Object::from_payload(ObjectKind::Tree, payload.clone().into_bytes());
        store.put(&obj).unwrap();

        let read_back = store.get(&obj.id()).unwrap();
        assert_eq!(read_back.kind(), ObjectKind::Tree);
        assert_eq!(read_back.payload(), payload.as_bytes());
    }

    #[test]
    fn get_missing_object_is_not_found() {
        let store = InMemoryObjectStore::new();
        let id = Object::blob("missing").id();
        let err = store.get(&id).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(missing) if missing == id));
    }

    // -----------------------------------------------------------------------
    // Content-addressing correctness
    // -----------------------------------------------------------------------

    #[test]
    fn put_is_idempotent() {
        let store = InMemoryObjectStore::new();
        let obj = Object::blob("identical content");
        store.put(&obj).unwrap();
        store.put(&Object::blob("identical content")).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&obj.id()).unwrap(), obj);
    }

    #[test]
    fn different_content_is_stored_separately() {
        let store = InMemoryObjectStore::new();
        store.put(&Object::blob("aaa")).unwrap();
        store.put(&Object::blob("bbb")).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn verified_read_matches() {
        let store = InMemoryObjectStore::new();
        let obj = Object::blob("verify me");
        store.put(&obj).unwrap();
        let read_back = store.get_verified(&obj.id()).unwrap();
        assert_eq!(read_back.compute_id(), obj.id());
    }

    // -----------------------------------------------------------------------
    // Exists
    // -----------------------------------------------------------------------

    #[test]
    fn exists_tracks_puts() {
        let store = InMemoryObjectStore::new();
        let obj = Object::blob("present");
        assert!(!store.exists(&obj.id()).unwrap());
        store.put(&obj).unwrap();
        assert!(store.exists(&obj.id()).unwrap());
    }

    // -----------------------------------------------------------------------
    // Utility methods
    // -----------------------------------------------------------------------

    #[test]
    fn len_and_is_empty() {
        let store = InMemoryObjectStore::default();
        assert!(store.is_empty());
        store.put(&Object::blob("a")).unwrap();
        assert!(!store.is_empty());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn total_bytes_counts_headers() {
        let store = InMemoryObjectStore::new();
        store.put(&Object::blob("12345")).unwrap(); // "blob\0" + 5
        store.put(&Object::from_payload(ObjectKind::Tree, Vec::new())).unwrap(); // "tree\0"
        assert_eq!(store.total_bytes(), 10 + 5);
    }

    #[test]
    fn all_ids_is_sorted() {
        let store = InMemoryObjectStore::new();
        for data in ["aaa", "bbb", "ccc"] {
            store.put(&Object::blob(data)).unwrap();
        }
        let ids = store.all_ids();
        assert_eq!(ids.len(), 3);
        for w in ids.windows(2) {
            assert!(w[0] <= w[1]);
        }
    }

    #[test]
    fn concurrent_reads_are_safe() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(InMemoryObjectStore::new());
        let obj = Object::blob("shared data");
        store.put(&obj).unwrap();
        let id = obj.id();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    let read_obj = store.get_verified(&id).unwrap();
                    assert_eq!(read_obj.payload(), b"shared data");
                })
            })
            .collect();

        for h in handles {
            h.join().expect("thread should not panic");
        }
    }

    #[test]
    fn debug_format() {
        let store = InMemoryObjectStore::new();
        store.put(&Object::blob("x")).unwrap();
        let debug = format!("{store:?}");
        assert!(debug.contains("InMemoryObjectStore"));
        assert!(debug.contains("object_count"));
    }
}
