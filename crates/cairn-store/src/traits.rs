use cairn_types::ObjectId;

use crate::error::{StoreError, StoreResult};
use crate::object::Object;

/// Content-addressed object store.
///
/// All implementations must satisfy these invariants:
/// - Objects are immutable once written. The same content always produces
///   the same ID, so writing an ID twice is a no-op.
/// - `get` returns the object under the requested ID without rehashing;
///   [`ObjectStore::get_verified`] adds the integrity check.
/// - A missing object is [`StoreError::NotFound`], never a generic I/O error.
/// - All I/O errors are propagated, never silently ignored.
pub trait ObjectStore: Send + Sync {
    /// Persist an object under its identifier. Idempotent.
    fn put(&self, object: &Object) -> StoreResult<()>;

    /// Read an object by its content-addressed ID.
    fn get(&self, id: &ObjectId) -> StoreResult<Object>;

    /// Check whether an object exists in the store.
    fn exists(&self, id: &ObjectId) -> StoreResult<bool>;

    /// Read an object and check that its content hashes to `id`.
    fn get_verified(&self, id: &ObjectId) -> StoreResult<Object> {
        let object = self.get(id)?;
        let computed = object.compute_id();
        if computed != *id {
            return Err(StoreError::HashMismatch { id: *id, computed });
        }
        Ok(object)
    }
}
