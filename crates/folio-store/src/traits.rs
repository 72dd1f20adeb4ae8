use crate::error::StoreResult;

/// Opaque persistent key-value store holding text blobs.
///
/// All implementations must satisfy these invariants:
/// - `put` replaces the whole value for a key; there are no partial writes.
/// - `get` after a successful `put` returns exactly the value written.
/// - The store never interprets values.
/// - All I/O errors are propagated, never silently ignored.
pub trait BlobStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key is absent.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn put(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove a key. Returns `true` if it existed.
    fn remove(&self, key: &str) -> StoreResult<bool>;

    /// All keys currently present, sorted.
    fn keys(&self) -> StoreResult<Vec<String>>;

    /// Check whether a key is present.
    ///
    /// Default implementation calls `get()`. Backends may override.
    fn contains(&self, key: &str) -> StoreResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}
