//! Hierarchical key-value backend addressed by `(group, key)`.

use anyhow::Result;

/// Persistent storage for versioned properties.
///
/// Groups are version labels (the empty label is the unversioned group). Keys
/// are bare property names. Implementations own durability; callers never
/// retry or translate their errors.
pub trait SettingsBackend {
    fn read(&self, group: &str, key: &str) -> Result<Option<String>>;
    fn write(&mut self, group: &str, key: &str, value: &str) -> Result<()>;
    /// Deleting a missing key is not an error.
    fn delete(&mut self, group: &str, key: &str) -> Result<()>;
    /// All group labels, in no particular order.
    fn groups(&self) -> Result<Vec<String>>;
    /// Keys of `group`, empty when the group does not exist.
    fn keys(&self, group: &str) -> Result<Vec<String>>;
}

/// Deferred constructor for a backend.
///
/// The store calls `open` at most once, the first time a persisted property is
/// needed.
pub trait BackendSource {
    type Backend: SettingsBackend;

    fn open(&self) -> Result<Self::Backend>;
}
