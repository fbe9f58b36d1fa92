//! Durable key-value backends.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::Result;
use crate::keys::StoreKey;

/// A plain-text key-value store scoped to one client session.
///
/// Single writer. Each `set` must replace the whole value atomically.
pub trait DurableStore {
    /// Read a key. `Ok(None)` when the key was never written or was removed.
    fn get(&self, key: StoreKey) -> Result<Option<String>>;

    /// Write a key, replacing any previous value.
    fn set(&mut self, key: StoreKey, value: &str) -> Result<()>;

    /// Remove a key. Removing a missing key is not an error.
    fn remove(&mut self, key: StoreKey) -> Result<()>;

    /// Remove every key.
    fn clear(&mut self) -> Result<()> {
        for key in StoreKey::ALL {
            self.remove(key)?;
        }
        Ok(())
    }
}
