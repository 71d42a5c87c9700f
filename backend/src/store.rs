use std::sync::{Mutex, MutexGuard};
use shared::registry::Registry;
use tracing::error;

/// One lock over the whole registry: every request sees either none or all of
/// another request's writes.
pub type RegistryStore = Mutex<Registry>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to acquire registry lock")]
    LockFailed,
}

pub fn new_store(registry: Registry) -> RegistryStore {
    Mutex::new(registry)
}

pub fn lock(store: &RegistryStore) -> Result<MutexGuard<'_, Registry>, StoreError> {
    store.lock().map_err(|e| {
        error!("Registry lock poisoned: {}", e);
        StoreError::LockFailed
    })
}
