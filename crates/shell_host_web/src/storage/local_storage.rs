//! `localStorage`-backed configuration store.
//!
//! The browser API is synchronous; the [`ConfigStorage`] futures resolve immediately.

use shell_host::{ConfigStorage, StorageError, StorageFuture};

#[derive(Debug, Clone, Copy, Default)]
/// Configuration store backed by `window.localStorage`.
pub struct WebConfigStorage;

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or(StorageError::Unavailable)
}

impl WebConfigStorage {
    /// Reads the raw text stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when localStorage is unavailable or the read throws.
    pub fn load(self, key: &str) -> Result<Option<String>, StorageError> {
        #[cfg(target_arch = "wasm32")]
        {
            local_storage()?
                .get_item(key)
                .map_err(|e| StorageError::Read(format!("localStorage get_item failed: {e:?}")))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Ok(None)
        }
    }

    /// Writes raw text under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when localStorage is unavailable or the write fails (for example when the
    /// quota is exceeded).
    pub fn save(self, key: &str, raw_json: &str) -> Result<(), StorageError> {
        #[cfg(target_arch = "wasm32")]
        {
            local_storage()?
                .set_item(key, raw_json)
                .map_err(|e| StorageError::Write(format!("localStorage set_item failed: {e:?}")))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (key, raw_json);
            Ok(())
        }
    }

    /// Removes `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when localStorage is unavailable or the delete fails.
    pub fn delete(self, key: &str) -> Result<(), StorageError> {
        #[cfg(target_arch = "wasm32")]
        {
            local_storage()?.remove_item(key).map_err(|e| {
                StorageError::Write(format!("localStorage remove_item failed: {e:?}"))
            })
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Ok(())
        }
    }
}

impl ConfigStorage for WebConfigStorage {
    fn load_raw<'a>(
        &'a self,
        key: &'a str,
    ) -> StorageFuture<'a, Result<Option<String>, StorageError>> {
        let store = *self;
        Box::pin(async move { store.load(key) })
    }

    fn save_raw<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> StorageFuture<'a, Result<(), StorageError>> {
        let store = *self;
        Box::pin(async move { store.save(key, raw_json) })
    }

    fn remove<'a>(&'a self, key: &'a str) -> StorageFuture<'a, Result<(), StorageError>> {
        let store = *self;
        Box::pin(async move { store.delete(key) })
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn native_builds_read_nothing_and_accept_writes() {
        let storage: &dyn ConfigStorage = &WebConfigStorage;
        block_on(storage.save_raw("ishell_state", "{}")).expect("save");
        assert_eq!(block_on(storage.load_raw("ishell_state")).expect("load"), None);
        block_on(storage.remove("ishell_state")).expect("remove");
    }
}
