//! Durable key/value storage for shell configuration.
//!
//! Values are JSON text stored per key. The trait is async and object safe so the runtime can hold
//! an `Rc<dyn ConfigStorage>` regardless of which adapter the entry layer injected.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Object-safe boxed future returned by [`ConfigStorage`] methods.
pub type StorageFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failures surfaced by storage adapters and the typed JSON helpers.
pub enum StorageError {
    /// The backing store does not exist in this environment.
    #[error("storage unavailable")]
    Unavailable,
    /// Reading a key failed.
    #[error("storage read failed: {0}")]
    Read(String),
    /// Writing or removing a key failed.
    #[error("storage write failed: {0}")]
    Write(String),
    /// A value could not be encoded as JSON.
    #[error("serialize failed: {0}")]
    Serialize(String),
    /// Stored text was not valid JSON for the requested type.
    #[error("deserialize failed: {0}")]
    Deserialize(String),
}

/// Host service for durable JSON values keyed by string.
pub trait ConfigStorage {
    /// Loads the raw JSON text stored under `key`, if any.
    fn load_raw<'a>(
        &'a self,
        key: &'a str,
    ) -> StorageFuture<'a, Result<Option<String>, StorageError>>;

    /// Replaces the raw JSON text stored under `key`.
    fn save_raw<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> StorageFuture<'a, Result<(), StorageError>>;

    /// Removes `key`. Removing a missing key succeeds.
    fn remove<'a>(&'a self, key: &'a str) -> StorageFuture<'a, Result<(), StorageError>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Storage that keeps nothing. Used off-browser and when no durable store exists.
pub struct NoopConfigStorage;

impl ConfigStorage for NoopConfigStorage {
    fn load_raw<'a>(
        &'a self,
        _key: &'a str,
    ) -> StorageFuture<'a, Result<Option<String>, StorageError>> {
        Box::pin(async { Ok(None) })
    }

    fn save_raw<'a>(
        &'a self,
        _key: &'a str,
        _raw_json: &'a str,
    ) -> StorageFuture<'a, Result<(), StorageError>> {
        Box::pin(async { Ok(()) })
    }

    fn remove<'a>(&'a self, _key: &'a str) -> StorageFuture<'a, Result<(), StorageError>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory storage. Clones share the same map.
pub struct MemoryConfigStorage {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryConfigStorage {
    /// Returns the raw text currently stored under `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.borrow().get(key).cloned()
    }

    /// Seeds `key` with raw text, bypassing JSON validation.
    pub fn insert_raw(&self, key: &str, raw: &str) {
        self.inner
            .borrow_mut()
            .insert(key.to_string(), raw.to_string());
    }
}

impl ConfigStorage for MemoryConfigStorage {
    fn load_raw<'a>(
        &'a self,
        key: &'a str,
    ) -> StorageFuture<'a, Result<Option<String>, StorageError>> {
        Box::pin(async move { Ok(self.raw(key)) })
    }

    fn save_raw<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> StorageFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            self.insert_raw(key, raw_json);
            Ok(())
        })
    }

    fn remove<'a>(&'a self, key: &'a str) -> StorageFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            self.inner.borrow_mut().remove(key);
            Ok(())
        })
    }
}

/// Loads and deserializes a typed value through a [`ConfigStorage`] implementation.
///
/// # Errors
///
/// Returns [`StorageError::Deserialize`] when the stored text does not parse as `T`, or the
/// adapter's own error when the read fails.
pub async fn load_json_with<S: ConfigStorage + ?Sized, T: DeserializeOwned>(
    storage: &S,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = storage.load_raw(key).await? else {
        return Ok(None);
    };
    let value =
        serde_json::from_str(&raw).map_err(|e| StorageError::Deserialize(e.to_string()))?;
    Ok(Some(value))
}

/// Serializes and saves a typed value through a [`ConfigStorage`] implementation.
///
/// # Errors
///
/// Returns [`StorageError::Serialize`] when encoding fails, or the adapter's write error.
pub async fn save_json_with<S: ConfigStorage + ?Sized, T: Serialize>(
    storage: &S,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw =
        serde_json::to_string(value).map_err(|e| StorageError::Serialize(e.to_string()))?;
    storage.save_raw(key, &raw).await
}
