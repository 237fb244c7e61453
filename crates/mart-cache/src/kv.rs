//! Key-Value store wrapper with automatic serialization.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::backend::{KvBackend, MemoryBackend};
use crate::CacheError;

/// Type-safe store over a [`KvBackend`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`. Cloning is cheap and every clone
/// shares the same backend.
pub struct Cache<B: ?Sized> {
    backend: Arc<B>,
}

impl<B: ?Sized> Clone for Cache<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl Cache<MemoryBackend> {
    /// Open a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }
}

impl<B: KvBackend> Cache<B> {
    /// Wrap a backend.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mart_cache::{Cache, MemoryBackend};
    ///
    /// let cache = Cache::new(MemoryBackend::new());
    /// cache.set("cart", &Vec::<u32>::new()).unwrap();
    /// ```
    pub fn new(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }
}

impl<B: KvBackend + ?Sized> Cache<B> {
    /// Access the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Get a value from the store.
    ///
    /// Returns `None` if the key doesn't exist, and an error if the stored
    /// bytes don't decode as `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.backend.get(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the store, replacing whatever was there.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.backend.set(key, &bytes)
    }

    /// Get the raw stored bytes.
    pub fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.backend.get(key)
    }

    /// Store raw bytes without serialization.
    pub fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        self.backend.set(key, value)
    }

    /// Delete a value from the store.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.backend.delete(key)
    }

    /// Check if a key exists in the store.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.backend.exists(key)
    }

    /// Get all keys in the store.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.backend.keys()
    }
}
