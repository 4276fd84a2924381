//! Key-value cache with automatic serialization.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::{CacheError, KvBackend};

/// Type-safe cache over a [`KvBackend`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`. Cloning is cheap and clones share the
/// same backend.
#[derive(Clone)]
pub struct Cache {
    backend: Arc<dyn KvBackend>,
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache").finish_non_exhaustive()
    }
}

impl Cache {
    /// Wrap a backend.
    pub fn new(backend: impl KvBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    ///
    /// ```rust,ignore
    /// let cart: Option<CartState> = cache.get("cart:sess_123")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.backend.get(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.backend.set(key, &bytes)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.backend.delete(key)
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.backend.keys()
    }

    /// Get all keys under a namespace prefix (e.g. `"session"`).
    pub fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, CacheError> {
        let prefix = format!("{}:", prefix);
        Ok(self
            .keys()?
            .into_iter()
            .filter(|k| k.starts_with(&prefix))
            .collect())
    }
}

/// Helper to build cache keys with namespacing.
///
/// ```rust
/// use storefront_cache::cache_key;
///
/// let key = cache_key!("session", "sess_123");
/// assert_eq!(key, "session:sess_123");
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}
