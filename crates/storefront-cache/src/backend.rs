//! Raw byte storage behind the typed cache.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

use crate::CacheError;

/// A byte-oriented key-value store.
pub trait KvBackend: Send + Sync {
    /// Read the bytes stored under `key`.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// List all keys.
    fn keys(&self) -> Result<Vec<String>, CacheError>;
}

/// Process-local backend. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>>, CacheError> {
        self.entries
            .lock()
            .map_err(|e| CacheError::StoreError(e.to_string()))
    }
}

impl KvBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        self.lock()?.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.lock()?.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let mut keys: Vec<String> = self.lock()?.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

/// Directory-backed store: one file per key.
///
/// File names are the URL-safe base64 of the key, so any key (including
/// `session:abc`) maps to a valid file name.
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
}

const FILE_EXTENSION: &str = "json";

impl FileBackend {
    /// Open (and create if needed) a store rooted at `root`.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, CacheError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)
            .map_err(|e| CacheError::OpenError(format!("{}: {}", root.display(), e)))?;
        Ok(Self { root })
    }

    /// Directory holding the entries.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let name = URL_SAFE_NO_PAD.encode(key.as_bytes());
        self.root.join(format!("{}.{}", name, FILE_EXTENSION))
    }
}

impl KvBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let path = self.path_for(key);
        // Write-then-rename keeps a crash from leaving half a cart on disk.
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(FILE_EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if let Ok(bytes) = URL_SAFE_NO_PAD.decode(stem) {
                if let Ok(key) = String::from_utf8(bytes) {
                    keys.push(key);
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_root(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "storefront-cache-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_memory_backend_roundtrip() {
        let backend = MemoryBackend::new();
        backend.set("a", b"1").unwrap();
        assert_eq!(backend.get("a").unwrap(), Some(b"1".to_vec()));

        backend.delete("a").unwrap();
        assert_eq!(backend.get("a").unwrap(), None);
        // Deleting twice is fine.
        backend.delete("a").unwrap();
    }

    #[test]
    fn test_file_backend_persists_across_instances() {
        let root = temp_root("persist");
        {
            let backend = FileBackend::open(&root).unwrap();
            backend.set("session:abc", b"{\"n\":1}").unwrap();
        }

        let backend = FileBackend::open(&root).unwrap();
        assert_eq!(
            backend.get("session:abc").unwrap(),
            Some(b"{\"n\":1}".to_vec())
        );
        assert_eq!(backend.keys().unwrap(), vec!["session:abc".to_string()]);

        backend.delete("session:abc").unwrap();
        assert_eq!(backend.get("session:abc").unwrap(), None);
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_file_backend_missing_key() {
        let root = temp_root("missing");
        let backend = FileBackend::open(&root).unwrap();
        assert_eq!(backend.get("nope").unwrap(), None);
        let _ = fs::remove_dir_all(&root);
    }
}
