//! Session management on top of the key-value cache.

use std::marker::PhantomData;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{Cache, CacheError};

const SESSION_NAMESPACE: &str = "session";

/// A unique session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Create a new session ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random session ID.
    pub fn generate() -> Self {
        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
        use rand::Rng;

        let bytes: [u8; 18] = rand::thread_rng().gen();
        Self(format!("sess_{}", URL_SAFE_NO_PAD.encode(bytes)))
    }

    /// Get the session ID as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Session record stored in the cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData<T> {
    /// The session ID.
    pub id: SessionId,
    /// User-defined session data.
    pub data: T,
    /// Incremented on every write.
    pub version: u64,
    /// When the session was first written (Unix timestamp).
    pub created_at: u64,
    /// When the session was last written (Unix timestamp).
    pub last_accessed: u64,
}

/// Versioned session storage, generic over the payload type `T`.
///
/// ```rust
/// use storefront_cache::{Cache, MemoryBackend, SessionId, SessionStore};
///
/// let sessions = SessionStore::<Vec<String>>::new(Cache::new(MemoryBackend::new()));
/// let id = SessionId::from("abc123");
///
/// sessions.set(&id, &vec!["sku-1".to_string()]).unwrap();
/// let data = sessions.get(&id).unwrap();
/// assert_eq!(data, Some(vec!["sku-1".to_string()]));
/// ```
pub struct SessionStore<T> {
    cache: Cache,
    _phantom: PhantomData<T>,
}

impl<T> Clone for SessionStore<T> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for SessionStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").field("cache", &self.cache).finish()
    }
}

impl<T> SessionStore<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    /// Create a session store over a cache.
    pub fn new(cache: Cache) -> Self {
        Self {
            cache,
            _phantom: PhantomData,
        }
    }

    /// Get session data if it exists.
    pub fn get(&self, id: &SessionId) -> Result<Option<T>, CacheError> {
        Ok(self.get_versioned(id)?.map(|s| s.data))
    }

    /// Get the full session record including version.
    pub fn get_versioned(&self, id: &SessionId) -> Result<Option<SessionData<T>>, CacheError> {
        self.cache.get::<SessionData<T>>(&session_key(id))
    }

    /// Write session data, bumping the version and keeping the creation time.
    pub fn set(&self, id: &SessionId, data: &T) -> Result<u64, CacheError> {
        let previous = self.get_versioned(id)?;
        let now = unix_now();
        let (version, created_at) = previous
            .map(|s| (s.version + 1, s.created_at))
            .unwrap_or((1, now));

        let session_data = SessionData {
            id: id.clone(),
            data: data.clone(),
            version,
            created_at,
            last_accessed: now,
        };

        self.cache.set(&session_key(id), &session_data)?;
        Ok(version)
    }

    /// Delete a session.
    pub fn delete(&self, id: &SessionId) -> Result<(), CacheError> {
        self.cache.delete(&session_key(id))
    }

    /// IDs of every stored session.
    pub fn ids(&self) -> Result<Vec<SessionId>, CacheError> {
        let prefix = format!("{}:", SESSION_NAMESPACE);
        Ok(self
            .cache
            .keys_with_prefix(SESSION_NAMESPACE)?
            .into_iter()
            .filter_map(|k| k.strip_prefix(&prefix).map(SessionId::from))
            .collect())
    }
}

fn session_key(id: &SessionId) -> String {
    crate::cache_key!(SESSION_NAMESPACE, id)
}

fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryBackend;

    fn store() -> SessionStore<Vec<String>> {
        SessionStore::new(Cache::new(MemoryBackend::new()))
    }

    #[test]
    fn test_session_id_generate_format() {
        let id = SessionId::generate();
        let s = id.as_str();

        assert!(s.starts_with("sess_"));
        // 18 bytes of base64 = 24 chars, plus "sess_"
        assert_eq!(s.len(), 29);
    }

    #[test]
    fn test_session_id_generate_uniqueness() {
        assert_ne!(SessionId::generate(), SessionId::generate());
    }

    #[test]
    fn test_session_id_serializes_as_plain_string() {
        let id = SessionId::new("serialize-me");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""serialize-me""#);

        let back: SessionId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_missing_session_is_none() {
        let sessions = store();
        let id = SessionId::new("fresh");

        assert_eq!(sessions.get(&id).unwrap(), None);
        assert!(sessions.get_versioned(&id).unwrap().is_none());
    }

    #[test]
    fn test_set_bumps_version_and_keeps_created_at() {
        let sessions = store();
        let id = SessionId::new("versioned");

        assert_eq!(sessions.set(&id, &vec!["a".to_string()]).unwrap(), 1);
        let first = sessions.get_versioned(&id).unwrap().unwrap();

        assert_eq!(sessions.set(&id, &vec!["b".to_string()]).unwrap(), 2);
        let second = sessions.get_versioned(&id).unwrap().unwrap();

        assert_eq!(second.version, 2);
        assert_eq!(second.created_at, first.created_at);
        assert_eq!(second.data, vec!["b".to_string()]);
    }

    #[test]
    fn test_delete_and_ids() {
        let sessions = store();
        sessions.set(&SessionId::new("a"), &vec![]).unwrap();
        sessions.set(&SessionId::new("b"), &vec![]).unwrap();

        assert_eq!(
            sessions.ids().unwrap(),
            vec![SessionId::new("a"), SessionId::new("b")]
        );

        sessions.delete(&SessionId::new("a")).unwrap();
        assert_eq!(sessions.ids().unwrap(), vec![SessionId::new("b")]);
    }
}
