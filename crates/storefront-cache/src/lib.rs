//! Typed key-value cache for the storefront.
//!
//! Stores any `Serialize` value as JSON behind a pluggable backend. The cart
//! uses it to keep a visitor's session alive across page reloads.
//!
//! # Example
//!
//! ```rust
//! use storefront_cache::{Cache, MemoryBackend};
//!
//! let cache = Cache::new(MemoryBackend::new());
//! cache.set("greeting", &"hello").unwrap();
//!
//! let value: Option<String> = cache.get("greeting").unwrap();
//! assert_eq!(value.as_deref(), Some("hello"));
//!
//! cache.delete("greeting").unwrap();
//! assert_eq!(cache.get::<String>("greeting").unwrap(), None);
//! ```

mod backend;
mod error;
mod kv;
mod session;

pub use backend::{FileBackend, KvBackend, MemoryBackend};
pub use error::CacheError;
pub use kv::Cache;
pub use session::{SessionData, SessionId, SessionStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, SessionId, SessionStore};
}
