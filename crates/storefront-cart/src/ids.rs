//! Newtype IDs for type-safe identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a catalog product.
///
/// Catalog sources hand out either string or integer ids; both are kept as
/// their string form so `1` and `"1"` name the same product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct ProductId(String);

impl ProductId {
    /// Create a new ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<u64> for ProductId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Wire form accepted for product ids.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(u64),
}

impl From<RawId> for ProductId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => Self(s),
            RawId::Number(n) => Self::from(n),
        }
    }
}
