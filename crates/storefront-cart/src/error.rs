//! Storefront error types.
//!
//! Cart mutations never fail; these cover the edges around them (catalog
//! loading, configuration, persistence).

use thiserror::Error;

/// Errors that can occur around the cart.
#[derive(Error, Debug)]
pub enum StorefrontError {
    /// Product not found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Catalog could not be read or parsed.
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Shell configuration rejected.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Session storage failed.
    #[error("Cache error: {0}")]
    Cache(#[from] storefront_cache::CacheError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
