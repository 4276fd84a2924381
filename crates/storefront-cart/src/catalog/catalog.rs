//! In-memory product listing loaded from an external source.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::{Product, ProductRecord};
use crate::error::StorefrontError;
use crate::ids::ProductId;
use crate::money::Currency;

/// A read-only list of products, in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Parse a JSON array of products. Records without a currency code are
    /// priced in the default currency.
    pub fn from_json(json: &str) -> Result<Self, StorefrontError> {
        Self::from_json_with_currency(json, Currency::default())
    }

    /// Parse a JSON array of products, pricing records without a currency
    /// code in `currency`.
    pub fn from_json_with_currency(
        json: &str,
        currency: Currency,
    ) -> Result<Self, StorefrontError> {
        let records: Vec<ProductRecord> = serde_json::from_str(json)
            .map_err(|e| StorefrontError::InvalidCatalog(e.to_string()))?;
        Ok(Self::new(
            records
                .into_iter()
                .map(|r| r.into_product(currency))
                .collect(),
        ))
    }

    /// Read a JSON catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StorefrontError> {
        Self::load_with_currency(path, Currency::default())
    }

    /// Read a JSON catalog file for a store selling in `currency`.
    pub fn load_with_currency(
        path: impl AsRef<Path>,
        currency: Currency,
    ) -> Result<Self, StorefrontError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            StorefrontError::InvalidCatalog(format!("{}: {}", path.display(), e))
        })?;
        Self::from_json_with_currency(&json, currency)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Find a product by id.
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Find a product by id, failing if absent.
    pub fn get(&self, id: &ProductId) -> Result<&Product, StorefrontError> {
        self.find(id)
            .ok_or_else(|| StorefrontError::ProductNotFound(id.to_string()))
    }

    /// Featured products first, otherwise source order.
    pub fn featured_first(&self) -> Vec<&Product> {
        let mut products: Vec<&Product> = self.products.iter().collect();
        // Stable sort keeps source order inside each group.
        products.sort_by_key(|p| !p.is_featured);
        products
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"[
        {"id": 1, "name": "Starter Kit", "price": 10},
        {"id": 2, "name": "Free Guide", "price": 0, "is_featured": true}
    ]"#;

    #[test]
    fn test_catalog_parse_and_find() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.find(&ProductId::from(2u64)).unwrap().name, "Free Guide");
        assert!(catalog.find(&ProductId::new("3")).is_none());
    }

    #[test]
    fn test_catalog_get_missing_is_error() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        let err = catalog.get(&ProductId::new("nope")).unwrap_err();
        assert!(matches!(err, StorefrontError::ProductNotFound(id) if id == "nope"));
    }

    #[test]
    fn test_catalog_bad_json() {
        let err = Catalog::from_json("{not json").unwrap_err();
        assert!(matches!(err, StorefrontError::InvalidCatalog(_)));
    }

    #[test]
    fn test_catalog_prices_in_store_currency() {
        let catalog = Catalog::from_json_with_currency(CATALOG, Currency::EUR).unwrap();
        let kit = catalog.get(&ProductId::from(1u64)).unwrap();
        assert_eq!(kit.price, crate::money::Money::new(1000, Currency::EUR));
    }

    #[test]
    fn test_featured_first() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        let names: Vec<&str> = catalog
            .featured_first()
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Free Guide", "Starter Kit"]);
    }
}
