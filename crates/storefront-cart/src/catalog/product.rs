//! Product value object as served by the catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// A product as shown on a product card.
///
/// Prices are exact [`Money`]; the catalog's JSON carries them as decimal
/// numbers (see [`ProductRecord`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ProductRecord", into = "ProductRecord")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Current price.
    pub price: Money,
    /// Price before any markdown (for "Save $X").
    pub original_price: Option<Money>,
    /// Full description.
    pub description: String,
    /// Short description for listings.
    pub short_description: Option<String>,
    /// Card image.
    pub image_url: Option<String>,
    /// Promoted by the store.
    pub is_featured: bool,
    /// Average rating, 0 to 5.
    pub rating: Option<f32>,
    /// Number of reviews behind `rating`.
    pub review_count: Option<u32>,
    /// Feature tags.
    pub features: Vec<String>,
    /// Whether a live demo exists.
    pub has_live_demo: bool,
    /// Live demo URL.
    pub live_demo_url: Option<String>,
    /// When the listing last changed.
    pub last_updated: Option<DateTime<Utc>>,
}

impl Product {
    /// Create a product with the given id, name and price.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            original_price: None,
            description: String::new(),
            short_description: None,
            image_url: None,
            is_featured: false,
            rating: None,
            review_count: None,
            features: Vec::new(),
            has_live_demo: false,
            live_demo_url: None,
            last_updated: None,
        }
    }

    /// Set the pre-markdown price.
    pub fn with_original_price(mut self, original: Money) -> Self {
        self.original_price = Some(original);
        self
    }

    /// Mark as featured.
    pub fn featured(mut self) -> Self {
        self.is_featured = true;
        self
    }

    /// Set the long description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_free(&self) -> bool {
        self.price.is_zero()
    }

    /// Amount saved against the original price, if the product is marked down.
    pub fn savings(&self) -> Option<Money> {
        self.original_price
            .filter(|orig| orig.amount_cents > self.price.amount_cents)
            .and_then(|orig| orig.try_subtract(&self.price))
    }
}

/// Catalog wire format: decimal prices plus an optional currency code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub has_live_demo: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_demo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl ProductRecord {
    /// Convert to a [`Product`], pricing records without a `currency` code
    /// in `default_currency`.
    ///
    /// Unknown codes also fall back to `default_currency` rather than failing
    /// the whole catalog.
    pub fn into_product(self, default_currency: Currency) -> Product {
        let currency = self
            .currency
            .as_deref()
            .and_then(Currency::from_code)
            .unwrap_or(default_currency);
        Product {
            id: self.id,
            name: self.name,
            price: Money::from_decimal(self.price, currency),
            original_price: self
                .original_price
                .map(|p| Money::from_decimal(p, currency)),
            description: self.description,
            short_description: self.short_description.filter(|s| !s.is_empty()),
            image_url: self.image_url,
            is_featured: self.is_featured,
            rating: self.rating,
            review_count: self.review_count,
            features: self.features,
            has_live_demo: self.has_live_demo,
            live_demo_url: self.live_demo_url,
            last_updated: self.last_updated,
        }
    }
}

impl From<ProductRecord> for Product {
    fn from(r: ProductRecord) -> Self {
        r.into_product(Currency::default())
    }
}

impl From<Product> for ProductRecord {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            price: p.price.to_decimal(),
            original_price: p.original_price.map(|m| m.to_decimal()),
            currency: Some(p.price.currency.code().to_string()),
            description: p.description,
            short_description: p.short_description,
            image_url: p.image_url,
            is_featured: p.is_featured,
            rating: p.rating,
            review_count: p.review_count,
            features: p.features,
            has_live_demo: p.has_live_demo,
            live_demo_url: p.live_demo_url,
            last_updated: p.last_updated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_from_catalog_json() {
        let json = r#"{
            "id": 12,
            "name": "Invoice Template",
            "price": 19.99,
            "original_price": 29.99,
            "description": "A tidy invoice template.",
            "short_description": "",
            "is_featured": true,
            "rating": 4.6,
            "review_count": 31,
            "features": ["PDF", "Excel"],
            "last_updated": "2024-03-05T10:00:00Z"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new("12"));
        assert_eq!(product.price, Money::new(1999, Currency::USD));
        assert_eq!(product.original_price, Some(Money::new(2999, Currency::USD)));
        // Empty short descriptions count as absent.
        assert_eq!(product.short_description, None);
        assert!(product.is_featured);
        assert!(!product.has_live_demo);
        assert!(product.last_updated.is_some());
    }

    #[test]
    fn test_product_currency_code() {
        let json = r#"{"id": "p", "name": "P", "price": 5, "currency": "eur"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.price, Money::new(500, Currency::EUR));
    }

    #[test]
    fn test_missing_currency_uses_store_default() {
        let record: ProductRecord =
            serde_json::from_str(r#"{"id": 1, "name": "P", "price": 10, "original_price": 12}"#)
                .unwrap();
        let product = record.into_product(Currency::GBP);
        assert_eq!(product.price, Money::new(1000, Currency::GBP));
        assert_eq!(product.original_price, Some(Money::new(1200, Currency::GBP)));

        // An explicit code wins over the store default.
        let record: ProductRecord =
            serde_json::from_str(r#"{"id": 2, "name": "Q", "price": 3, "currency": "USD"}"#)
                .unwrap();
        assert_eq!(
            record.into_product(Currency::GBP).price,
            Money::new(300, Currency::USD)
        );
    }

    #[test]
    fn test_savings_only_when_marked_down() {
        let product = Product::new(1u64, "A", Money::new(1000, Currency::USD))
            .with_original_price(Money::new(1500, Currency::USD));
        assert_eq!(product.savings(), Some(Money::new(500, Currency::USD)));

        let product = Product::new(1u64, "A", Money::new(1000, Currency::USD))
            .with_original_price(Money::new(800, Currency::USD));
        assert_eq!(product.savings(), None);

        let product = Product::new(1u64, "A", Money::new(1000, Currency::USD));
        assert_eq!(product.savings(), None);
    }
}
