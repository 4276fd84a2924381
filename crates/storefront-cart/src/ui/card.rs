//! Product card: derived view state and the add / buy actions.

use serde::Serialize;

use crate::cart::CartStore;
use crate::catalog::Product;
use crate::money::Money;
use crate::ui::Notifier;

/// Characters of the long description shown when there is no short one.
pub const SUMMARY_CHARS: usize = 100;
/// Feature tags shown on a card.
pub const MAX_CARD_FEATURES: usize = 3;
/// Stars in the rating row.
pub const RATING_STARS: u32 = 5;

pub const ADDED_MESSAGE: &str = "Added to cart!";
pub const BUY_NOW_MESSAGE: &str = "Added to cart! Redirecting to checkout...";
pub const CHECKOUT_PATH: &str = "/checkout";

/// A badge in the card's corner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "badge", content = "amount", rename_all = "snake_case")]
pub enum Badge {
    Featured,
    Free,
    Save(Money),
}

impl Badge {
    pub fn label(&self) -> String {
        match self {
            Badge::Featured => "Featured".to_string(),
            Badge::Free => "FREE".to_string(),
            Badge::Save(amount) => format!("Save {}", amount.display()),
        }
    }
}

/// Star rating row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingView {
    pub filled: u32,
    pub empty: u32,
    pub review_count: u32,
}

impl RatingView {
    /// `★★★★☆` form.
    pub fn stars(&self) -> String {
        format!(
            "{}{}",
            "\u{2605}".repeat(self.filled as usize),
            "\u{2606}".repeat(self.empty as usize)
        )
    }
}

/// Everything a card renders, derived from a [`Product`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub name: String,
    pub image_url: Option<String>,
    pub badges: Vec<Badge>,
    pub price: String,
    /// Original price, shown struck through when the product is marked down.
    pub was_price: Option<String>,
    pub summary: String,
    pub rating: Option<RatingView>,
    pub features: Vec<String>,
    pub details_href: String,
    pub demo_href: Option<String>,
    pub updated_label: Option<String>,
}

/// Navigation request produced by "Buy Now".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutIntent {
    pub redirect_to: String,
}

/// A product card bound to one product.
#[derive(Debug, Clone, Copy)]
pub struct ProductCard<'a> {
    product: &'a Product,
}

impl<'a> ProductCard<'a> {
    pub fn new(product: &'a Product) -> Self {
        Self { product }
    }

    pub fn product(&self) -> &'a Product {
        self.product
    }

    /// Badges in display order: featured, free, savings.
    pub fn badges(&self) -> Vec<Badge> {
        let mut badges = Vec::new();
        if self.product.is_featured {
            badges.push(Badge::Featured);
        }
        if self.product.is_free() {
            badges.push(Badge::Free);
        }
        if let Some(saved) = self.product.savings() {
            badges.push(Badge::Save(saved));
        }
        badges
    }

    /// Short description, or the head of the long one. Always ends in "...".
    pub fn summary(&self) -> String {
        let text = match &self.product.short_description {
            Some(short) => short.clone(),
            None => self.product.description.chars().take(SUMMARY_CHARS).collect(),
        };
        format!("{}...", text)
    }

    /// Rating row. A missing or zero rating shows nothing.
    pub fn rating(&self) -> Option<RatingView> {
        let rating = self.product.rating.filter(|r| *r > 0.0)?;
        let filled = (rating.floor() as u32).min(RATING_STARS);
        Some(RatingView {
            filled,
            empty: RATING_STARS - filled,
            review_count: self.product.review_count.unwrap_or(0),
        })
    }

    pub fn view(&self) -> CardView {
        let p = self.product;
        CardView {
            name: p.name.clone(),
            image_url: p.image_url.clone(),
            badges: self.badges(),
            price: p.price.display(),
            was_price: p.savings().and(p.original_price).map(|m| m.display()),
            summary: self.summary(),
            rating: self.rating(),
            features: p.features.iter().take(MAX_CARD_FEATURES).cloned().collect(),
            details_href: format!("/products/{}", p.id),
            demo_href: p.live_demo_url.clone().filter(|_| p.has_live_demo),
            updated_label: p
                .last_updated
                .map(|at| format!("Updated {}", at.format("%-m/%-d/%Y"))),
        }
    }

    /// "Add to Cart": one unit, then a success toast.
    pub fn add_to_cart(&self, cart: &mut CartStore, notifier: &dyn Notifier) {
        cart.add(self.product);
        notifier.success(ADDED_MESSAGE);
    }

    /// "Buy Now": add one unit, toast, and hand back where to navigate.
    pub fn buy_now(&self, cart: &mut CartStore, notifier: &dyn Notifier) -> CheckoutIntent {
        cart.add(self.product);
        notifier.success(BUY_NOW_MESSAGE);
        CheckoutIntent {
            redirect_to: CHECKOUT_PATH.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;
    use crate::ui::ToastQueue;
    use chrono::{TimeZone, Utc};

    fn usd(cents: i64) -> Money {
        Money::new(cents, Currency::USD)
    }

    #[test]
    fn test_badges_order_and_labels() {
        let product = Product::new(1u64, "Bundle", usd(0))
            .featured()
            .with_original_price(usd(1250));

        let labels: Vec<String> = ProductCard::new(&product)
            .badges()
            .iter()
            .map(Badge::label)
            .collect();
        assert_eq!(labels, vec!["Featured", "FREE", "Save $12.50"]);
    }

    #[test]
    fn test_no_badges_for_plain_product() {
        let product = Product::new(1u64, "Plain", usd(500)).with_original_price(usd(500));
        assert!(ProductCard::new(&product).badges().is_empty());
        assert_eq!(ProductCard::new(&product).view().was_price, None);
    }

    #[test]
    fn test_summary_prefers_short_description() {
        let mut product = Product::new(1u64, "P", usd(100)).with_description("x".repeat(150));
        assert_eq!(
            ProductCard::new(&product).summary(),
            format!("{}...", "x".repeat(100))
        );

        product.short_description = Some("Short".to_string());
        assert_eq!(ProductCard::new(&product).summary(), "Short...");
    }

    #[test]
    fn test_rating_stars() {
        let mut product = Product::new(1u64, "P", usd(100));
        assert_eq!(ProductCard::new(&product).rating(), None);

        product.rating = Some(3.7);
        product.review_count = Some(12);
        let rating = ProductCard::new(&product).rating().unwrap();
        assert_eq!(rating.stars(), "\u{2605}\u{2605}\u{2605}\u{2606}\u{2606}");
        assert_eq!(rating.review_count, 12);

        product.rating = Some(9.0);
        assert_eq!(ProductCard::new(&product).rating().unwrap().empty, 0);
    }

    #[test]
    fn test_view_links_and_features() {
        let mut product = Product::new(7u64, "Kit", usd(2500)).with_original_price(usd(3000));
        product.features = vec!["a".into(), "b".into(), "c".into(), "d".into()];
        product.live_demo_url = Some("https://demo.example".to_string());
        product.last_updated = Some(Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap());

        let view = ProductCard::new(&product).view();
        assert_eq!(view.features, vec!["a", "b", "c"]);
        assert_eq!(view.details_href, "/products/7");
        assert_eq!(view.price, "$25.00");
        assert_eq!(view.was_price.as_deref(), Some("$30.00"));
        // URL alone is not enough without the demo flag.
        assert_eq!(view.demo_href, None);
        assert_eq!(view.updated_label.as_deref(), Some("Updated 3/5/2024"));

        product.has_live_demo = true;
        assert_eq!(
            ProductCard::new(&product).view().demo_href.as_deref(),
            Some("https://demo.example")
        );
    }

    #[test]
    fn test_add_to_cart_adds_and_notifies() {
        let product = Product::new(1u64, "P", usd(1000));
        let mut cart = CartStore::default();
        let toasts = ToastQueue::default();

        ProductCard::new(&product).add_to_cart(&mut cart, &toasts);

        assert_eq!(cart.item_count(), 1);
        assert_eq!(toasts.drain()[0].message, ADDED_MESSAGE);
    }

    #[test]
    fn test_buy_now_returns_checkout_intent() {
        let product = Product::new(1u64, "P", usd(1000));
        let mut cart = CartStore::default();
        let toasts = ToastQueue::default();

        let intent = ProductCard::new(&product).buy_now(&mut cart, &toasts);

        assert_eq!(intent.redirect_to, CHECKOUT_PATH);
        assert_eq!(cart.item_count(), 1);
        assert_eq!(toasts.drain()[0].message, BUY_NOW_MESSAGE);
    }
}
