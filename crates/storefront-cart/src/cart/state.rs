//! Cart contents and derived totals.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// Maximum quantity allowed per item. Larger requests are clamped.
pub const MAX_QUANTITY_PER_ITEM: u32 = 9999;

/// One product line in the cart.
///
/// `name` and `price` are snapshots taken when the product was first added;
/// later catalog price changes do not reach items already in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    pub name: String,
    pub price: Money,
    /// Always in `1..=MAX_QUANTITY_PER_ITEM`.
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl CartItem {
    /// Snapshot a product into a new line.
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            quantity: clamp_quantity(quantity as i64),
            image_url: product.image_url.clone(),
        }
    }

    /// `price * quantity`.
    pub fn line_total(&self) -> Money {
        self.price.saturating_mul(self.quantity as i64)
    }
}

/// The cart aggregate: ordered lines, unique by product id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CartState {
    pub currency: Currency,
    pub items: Vec<CartItem>,
}

impl CartState {
    /// Create an empty cart in the given currency.
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            items: Vec::new(),
        }
    }

    /// Sum of all quantities.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| i.quantity as u64).sum()
    }

    /// Sum of `price * quantity` over lines priced in the cart currency.
    ///
    /// Lines in another currency cannot be summed and are left out; see
    /// [`CartState::has_foreign_currency`].
    pub fn subtotal(&self) -> Money {
        self.items
            .iter()
            .filter(|i| i.price.currency == self.currency)
            .fold(Money::zero(self.currency), |acc, item| {
                acc.saturating_add(&item.line_total()).unwrap_or(acc)
            })
    }

    /// Whether any line is priced in a currency other than the cart's.
    pub fn has_foreign_currency(&self) -> bool {
        self.items.iter().any(|i| i.price.currency != self.currency)
    }

    /// Number of distinct products.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get_item(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.product_id == product_id)
    }

    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.get_item(product_id).is_some()
    }

    pub(crate) fn get_item_mut(&mut self, product_id: &ProductId) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|i| &i.product_id == product_id)
    }

    /// Re-establish the invariants on state that came from outside (e.g. a
    /// persisted session): duplicate ids are merged into the first
    /// occurrence, zero quantities dropped, quantities clamped.
    pub fn normalized(self) -> Self {
        let mut out = CartState::new(self.currency);
        for item in self.items {
            if item.quantity == 0 {
                continue;
            }
            match out.get_item_mut(&item.product_id) {
                Some(existing) => {
                    existing.quantity = clamp_quantity(existing.quantity as i64 + item.quantity as i64);
                }
                None => {
                    let quantity = clamp_quantity(item.quantity as i64);
                    out.items.push(CartItem { quantity, ..item });
                }
            }
        }
        out
    }
}

/// Clamp a requested quantity into `0..=MAX_QUANTITY_PER_ITEM`.
pub(crate) fn clamp_quantity(quantity: i64) -> u32 {
    quantity.clamp(0, MAX_QUANTITY_PER_ITEM as i64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, cents: i64, quantity: u32) -> CartItem {
        CartItem {
            product_id: ProductId::new(id),
            name: id.to_string(),
            price: Money::new(cents, Currency::USD),
            quantity,
            image_url: None,
        }
    }

    #[test]
    fn test_derived_totals() {
        let state = CartState {
            currency: Currency::USD,
            items: vec![item("a", 1000, 2), item("b", 250, 3), item("c", 0, 1)],
        };

        assert_eq!(state.item_count(), 6);
        assert_eq!(state.subtotal(), Money::new(2750, Currency::USD));
        assert_eq!(state.unique_item_count(), 3);
    }

    #[test]
    fn test_empty_totals() {
        let state = CartState::new(Currency::EUR);
        assert_eq!(state.item_count(), 0);
        assert_eq!(state.subtotal(), Money::zero(Currency::EUR));
    }

    #[test]
    fn test_foreign_currency_lines_left_out_of_subtotal() {
        let mut foreign = item("eur", 500, 1);
        foreign.price.currency = Currency::EUR;
        let state = CartState {
            currency: Currency::USD,
            items: vec![item("a", 1000, 1), foreign],
        };

        assert!(state.has_foreign_currency());
        assert_eq!(state.subtotal(), Money::new(1000, Currency::USD));
        assert_eq!(state.item_count(), 2);
    }

    #[test]
    fn test_normalized_merges_and_drops() {
        let state = CartState {
            currency: Currency::USD,
            items: vec![
                item("a", 100, 2),
                item("b", 100, 0),
                item("a", 100, 3),
                item("c", 100, MAX_QUANTITY_PER_ITEM + 5),
            ],
        }
        .normalized();

        assert_eq!(state.items.len(), 2);
        assert_eq!(state.get_item(&ProductId::new("a")).unwrap().quantity, 5);
        assert!(!state.contains(&ProductId::new("b")));
        assert_eq!(
            state.get_item(&ProductId::new("c")).unwrap().quantity,
            MAX_QUANTITY_PER_ITEM
        );
    }

    #[test]
    fn test_clamp_quantity() {
        assert_eq!(clamp_quantity(-4), 0);
        assert_eq!(clamp_quantity(7), 7);
        assert_eq!(clamp_quantity(i64::MAX), MAX_QUANTITY_PER_ITEM);
    }
}
