//! The Cart Store: single writer for cart state, with change listeners.

use serde::Serialize;

use crate::cart::state::{clamp_quantity, CartItem, CartState};
use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// A change applied to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CartEvent {
    /// Units added, either as a new line or onto an existing one.
    ItemAdded {
        product_id: ProductId,
        added: u32,
        quantity: u32,
    },
    /// A line's quantity was set directly.
    QuantityUpdated { product_id: ProductId, quantity: u32 },
    /// A line was removed.
    ItemRemoved { product_id: ProductId },
    /// Every line was removed.
    Cleared { removed_lines: usize },
    /// Contents were replaced by a saved session.
    Restored { lines: usize },
}

impl CartEvent {
    /// Short name, used as the log message.
    pub fn name(&self) -> &'static str {
        match self {
            CartEvent::ItemAdded { .. } => "item_added",
            CartEvent::QuantityUpdated { .. } => "quantity_updated",
            CartEvent::ItemRemoved { .. } => "item_removed",
            CartEvent::Cleared { .. } => "cleared",
            CartEvent::Restored { .. } => "restored",
        }
    }
}

/// Observer for cart changes.
///
/// Called synchronously, after the change has been applied, with the new
/// state. Listeners run in subscription order.
pub trait CartListener {
    fn on_cart_event(&self, event: &CartEvent, state: &CartState);
}

impl<F> CartListener for F
where
    F: Fn(&CartEvent, &CartState),
{
    fn on_cart_event(&self, event: &CartEvent, state: &CartState) {
        self(event, state)
    }
}

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Owner of the cart contents.
///
/// All changes go through the methods below; none of them can fail. A
/// change that leaves the state as it was notifies nobody.
///
/// ```
/// use storefront_cart::prelude::*;
///
/// let mut cart = CartStore::new(Currency::USD);
/// let book = Product::new(1u64, "Book", Money::new(1000, Currency::USD));
///
/// cart.add(&book);
/// cart.add(&book);
/// assert_eq!(cart.item_count(), 2);
/// assert_eq!(cart.subtotal(), Money::new(2000, Currency::USD));
///
/// cart.remove_item(&book.id);
/// assert!(cart.is_empty());
/// ```
pub struct CartStore {
    state: CartState,
    listeners: Vec<(SubscriptionId, Box<dyn CartListener>)>,
    next_subscription: u64,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

impl CartStore {
    /// Create an empty cart.
    pub fn new(currency: Currency) -> Self {
        Self {
            state: CartState::new(currency),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Add one unit of `product`.
    pub fn add(&mut self, product: &Product) {
        self.add_item(product, 1);
    }

    /// Add `quantity` units of `product`.
    ///
    /// An existing line keeps its original price snapshot and only has its
    /// quantity raised (clamped to the per-item maximum). Adding zero units
    /// does nothing.
    pub fn add_item(&mut self, product: &Product, quantity: u32) {
        if quantity == 0 {
            return;
        }

        let event = match self.state.get_item_mut(&product.id) {
            Some(existing) => {
                let before = existing.quantity;
                existing.quantity = clamp_quantity(before as i64 + quantity as i64);
                if existing.quantity == before {
                    // Already at the cap.
                    return;
                }
                CartEvent::ItemAdded {
                    product_id: product.id.clone(),
                    added: existing.quantity - before,
                    quantity: existing.quantity,
                }
            }
            None => {
                let item = CartItem::from_product(product, quantity);
                let event = CartEvent::ItemAdded {
                    product_id: item.product_id.clone(),
                    added: item.quantity,
                    quantity: item.quantity,
                };
                self.state.items.push(item);
                event
            }
        };

        self.notify(&event);
    }

    /// Remove a product's line. Unknown ids are ignored.
    pub fn remove_item(&mut self, product_id: &ProductId) {
        let len_before = self.state.items.len();
        self.state.items.retain(|i| &i.product_id != product_id);
        if self.state.items.len() < len_before {
            self.notify(&CartEvent::ItemRemoved {
                product_id: product_id.clone(),
            });
        }
    }

    /// Set a line's quantity. Zero or less removes the line; unknown ids
    /// are ignored.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product_id);
            return;
        }

        let quantity = clamp_quantity(quantity);
        let Some(item) = self.state.get_item_mut(product_id) else {
            return;
        };
        if item.quantity == quantity {
            return;
        }
        item.quantity = quantity;

        self.notify(&CartEvent::QuantityUpdated {
            product_id: product_id.clone(),
            quantity,
        });
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        if self.state.items.is_empty() {
            return;
        }
        let removed_lines = self.state.items.len();
        self.state.items.clear();
        self.notify(&CartEvent::Cleared { removed_lines });
    }

    /// Replace the contents with previously saved state.
    ///
    /// The saved lines are normalized first and keep their snapshot prices.
    /// The cart keeps its own currency.
    pub fn restore(&mut self, saved: CartState) {
        let mut restored = saved.normalized();
        restored.currency = self.state.currency;
        self.state = restored;
        self.notify(&CartEvent::Restored {
            lines: self.state.items.len(),
        });
    }

    /// Register a listener; it sees every subsequent change.
    pub fn subscribe(&mut self, listener: impl CartListener + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Drop a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let len_before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() < len_before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Sum of all quantities.
    pub fn item_count(&self) -> u64 {
        self.state.item_count()
    }

    /// Sum of `price * quantity`.
    pub fn subtotal(&self) -> Money {
        self.state.subtotal()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.state.items
    }

    pub fn get_item(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.state.get_item(product_id)
    }

    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.state.contains(product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    pub fn unique_item_count(&self) -> usize {
        self.state.unique_item_count()
    }

    pub fn currency(&self) -> Currency {
        self.state.currency
    }

    /// Read-only view of the whole state.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Consume the store, returning its final state.
    pub fn into_state(self) -> CartState {
        self.state
    }

    fn notify(&self, event: &CartEvent) {
        for (_, listener) in &self.listeners {
            listener.on_cart_event(event, &self.state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::MAX_QUANTITY_PER_ITEM;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn product(id: u64, cents: i64) -> Product {
        Product::new(id, format!("Product {}", id), Money::new(cents, Currency::USD))
    }

    fn recorder(store: &mut CartStore) -> Rc<RefCell<Vec<CartEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        store.subscribe(move |event: &CartEvent, _: &CartState| {
            sink.borrow_mut().push(event.clone());
        });
        events
    }

    #[test]
    fn test_add_same_product_twice_increments() {
        let mut cart = CartStore::default();
        let p = product(1, 1000);

        cart.add(&p);
        cart.add(&p);

        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.get_item(&p.id).unwrap().quantity, 2);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cart = CartStore::default();
        cart.add(&product(3, 100));
        cart.add(&product(1, 100));
        cart.add(&product(3, 100));

        let ids: Vec<&str> = cart.items().iter().map(|i| i.product_id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1"]);
    }

    #[test]
    fn test_price_is_snapshotted() {
        let mut cart = CartStore::default();
        let mut p = product(1, 1000);
        cart.add(&p);

        p.price = Money::new(5000, Currency::USD);
        cart.add(&p);

        assert_eq!(cart.get_item(&p.id).unwrap().price.amount_cents, 1000);
        assert_eq!(cart.subtotal().amount_cents, 2000);
    }

    #[test]
    fn test_add_clamps_at_maximum() {
        let mut cart = CartStore::default();
        let p = product(1, 1);
        cart.add_item(&p, MAX_QUANTITY_PER_ITEM);
        let events = recorder(&mut cart);

        cart.add(&p);

        assert_eq!(cart.item_count(), MAX_QUANTITY_PER_ITEM as u64);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_add_zero_is_noop() {
        let mut cart = CartStore::default();
        let events = recorder(&mut cart);
        cart.add_item(&product(1, 100), 0);

        assert!(cart.is_empty());
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_remove_unknown_leaves_state() {
        let mut cart = CartStore::default();
        cart.add(&product(1, 100));
        let before = cart.state().clone();
        let events = recorder(&mut cart);

        cart.remove_item(&ProductId::new("missing"));

        assert_eq!(cart.state(), &before);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let mut cart = CartStore::default();
        let p = product(1, 100);
        cart.add_item(&p, 4);

        cart.update_quantity(&p.id, 0);
        assert!(!cart.contains(&p.id));

        cart.add(&p);
        cart.update_quantity(&p.id, -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_sets_and_clamps() {
        let mut cart = CartStore::default();
        let p = product(1, 100);
        cart.add(&p);

        cart.update_quantity(&p.id, 7);
        assert_eq!(cart.item_count(), 7);

        cart.update_quantity(&p.id, 1_000_000);
        assert_eq!(cart.item_count(), MAX_QUANTITY_PER_ITEM as u64);

        cart.update_quantity(&ProductId::new("missing"), 3);
        assert_eq!(cart.unique_item_count(), 1);
    }

    #[test]
    fn test_clear() {
        let mut cart = CartStore::default();
        cart.add(&product(1, 100));
        cart.add(&product(2, 100));
        let events = recorder(&mut cart);

        cart.clear();
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(*events.borrow(), vec![CartEvent::Cleared { removed_lines: 2 }]);
    }

    #[test]
    fn test_listeners_see_each_change_once() {
        let mut cart = CartStore::default();
        let events = recorder(&mut cart);
        let p = product(1, 100);

        cart.add(&p);
        cart.add_item(&p, 2);
        cart.update_quantity(&p.id, 5);
        cart.update_quantity(&p.id, 5);
        cart.remove_item(&p.id);

        assert_eq!(
            *events.borrow(),
            vec![
                CartEvent::ItemAdded {
                    product_id: p.id.clone(),
                    added: 1,
                    quantity: 1
                },
                CartEvent::ItemAdded {
                    product_id: p.id.clone(),
                    added: 2,
                    quantity: 3
                },
                CartEvent::QuantityUpdated {
                    product_id: p.id.clone(),
                    quantity: 5
                },
                CartEvent::ItemRemoved {
                    product_id: p.id.clone()
                },
            ]
        );
    }

    #[test]
    fn test_listener_sees_post_mutation_state() {
        let mut cart = CartStore::default();
        let counts = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&counts);
        cart.subscribe(move |_: &CartEvent, state: &CartState| {
            sink.borrow_mut().push(state.item_count());
        });

        cart.add(&product(1, 100));
        cart.add(&product(2, 100));

        assert_eq!(*counts.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut cart = CartStore::default();
        let events = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&events);
        let id = cart.subscribe(move |_: &CartEvent, _: &CartState| {
            *sink.borrow_mut() += 1;
        });

        cart.add(&product(1, 100));
        assert!(cart.unsubscribe(id));
        assert!(!cart.unsubscribe(id));
        cart.add(&product(1, 100));

        assert_eq!(*events.borrow(), 1);
        assert_eq!(cart.listener_count(), 0);
    }

    #[test]
    fn test_restore_normalizes_and_keeps_currency() {
        let mut cart = CartStore::new(Currency::USD);
        let events = recorder(&mut cart);
        let saved = CartState {
            currency: Currency::EUR,
            items: vec![
                CartItem::from_product(&product(1, 100), 2),
                CartItem::from_product(&product(1, 100), 1),
            ],
        };

        cart.restore(saved);

        assert_eq!(cart.currency(), Currency::USD);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(*events.borrow(), vec![CartEvent::Restored { lines: 1 }]);
    }

    #[test]
    fn test_event_serializes_with_tag() {
        let json = serde_json::to_value(CartEvent::ItemRemoved {
            product_id: ProductId::new("9"),
        })
        .unwrap();
        assert_eq!(json["event"], "item_removed");
        assert_eq!(json["product_id"], "9");
    }
}
