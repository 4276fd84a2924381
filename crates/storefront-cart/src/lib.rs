//! Shopping cart for the storefront.
//!
//! - **Cart**: the [`CartStore`](cart::CartStore), single owner of the cart
//!   contents, with change listeners for persistence and logging
//! - **Catalog**: the [`Product`](catalog::Product) value the cart snapshots
//! - **UI**: product card view model and actions, toasts, and the
//!   [`AppShell`](ui::AppShell) that owns the cart for a visit
//!
//! # Example
//!
//! ```rust
//! use storefront_cart::prelude::*;
//!
//! let mut shell = AppShell::mount(ShellConfig::new("Demo Shop").with_logging(false)).unwrap();
//!
//! let guide = Product::new(2u64, "Free Guide", Money::zero(Currency::USD));
//! shell.add_to_cart(&guide);
//!
//! assert_eq!(shell.cart().item_count(), 1);
//! assert_eq!(shell.cart().subtotal(), Money::zero(Currency::USD));
//! assert_eq!(shell.toasts().drain()[0].message, "Added to cart!");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod ui;

pub use error::StorefrontError;
pub use ids::ProductId;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::StorefrontError;
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Money};

    // Cart
    pub use crate::cart::{
        CartEvent, CartEventLogger, CartItem, CartListener, CartPersistence, CartState,
        CartStore, SubscriptionId, MAX_QUANTITY_PER_ITEM,
    };

    // Catalog
    pub use crate::catalog::{Catalog, Product};

    // UI
    pub use crate::ui::{
        AppShell, Badge, CardView, CheckoutIntent, HeaderView, Notifier, ProductCard,
        ShellConfig, ToastQueue,
    };
}
