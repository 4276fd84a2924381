//! Shopping cart module.
//!
//! Contains the cart state, the store that mutates it, and the listeners
//! that persist and log its changes.

mod logging;
mod persist;
mod state;
mod store;

pub use logging::CartEventLogger;
pub use persist::CartPersistence;
pub use state::{CartItem, CartState, MAX_QUANTITY_PER_ITEM};
pub use store::{CartEvent, CartListener, CartStore, SubscriptionId};
