//! Product catalog module.
//!
//! The cart does not own the catalog; it only snapshots what it needs from a
//! [`Product`] at add time.

mod catalog;
mod product;

pub use catalog::Catalog;
pub use product::{Product, ProductRecord};
