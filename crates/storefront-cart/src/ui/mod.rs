//! Presentation layer: the pieces that read and drive the cart.

mod card;
mod notify;
mod shell;

pub use card::{
    Badge, CardView, CheckoutIntent, ProductCard, RatingView, ADDED_MESSAGE, BUY_NOW_MESSAGE,
    CHECKOUT_PATH,
};
pub use notify::{Notifier, Toast, ToastKind, ToastQueue, DEFAULT_TOAST_DURATION_MS};
pub use shell::{AppShell, HeaderView, ShellBuilder, ShellConfig};
