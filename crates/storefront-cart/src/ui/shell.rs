//! Application shell: owns the cart for the lifetime of a visit.
//!
//! The shell is the provider. It creates the [`CartStore`] on mount, wires
//! persistence and logging into it as listeners, hands it to components by
//! reference, and tears it down on unmount.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use storefront_cache::{Cache, FileBackend, SessionId};
use storefront_observability::{LogFormat, LogLevel, LogSink, StructuredLogger};

use crate::cart::{CartEventLogger, CartPersistence, CartState, CartStore};
use crate::catalog::Product;
use crate::error::StorefrontError;
use crate::money::Currency;
use crate::ui::{CheckoutIntent, ProductCard, ToastQueue, DEFAULT_TOAST_DURATION_MS};

/// Configuration for a storefront shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Store name shown in the header.
    pub store_name: String,
    /// Cart currency.
    pub currency: Currency,
    /// Keep the saved cart after unmount (survives to the next visit).
    pub keep_session: bool,
    /// Directory for saved sessions. No directory means no persistence
    /// unless a cache is supplied to the builder.
    pub storage_dir: Option<PathBuf>,
    /// Emit cart change logs.
    pub logging: bool,
    pub log_level: LogLevel,
    pub log_format: LogFormat,
    /// How long toasts stay up.
    pub toast_duration_ms: u64,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            store_name: "Storefront".to_string(),
            currency: Currency::USD,
            keep_session: false,
            storage_dir: None,
            logging: true,
            log_level: LogLevel::Info,
            log_format: LogFormat::Json,
            toast_duration_ms: DEFAULT_TOAST_DURATION_MS,
        }
    }
}

impl ShellConfig {
    /// Create a new configuration with the given store name.
    pub fn new(store_name: impl Into<String>) -> Self {
        Self {
            store_name: store_name.into(),
            ..Default::default()
        }
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Keep or discard the saved cart on unmount.
    pub fn with_keep_session(mut self, keep: bool) -> Self {
        self.keep_session = keep;
        self
    }

    /// Persist sessions under `dir`.
    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = Some(dir.into());
        self
    }

    /// Enable or disable cart change logs.
    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.logging = enabled;
        self
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.log_format = format;
        self
    }

    /// Reject values the shell cannot run with.
    pub fn validate(&self) -> Result<(), StorefrontError> {
        if self.store_name.trim().is_empty() {
            return Err(StorefrontError::InvalidConfig(
                "store_name must not be empty".to_string(),
            ));
        }
        if self.toast_duration_ms == 0 {
            return Err(StorefrontError::InvalidConfig(
                "toast_duration_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// What the header reads from the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderView {
    pub store_name: String,
    pub cart_count: u64,
}

/// Builder for [`AppShell`].
///
/// ```rust
/// use storefront_cart::prelude::*;
///
/// let shell = AppShell::builder(ShellConfig::new("Demo Shop").with_logging(false))
///     .mount()
///     .unwrap();
/// assert_eq!(shell.header().cart_count, 0);
/// ```
#[derive(Debug)]
pub struct ShellBuilder {
    config: ShellConfig,
    session_id: Option<SessionId>,
    cache: Option<Cache>,
    log_sink: LogSink,
}

impl ShellBuilder {
    /// Resume a known session instead of starting a new one.
    pub fn session(mut self, id: SessionId) -> Self {
        self.session_id = Some(id);
        self
    }

    /// Persist through `cache`, overriding `storage_dir`.
    pub fn cache(mut self, cache: Cache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Send logs to `sink` instead of stderr.
    pub fn log_sink(mut self, sink: LogSink) -> Self {
        self.log_sink = sink;
        self
    }

    /// Create the cart, restore any saved session and attach listeners.
    pub fn mount(self) -> Result<AppShell, StorefrontError> {
        self.config.validate()?;

        let session_id = self.session_id.unwrap_or_else(SessionId::generate);
        let logger = StructuredLogger::new(session_id.as_str())
            .with_component("shell")
            .with_min_level(self.config.log_level)
            .with_format(self.config.log_format)
            .with_sink(self.log_sink);

        let cache = match (self.cache, &self.config.storage_dir) {
            (Some(cache), _) => Some(cache),
            (None, Some(dir)) => Some(Cache::new(FileBackend::open(dir)?)),
            (None, None) => None,
        };

        let mut cart = CartStore::new(self.config.currency);
        let mut persistence = None;
        let mut restored_lines = 0;

        if let Some(cache) = cache {
            let p = CartPersistence::new(cache, session_id.clone())
                .with_logger(logger.clone().with_component("persistence"));
            if let Some(saved) = p.load_for_mount() {
                // Restore before subscribing so the saved copy is not
                // immediately rewritten.
                cart.restore(saved);
                restored_lines = cart.unique_item_count();
            }
            cart.subscribe(p.clone());
            persistence = Some(p);
        }

        if self.config.logging {
            cart.subscribe(CartEventLogger::new(logger.clone().with_component("cart")));
        }

        logger
            .info_builder("shell mounted")
            .field("store", self.config.store_name.as_str())
            .field_bool("persistent", persistence.is_some())
            .field_i64("restored_lines", restored_lines as i64)
            .emit();

        Ok(AppShell {
            toasts: ToastQueue::new(self.config.toast_duration_ms),
            config: self.config,
            session_id,
            cart,
            persistence,
            logger,
        })
    }
}

/// A mounted storefront shell.
#[derive(Debug)]
pub struct AppShell {
    config: ShellConfig,
    session_id: SessionId,
    cart: CartStore,
    persistence: Option<CartPersistence>,
    toasts: ToastQueue,
    logger: StructuredLogger,
}

impl AppShell {
    pub fn builder(config: ShellConfig) -> ShellBuilder {
        ShellBuilder {
            config,
            session_id: None,
            cache: None,
            log_sink: LogSink::Stderr,
        }
    }

    /// Mount with a fresh session and the configured storage.
    pub fn mount(config: ShellConfig) -> Result<Self, StorefrontError> {
        Self::builder(config).mount()
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn is_persistent(&self) -> bool {
        self.persistence.is_some()
    }

    /// The cart, for reading.
    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// The cart, for components that change it.
    pub fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub fn header(&self) -> HeaderView {
        HeaderView {
            store_name: self.config.store_name.clone(),
            cart_count: self.cart.item_count(),
        }
    }

    /// Run a card's "Add to Cart" against this shell's cart and toasts.
    pub fn add_to_cart(&mut self, product: &Product) {
        ProductCard::new(product).add_to_cart(&mut self.cart, &self.toasts);
    }

    /// Run a card's "Buy Now" against this shell's cart and toasts.
    pub fn buy_now(&mut self, product: &Product) -> CheckoutIntent {
        let intent = ProductCard::new(product).buy_now(&mut self.cart, &self.toasts);
        self.logger
            .info_builder("checkout intent")
            .field("redirect_to", intent.redirect_to.as_str())
            .field("product_id", product.id.as_str())
            .emit();
        intent
    }

    /// Tear down the shell and return the final cart.
    ///
    /// The saved session is deleted unless `keep_session` is set.
    pub fn unmount(self) -> Result<CartState, StorefrontError> {
        if let Some(p) = &self.persistence {
            if !self.config.keep_session {
                p.discard()?;
            }
        }

        self.logger
            .info_builder("shell unmounted")
            .field_i64("item_count", self.cart.item_count() as i64)
            .field_bool("kept", self.config.keep_session && self.persistence.is_some())
            .emit();

        Ok(self.cart.into_state())
    }
}
