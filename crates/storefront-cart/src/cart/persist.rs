//! Session persistence for the cart.

use storefront_cache::{Cache, CacheError, SessionId, SessionStore};
use storefront_observability::StructuredLogger;

use crate::cart::{CartEvent, CartListener, CartState};

/// Writes the cart to the session store after every change.
///
/// A failed write never undoes the change: the in-memory cart stays
/// authoritative and the failure is logged.
#[derive(Debug, Clone)]
pub struct CartPersistence {
    sessions: SessionStore<CartState>,
    session_id: SessionId,
    logger: Option<StructuredLogger>,
}

impl CartPersistence {
    pub fn new(cache: Cache, session_id: SessionId) -> Self {
        Self {
            sessions: SessionStore::new(cache),
            session_id,
            logger: None,
        }
    }

    /// Log write failures through `logger`.
    pub fn with_logger(mut self, logger: StructuredLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Load the saved cart for this session, if any.
    pub fn load(&self) -> Result<Option<CartState>, CacheError> {
        self.sessions.get(&self.session_id)
    }

    /// Load the saved cart for mounting.
    ///
    /// Read failures are logged and yield `None` so the visit starts with an
    /// empty cart. A record that no longer decodes is deleted; otherwise
    /// every later save would fail reading the previous version.
    pub fn load_for_mount(&self) -> Option<CartState> {
        match self.load() {
            Ok(saved) => saved,
            Err(CacheError::SerializeError(e)) => {
                self.log_failure("saved cart unreadable", "restore", &e.to_string());
                if let Err(e) = self.discard() {
                    self.log_failure("cart persistence failed", "discard", &e.to_string());
                }
                None
            }
            Err(e) => {
                self.log_failure("cart persistence failed", "restore", &e.to_string());
                None
            }
        }
    }

    /// Write `state` now.
    pub fn save(&self, state: &CartState) -> Result<u64, CacheError> {
        self.sessions.set(&self.session_id, state)
    }

    /// Forget the saved cart.
    pub fn discard(&self) -> Result<(), CacheError> {
        self.sessions.delete(&self.session_id)
    }

    fn log_failure(&self, message: &str, event: &str, error: &str) {
        if let Some(logger) = &self.logger {
            logger
                .warn_builder(message)
                .field("event", event)
                .field("error", error)
                .emit();
        }
    }
}

impl CartListener for CartPersistence {
    fn on_cart_event(&self, event: &CartEvent, state: &CartState) {
        if let Err(e) = self.save(state) {
            self.log_failure("cart persistence failed", event.name(), &e.to_string());
        }
    }
}
