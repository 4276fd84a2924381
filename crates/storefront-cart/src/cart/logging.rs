//! Cart change logging.

use std::collections::HashMap;

use storefront_observability::{LogLevel, StructuredLogger};

use crate::cart::{CartEvent, CartListener, CartState};

/// Emits one structured entry per cart change.
#[derive(Debug, Clone)]
pub struct CartEventLogger {
    logger: StructuredLogger,
    level: LogLevel,
}

impl CartEventLogger {
    pub fn new(logger: StructuredLogger) -> Self {
        Self {
            logger,
            level: LogLevel::Info,
        }
    }

    /// Level the entries are emitted at.
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }
}

impl CartListener for CartEventLogger {
    fn on_cart_event(&self, event: &CartEvent, state: &CartState) {
        if !self.logger.enabled(self.level) {
            return;
        }

        let mut fields: HashMap<String, serde_json::Value> = match serde_json::to_value(event) {
            Ok(serde_json::Value::Object(map)) => map.into_iter().collect(),
            _ => HashMap::new(),
        };
        fields.remove("event");
        fields.insert("item_count".to_string(), serde_json::json!(state.item_count()));
        fields.insert(
            "subtotal".to_string(),
            serde_json::json!(state.subtotal().display()),
        );
        if state.has_foreign_currency() {
            fields.insert("foreign_currency".to_string(), serde_json::json!(true));
        }

        self.logger.log_with_fields(self.level, event.name(), fields);
    }
}
