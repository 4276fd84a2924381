//! Structured logging with session context.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Log level for structured logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trace => write!(f, "TRACE"),
            Self::Debug => write!(f, "DEBUG"),
            Self::Info => write!(f, "INFO"),
            Self::Warn => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

/// Output format for logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON format (for log aggregation).
    #[default]
    Json,
    /// Human-readable format (for development).
    Human,
}

/// A structured log entry.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    /// Log level.
    pub level: LogLevel,
    /// Log message.
    pub message: String,
    /// Session ID for correlation.
    pub session_id: String,
    /// Component that produced the entry (e.g. "cart").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    /// Additional structured fields.
    #[serde(flatten)]
    pub fields: HashMap<String, serde_json::Value>,
    /// Microseconds since the logger was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_us: Option<u64>,
}

impl LogEntry {
    /// Format as JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.message.clone())
    }

    /// Format as human-readable string.
    pub fn to_human(&self) -> String {
        let mut s = format!("[{}] {}", self.level, self.message);

        if let Some(component) = &self.component {
            s = format!("[{}] {}: {}", self.level, component, self.message);
        }

        if !self.fields.is_empty() {
            // Sorted so the same entry always renders the same way.
            let mut keys: Vec<&String> = self.fields.keys().collect();
            keys.sort();
            let fields: Vec<String> = keys
                .into_iter()
                .map(|k| format!("{}={}", k, self.fields[k]))
                .collect();
            s.push_str(" | ");
            s.push_str(&fields.join(" "));
        }

        s
    }
}

/// Where emitted entries go.
#[derive(Debug, Clone, Default)]
pub enum LogSink {
    /// Write formatted lines to stderr.
    #[default]
    Stderr,
    /// Keep entries in memory for the caller to inspect.
    Buffer(Arc<Mutex<Vec<LogEntry>>>),
}

impl LogSink {
    /// Create an empty in-memory sink.
    pub fn buffer() -> Self {
        Self::Buffer(Arc::new(Mutex::new(Vec::new())))
    }

    /// Entries captured so far (empty for stderr).
    pub fn entries(&self) -> Vec<LogEntry> {
        match self {
            Self::Stderr => Vec::new(),
            Self::Buffer(buf) => buf.lock().map(|b| b.clone()).unwrap_or_default(),
        }
    }
}

/// Structured logger with session context.
///
/// Every entry carries the session ID so a visitor's cart activity can be
/// correlated across components.
#[derive(Debug, Clone)]
pub struct StructuredLogger {
    session_id: String,
    component: Option<String>,
    start_time: Instant,
    min_level: LogLevel,
    format: LogFormat,
    sink: LogSink,
}

impl StructuredLogger {
    /// Create a new logger for a session.
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            component: None,
            start_time: Instant::now(),
            min_level: LogLevel::Info,
            format: LogFormat::Json,
            sink: LogSink::Stderr,
        }
    }

    /// Set the component name.
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Set minimum log level.
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the output sink.
    pub fn with_sink(mut self, sink: LogSink) -> Self {
        self.sink = sink;
        self
    }

    pub fn trace(&self, message: &str) {
        self.log(LogLevel::Trace, message, HashMap::new());
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message, HashMap::new());
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message, HashMap::new());
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message, HashMap::new());
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message, HashMap::new());
    }

    /// Log with additional fields.
    pub fn log_with_fields(
        &self,
        level: LogLevel,
        message: &str,
        fields: HashMap<String, serde_json::Value>,
    ) {
        self.log(level, message, fields);
    }

    /// Whether entries at `level` would be emitted.
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    fn log(&self, level: LogLevel, message: &str, fields: HashMap<String, serde_json::Value>) {
        if !self.enabled(level) {
            return;
        }

        let entry = LogEntry {
            level,
            message: message.to_string(),
            session_id: self.session_id.clone(),
            component: self.component.clone(),
            fields,
            elapsed_us: Some(self.elapsed_us()),
        };

        match &self.sink {
            LogSink::Stderr => {
                let output = match self.format {
                    LogFormat::Json => entry.to_json(),
                    LogFormat::Human => entry.to_human(),
                };
                eprintln!("{}", output);
            }
            LogSink::Buffer(buf) => {
                if let Ok(mut buf) = buf.lock() {
                    buf.push(entry);
                }
            }
        }
    }

    /// Get the session ID.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Get elapsed time since logger creation.
    pub fn elapsed_us(&self) -> u64 {
        self.start_time.elapsed().as_micros() as u64
    }

    pub fn info_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, LogLevel::Info, message)
    }

    pub fn warn_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, LogLevel::Warn, message)
    }

    pub fn debug_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, LogLevel::Debug, message)
    }
}

/// Builder for log entries with fluent API.
pub struct LogBuilder<'a> {
    logger: &'a StructuredLogger,
    level: LogLevel,
    message: String,
    fields: HashMap<String, serde_json::Value>,
}

impl<'a> LogBuilder<'a> {
    /// Create a new log builder.
    pub fn new(logger: &'a StructuredLogger, level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            logger,
            level,
            message: message.into(),
            fields: HashMap::new(),
        }
    }

    /// Add a string field.
    pub fn field(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields
            .insert(key.to_string(), serde_json::json!(value.into()));
        self
    }

    /// Add an integer field.
    pub fn field_i64(mut self, key: &str, value: i64) -> Self {
        self.fields.insert(key.to_string(), serde_json::json!(value));
        self
    }

    /// Add a boolean field.
    pub fn field_bool(mut self, key: &str, value: bool) -> Self {
        self.fields.insert(key.to_string(), serde_json::json!(value));
        self
    }

    /// Emit the log entry.
    pub fn emit(self) {
        self.logger.log(self.level, &self.message, self.fields);
    }
}
