//! CLI configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_cart::ui::ShellConfig;

/// Default location for saved sessions, relative to the working directory.
pub const DEFAULT_STORAGE_DIR: &str = ".storefront/sessions";

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Shell settings (store name, currency, logging, storage).
    #[serde(default)]
    pub shell: ShellConfig,

    /// Where products come from.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Which visit the CLI drives.
    #[serde(default)]
    pub session: SessionConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }

    /// Storage directory, falling back to [`DEFAULT_STORAGE_DIR`].
    pub fn storage_dir(&self) -> PathBuf {
        self.shell
            .storage_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR))
    }
}

/// Catalog source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to a JSON array of products.
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

fn default_catalog_path() -> String {
    "catalog.json".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

/// Session selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session ID the CLI resumes on every run.
    #[serde(default = "default_session_id")]
    pub id: String,
}

fn default_session_id() -> String {
    "cli".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            id: default_session_id(),
        }
    }
}

/// Generate a default storefront.toml config file.
pub fn generate_default_config(name: &str) -> String {
    format!(
        r#"# Storefront cart configuration

[shell]
store_name = "{name}"
currency = "USD"
storage_dir = "{storage}"
logging = true
log_level = "info"
log_format = "human"
toast_duration_ms = 2000

[catalog]
path = "catalog.json"

[session]
id = "cli"
"#,
        name = name,
        storage = DEFAULT_STORAGE_DIR,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_observability::{LogFormat, LogLevel};

    #[test]
    fn test_default_config_parses() {
        let config: CliConfig = toml::from_str(&generate_default_config("Shop")).unwrap();
        assert_eq!(config.shell.store_name, "Shop");
        assert_eq!(config.shell.log_format, LogFormat::Human);
        assert_eq!(config.shell.log_level, LogLevel::Info);
        assert_eq!(config.catalog.path, "catalog.json");
        assert_eq!(config.session.id, "cli");
        assert_eq!(config.storage_dir(), PathBuf::from(DEFAULT_STORAGE_DIR));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config.shell, ShellConfig::default());
        assert_eq!(config.session.id, "cli");
    }
}
