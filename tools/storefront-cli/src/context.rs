//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use storefront_cache::SessionId;
use storefront_cart::catalog::Catalog;
use storefront_cart::ui::AppShell;
use storefront_observability::LogLevel;

use crate::config::CliConfig;
use crate::output::Output;

const CONFIG_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Session override from the command line.
    pub session: Option<String>,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, session: Option<String>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            // Try to find config in current directory or parent directories
            Self::find_config(&cwd).unwrap_or_default()
        };

        Ok(Self {
            config,
            output,
            cwd,
            session,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<CliConfig> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some(config);
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }

    /// Session this run drives.
    pub fn session_id(&self) -> SessionId {
        SessionId::new(
            self.session
                .clone()
                .unwrap_or_else(|| self.config.session.id.clone()),
        )
    }

    /// Load the configured catalog.
    pub fn catalog(&self) -> Result<Catalog> {
        let path = self.resolve_path(&self.config.catalog.path);
        self.output
            .debug(&format!("Loading catalog from {}", path.display()));
        Catalog::load_with_currency(&path, self.config.shell.currency)
            .with_context(|| format!("Failed to load catalog: {}", path.display()))
    }

    /// Mount a shell resuming this run's session.
    ///
    /// Each CLI invocation is one page view of the same visit, so the saved
    /// cart is kept on unmount.
    pub fn open_shell(&self) -> Result<AppShell> {
        self.mount_shell(true)
    }

    /// Mount a shell whose unmount deletes the saved cart.
    pub fn end_shell(&self) -> Result<AppShell> {
        self.mount_shell(false)
    }

    fn mount_shell(&self, keep_session: bool) -> Result<AppShell> {
        let mut shell_config = self.config.shell.clone();
        shell_config.storage_dir = Some(self.resolve_path(self.config.storage_dir()));
        shell_config.keep_session = keep_session;
        if !self.output.is_verbose() {
            shell_config.log_level = shell_config.log_level.max(LogLevel::Warn);
        }

        let session = self.session_id();
        self.output.debug(&format!("Resuming session {}", session));

        AppShell::builder(shell_config)
            .session(session)
            .mount()
            .context("Failed to mount storefront shell")
    }
}
