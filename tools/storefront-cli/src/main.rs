//! Storefront CLI - drive a cart session from the terminal.
//!
//! Commands:
//! - `storefront catalog` - List products
//! - `storefront card` - Render a product card
//! - `storefront cart` - Show and change the cart
//! - `storefront buy` - Add a product and go to checkout
//! - `storefront session` - Inspect or end the saved visit
//! - `storefront config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{BuyArgs, CardArgs, CartArgs, CatalogArgs, ConfigArgs, SessionArgs};

/// Storefront CLI - browse products and manage a cart
#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Session ID to resume (overrides config)
    #[arg(short, long, global = true)]
    session: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products in the catalog
    Catalog(CatalogArgs),

    /// Render a product card
    Card(CardArgs),

    /// Show and change the cart
    Cart(CartArgs),

    /// Add a product and head to checkout
    Buy(BuyArgs),

    /// Inspect or end the saved session
    Session(SessionArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = context::Context::load(cli.config.as_deref(), cli.session, output)?;

    // Execute command
    let result = match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args, &ctx),
        Commands::Card(args) => commands::card::run(args, &ctx),
        Commands::Cart(args) => commands::cart::run(args, &ctx),
        Commands::Buy(args) => commands::buy::run(args, &ctx),
        Commands::Session(args) => commands::session::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
