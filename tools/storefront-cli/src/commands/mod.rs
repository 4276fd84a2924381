//! CLI command implementations.

pub mod buy;
pub mod card;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod session;

use clap::{Args, Subcommand};

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Show only featured products.
    #[arg(long)]
    pub featured: bool,
}

/// Arguments for the card command.
#[derive(Args)]
pub struct CardArgs {
    /// Product ID.
    pub id: String,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show cart contents and totals.
    Show,
    /// Add a product to the cart.
    Add {
        /// Product ID.
        id: String,
        /// Units to add.
        #[arg(
            short,
            long,
            default_value = "1",
            value_parser = clap::value_parser!(u32).range(1..)
        )]
        quantity: u32,
    },
    /// Remove a product line.
    Remove {
        /// Product ID.
        id: String,
    },
    /// Set a line's quantity. Zero or less removes it.
    Set {
        /// Product ID.
        id: String,
        /// New quantity.
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the buy command.
#[derive(Args)]
pub struct BuyArgs {
    /// Product ID.
    pub id: String,
}

/// Arguments for the session command.
#[derive(Args)]
pub struct SessionArgs {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Subcommand)]
pub enum SessionCommand {
    /// Show the active session.
    Show,
    /// End the visit and delete the saved cart.
    End {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Store name.
        #[arg(short, long, default_value = "Storefront")]
        name: String,
        /// Overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate configuration.
    Validate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct CartCli {
        #[command(subcommand)]
        command: CartCommand,
    }

    #[test]
    fn test_cart_add_rejects_zero_quantity() {
        assert!(CartCli::try_parse_from(["cart", "add", "1", "-q", "0"]).is_err());

        let cli = CartCli::try_parse_from(["cart", "add", "1", "-q", "3"]).unwrap();
        assert!(matches!(
            cli.command,
            CartCommand::Add { ref id, quantity: 3 } if id == "1"
        ));
    }

    #[test]
    fn test_cart_set_accepts_negative_quantity() {
        let cli = CartCli::try_parse_from(["cart", "set", "1", "-2"]).unwrap();
        assert!(matches!(cli.command, CartCommand::Set { quantity: -2, .. }));
    }
}
