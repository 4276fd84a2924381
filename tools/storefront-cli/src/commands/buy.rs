//! Buy now.

use anyhow::Result;
use storefront_cart::ProductId;

use super::cart::{flush_toasts, print_cart};
use super::BuyArgs;
use crate::context::Context;

/// Run the buy command.
pub fn run(args: BuyArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let product = catalog.get(&ProductId::new(args.id))?;

    let mut shell = ctx.open_shell()?;
    let intent = shell.buy_now(product);

    if ctx.output.is_json() {
        ctx.output.json(&intent);
    } else {
        flush_toasts(&shell, ctx);
        print_cart(shell.cart(), ctx);
        ctx.output.info("");
        ctx.output.kv("next", &intent.redirect_to);
    }

    shell.unmount()?;
    Ok(())
}
