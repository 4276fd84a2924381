//! Cart commands.

use anyhow::Result;
use dialoguer::Confirm;
use storefront_cart::cart::CartStore;
use storefront_cart::ui::{AppShell, ToastKind};
use storefront_cart::ProductId;

use super::{CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut shell = ctx.open_shell()?;

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => {}
        CartCommand::Add { id, quantity } => {
            let catalog = ctx.catalog()?;
            let product = catalog.get(&ProductId::new(id))?;
            if quantity == 1 {
                shell.add_to_cart(product);
            } else {
                shell.cart_mut().add_item(product, quantity);
                ctx.output
                    .success(&format!("Added {} x {} to cart", quantity, product.name));
            }
        }
        CartCommand::Remove { id } => {
            let id = ProductId::new(id);
            if !shell.cart().contains(&id) {
                ctx.output.warn(&format!("{} is not in the cart", id));
            }
            shell.cart_mut().remove_item(&id);
        }
        CartCommand::Set { id, quantity } => {
            let id = ProductId::new(id);
            if !shell.cart().contains(&id) {
                ctx.output.warn(&format!("{} is not in the cart", id));
            }
            shell.cart_mut().update_quantity(&id, quantity);
        }
        CartCommand::Clear { yes } => {
            if shell.cart().is_empty() {
                ctx.output.info("Cart is already empty");
            } else if yes || confirm("Remove all items from the cart?")? {
                shell.cart_mut().clear();
                ctx.output.success("Cart cleared");
            } else {
                ctx.output.warn("Clear cancelled");
            }
        }
    }

    flush_toasts(&shell, ctx);
    print_cart(shell.cart(), ctx);
    shell.unmount()?;
    Ok(())
}

pub(crate) fn confirm(prompt: &str) -> Result<bool> {
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}

/// Print pending toasts as status lines.
pub(crate) fn flush_toasts(shell: &AppShell, ctx: &Context) {
    for toast in shell.toasts().drain() {
        match toast.kind {
            ToastKind::Success => ctx.output.success(&toast.message),
            ToastKind::Error => ctx.output.error(&toast.message),
        }
    }
}

/// Print cart lines and totals.
pub(crate) fn print_cart(cart: &CartStore, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "items": cart.items(),
            "item_count": cart.item_count(),
            "subtotal": cart.subtotal(),
            "foreign_currency": cart.state().has_foreign_currency(),
        }));
        return;
    }

    ctx.output.header(&format!("Cart ({} items)", cart.item_count()));
    if cart.is_empty() {
        ctx.output.info("Your cart is empty");
        return;
    }

    let widths = [8, 32, 6, 12];
    ctx.output.table_row(&["ID", "NAME", "QTY", "TOTAL"], &widths);
    for item in cart.items() {
        ctx.output.table_row(
            &[
                item.product_id.as_str(),
                item.name.as_str(),
                item.quantity.to_string().as_str(),
                item.line_total().display().as_str(),
            ],
            &widths,
        );
    }
    ctx.output.kv("subtotal", &cart.subtotal().display());
    if cart.state().has_foreign_currency() {
        ctx.output
            .warn("Some items are priced in another currency and are not in the subtotal");
    }
}
