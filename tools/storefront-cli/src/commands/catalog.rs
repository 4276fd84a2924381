//! List products.

use anyhow::Result;

use super::CatalogArgs;
use crate::context::Context;
use crate::output::badge;

/// Run the catalog command.
pub fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let products: Vec<_> = catalog
        .featured_first()
        .into_iter()
        .filter(|p| !args.featured || p.is_featured)
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header(&format!("Catalog ({} products)", products.len()));
    if products.is_empty() {
        ctx.output.info("No products found");
        return Ok(());
    }

    ctx.output.table_row(&["ID", "NAME", "PRICE", "BADGES"], &[8, 32, 10, 20]);
    for product in products {
        let card = storefront_cart::ui::ProductCard::new(product);
        let badges: Vec<String> = card.badges().iter().map(|b| badge(&b.label())).collect();
        ctx.output.table_row(
            &[
                product.id.as_str(),
                product.name.as_str(),
                product.price.display().as_str(),
                badges.join(" ").as_str(),
            ],
            &[8, 32, 10, 20],
        );
    }

    Ok(())
}
