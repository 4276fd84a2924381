//! Render one product card.

use anyhow::Result;
use storefront_cart::ui::ProductCard;
use storefront_cart::ProductId;

use super::CardArgs;
use crate::context::Context;
use crate::output::badge;

/// Run the card command.
pub fn run(args: CardArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let product = catalog.get(&ProductId::new(args.id))?;
    let view = ProductCard::new(product).view();

    if ctx.output.is_json() {
        ctx.output.json(&view);
        return Ok(());
    }

    ctx.output.header(&view.name);
    if !view.badges.is_empty() {
        let badges: Vec<String> = view.badges.iter().map(|b| badge(&b.label())).collect();
        ctx.output.info(&badges.join(" "));
    }

    match &view.was_price {
        Some(was) => ctx
            .output
            .kv("price", &format!("{} (was {})", view.price, was)),
        None => ctx.output.kv("price", &view.price),
    }
    ctx.output.kv("summary", &view.summary);
    if let Some(rating) = &view.rating {
        ctx.output
            .kv("rating", &format!("{} ({})", rating.stars(), rating.review_count));
    }
    if let Some(image) = &view.image_url {
        ctx.output.kv("image", image);
    }
    for feature in &view.features {
        ctx.output.list_item(feature);
    }
    ctx.output.kv("details", &view.details_href);
    if let Some(demo) = &view.demo_href {
        ctx.output.kv("live demo", demo);
    }
    if let Some(updated) = &view.updated_label {
        ctx.output.kv("updated", updated);
    }

    Ok(())
}
