//! Quote cart commands.

use anyhow::Result;
use dolphine_core::{Cart, CartItem, QuoteChannel, QuoteStyle};
use serde_json::json;

use super::{CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    match args.command {
        CartCommand::Add { slug } => add(&slug, ctx),
        CartCommand::Set { slug, quantity } => set(&slug, quantity, ctx),
        CartCommand::Remove { slug } => remove(&slug, ctx),
        CartCommand::Clear => clear(ctx),
        CartCommand::Show => show(ctx),
        CartCommand::Quote { channel, brief } => quote(&channel, brief, ctx),
    }
}

fn item_line(item: &CartItem) -> String {
    format!(
        "{} x{} | {} | {}",
        item.name, item.quantity, item.price, item.slug
    )
}

fn add(slug: &str, ctx: &Context) -> Result<()> {
    let product = ctx.store.catalog()?.require_product(slug)?;
    let item = ctx.store.cart()?.add_product(&product)?;

    ctx.output.emit(&item, |item| {
        ctx.output
            .success(&format!("{} in cart (quantity {})", item.name, item.quantity));
    });
    Ok(())
}

fn set(slug: &str, quantity: i64, ctx: &Context) -> Result<()> {
    let product = ctx.store.catalog()?.require_product(slug)?;
    let item = ctx.store.cart()?.update_quantity(product.id, quantity)?;

    ctx.output.emit(&item, |item| match item {
        Some(item) => ctx
            .output
            .success(&format!("{} quantity set to {}", item.name, item.quantity)),
        None => ctx
            .output
            .success(&format!("{} removed from cart", product.name)),
    });
    Ok(())
}

fn remove(slug: &str, ctx: &Context) -> Result<()> {
    let product = ctx.store.catalog()?.require_product(slug)?;
    let removed = ctx.store.cart()?.remove(product.id)?;

    ctx.output
        .emit(&json!({ "removed": removed, "slug": product.slug }), |_| {
            if removed {
                ctx.output
                    .success(&format!("{} removed from cart", product.name));
            } else {
                ctx.output.info(&format!("{} was not in the cart", product.name));
            }
        });
    Ok(())
}

fn clear(ctx: &Context) -> Result<()> {
    let removed = ctx.store.cart()?.clear()?;

    ctx.output.emit(&json!({ "removed": removed }), |_| {
        ctx.output
            .success(&format!("cart cleared ({removed} line(s) removed)"));
    });
    Ok(())
}

fn show(ctx: &Context) -> Result<()> {
    let cart = ctx.store.cart()?.cart()?;

    ctx.output.emit(&cart, |cart: &Cart| {
        ctx.output.header("Quote cart");
        if cart.is_empty() {
            ctx.output.info("Your cart is empty.");
            return;
        }
        for item in &cart.items {
            ctx.output.list_item(&item_line(item));
        }
        ctx.output.kv("products", &cart.unique_items().to_string());
        ctx.output.kv("total items", &cart.total_items().to_string());
    });
    Ok(())
}

fn quote(channel: &str, brief: bool, ctx: &Context) -> Result<()> {
    let channel = QuoteChannel::parse(channel)?;
    let style = if brief {
        QuoteStyle::Brief
    } else {
        QuoteStyle::Detailed
    };
    let link = ctx.store.quote_link(channel, style)?;

    ctx.output.emit(&link, |link| {
        ctx.output.header(&format!("Quote via {}", link.channel));
        ctx.output.info(&link.message);
        ctx.output.info("");
        ctx.output.info(&link.url);
    });
    Ok(())
}
