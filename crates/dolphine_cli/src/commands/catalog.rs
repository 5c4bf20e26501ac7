//! Shopper catalog commands.

use anyhow::Result;
use dolphine_core::search::filter::TextQuery;
use dolphine_core::service::catalog_service::RELATED_PRODUCTS_LIMIT;
use dolphine_core::CatalogQuery;

use super::{category_line, product_line, CatalogArgs, CatalogCommand};
use crate::context::Context;
use crate::output::format_timestamp;

/// Run the catalog command.
pub fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    match args.command {
        CatalogCommand::List { category, search } => list(&category, search.as_deref(), ctx),
        CatalogCommand::Categories { search } => categories(search.as_deref(), ctx),
        CatalogCommand::Featured => featured(ctx),
        CatalogCommand::Show { slug } => show(&slug, ctx),
        CatalogCommand::Related { slug } => related(&slug, ctx),
    }
}

fn list(category: &str, search: Option<&str>, ctx: &Context) -> Result<()> {
    let page = ctx
        .store
        .catalog()?
        .browse(&CatalogQuery::new(Some(category), search))?;

    ctx.output.emit(&page, |page| {
        ctx.output.header(&page.title);
        if !page.description.is_empty() {
            ctx.output.info(&page.description);
        }
        if page.products.is_empty() {
            ctx.output.info("No products found.");
            return;
        }
        for product in &page.products {
            ctx.output.list_item(&product_line(product));
        }
        ctx.output.info(&format!("{} product(s)", page.products.len()));
    });
    Ok(())
}

fn categories(search: Option<&str>, ctx: &Context) -> Result<()> {
    let categories = ctx
        .store
        .catalog()?
        .search_categories(&TextQuery::from_option(search))?;

    ctx.output.emit(&categories, |categories| {
        ctx.output.header("Categories");
        if categories.is_empty() {
            ctx.output.info("No categories found.");
        }
        for category in categories {
            ctx.output.list_item(&category_line(category));
        }
    });
    Ok(())
}

fn featured(ctx: &Context) -> Result<()> {
    let products = ctx.store.catalog()?.featured_products()?;

    ctx.output.emit(&products, |products| {
        ctx.output.header("Featured products");
        if products.is_empty() {
            ctx.output.info("No featured products yet.");
        }
        for product in products {
            ctx.output.list_item(&product_line(product));
        }
    });
    Ok(())
}

fn show(slug: &str, ctx: &Context) -> Result<()> {
    let page = ctx.store.view_product(slug)?;

    ctx.output.emit(&page, |page| {
        let product = &page.product;
        ctx.output.header(&product.name);
        ctx.output.kv("slug", &product.slug);
        let category = page
            .category
            .as_ref()
            .map_or(product.category.as_str(), |category| category.name.as_str());
        ctx.output.kv("category", category);
        ctx.output.kv("price", &product.price);
        if !product.warranty.is_empty() {
            ctx.output.kv("warranty", &product.warranty);
        }
        ctx.output.kv("views", &product.view_count.to_string());
        ctx.output.kv("added", &format_timestamp(product.created_at));
        if !product.tags.is_empty() {
            ctx.output.kv("tags", &product.tags.join(", "));
        }
        if let Some(image) = product.primary_image() {
            ctx.output.kv("image", image);
        }

        let description = if product.full_description.is_empty() {
            &product.description
        } else {
            &product.full_description
        };
        if !description.is_empty() {
            ctx.output.info("");
            ctx.output.info(description);
        }

        if !product.specifications.is_empty() {
            ctx.output.header("Specifications");
            for (key, value) in &product.specifications {
                ctx.output.kv(key, value);
            }
        }

        if !page.related.is_empty() {
            ctx.output.header("Related products");
            for related in &page.related {
                ctx.output.list_item(&product_line(related));
            }
        }
    });
    Ok(())
}

fn related(slug: &str, ctx: &Context) -> Result<()> {
    let catalog = ctx.store.catalog()?;
    let product = catalog.require_product(slug)?;
    let related =
        catalog.related_products(&product.category, product.id, RELATED_PRODUCTS_LIMIT)?;

    ctx.output.emit(&related, |related| {
        ctx.output.header(&format!("Related to {}", product.name));
        if related.is_empty() {
            ctx.output.info("No related products.");
        }
        for item in related {
            ctx.output.list_item(&product_line(item));
        }
    });
    Ok(())
}
