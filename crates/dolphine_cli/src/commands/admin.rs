//! Store administration commands.

use anyhow::Result;
use dolphine_core::search::filter::{InquiryFilter, ProductFilter, Scope, StatusScope, TextQuery};
use dolphine_core::{
    parse_tag_list, BlogPostPatch, CategoryPatch, Dashboard, InquiryStatus, NewBlogPost,
    NewCategory, NewProduct, Priority, ProductPatch, ProductStats,
};
use serde_json::json;
use uuid::Uuid;

use super::{
    blog, category_line, find_category, find_product, inquiry_line, parse_specs, product_line,
    AdminArgs, AdminBlogCommand, AdminCommand, CategoryCommand, InquiryCommand, ProductCommand,
    ProductDetails,
};
use crate::context::Context;
use crate::output::format_timestamp;

/// Run the admin command.
pub fn run(args: AdminArgs, ctx: &Context) -> Result<()> {
    match args.command {
        AdminCommand::Product { command } => product(command, ctx),
        AdminCommand::Category { command } => category(command, ctx),
        AdminCommand::Inquiry { command } => inquiry(command, ctx),
        AdminCommand::Blog { command } => blog_admin(command, ctx),
        AdminCommand::Stats => stats(ctx),
        AdminCommand::Dashboard => dashboard(ctx),
        AdminCommand::RefreshCounts => refresh_counts(ctx),
    }
}

fn product(command: ProductCommand, ctx: &Context) -> Result<()> {
    let catalog = ctx.store.catalog()?;
    match command {
        ProductCommand::List { category, search } => {
            let filter = ProductFilter {
                text: TextQuery::from_option(search.as_deref()),
                category: Scope::parse(&category),
            };
            let products = catalog.search_products(&filter)?;
            ctx.output.emit(&products, |products| {
                ctx.output.header("Products");
                if products.is_empty() {
                    ctx.output.info("No products found.");
                }
                for product in products {
                    ctx.output.list_item(&product_line(product));
                }
            });
        }
        ProductCommand::Add {
            name,
            category,
            details,
        } => {
            let draft = NewProduct {
                specifications: parse_specs(&details.specs)?,
                tags: details
                    .tags
                    .as_deref()
                    .map(parse_tag_list)
                    .unwrap_or_default(),
                description: details.description.unwrap_or_default(),
                full_description: details.full_description.unwrap_or_default(),
                warranty: details.warranty.unwrap_or_default(),
                price: details.price.unwrap_or_default(),
                images: details.images,
                featured: details.featured.unwrap_or(false),
                ..NewProduct::new(name, category)
            };
            let product = catalog.add_product(&draft)?;
            ctx.output.emit(&product, |product| {
                ctx.output.success(&format!("product created: {}", product.slug));
                ctx.output.kv("id", &product.id.to_string());
            });
        }
        ProductCommand::Update {
            key,
            name,
            slug,
            category,
            details,
        } => {
            let existing = find_product(&catalog, &key)?;
            let patch = product_patch(name, slug, category, details)?;
            let product = catalog.update_product(existing.id, &patch)?;
            ctx.output.emit(&product, |product| {
                ctx.output.success(&format!("product updated: {}", product.slug));
            });
        }
        ProductCommand::Delete { key } => {
            let existing = find_product(&catalog, &key)?;
            let deleted = catalog.delete_product(existing.id)?;
            ctx.output
                .emit(&json!({ "deleted": deleted, "id": existing.id }), |_| {
                    ctx.output
                        .success(&format!("product deleted: {}", existing.slug));
                });
        }
        ProductCommand::Views { limit } => {
            let views = catalog.product_views(limit)?;
            ctx.output.emit(&views, |views| {
                ctx.output.header("Product views");
                if views.is_empty() {
                    ctx.output.info("No views recorded yet.");
                }
                for view in views {
                    ctx.output.list_item(&format!(
                        "{} | {} | {}",
                        format_timestamp(view.timestamp),
                        view.product_id,
                        view.user_agent
                    ));
                }
            });
        }
    }
    Ok(())
}

fn product_patch(
    name: Option<String>,
    slug: Option<String>,
    category: Option<String>,
    details: ProductDetails,
) -> Result<ProductPatch> {
    let specifications = if details.specs.is_empty() {
        None
    } else {
        Some(parse_specs(&details.specs)?)
    };
    let images = if details.images.is_empty() {
        None
    } else {
        Some(details.images)
    };
    Ok(ProductPatch {
        name,
        slug,
        category,
        description: details.description,
        full_description: details.full_description,
        specifications,
        warranty: details.warranty,
        price: details.price,
        images,
        featured: details.featured,
        tags: details.tags.as_deref().map(parse_tag_list),
    })
}

fn category(command: CategoryCommand, ctx: &Context) -> Result<()> {
    let catalog = ctx.store.catalog()?;
    match command {
        CategoryCommand::List { search } => {
            let categories = catalog.search_categories(&TextQuery::from_option(search.as_deref()))?;
            ctx.output.emit(&categories, |categories| {
                ctx.output.header("Categories");
                if categories.is_empty() {
                    ctx.output.info("No categories found.");
                }
                for category in categories {
                    ctx.output.list_item(&category_line(category));
                }
            });
        }
        CategoryCommand::Add {
            name,
            description,
            image,
        } => {
            let category = catalog.add_category(&NewCategory {
                name,
                description,
                image,
            })?;
            ctx.output.emit(&category, |category| {
                ctx.output
                    .success(&format!("category created: {}", category.slug));
                ctx.output.kv("id", &category.id.to_string());
            });
        }
        CategoryCommand::Update {
            key,
            name,
            slug,
            description,
            image,
        } => {
            let existing = find_category(&catalog, &key)?;
            let patch = CategoryPatch {
                name,
                slug,
                description,
                image,
            };
            let category = catalog.update_category(existing.id, &patch)?;
            ctx.output.emit(&category, |category| {
                ctx.output
                    .success(&format!("category updated: {}", category.slug));
            });
        }
        CategoryCommand::Delete { key } => {
            let existing = find_category(&catalog, &key)?;
            let deleted = catalog.delete_category(existing.id)?;
            ctx.output
                .emit(&json!({ "deleted": deleted, "id": existing.id }), |_| {
                    ctx.output
                        .success(&format!("category deleted: {}", existing.slug));
                });
        }
    }
    Ok(())
}

fn inquiry(command: InquiryCommand, ctx: &Context) -> Result<()> {
    let inquiries = ctx.store.inquiries()?;
    match command {
        InquiryCommand::List { status, search } => {
            let filter = InquiryFilter {
                text: TextQuery::from_option(search.as_deref()),
                status: StatusScope::parse(&status)?,
            };
            let list = inquiries.list(&filter)?;
            ctx.output.emit(&list, |list| {
                ctx.output.header("Inquiries");
                if list.is_empty() {
                    ctx.output.info("No inquiries found.");
                }
                for inquiry in list {
                    ctx.output.list_item(&inquiry_line(inquiry));
                }
            });
        }
        InquiryCommand::Show { id } => {
            let inquiry = inquiries.get(id)?;
            ctx.output.emit(&inquiry, |inquiry| {
                ctx.output.header(&format!("Inquiry from {}", inquiry.name));
                ctx.output.kv("email", &inquiry.email);
                if !inquiry.phone.is_empty() {
                    ctx.output.kv("phone", &inquiry.phone);
                }
                if let Some(company) = &inquiry.company {
                    ctx.output.kv("company", company);
                }
                if let Some(product) = &inquiry.product {
                    ctx.output.kv("product", product);
                }
                ctx.output.kv("department", inquiry.department.as_str());
                ctx.output.kv("status", inquiry.status.as_str());
                ctx.output.kv("priority", inquiry.priority.as_str());
                ctx.output.kv("received", &format_timestamp(inquiry.date));
                if let Some(at) = inquiry.last_reply {
                    ctx.output.kv("last reply", &format_timestamp(at));
                }
                ctx.output.info("");
                ctx.output.info(&inquiry.message);
            });
        }
        InquiryCommand::Reply { id } => {
            let inquiry = inquiries.mark_replied(id)?;
            report_inquiry(ctx, &inquiry, "marked replied");
        }
        InquiryCommand::Status { id, status } => {
            let inquiry = inquiries.set_status(id, InquiryStatus::parse(&status)?)?;
            report_inquiry(ctx, &inquiry, "status updated");
        }
        InquiryCommand::Priority { id, priority } => {
            let inquiry = inquiries.set_priority(id, Priority::parse(&priority)?)?;
            report_inquiry(ctx, &inquiry, "priority updated");
        }
        InquiryCommand::Archive { id } => {
            let inquiry = inquiries.archive(id)?;
            report_inquiry(ctx, &inquiry, "archived");
        }
        InquiryCommand::Delete { id } => {
            let deleted = inquiries.delete(id)?;
            report_deleted(ctx, "inquiry", id, deleted);
        }
        InquiryCommand::Summary => {
            let summary = inquiries.summary()?;
            ctx.output.emit(&summary, |summary| {
                ctx.output.header("Inquiry summary");
                ctx.output.kv("total", &summary.total.to_string());
                for status in InquiryStatus::ALL {
                    ctx.output
                        .kv(status.as_str(), &summary.count(status).to_string());
                }
            });
        }
    }
    Ok(())
}

fn report_inquiry(ctx: &Context, inquiry: &dolphine_core::Inquiry, action: &str) {
    ctx.output.emit(inquiry, |inquiry| {
        ctx.output.success(&format!("inquiry {action}"));
        ctx.output.list_item(&inquiry_line(inquiry));
    });
}

fn report_deleted(ctx: &Context, entity: &str, id: Uuid, deleted: bool) {
    ctx.output.emit(&json!({ "deleted": deleted, "id": id }), |_| {
        if deleted {
            ctx.output.success(&format!("{entity} deleted: {id}"));
        } else {
            ctx.output.info(&format!("no {entity} with id {id}"));
        }
    });
}

fn blog_admin(command: AdminBlogCommand, ctx: &Context) -> Result<()> {
    match command {
        AdminBlogCommand::List { category, search } => {
            return blog::list(&category, search.as_deref(), ctx);
        }
        AdminBlogCommand::Add {
            title,
            excerpt,
            content,
            author,
            category,
            tags,
            image,
        } => {
            let draft = NewBlogPost {
                title,
                excerpt,
                content,
                author,
                category,
                tags: parse_tag_list(&tags),
                image,
                date: None,
                read_time: None,
            };
            let post = ctx.store.blog()?.add(&draft)?;
            ctx.output.emit(&post, |post| {
                ctx.output.success(&format!("post created: {}", post.slug));
                ctx.output.kv("read time", &format!("{} min", post.read_time));
            });
        }
        AdminBlogCommand::Update {
            key,
            title,
            slug,
            excerpt,
            content,
            author,
            category,
            tags,
            image,
        } => {
            let service = ctx.store.blog()?;
            let existing = match Uuid::parse_str(&key) {
                Ok(id) => service.post(id)?,
                Err(_) => service.post_by_slug(&key)?,
            };
            let patch = BlogPostPatch {
                title,
                slug,
                excerpt,
                content,
                author,
                category,
                tags: tags.as_deref().map(parse_tag_list),
                image,
            };
            let post = service.update(existing.id, &patch)?;
            ctx.output.emit(&post, |post| {
                ctx.output.success(&format!("post updated: {}", post.slug));
            });
        }
        AdminBlogCommand::Delete { key } => {
            let service = ctx.store.blog()?;
            let existing = match Uuid::parse_str(&key) {
                Ok(id) => service.post(id)?,
                Err(_) => service.post_by_slug(&key)?,
            };
            let deleted = service.delete(existing.id)?;
            report_deleted(ctx, "post", existing.id, deleted);
        }
        AdminBlogCommand::Seed => {
            let inserted = ctx.store.blog()?.ensure_seeded()?;
            ctx.output.emit(&json!({ "inserted": inserted }), |_| {
                if inserted == 0 {
                    ctx.output.info("blog already has posts; nothing seeded");
                } else {
                    ctx.output
                        .success(&format!("{inserted} sample post(s) inserted"));
                }
            });
        }
    }
    Ok(())
}

fn stats(ctx: &Context) -> Result<()> {
    let stats = ctx.store.catalog()?.product_stats()?;

    ctx.output.emit(&stats, |stats: &ProductStats| {
        ctx.output.header("Product statistics");
        ctx.output.kv("products", &stats.total_products.to_string());
        ctx.output.kv("views", &stats.total_views.to_string());
        ctx.output.header("Most viewed");
        for product in &stats.top_products {
            ctx.output.list_item(&product_line(product));
        }
        ctx.output.header("Recent views");
        for view in &stats.recent_views {
            ctx.output.list_item(&format!(
                "{} | {}",
                format_timestamp(view.timestamp),
                view.product_id
            ));
        }
    });
    Ok(())
}

fn dashboard(ctx: &Context) -> Result<()> {
    let dashboard = ctx.store.dashboard()?;

    ctx.output.emit(&dashboard, |dashboard: &Dashboard| {
        ctx.output.header("Dashboard");
        ctx.output
            .kv("products", &dashboard.total_products.to_string());
        ctx.output
            .kv("categories", &dashboard.total_categories.to_string());
        ctx.output.kv(
            "inquiries",
            &format!(
                "{} ({} new)",
                dashboard.total_inquiries, dashboard.new_inquiries
            ),
        );
        ctx.output.kv("views", &dashboard.total_views.to_string());

        ctx.output.header("Top products");
        for product in &dashboard.top_products {
            ctx.output.list_item(&product_line(product));
        }
        ctx.output.header("Recent inquiries");
        for inquiry in &dashboard.recent_inquiries {
            ctx.output.list_item(&inquiry_line(inquiry));
        }
    });
    Ok(())
}

fn refresh_counts(ctx: &Context) -> Result<()> {
    let updated = ctx.store.catalog()?.refresh_product_counts()?;
    ctx.output.emit(&json!({ "updated": updated }), |_| {
        ctx.output
            .success(&format!("product counts refreshed ({updated} category row(s) changed)"));
    });
    Ok(())
}
