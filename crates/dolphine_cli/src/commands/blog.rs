//! Blog reading commands.

use anyhow::Result;
use dolphine_core::search::filter::{BlogFilter, Scope, TextQuery};
use dolphine_core::service::blog_service::BLOG_CATEGORIES;
use dolphine_core::BlogPost;

use super::{blog_line, BlogArgs, BlogCommand};
use crate::context::Context;
use crate::output::format_timestamp;

/// Run the blog command.
pub fn run(args: BlogArgs, ctx: &Context) -> Result<()> {
    match args.command {
        BlogCommand::List { category, search } => {
            ctx.store.blog()?.ensure_seeded()?;
            list(&category, search.as_deref(), ctx)
        }
        BlogCommand::Show { slug } => {
            ctx.store.blog()?.ensure_seeded()?;
            show(&slug, ctx)
        }
        BlogCommand::Categories => {
            ctx.output.emit(&BLOG_CATEGORIES, |categories| {
                ctx.output.header("Blog categories");
                for category in categories {
                    ctx.output.list_item(category);
                }
            });
            Ok(())
        }
    }
}

/// Lists posts; shared with `admin blog list`.
pub fn list(category: &str, search: Option<&str>, ctx: &Context) -> Result<()> {
    let filter = BlogFilter {
        text: TextQuery::from_option(search),
        category: Scope::parse(category),
    };
    let posts = ctx.store.blog()?.list(&filter)?;

    ctx.output.emit(&posts, |posts| {
        ctx.output.header("Blog");
        if posts.is_empty() {
            ctx.output.info("No articles found.");
        }
        for post in posts {
            ctx.output.list_item(&blog_line(post));
        }
    });
    Ok(())
}

fn show(slug: &str, ctx: &Context) -> Result<()> {
    let post = ctx.store.blog()?.post_by_slug(slug)?;

    ctx.output.emit(&post, |post: &BlogPost| {
        ctx.output.header(&post.title);
        ctx.output.kv("author", &post.author);
        ctx.output.kv("date", &format_timestamp(post.date));
        ctx.output.kv("category", &post.category);
        ctx.output.kv("read time", &format!("{} min", post.read_time));
        if !post.tags.is_empty() {
            ctx.output.kv("tags", &post.tags.join(", "));
        }
        ctx.output.info("");
        ctx.output.info(&post.content);
    });
    Ok(())
}
