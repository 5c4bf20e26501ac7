//! Recently viewed products.

use anyhow::Result;
use serde_json::json;

use super::RecentArgs;
use crate::context::Context;
use crate::output::format_timestamp;

/// Run the recent command.
pub fn run(args: RecentArgs, ctx: &Context) -> Result<()> {
    if args.clear {
        let removed = ctx.store.clear_recently_viewed()?;
        ctx.output.emit(&json!({ "removed": removed }), |_| {
            ctx.output.success("recently viewed list cleared");
        });
        return Ok(());
    }

    let views = ctx.store.recently_viewed()?;
    ctx.output.emit(&views, |views| {
        ctx.output.header("Recently viewed");
        if views.is_empty() {
            ctx.output.info("Nothing viewed in the last 7 days.");
        }
        for view in views {
            ctx.output.list_item(&format!(
                "{} | {} | {} | {}",
                format_timestamp(view.viewed_at),
                view.name,
                view.price,
                view.slug
            ));
        }
    });
    Ok(())
}
