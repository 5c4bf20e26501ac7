//! Contact form submission.

use anyhow::Result;
use dolphine_core::{Department, NewInquiry};

use super::ContactArgs;
use crate::context::Context;

/// Run the contact command.
pub fn run(args: ContactArgs, ctx: &Context) -> Result<()> {
    let draft = NewInquiry {
        name: args.name,
        email: args.email,
        phone: args.phone,
        company: args.company,
        product: args.product,
        message: args.message,
        department: Department::parse(&args.department)?,
    };
    let inquiry = ctx.store.inquiries()?.submit(&draft)?;

    ctx.output.emit(&inquiry, |inquiry| {
        ctx.output.success("Thank you! We'll get back to you within 24 hours.");
        ctx.output.kv("reference", &inquiry.id.to_string());
        ctx.output.kv("department", inquiry.department.as_str());
    });
    Ok(())
}
