//! CLI command implementations.

pub mod admin;
pub mod blog;
pub mod cart;
pub mod catalog;
pub mod contact;
pub mod recent;

use std::collections::BTreeMap;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use dolphine_core::service::storefront::SqliteCatalogService;
use dolphine_core::{BlogPost, Category, Inquiry, Product};
use uuid::Uuid;

use crate::output::format_timestamp;

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommand,
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List products of one category, or all of them.
    List {
        /// Category slug, or `all`.
        #[arg(long, default_value = "all")]
        category: String,
        /// Match product name or description.
        #[arg(short, long)]
        search: Option<String>,
    },
    /// List categories with their product counts.
    Categories {
        #[arg(short, long)]
        search: Option<String>,
    },
    /// List featured products.
    Featured,
    /// Show a product page (counts as a view).
    Show { slug: String },
    /// List products related to a product.
    Related { slug: String },
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Add one unit of a product.
    Add { slug: String },
    /// Set a line quantity; zero or less removes the line.
    Set {
        slug: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a product from the cart.
    Remove { slug: String },
    /// Remove every line.
    Clear,
    /// Show cart contents.
    Show,
    /// Print a pre-filled quote request link.
    Quote {
        /// `whatsapp` or `messenger`.
        #[arg(long, default_value = "whatsapp")]
        channel: String,
        /// Use the short cart slide-out wording.
        #[arg(long)]
        brief: bool,
    },
}

/// Arguments for the recent command.
#[derive(Args)]
pub struct RecentArgs {
    /// Forget every recently viewed product.
    #[arg(long)]
    pub clear: bool,
}

/// Arguments for the contact command.
#[derive(Args)]
pub struct ContactArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, default_value = "")]
    pub phone: String,
    #[arg(long)]
    pub company: Option<String>,
    /// Product of interest.
    #[arg(long)]
    pub product: Option<String>,
    /// `sales`, `support`, `service` or `general`.
    #[arg(long, default_value = "sales")]
    pub department: String,
    #[arg(long)]
    pub message: String,
}

/// Arguments for the blog command.
#[derive(Args)]
pub struct BlogArgs {
    #[command(subcommand)]
    pub command: BlogCommand,
}

#[derive(Subcommand)]
pub enum BlogCommand {
    /// List posts, newest first.
    List {
        /// Blog category, or `all`.
        #[arg(long, default_value = "all")]
        category: String,
        /// Match title, excerpt or tags.
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show one post.
    Show { slug: String },
    /// List the blog categories.
    Categories,
}

/// Arguments for the admin command.
#[derive(Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Manage products.
    Product {
        #[command(subcommand)]
        command: ProductCommand,
    },
    /// Manage categories.
    Category {
        #[command(subcommand)]
        command: CategoryCommand,
    },
    /// Triage contact-form inquiries.
    Inquiry {
        #[command(subcommand)]
        command: InquiryCommand,
    },
    /// Manage blog posts.
    Blog {
        #[command(subcommand)]
        command: AdminBlogCommand,
    },
    /// Product and view statistics.
    Stats,
    /// Dashboard overview.
    Dashboard,
    /// Recompute category product counts.
    RefreshCounts,
}

/// Optional product fields shared by `add` and `update`.
#[derive(Args, Default)]
pub struct ProductDetails {
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub full_description: Option<String>,
    #[arg(long)]
    pub price: Option<String>,
    #[arg(long)]
    pub warranty: Option<String>,
    /// Image URL; repeat for more. The first is the primary image.
    #[arg(long = "image")]
    pub images: Vec<String>,
    /// Comma-separated tags.
    #[arg(long)]
    pub tags: Option<String>,
    /// Specification row as `KEY=VALUE`; repeat for more.
    #[arg(long = "spec")]
    pub specs: Vec<String>,
    #[arg(long)]
    pub featured: Option<bool>,
}

#[derive(Subcommand)]
pub enum ProductCommand {
    /// List products for the admin table.
    List {
        #[arg(long, default_value = "all")]
        category: String,
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Create a product.
    Add {
        #[arg(long)]
        name: String,
        /// Category slug.
        #[arg(long)]
        category: String,
        #[command(flatten)]
        details: ProductDetails,
    },
    /// Update a product by id or slug.
    Update {
        key: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[command(flatten)]
        details: ProductDetails,
    },
    /// Delete a product by id or slug.
    Delete { key: String },
    /// List recorded product views, newest first.
    Views {
        #[arg(short, long)]
        limit: Option<u32>,
    },
}

#[derive(Subcommand)]
pub enum CategoryCommand {
    List {
        #[arg(short, long)]
        search: Option<String>,
    },
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        image: String,
    },
    /// Update a category by id or slug.
    Update {
        key: String,
        #[arg(long)]
        name: Option<String>,
        /// New slug; products in the category follow it.
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        image: Option<String>,
    },
    /// Delete a category by id or slug. Its products are kept.
    Delete { key: String },
}

#[derive(Subcommand)]
pub enum InquiryCommand {
    List {
        /// `all`, `new`, `replied`, `in-progress` or `archived`.
        #[arg(long, default_value = "all")]
        status: String,
        /// Match name, email, company or product.
        #[arg(short, long)]
        search: Option<String>,
    },
    Show { id: Uuid },
    /// Mark as replied now.
    Reply { id: Uuid },
    Status { id: Uuid, status: String },
    Priority { id: Uuid, priority: String },
    Archive { id: Uuid },
    Delete { id: Uuid },
    /// Counts per status.
    Summary,
}

#[derive(Subcommand)]
pub enum AdminBlogCommand {
    List {
        #[arg(long, default_value = "all")]
        category: String,
        #[arg(short, long)]
        search: Option<String>,
    },
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        excerpt: String,
        #[arg(long, default_value = "")]
        content: String,
        #[arg(long, default_value = "")]
        author: String,
        #[arg(long, default_value = "")]
        category: String,
        /// Comma-separated tags.
        #[arg(long, default_value = "")]
        tags: String,
        #[arg(long, default_value = "")]
        image: String,
    },
    /// Update a post by id or slug.
    Update {
        key: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        excerpt: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        tags: Option<String>,
        #[arg(long)]
        image: Option<String>,
    },
    /// Delete a post by id or slug.
    Delete { key: String },
    /// Insert the sample posts into an empty blog.
    Seed,
}

/// Looks a product up by id, falling back to slug.
pub fn find_product(catalog: &SqliteCatalogService<'_>, key: &str) -> Result<Product> {
    match Uuid::parse_str(key) {
        Ok(id) => Ok(catalog.product(id)?),
        Err(_) => Ok(catalog.require_product(key)?),
    }
}

/// Looks a category up by id, falling back to slug.
pub fn find_category(catalog: &SqliteCatalogService<'_>, key: &str) -> Result<Category> {
    if let Ok(id) = Uuid::parse_str(key) {
        if let Some(category) = catalog
            .categories()?
            .into_iter()
            .find(|category| category.id == id)
        {
            return Ok(category);
        }
        bail!("category not found: {key}");
    }
    Ok(catalog.require_category(key)?)
}

/// Parses repeated `KEY=VALUE` specification rows.
pub fn parse_specs(rows: &[String]) -> Result<BTreeMap<String, String>> {
    let mut specs = BTreeMap::new();
    for row in rows {
        let Some((key, value)) = row.split_once('=') else {
            bail!("specification `{row}` must look like KEY=VALUE");
        };
        let key = key.trim();
        if key.is_empty() {
            bail!("specification `{row}` has an empty key");
        }
        specs.insert(key.to_string(), value.trim().to_string());
    }
    Ok(specs)
}

pub fn product_line(product: &Product) -> String {
    let featured = if product.featured { " *featured*" } else { "" };
    format!(
        "{} | {} | {} | {} | views={}{}",
        product.slug, product.name, product.category, product.price, product.view_count, featured
    )
}

pub fn category_line(category: &Category) -> String {
    format!(
        "{} | {} | {} products",
        category.slug, category.name, category.product_count
    )
}

pub fn inquiry_line(inquiry: &Inquiry) -> String {
    format!(
        "{} | {} | {} <{}> | {} | {} | {}",
        inquiry.id,
        format_timestamp(inquiry.date),
        inquiry.name,
        inquiry.email,
        inquiry.department.as_str(),
        inquiry.status.as_str(),
        inquiry.priority.as_str()
    )
}

pub fn blog_line(post: &BlogPost) -> String {
    format!(
        "{} | {} | {} | {} | {} min read",
        format_timestamp(post.date),
        post.slug,
        post.title,
        post.author,
        post.read_time
    )
}

#[cfg(test)]
mod tests {
    use super::parse_specs;

    #[test]
    fn specs_parse_key_value_rows() {
        let specs = parse_specs(&[
            "Working Area=300x200mm".to_string(),
            " Spindle Power = 800W ".to_string(),
        ])
        .unwrap();
        assert_eq!(specs["Working Area"], "300x200mm");
        assert_eq!(specs["Spindle Power"], "800W");
    }

    #[test]
    fn specs_reject_rows_without_separator() {
        assert!(parse_specs(&["Working Area".to_string()]).is_err());
        assert!(parse_specs(&["=800W".to_string()]).is_err());
    }
}
