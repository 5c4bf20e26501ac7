//! Core domain logic for the Dolphine catalog storefront.
//! This crate is the single source of truth for catalog, cart, quote and
//! inquiry rules; front ends only render what it returns.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::blog_post::{BlogPost, BlogPostId, BlogPostPatch, NewBlogPost};
pub use model::cart::{Cart, CartItem, MAX_QUANTITY_PER_ITEM};
pub use model::category::{Category, CategoryId, CategoryPatch, NewCategory};
pub use model::inquiry::{
    Department, Inquiry, InquiryId, InquiryPatch, InquiryStatus, NewInquiry, Priority,
};
pub use model::product::{
    NewProduct, Product, ProductId, ProductPatch, ProductStats, ProductView,
};
pub use model::recent_view::RecentView;
pub use model::text::{generate_slug, parse_tag_list};
pub use model::validation::ValidationError;
pub use repo::{RepoError, RepoResult};
pub use service::blog_service::BlogServiceError;
pub use service::cart_service::CartError;
pub use service::catalog_service::{CatalogPage, CatalogQuery, CatalogServiceError, ProductPage};
pub use service::dashboard::{Dashboard, DashboardError};
pub use service::inquiry_service::{InquiryServiceError, InquirySummary};
pub use service::quote::{QuoteChannel, QuoteLink, QuoteSettings, QuoteStyle};
pub use service::storefront::{Storefront, StorefrontSettings};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
