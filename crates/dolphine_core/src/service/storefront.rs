//! One storefront file plus the settings the services need.
//!
//! # Responsibility
//! - Own the SQLite connection for a storefront file.
//! - Hand out SQLite-backed services borrowing that connection.
//! - Compose use-cases that span services, such as viewing a product page.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::model::recent_view::RecentView;
use crate::repo::blog_repo::SqliteBlogPostRepository;
use crate::repo::cart_repo::SqliteCartRepository;
use crate::repo::category_repo::SqliteCategoryRepository;
use crate::repo::inquiry_repo::SqliteInquiryRepository;
use crate::repo::product_repo::SqliteProductRepository;
use crate::repo::recent_view_repo::SqliteRecentViewRepository;
use crate::repo::RepoResult;
use crate::service::blog_service::BlogService;
use crate::service::cart_service::{CartResult, CartService};
use crate::service::catalog_service::{
    CatalogResult, CatalogService, CatalogServiceError, ProductPage, Viewer,
};
use crate::service::dashboard::{build_dashboard, Dashboard, DashboardError};
use crate::service::inquiry_service::{InquiryService, InquiryServiceError};
use crate::service::quote::{QuoteChannel, QuoteLink, QuoteSettings, QuoteStyle};
use crate::service::recent_view_service::RecentViewService;
use rusqlite::Connection;
use std::path::Path;

pub const DEFAULT_VISITOR: &str = "local";
pub const DEFAULT_USER_AGENT: &str = "dolphine-cli";

pub type SqliteCatalogService<'conn> =
    CatalogService<SqliteProductRepository<'conn>, SqliteCategoryRepository<'conn>>;
pub type SqliteCartService<'conn> = CartService<SqliteCartRepository<'conn>>;
pub type SqliteInquiryService<'conn> = InquiryService<SqliteInquiryRepository<'conn>>;
pub type SqliteBlogService<'conn> = BlogService<SqliteBlogPostRepository<'conn>>;
pub type SqliteRecentViewService<'conn> = RecentViewService<SqliteRecentViewRepository<'conn>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontSettings {
    pub quote: QuoteSettings,
    /// Key under which recent views are stored.
    pub visitor: String,
    /// Recorded with every product view.
    pub user_agent: String,
}

impl Default for StorefrontSettings {
    fn default() -> Self {
        Self {
            quote: QuoteSettings::default(),
            visitor: DEFAULT_VISITOR.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

pub struct Storefront {
    conn: Connection,
    settings: StorefrontSettings,
}

impl Storefront {
    /// Opens (creating and migrating if needed) the storefront file at `path`.
    pub fn open(path: impl AsRef<Path>, settings: StorefrontSettings) -> DbResult<Self> {
        Ok(Self::from_connection(open_db(path)?, settings))
    }

    pub fn open_in_memory(settings: StorefrontSettings) -> DbResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?, settings))
    }

    /// Wraps an already migrated connection.
    pub fn from_connection(conn: Connection, settings: StorefrontSettings) -> Self {
        Self { conn, settings }
    }

    pub fn settings(&self) -> &StorefrontSettings {
        &self.settings
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn catalog(&self) -> RepoResult<SqliteCatalogService<'_>> {
        Ok(CatalogService::new(
            SqliteProductRepository::try_new(&self.conn)?,
            SqliteCategoryRepository::try_new(&self.conn)?,
        ))
    }

    pub fn cart(&self) -> RepoResult<SqliteCartService<'_>> {
        Ok(CartService::new(SqliteCartRepository::try_new(&self.conn)?))
    }

    pub fn inquiries(&self) -> RepoResult<SqliteInquiryService<'_>> {
        Ok(InquiryService::new(SqliteInquiryRepository::try_new(
            &self.conn,
        )?))
    }

    pub fn blog(&self) -> RepoResult<SqliteBlogService<'_>> {
        Ok(BlogService::new(SqliteBlogPostRepository::try_new(
            &self.conn,
        )?))
    }

    pub fn recent_views(&self) -> RepoResult<SqliteRecentViewService<'_>> {
        Ok(RecentViewService::new(SqliteRecentViewRepository::try_new(
            &self.conn,
        )?))
    }

    /// Opens a product page as the configured visitor.
    pub fn view_product(&self, slug: &str) -> CatalogResult<ProductPage> {
        let viewer = Viewer {
            visitor: self.settings.visitor.clone(),
            user_agent: self.settings.user_agent.clone(),
        };
        self.catalog()?.view_product(slug, &viewer, &self.recent_views()?)
    }

    /// The configured visitor's recently viewed products.
    pub fn recently_viewed(&self) -> RepoResult<Vec<RecentView>> {
        self.recent_views()?.list(&self.settings.visitor)
    }

    pub fn clear_recently_viewed(&self) -> RepoResult<usize> {
        self.recent_views()?.clear(&self.settings.visitor)
    }

    /// Quote link for the current cart using the configured targets.
    pub fn quote_link(&self, channel: QuoteChannel, style: QuoteStyle) -> CartResult<QuoteLink> {
        self.cart()?.quote_link(&self.settings.quote, channel, style)
    }

    pub fn dashboard(&self) -> Result<Dashboard, DashboardError> {
        let catalog = self.catalog().map_err(CatalogServiceError::from)?;
        let inquiries = self.inquiries().map_err(InquiryServiceError::from)?;
        build_dashboard(&catalog, &inquiries)
    }
}
