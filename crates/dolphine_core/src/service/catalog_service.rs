//! Catalog use-case service.
//!
//! # Responsibility
//! - Serve shopper browsing: category pages, product pages, related and
//!   featured products.
//! - Serve admin CRUD over products and categories plus view statistics.
//!
//! # Invariants
//! - A product can only be created in, or moved to, an existing category.
//! - Browsing an unknown category slug fails instead of returning nothing.

use crate::model::category::{Category, CategoryId, CategoryPatch, NewCategory};
use crate::model::now_epoch_ms;
use crate::model::product::{
    NewProduct, Product, ProductId, ProductPatch, ProductStats, ProductView,
};
use crate::repo::category_repo::CategoryRepository;
use crate::repo::product_repo::{ProductListQuery, ProductOrder, ProductRepository};
use crate::repo::recent_view_repo::RecentViewRepository;
use crate::repo::RepoError;
use crate::search::filter::{
    filter_categories, filter_products, product_matches_text, ProductFilter, Scope, TextQuery,
};
use crate::service::recent_view_service::RecentViewService;
use log::info;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Products shown under "related products" on a product page.
pub const RELATED_PRODUCTS_LIMIT: u32 = 3;
/// Entries in the "top products" statistic.
pub const TOP_PRODUCTS_LIMIT: u32 = 5;
/// Entries in the "recent views" statistic.
pub const RECENT_PRODUCT_VIEWS_LIMIT: u32 = 10;

pub const ALL_CATEGORIES_TITLE: &str = "All Categories";
pub const ALL_CATEGORIES_DESCRIPTION: &str =
    "Browse our complete collection of wood processing machinery and equipment";

/// Service error for catalog use-cases.
#[derive(Debug)]
pub enum CatalogServiceError {
    /// No category with this slug or id.
    CategoryNotFound(String),
    /// No product with this slug or id.
    ProductNotFound(String),
    Repo(RepoError),
}

impl Display for CatalogServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CategoryNotFound(key) => write!(f, "category not found: {key}"),
            Self::ProductNotFound(key) => write!(f, "product not found: {key}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CatalogServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for CatalogServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound {
                entity: "product",
                id,
            } => Self::ProductNotFound(id.to_string()),
            RepoError::NotFound {
                entity: "category",
                id,
            } => Self::CategoryNotFound(id.to_string()),
            other => Self::Repo(other),
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogServiceError>;

/// Shopper catalog query: a category scope plus optional search text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub category: Scope,
    pub text: TextQuery,
}

impl CatalogQuery {
    pub fn new(category: Option<&str>, search: Option<&str>) -> Self {
        Self {
            category: Scope::from_option(category),
            text: TextQuery::from_option(search),
        }
    }
}

/// One rendered category page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogPage {
    pub title: String,
    pub description: String,
    /// `None` on the "all categories" page.
    pub category: Option<Category>,
    pub products: Vec<Product>,
}

/// One rendered product detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPage {
    pub product: Product,
    /// `None` when the product's category slug dangles.
    pub category: Option<Category>,
    pub related: Vec<Product>,
}

/// Who is looking at a product page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub visitor: String,
    pub user_agent: String,
}

/// Catalog service facade over product and category repositories.
pub struct CatalogService<P: ProductRepository, C: CategoryRepository> {
    products: P,
    categories: C,
}

impl<P: ProductRepository, C: CategoryRepository> CatalogService<P, C> {
    pub fn new(products: P, categories: C) -> Self {
        Self {
            products,
            categories,
        }
    }

    /// Lists one category page, or every product for the `all` scope.
    pub fn browse(&self, query: &CatalogQuery) -> CatalogResult<CatalogPage> {
        let (title, description, category, listing) = match &query.category {
            Scope::All => (
                ALL_CATEGORIES_TITLE.to_string(),
                ALL_CATEGORIES_DESCRIPTION.to_string(),
                None,
                ProductListQuery::all(),
            ),
            Scope::Only(slug) => {
                let category = self.require_category(slug)?;
                (
                    category.name.clone(),
                    category.description.clone(),
                    Some(category),
                    ProductListQuery::in_category(slug.as_str()),
                )
            }
        };

        let products = self
            .products
            .list_products(&listing)?
            .into_iter()
            .filter(|product| product_matches_text(&query.text, product))
            .collect();
        Ok(CatalogPage {
            title,
            description,
            category,
            products,
        })
    }

    pub fn featured_products(&self) -> CatalogResult<Vec<Product>> {
        Ok(self.products.list_products(&ProductListQuery {
            featured_only: true,
            ..ProductListQuery::default()
        })?)
    }

    pub fn products_in_category(&self, slug: &str) -> CatalogResult<Vec<Product>> {
        Ok(self
            .products
            .list_products(&ProductListQuery::in_category(slug))?)
    }

    /// Same-category products other than `exclude_id`, oldest first.
    pub fn related_products(
        &self,
        category_slug: &str,
        exclude_id: ProductId,
        limit: u32,
    ) -> CatalogResult<Vec<Product>> {
        Ok(self.products.list_products(&ProductListQuery {
            category: Some(category_slug.to_string()),
            exclude_id: Some(exclude_id),
            limit: Some(limit),
            ..ProductListQuery::default()
        })?)
    }

    pub fn product_by_slug(&self, slug: &str) -> CatalogResult<Option<Product>> {
        Ok(self.products.get_product_by_slug(slug)?)
    }

    pub fn require_product(&self, slug: &str) -> CatalogResult<Product> {
        self.products
            .get_product_by_slug(slug)?
            .ok_or_else(|| CatalogServiceError::ProductNotFound(slug.to_string()))
    }

    /// Opens a product page: counts the view, remembers it for the visitor and
    /// loads the related products.
    pub fn view_product<R: RecentViewRepository>(
        &self,
        slug: &str,
        viewer: &Viewer,
        recent: &RecentViewService<R>,
    ) -> CatalogResult<ProductPage> {
        let product = self.require_product(slug)?;
        self.record_view(product.id, &viewer.user_agent)?;
        recent.record(&viewer.visitor, &product)?;

        // Read back so the page shows the incremented counter.
        let product = self
            .products
            .get_product(product.id)?
            .ok_or_else(|| CatalogServiceError::ProductNotFound(slug.to_string()))?;
        let category = self.categories.get_category_by_slug(&product.category)?;
        let related =
            self.related_products(&product.category, product.id, RELATED_PRODUCTS_LIMIT)?;
        Ok(ProductPage {
            product,
            category,
            related,
        })
    }

    /// Counts one view. Unknown products are ignored and yield `false`.
    pub fn record_view(&self, id: ProductId, user_agent: &str) -> CatalogResult<bool> {
        let recorded = self.products.record_view(id, user_agent, now_epoch_ms())?;
        if recorded {
            info!("event=product_view module=catalog status=ok product_id={id}");
        }
        Ok(recorded)
    }

    pub fn all_products(&self) -> CatalogResult<Vec<Product>> {
        Ok(self.products.list_products(&ProductListQuery::all())?)
    }

    pub fn search_products(&self, filter: &ProductFilter) -> CatalogResult<Vec<Product>> {
        Ok(filter_products(
            self.products.list_products(&ProductListQuery::all())?,
            filter,
        ))
    }

    pub fn product(&self, id: ProductId) -> CatalogResult<Product> {
        self.products
            .get_product(id)?
            .ok_or_else(|| CatalogServiceError::ProductNotFound(id.to_string()))
    }

    pub fn add_product(&self, draft: &NewProduct) -> CatalogResult<Product> {
        self.require_category(draft.category.trim())?;
        let product = self.products.create_product(draft)?;
        info!(
            "event=product_add module=catalog status=ok product_id={} category={}",
            product.id, product.category
        );
        Ok(product)
    }

    pub fn update_product(&self, id: ProductId, patch: &ProductPatch) -> CatalogResult<Product> {
        if let Some(category) = patch.category.as_deref() {
            self.require_category(category.trim())?;
        }
        let product = self.products.update_product(id, patch)?;
        info!(
            "event=product_update module=catalog status=ok product_id={} category={}",
            product.id, product.category
        );
        Ok(product)
    }

    /// Deletes a product; deleting an unknown id succeeds with `false`.
    pub fn delete_product(&self, id: ProductId) -> CatalogResult<bool> {
        let deleted = self.products.delete_product(id)?;
        info!("event=product_delete module=catalog status=ok product_id={id} deleted={deleted}");
        Ok(deleted)
    }

    pub fn product_views(&self, limit: Option<u32>) -> CatalogResult<Vec<ProductView>> {
        Ok(self.products.list_views(limit)?)
    }

    pub fn product_stats(&self) -> CatalogResult<ProductStats> {
        Ok(ProductStats {
            total_products: self.products.count_products()?,
            total_views: self.products.total_views()?,
            top_products: self.products.list_products(&ProductListQuery {
                order: ProductOrder::MostViewed,
                limit: Some(TOP_PRODUCTS_LIMIT),
                ..ProductListQuery::default()
            })?,
            recent_views: self.products.list_views(Some(RECENT_PRODUCT_VIEWS_LIMIT))?,
        })
    }

    pub fn categories(&self) -> CatalogResult<Vec<Category>> {
        Ok(self.categories.list_categories()?)
    }

    pub fn search_categories(&self, text: &TextQuery) -> CatalogResult<Vec<Category>> {
        Ok(filter_categories(self.categories.list_categories()?, text))
    }

    pub fn category_by_slug(&self, slug: &str) -> CatalogResult<Option<Category>> {
        Ok(self.categories.get_category_by_slug(slug)?)
    }

    pub fn require_category(&self, slug: &str) -> CatalogResult<Category> {
        self.categories
            .get_category_by_slug(slug)?
            .ok_or_else(|| CatalogServiceError::CategoryNotFound(slug.to_string()))
    }

    pub fn add_category(&self, draft: &NewCategory) -> CatalogResult<Category> {
        let category = self.categories.create_category(draft)?;
        info!(
            "event=category_add module=catalog status=ok category_id={} slug={} product_count={}",
            category.id, category.slug, category.product_count
        );
        Ok(category)
    }

    pub fn update_category(
        &self,
        id: CategoryId,
        patch: &CategoryPatch,
    ) -> CatalogResult<Category> {
        let category = self.categories.update_category(id, patch)?;
        info!(
            "event=category_update module=catalog status=ok category_id={} slug={} product_count={}",
            category.id, category.slug, category.product_count
        );
        Ok(category)
    }

    /// Deletes a category. Its products keep the dangling slug.
    pub fn delete_category(&self, id: CategoryId) -> CatalogResult<bool> {
        let deleted = self.categories.delete_category(id)?;
        info!("event=category_delete module=catalog status=ok category_id={id} deleted={deleted}");
        Ok(deleted)
    }

    /// Recomputes every category's product count from the product table.
    pub fn refresh_product_counts(&self) -> CatalogResult<usize> {
        let changed = self.categories.refresh_product_counts()?;
        info!("event=product_counts_refresh module=catalog status=ok changed={changed}");
        Ok(changed)
    }
}
