//! Product repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist products with JSON-encoded list and map columns.
//! - Record product views and expose view statistics inputs.
//!
//! # Invariants
//! - Every product write refreshes category counts in the same transaction.
//! - `view_count` is only modified by [`ProductRepository::record_view`].

use crate::model::now_epoch_ms;
use crate::model::product::{NewProduct, Product, ProductId, ProductPatch, ProductView};
use crate::repo::category_repo::refresh_category_counts;
use crate::repo::{
    allocate_slug, bool_to_int, claim_slug, ensure_connection_ready, from_json_column,
    int_to_bool, parse_uuid, to_json_column, RepoError, RepoResult,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use uuid::Uuid;

const ENTITY: &str = "product";

const PRODUCT_SELECT_SQL: &str = "SELECT
    id,
    name,
    slug,
    description,
    full_description,
    specifications,
    warranty,
    price,
    images,
    category,
    featured,
    tags,
    view_count,
    created_at,
    updated_at
FROM products";

/// Sort order for product listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductOrder {
    /// Oldest first.
    #[default]
    Created,
    /// Highest `view_count` first, ties in creation order.
    MostViewed,
}

/// Product list query. Every filter is optional and combined with `AND`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductListQuery {
    /// Exact category slug.
    pub category: Option<String>,
    pub featured_only: bool,
    pub exclude_id: Option<ProductId>,
    pub order: ProductOrder,
    pub limit: Option<u32>,
}

impl ProductListQuery {
    /// Every product in creation order.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn in_category(slug: impl Into<String>) -> Self {
        Self {
            category: Some(slug.into()),
            ..Self::default()
        }
    }
}

/// Repository interface for product persistence and view tracking.
pub trait ProductRepository {
    fn list_products(&self, query: &ProductListQuery) -> RepoResult<Vec<Product>>;
    fn get_product(&self, id: ProductId) -> RepoResult<Option<Product>>;
    fn get_product_by_slug(&self, slug: &str) -> RepoResult<Option<Product>>;
    fn create_product(&self, draft: &NewProduct) -> RepoResult<Product>;
    fn update_product(&self, id: ProductId, patch: &ProductPatch) -> RepoResult<Product>;
    /// Deletes by id. Returns `false` when nothing was deleted.
    fn delete_product(&self, id: ProductId) -> RepoResult<bool>;
    /// Increments `view_count` and appends a [`ProductView`].
    ///
    /// Returns `false` without writing anything when the product is unknown.
    fn record_view(&self, id: ProductId, user_agent: &str, at: i64) -> RepoResult<bool>;
    /// Lists views newest first.
    fn list_views(&self, limit: Option<u32>) -> RepoResult<Vec<ProductView>>;
    /// Sum of `view_count` over all products.
    fn total_views(&self) -> RepoResult<i64>;
    fn count_products(&self) -> RepoResult<i64>;
}

/// SQLite-backed product repository.
pub struct SqliteProductRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProductRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["products", "categories", "product_views"])?;
        Ok(Self { conn })
    }
}

impl ProductRepository for SqliteProductRepository<'_> {
    fn list_products(&self, query: &ProductListQuery) -> RepoResult<Vec<Product>> {
        let mut sql = format!("{PRODUCT_SELECT_SQL} WHERE 1 = 1");
        let mut values: Vec<Value> = Vec::new();

        if let Some(category) = &query.category {
            values.push(Value::Text(category.clone()));
            sql.push_str(&format!(" AND category = ?{}", values.len()));
        }
        if query.featured_only {
            sql.push_str(" AND featured = 1");
        }
        if let Some(exclude_id) = query.exclude_id {
            values.push(Value::Text(exclude_id.to_string()));
            sql.push_str(&format!(" AND id != ?{}", values.len()));
        }

        match query.order {
            ProductOrder::Created => sql.push_str(" ORDER BY created_at ASC, rowid ASC"),
            ProductOrder::MostViewed => {
                sql.push_str(" ORDER BY view_count DESC, created_at ASC, rowid ASC")
            }
        }
        if let Some(limit) = query.limit {
            values.push(Value::Integer(i64::from(limit)));
            sql.push_str(&format!(" LIMIT ?{}", values.len()));
        }
        sql.push(';');

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(values))?;
        let mut products = Vec::new();
        while let Some(row) = rows.next()? {
            products.push(parse_product_row(row)?);
        }
        Ok(products)
    }

    fn get_product(&self, id: ProductId) -> RepoResult<Option<Product>> {
        select_product(self.conn, "id", &id.to_string())
    }

    fn get_product_by_slug(&self, slug: &str) -> RepoResult<Option<Product>> {
        select_product(self.conn, "slug", slug)
    }

    fn create_product(&self, draft: &NewProduct) -> RepoResult<Product> {
        draft.validate()?;

        let tx = self.conn.unchecked_transaction()?;
        let now = now_epoch_ms();
        let product = Product {
            id: Uuid::new_v4(),
            name: draft.name.trim().to_string(),
            slug: allocate_slug(&tx, "products", &draft.name)?,
            description: draft.description.clone(),
            full_description: draft.full_description.clone(),
            specifications: draft.specifications.clone(),
            warranty: draft.warranty.clone(),
            price: draft.price.clone(),
            images: draft.images.clone(),
            category: draft.category.trim().to_string(),
            featured: draft.featured,
            tags: draft.tags.clone(),
            view_count: 0,
            created_at: now,
            updated_at: now,
        };
        product.validate()?;

        tx.execute(
            "INSERT INTO products (
                id,
                name,
                slug,
                description,
                full_description,
                specifications,
                warranty,
                price,
                images,
                category,
                featured,
                tags,
                view_count,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15);",
            params![
                product.id.to_string(),
                product.name.as_str(),
                product.slug.as_str(),
                product.description.as_str(),
                product.full_description.as_str(),
                to_json_column(&product.specifications, "products.specifications")?,
                product.warranty.as_str(),
                product.price.as_str(),
                to_json_column(&product.images, "products.images")?,
                product.category.as_str(),
                bool_to_int(product.featured),
                to_json_column(&product.tags, "products.tags")?,
                product.view_count,
                product.created_at,
                product.updated_at,
            ],
        )?;
        refresh_category_counts(&tx)?;
        tx.commit()?;
        Ok(product)
    }

    fn update_product(&self, id: ProductId, patch: &ProductPatch) -> RepoResult<Product> {
        let tx = self.conn.unchecked_transaction()?;
        let mut product = select_product(&tx, "id", &id.to_string())?
            .ok_or(RepoError::NotFound { entity: ENTITY, id })?;

        let claimed_slug = match patch.slug.as_deref() {
            Some(requested) => Some(claim_slug(&tx, ENTITY, "products", requested, id)?),
            None => None,
        };

        patch.apply(&mut product);
        if let Some(slug) = claimed_slug {
            product.slug = slug;
        }
        product.name = product.name.trim().to_string();
        product.category = product.category.trim().to_string();
        product.updated_at = now_epoch_ms();
        product.validate()?;

        tx.execute(
            "UPDATE products
             SET
                name = ?2,
                slug = ?3,
                description = ?4,
                full_description = ?5,
                specifications = ?6,
                warranty = ?7,
                price = ?8,
                images = ?9,
                category = ?10,
                featured = ?11,
                tags = ?12,
                updated_at = ?13
             WHERE id = ?1;",
            params![
                id.to_string(),
                product.name.as_str(),
                product.slug.as_str(),
                product.description.as_str(),
                product.full_description.as_str(),
                to_json_column(&product.specifications, "products.specifications")?,
                product.warranty.as_str(),
                product.price.as_str(),
                to_json_column(&product.images, "products.images")?,
                product.category.as_str(),
                bool_to_int(product.featured),
                to_json_column(&product.tags, "products.tags")?,
                product.updated_at,
            ],
        )?;
        refresh_category_counts(&tx)?;
        tx.commit()?;
        Ok(product)
    }

    fn delete_product(&self, id: ProductId) -> RepoResult<bool> {
        let tx = self.conn.unchecked_transaction()?;
        let changed = tx.execute("DELETE FROM products WHERE id = ?1;", [id.to_string()])?;
        refresh_category_counts(&tx)?;
        tx.commit()?;
        Ok(changed > 0)
    }

    fn record_view(&self, id: ProductId, user_agent: &str, at: i64) -> RepoResult<bool> {
        let tx = self.conn.unchecked_transaction()?;
        let changed = tx.execute(
            "UPDATE products SET view_count = view_count + 1 WHERE id = ?1;",
            [id.to_string()],
        )?;
        if changed == 0 {
            return Ok(false);
        }

        tx.execute(
            "INSERT INTO product_views (product_id, timestamp, user_agent)
             VALUES (?1, ?2, ?3);",
            params![id.to_string(), at, user_agent],
        )?;
        refresh_category_counts(&tx)?;
        tx.commit()?;
        Ok(true)
    }

    fn list_views(&self, limit: Option<u32>) -> RepoResult<Vec<ProductView>> {
        // SQLite treats a negative LIMIT as "no limit".
        let limit = limit.map_or(-1, i64::from);
        let mut stmt = self.conn.prepare(
            "SELECT product_id, timestamp, user_agent
             FROM product_views
             ORDER BY timestamp DESC, id DESC
             LIMIT ?1;",
        )?;
        let mut rows = stmt.query([limit])?;
        let mut views = Vec::new();
        while let Some(row) = rows.next()? {
            let product_id: String = row.get("product_id")?;
            views.push(ProductView {
                product_id: parse_uuid(&product_id, "product_views.product_id")?,
                timestamp: row.get("timestamp")?,
                user_agent: row.get("user_agent")?,
            });
        }
        Ok(views)
    }

    fn total_views(&self) -> RepoResult<i64> {
        let total = self.conn.query_row(
            "SELECT COALESCE(SUM(view_count), 0) FROM products;",
            [],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    fn count_products(&self) -> RepoResult<i64> {
        let total = self
            .conn
            .query_row("SELECT COUNT(*) FROM products;", [], |row| row.get(0))?;
        Ok(total)
    }
}

fn select_product(conn: &Connection, column: &str, value: &str) -> RepoResult<Option<Product>> {
    let mut stmt = conn.prepare(&format!("{PRODUCT_SELECT_SQL} WHERE {column} = ?1;"))?;
    let mut rows = stmt.query([value])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_product_row(row)?));
    }
    Ok(None)
}

fn parse_product_row(row: &Row<'_>) -> RepoResult<Product> {
    let id_text: String = row.get("id")?;
    let specifications: String = row.get("specifications")?;
    let images: String = row.get("images")?;
    let tags: String = row.get("tags")?;
    let featured: i64 = row.get("featured")?;

    Ok(Product {
        id: parse_uuid(&id_text, "products.id")?,
        name: row.get("name")?,
        slug: row.get("slug")?,
        description: row.get("description")?,
        full_description: row.get("full_description")?,
        specifications: from_json_column(&specifications, "products.specifications")?,
        warranty: row.get("warranty")?,
        price: row.get("price")?,
        images: from_json_column(&images, "products.images")?,
        category: row.get("category")?,
        featured: int_to_bool(featured, "products.featured")?,
        tags: from_json_column(&tags, "products.tags")?,
        view_count: row.get("view_count")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
