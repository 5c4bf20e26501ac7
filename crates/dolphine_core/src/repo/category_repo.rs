//! Category repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Slugs are allocated from the name on create and stay unique.
//! - Changing a slug moves products that referenced the old slug.
//! - `product_count` is recomputed inside every write transaction.

use crate::model::category::{Category, CategoryId, CategoryPatch, NewCategory};
use crate::model::now_epoch_ms;
use crate::repo::{
    allocate_slug, claim_slug, ensure_connection_ready, parse_uuid, RepoError, RepoResult,
};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const ENTITY: &str = "category";

const CATEGORY_SELECT_SQL: &str = "SELECT
    id,
    name,
    slug,
    description,
    image,
    product_count,
    created_at,
    updated_at
FROM categories";

/// Repository interface for category CRUD.
pub trait CategoryRepository {
    /// Lists categories in creation order.
    fn list_categories(&self) -> RepoResult<Vec<Category>>;
    fn get_category(&self, id: CategoryId) -> RepoResult<Option<Category>>;
    fn get_category_by_slug(&self, slug: &str) -> RepoResult<Option<Category>>;
    fn create_category(&self, draft: &NewCategory) -> RepoResult<Category>;
    fn update_category(&self, id: CategoryId, patch: &CategoryPatch) -> RepoResult<Category>;
    /// Deletes by id. Returns `false` when nothing was deleted.
    fn delete_category(&self, id: CategoryId) -> RepoResult<bool>;
    /// Recomputes every `product_count`; returns the number of rows changed.
    fn refresh_product_counts(&self) -> RepoResult<usize>;
}

/// SQLite-backed category repository.
pub struct SqliteCategoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCategoryRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["categories", "products"])?;
        Ok(Self { conn })
    }
}

impl CategoryRepository for SqliteCategoryRepository<'_> {
    fn list_categories(&self) -> RepoResult<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CATEGORY_SELECT_SQL} ORDER BY created_at ASC, rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next()? {
            categories.push(parse_category_row(row)?);
        }
        Ok(categories)
    }

    fn get_category(&self, id: CategoryId) -> RepoResult<Option<Category>> {
        select_category(self.conn, "id", &id.to_string())
    }

    fn get_category_by_slug(&self, slug: &str) -> RepoResult<Option<Category>> {
        select_category(self.conn, "slug", slug)
    }

    fn create_category(&self, draft: &NewCategory) -> RepoResult<Category> {
        draft.validate()?;

        let tx = self.conn.unchecked_transaction()?;
        let now = now_epoch_ms();
        let category = Category {
            id: Uuid::new_v4(),
            name: draft.name.trim().to_string(),
            slug: allocate_slug(&tx, "categories", &draft.name)?,
            description: draft.description.clone(),
            image: draft.image.clone(),
            product_count: 0,
            created_at: now,
            updated_at: now,
        };
        category.validate()?;

        tx.execute(
            "INSERT INTO categories (
                id,
                name,
                slug,
                description,
                image,
                product_count,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                category.id.to_string(),
                category.name.as_str(),
                category.slug.as_str(),
                category.description.as_str(),
                category.image.as_str(),
                category.product_count,
                category.created_at,
                category.updated_at,
            ],
        )?;
        refresh_category_counts(&tx)?;

        let stored = select_category(&tx, "id", &category.id.to_string())?.ok_or(
            RepoError::NotFound {
                entity: ENTITY,
                id: category.id,
            },
        )?;
        tx.commit()?;
        Ok(stored)
    }

    fn update_category(&self, id: CategoryId, patch: &CategoryPatch) -> RepoResult<Category> {
        let tx = self.conn.unchecked_transaction()?;
        let mut category = select_category(&tx, "id", &id.to_string())?
            .ok_or(RepoError::NotFound { entity: ENTITY, id })?;

        let claimed_slug = match patch.slug.as_deref() {
            Some(requested) => Some(claim_slug(&tx, ENTITY, "categories", requested, id)?),
            None => None,
        };
        let previous_slug = category.slug.clone();

        patch.apply(&mut category);
        if let Some(slug) = claimed_slug {
            category.slug = slug;
        }
        category.name = category.name.trim().to_string();
        category.updated_at = now_epoch_ms();
        category.validate()?;

        tx.execute(
            "UPDATE categories
             SET
                name = ?2,
                slug = ?3,
                description = ?4,
                image = ?5,
                updated_at = ?6
             WHERE id = ?1;",
            params![
                id.to_string(),
                category.name.as_str(),
                category.slug.as_str(),
                category.description.as_str(),
                category.image.as_str(),
                category.updated_at,
            ],
        )?;

        if category.slug != previous_slug {
            tx.execute(
                "UPDATE products SET category = ?1 WHERE category = ?2;",
                params![category.slug.as_str(), previous_slug.as_str()],
            )?;
        }
        refresh_category_counts(&tx)?;

        let stored = select_category(&tx, "id", &id.to_string())?
            .ok_or(RepoError::NotFound { entity: ENTITY, id })?;
        tx.commit()?;
        Ok(stored)
    }

    fn delete_category(&self, id: CategoryId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM categories WHERE id = ?1;", [id.to_string()])?;
        Ok(changed > 0)
    }

    fn refresh_product_counts(&self) -> RepoResult<usize> {
        refresh_category_counts(self.conn)
    }
}

/// Recomputes `categories.product_count` from `products.category`.
///
/// Only rows whose count actually changes are rewritten.
pub(crate) fn refresh_category_counts(conn: &Connection) -> RepoResult<usize> {
    let changed = conn.execute(
        "UPDATE categories
         SET product_count = (
            SELECT COUNT(*) FROM products WHERE products.category = categories.slug
         )
         WHERE product_count != (
            SELECT COUNT(*) FROM products WHERE products.category = categories.slug
         );",
        [],
    )?;
    Ok(changed)
}

fn select_category(conn: &Connection, column: &str, value: &str) -> RepoResult<Option<Category>> {
    let mut stmt = conn.prepare(&format!("{CATEGORY_SELECT_SQL} WHERE {column} = ?1;"))?;
    let mut rows = stmt.query([value])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_category_row(row)?));
    }
    Ok(None)
}

fn parse_category_row(row: &Row<'_>) -> RepoResult<Category> {
    let id_text: String = row.get("id")?;
    Ok(Category {
        id: parse_uuid(&id_text, "categories.id")?,
        name: row.get("name")?,
        slug: row.get("slug")?,
        description: row.get("description")?,
        image: row.get("image")?,
        product_count: row.get("product_count")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
