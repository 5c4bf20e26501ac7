//! Quote cart persistence.
//!
//! One cart per store file. Lines are keyed by product id and disappear with
//! their product through `ON DELETE CASCADE`.

use crate::model::cart::{validate_quantity, CartItem};
use crate::model::product::ProductId;
use crate::repo::{ensure_connection_ready, parse_uuid, RepoResult};
use rusqlite::{params, Connection, Row};

const CART_SELECT_SQL: &str = "SELECT
    product_id,
    name,
    slug,
    image,
    price,
    category,
    quantity,
    added_at
FROM cart_items";

pub trait CartRepository {
    /// Lists lines in insertion order.
    fn list_items(&self) -> RepoResult<Vec<CartItem>>;
    fn get_item(&self, product_id: ProductId) -> RepoResult<Option<CartItem>>;
    /// Inserts or replaces the line for `item.product_id`, keeping the
    /// original `added_at` of an existing line.
    fn upsert_item(&self, item: &CartItem) -> RepoResult<()>;
    fn remove_item(&self, product_id: ProductId) -> RepoResult<bool>;
    /// Removes every line; returns how many were removed.
    fn clear(&self) -> RepoResult<usize>;
}

pub struct SqliteCartRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCartRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["cart_items", "products"])?;
        Ok(Self { conn })
    }
}

impl CartRepository for SqliteCartRepository<'_> {
    fn list_items(&self) -> RepoResult<Vec<CartItem>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CART_SELECT_SQL} ORDER BY added_at ASC, rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_cart_row(row)?);
        }
        Ok(items)
    }

    fn get_item(&self, product_id: ProductId) -> RepoResult<Option<CartItem>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CART_SELECT_SQL} WHERE product_id = ?1;"))?;
        let mut rows = stmt.query([product_id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_cart_row(row)?));
        }
        Ok(None)
    }

    fn upsert_item(&self, item: &CartItem) -> RepoResult<()> {
        validate_quantity(item.quantity)?;
        self.conn.execute(
            "INSERT INTO cart_items (
                product_id,
                name,
                slug,
                image,
                price,
                category,
                quantity,
                added_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(product_id) DO UPDATE SET
                name = excluded.name,
                slug = excluded.slug,
                image = excluded.image,
                price = excluded.price,
                category = excluded.category,
                quantity = excluded.quantity;",
            params![
                item.product_id.to_string(),
                item.name.as_str(),
                item.slug.as_str(),
                item.image.as_deref(),
                item.price.as_str(),
                item.category.as_str(),
                item.quantity,
                item.added_at,
            ],
        )?;
        Ok(())
    }

    fn remove_item(&self, product_id: ProductId) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "DELETE FROM cart_items WHERE product_id = ?1;",
            [product_id.to_string()],
        )?;
        Ok(changed > 0)
    }

    fn clear(&self) -> RepoResult<usize> {
        let changed = self.conn.execute("DELETE FROM cart_items;", [])?;
        Ok(changed)
    }
}

fn parse_cart_row(row: &Row<'_>) -> RepoResult<CartItem> {
    let product_id: String = row.get("product_id")?;
    Ok(CartItem {
        product_id: parse_uuid(&product_id, "cart_items.product_id")?,
        name: row.get("name")?,
        slug: row.get("slug")?,
        image: row.get("image")?,
        price: row.get("price")?,
        category: row.get("category")?,
        quantity: row.get("quantity")?,
        added_at: row.get("added_at")?,
    })
}
