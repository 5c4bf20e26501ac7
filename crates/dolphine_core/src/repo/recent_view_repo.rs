//! Recently viewed products, per visitor.
//!
//! # Invariants
//! - One row per `(visitor, product_id)`; recording again moves it to the
//!   front.
//! - After `record`, a visitor keeps at most `keep` rows.

use crate::model::product::ProductId;
use crate::model::recent_view::RecentView;
use crate::repo::{ensure_connection_ready, parse_uuid, RepoResult};
use rusqlite::{params, Connection, Row};

pub trait RecentViewRepository {
    /// Stores `view` as the visitor's newest entry and trims the visitor's
    /// list to `keep` rows.
    fn record(&self, view: &RecentView, keep: u32) -> RepoResult<()>;
    /// Lists a visitor's entries newest first.
    fn list(&self, visitor: &str) -> RepoResult<Vec<RecentView>>;
    /// Deletes entries with `viewed_at <= cutoff`.
    fn prune_expired(&self, visitor: &str, cutoff: i64) -> RepoResult<usize>;
    fn remove(&self, visitor: &str, product_id: ProductId) -> RepoResult<bool>;
    fn clear(&self, visitor: &str) -> RepoResult<usize>;
}

pub struct SqliteRecentViewRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRecentViewRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["recent_views", "products"])?;
        Ok(Self { conn })
    }
}

impl RecentViewRepository for SqliteRecentViewRepository<'_> {
    fn record(&self, view: &RecentView, keep: u32) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        let product_id = view.product_id.to_string();

        tx.execute(
            "DELETE FROM recent_views WHERE visitor = ?1 AND product_id = ?2;",
            params![view.visitor.as_str(), product_id.as_str()],
        )?;
        tx.execute(
            "INSERT INTO recent_views (
                visitor,
                product_id,
                name,
                slug,
                image,
                price,
                category,
                viewed_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                view.visitor.as_str(),
                product_id.as_str(),
                view.name.as_str(),
                view.slug.as_str(),
                view.image.as_deref(),
                view.price.as_str(),
                view.category.as_str(),
                view.viewed_at,
            ],
        )?;
        tx.execute(
            "DELETE FROM recent_views
             WHERE visitor = ?1
               AND rowid NOT IN (
                    SELECT rowid FROM recent_views
                    WHERE visitor = ?1
                    ORDER BY viewed_at DESC, rowid DESC
                    LIMIT ?2
               );",
            params![view.visitor.as_str(), i64::from(keep)],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn list(&self, visitor: &str) -> RepoResult<Vec<RecentView>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                visitor,
                product_id,
                name,
                slug,
                image,
                price,
                category,
                viewed_at
             FROM recent_views
             WHERE visitor = ?1
             ORDER BY viewed_at DESC, rowid DESC;",
        )?;
        let mut rows = stmt.query([visitor])?;
        let mut views = Vec::new();
        while let Some(row) = rows.next()? {
            views.push(parse_recent_view_row(row)?);
        }
        Ok(views)
    }

    fn prune_expired(&self, visitor: &str, cutoff: i64) -> RepoResult<usize> {
        let changed = self.conn.execute(
            "DELETE FROM recent_views WHERE visitor = ?1 AND viewed_at <= ?2;",
            params![visitor, cutoff],
        )?;
        Ok(changed)
    }

    fn remove(&self, visitor: &str, product_id: ProductId) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "DELETE FROM recent_views WHERE visitor = ?1 AND product_id = ?2;",
            params![visitor, product_id.to_string()],
        )?;
        Ok(changed > 0)
    }

    fn clear(&self, visitor: &str) -> RepoResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM recent_views WHERE visitor = ?1;", [visitor])?;
        Ok(changed)
    }
}

fn parse_recent_view_row(row: &Row<'_>) -> RepoResult<RecentView> {
    let product_id: String = row.get("product_id")?;
    Ok(RecentView {
        visitor: row.get("visitor")?,
        product_id: parse_uuid(&product_id, "recent_views.product_id")?,
        name: row.get("name")?,
        slug: row.get("slug")?,
        image: row.get("image")?,
        price: row.get("price")?,
        category: row.get("category")?,
        viewed_at: row.get("viewed_at")?,
    })
}
