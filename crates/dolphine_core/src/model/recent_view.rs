//! Per-visitor "recently viewed" entries.
//!
//! # Invariants
//! - At most [`MAX_RECENT_VIEWS`] entries per visitor, one per product.
//! - Entries older than [`RECENT_VIEW_TTL_MS`] are never returned.

use crate::model::product::{Product, ProductId};
use serde::{Deserialize, Serialize};

pub const MAX_RECENT_VIEWS: u32 = 10;
/// Seven days.
pub const RECENT_VIEW_TTL_MS: i64 = 7 * 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentView {
    pub visitor: String,
    pub product_id: ProductId,
    pub name: String,
    pub slug: String,
    pub image: Option<String>,
    pub price: String,
    pub category: String,
    pub viewed_at: i64,
}

impl RecentView {
    pub fn from_product(visitor: impl Into<String>, product: &Product, viewed_at: i64) -> Self {
        Self {
            visitor: visitor.into(),
            product_id: product.id,
            name: product.name.clone(),
            slug: product.slug.clone(),
            image: product.primary_image().map(str::to_string),
            price: product.price.clone(),
            category: product.category.clone(),
            viewed_at,
        }
    }
}

/// Entries with `viewed_at <= expiry_cutoff(now)` are expired at `now`.
pub fn expiry_cutoff(now: i64) -> i64 {
    now - RECENT_VIEW_TTL_MS
}
