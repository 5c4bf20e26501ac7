//! Storefront domain model.
//!
//! # Responsibility
//! - Define catalog, inquiry, blog, cart and recent-view records.
//! - Own draft/patch shapes and the validation rules applied before writes.
//!
//! # Invariants
//! - Every persisted record is identified by a stable UUID v4.
//! - Timestamps are Unix epoch milliseconds.
//! - Products reference categories by category slug, not by id.

pub mod blog_post;
pub mod cart;
pub mod category;
pub mod inquiry;
pub mod product;
pub mod recent_view;
pub mod text;
pub mod validation;

use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current wall-clock time in epoch milliseconds.
///
/// Clamps to `0` if the system clock reports a time before the epoch.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
