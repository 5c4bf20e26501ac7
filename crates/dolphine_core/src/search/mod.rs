//! In-process text and scope filters for storefront listings.
//!
//! # Responsibility
//! - Match shopper and admin search text against loaded records.
//! - Parse the `all`-or-value scope selectors used by listing screens.
//!
//! # Invariants
//! - Matching is a case-insensitive substring test.
//! - Blank query text matches every record.

pub mod filter;
