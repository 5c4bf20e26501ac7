//! Storefront use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into shopper and admin use-cases.
//! - Emit the storefront's `event=... module=... status=...` log lines.
//! - Keep the CLI decoupled from SQL and storage details.

pub mod blog_service;
pub mod cart_service;
pub mod catalog_service;
pub mod dashboard;
pub mod inquiry_service;
pub mod quote;
pub mod recent_view_service;
pub mod storefront;
