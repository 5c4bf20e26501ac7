//! Product catalog record plus create/patch shapes.
//!
//! # Invariants
//! - `slug` is unique across products and is only changed by an explicit patch.
//! - `category` holds a category slug; it may dangle after a category delete.
//! - `view_count` only grows, through the product view path.

use crate::model::validation::{require_text, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Stable product identifier.
pub type ProductId = Uuid;

/// Machine listing shown to shoppers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    /// Short listing text.
    pub description: String,
    /// Long text for the product detail view.
    pub full_description: String,
    /// Spec sheet rows, e.g. `"Working Area" -> "300x200mm"`.
    pub specifications: BTreeMap<String, String>,
    pub warranty: String,
    /// Display string; the storefront never does price arithmetic.
    pub price: String,
    /// Image URLs, first one is the primary image.
    pub images: Vec<String>,
    /// Slug of the owning category.
    pub category: String,
    pub featured: bool,
    pub tags: Vec<String>,
    pub view_count: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Product {
    /// Returns the primary image URL when the product has any image.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Checks invariants required before persistence.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("slug", &self.slug)?;
        require_text("category", &self.category)?;
        Ok(())
    }
}

/// Admin input for creating a product. Id, slug, counters and timestamps are
/// generated on insert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub full_description: String,
    pub specifications: BTreeMap<String, String>,
    pub warranty: String,
    pub price: String,
    pub images: Vec<String>,
    pub category: String,
    pub featured: bool,
    pub tags: Vec<String>,
}

impl NewProduct {
    /// Creates a draft with the two required fields set.
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("category", &self.category)?;
        Ok(())
    }
}

/// Partial product update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub full_description: Option<String>,
    pub specifications: Option<BTreeMap<String, String>>,
    pub warranty: Option<String>,
    pub price: Option<String>,
    pub images: Option<Vec<String>>,
    pub category: Option<String>,
    pub featured: Option<bool>,
    pub tags: Option<Vec<String>>,
}

impl ProductPatch {
    /// Returns `true` when the patch carries no field at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merges every present field into `product`.
    ///
    /// Does not touch `id`, `view_count` or timestamps.
    pub fn apply(&self, product: &mut Product) {
        if let Some(value) = &self.name {
            product.name = value.clone();
        }
        if let Some(value) = &self.slug {
            product.slug = value.clone();
        }
        if let Some(value) = &self.description {
            product.description = value.clone();
        }
        if let Some(value) = &self.full_description {
            product.full_description = value.clone();
        }
        if let Some(value) = &self.specifications {
            product.specifications = value.clone();
        }
        if let Some(value) = &self.warranty {
            product.warranty = value.clone();
        }
        if let Some(value) = &self.price {
            product.price = value.clone();
        }
        if let Some(value) = &self.images {
            product.images = value.clone();
        }
        if let Some(value) = &self.category {
            product.category = value.clone();
        }
        if let Some(value) = self.featured {
            product.featured = value;
        }
        if let Some(value) = &self.tags {
            product.tags = value.clone();
        }
    }
}

/// One recorded product detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductView {
    pub product_id: ProductId,
    pub timestamp: i64,
    pub user_agent: String,
}

/// Admin statistics over products and their views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductStats {
    pub total_products: i64,
    pub total_views: i64,
    /// Highest `view_count` first, at most five entries.
    pub top_products: Vec<Product>,
    /// Newest first, at most ten entries.
    pub recent_views: Vec<ProductView>,
}
