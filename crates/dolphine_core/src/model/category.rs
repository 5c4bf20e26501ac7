//! Category record plus create/patch shapes.
//!
//! # Invariants
//! - `slug` is unique across categories.
//! - `product_count` equals the number of products whose `category` is this
//!   slug after every catalog write.

use crate::model::validation::{require_text, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable category identifier.
pub type CategoryId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub image: String,
    /// Denormalized count maintained by the repository layer.
    pub product_count: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Category {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("slug", &self.slug)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewCategory {
    pub name: String,
    pub description: String,
    pub image: String,
}

impl NewCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)
    }
}

/// Partial category update. Renaming does not change the slug; only an
/// explicit `slug` does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl CategoryPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, category: &mut Category) {
        if let Some(value) = &self.name {
            category.name = value.clone();
        }
        if let Some(value) = &self.slug {
            category.slug = value.clone();
        }
        if let Some(value) = &self.description {
            category.description = value.clone();
        }
        if let Some(value) = &self.image {
            category.image = value.clone();
        }
    }
}
