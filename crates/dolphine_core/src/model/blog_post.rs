//! Blog post record and reading-time estimate.

use crate::model::validation::{require_text, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable blog post identifier.
pub type BlogPostId = Uuid;

/// Words per minute used by the reading-time estimate.
pub const READING_WORDS_PER_MINUTE: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: BlogPostId,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    /// Publication time.
    pub date: i64,
    /// Free-text category label, e.g. `CNC Machines`.
    pub category: String,
    pub tags: Vec<String>,
    pub image: String,
    /// Estimated minutes, derived from `content`.
    pub read_time: u32,
    pub updated_at: i64,
}

impl BlogPost {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        require_text("slug", &self.slug)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewBlogPost {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    pub category: String,
    pub tags: Vec<String>,
    pub image: String,
    /// Publication time; `None` means "now".
    pub date: Option<i64>,
    /// Explicit reading minutes; `None` estimates from `content`.
    pub read_time: Option<u32>,
}

impl NewBlogPost {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)
    }
}

/// Partial blog post update. A new `content` also refreshes `read_time`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogPostPatch {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub image: Option<String>,
}

impl BlogPostPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, post: &mut BlogPost) {
        if let Some(value) = &self.title {
            post.title = value.clone();
        }
        if let Some(value) = &self.slug {
            post.slug = value.clone();
        }
        if let Some(value) = &self.excerpt {
            post.excerpt = value.clone();
        }
        if let Some(value) = &self.content {
            post.content = value.clone();
            post.read_time = estimate_read_time(value);
        }
        if let Some(value) = &self.author {
            post.author = value.clone();
        }
        if let Some(value) = &self.category {
            post.category = value.clone();
        }
        if let Some(value) = &self.tags {
            post.tags = value.clone();
        }
        if let Some(value) = &self.image {
            post.image = value.clone();
        }
    }
}

/// Estimates reading minutes as `ceil(pieces / 200)`.
///
/// Pieces are the content split on single spaces, so empty content still
/// counts as one piece and yields one minute.
pub fn estimate_read_time(content: &str) -> u32 {
    let pieces = content.split(' ').count();
    let minutes = pieces.div_ceil(READING_WORDS_PER_MINUTE);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}
