//! Blog use-case service: listing, admin CRUD and first-run sample posts.

use crate::model::blog_post::{BlogPost, BlogPostId, BlogPostPatch, NewBlogPost};
use crate::repo::blog_repo::BlogPostRepository;
use crate::repo::RepoError;
use crate::search::filter::{filter_blog_posts, BlogFilter};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Category labels offered by the blog listing, `all` first.
pub const BLOG_CATEGORIES: [&str; 7] = [
    "all",
    "CNC Machines",
    "Saw Mills",
    "Wood Dryers",
    "Edge Banders",
    "Planers",
    "Sanders",
];

const SAMPLE_CONTENT: &str = "Full content here...";

#[derive(Debug)]
pub enum BlogServiceError {
    /// No post with this slug or id.
    PostNotFound(String),
    Repo(RepoError),
}

impl Display for BlogServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PostNotFound(key) => write!(f, "blog post not found: {key}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BlogServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::PostNotFound(_) => None,
        }
    }
}

impl From<RepoError> for BlogServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { id, .. } => Self::PostNotFound(id.to_string()),
            other => Self::Repo(other),
        }
    }
}

pub type BlogResult<T> = Result<T, BlogServiceError>;

pub struct BlogService<R: BlogPostRepository> {
    repo: R,
}

impl<R: BlogPostRepository> BlogService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Inserts the sample posts when the blog is empty. Returns how many
    /// posts were inserted.
    pub fn ensure_seeded(&self) -> BlogResult<usize> {
        if self.repo.count_posts()? > 0 {
            return Ok(0);
        }
        let samples = sample_posts();
        for draft in &samples {
            self.repo.create_post(draft)?;
        }
        info!(
            "event=blog_seed module=blog status=ok inserted={}",
            samples.len()
        );
        Ok(samples.len())
    }

    /// Lists posts newest first.
    pub fn list(&self, filter: &BlogFilter) -> BlogResult<Vec<BlogPost>> {
        Ok(filter_blog_posts(self.repo.list_posts()?, filter))
    }

    pub fn post_by_slug(&self, slug: &str) -> BlogResult<BlogPost> {
        self.repo
            .get_post_by_slug(slug)?
            .ok_or_else(|| BlogServiceError::PostNotFound(slug.to_string()))
    }

    pub fn post(&self, id: BlogPostId) -> BlogResult<BlogPost> {
        self.repo
            .get_post(id)?
            .ok_or_else(|| BlogServiceError::PostNotFound(id.to_string()))
    }

    pub fn add(&self, draft: &NewBlogPost) -> BlogResult<BlogPost> {
        let post = self.repo.create_post(draft)?;
        info!(
            "event=blog_add module=blog status=ok post_id={} read_time={}",
            post.id, post.read_time
        );
        Ok(post)
    }

    pub fn update(&self, id: BlogPostId, patch: &BlogPostPatch) -> BlogResult<BlogPost> {
        let post = self.repo.update_post(id, patch)?;
        info!(
            "event=blog_update module=blog status=ok post_id={} read_time={}",
            post.id, post.read_time
        );
        Ok(post)
    }

    /// Deletes a post; unknown ids succeed with `false`.
    pub fn delete(&self, id: BlogPostId) -> BlogResult<bool> {
        let deleted = self.repo.delete_post(id)?;
        info!("event=blog_delete module=blog status=ok post_id={id} deleted={deleted}");
        Ok(deleted)
    }
}

fn sample_posts() -> Vec<NewBlogPost> {
    vec![
        NewBlogPost {
            title: "Choosing the Right CNC Machine for Your Workshop".to_string(),
            excerpt: "Learn about the key factors to consider when selecting a CNC machine for your woodworking business.".to_string(),
            content: SAMPLE_CONTENT.to_string(),
            author: "John Smith".to_string(),
            category: "CNC Machines".to_string(),
            tags: vec![
                "CNC".to_string(),
                "Woodworking".to_string(),
                "Buying Guide".to_string(),
            ],
            image: "https://images.unsplash.com/photo-1581091226825-a6a2a5aee158?w=800&h=400&fit=crop".to_string(),
            // 2024-01-15T00:00:00Z
            date: Some(1_705_276_800_000),
            read_time: Some(5),
        },
        NewBlogPost {
            title: "Maximizing Efficiency with Modern Saw Mills".to_string(),
            excerpt: "Discover how modern saw mill technology can revolutionize your lumber processing operations.".to_string(),
            content: SAMPLE_CONTENT.to_string(),
            author: "Sarah Johnson".to_string(),
            category: "Saw Mills".to_string(),
            tags: vec![
                "Saw Mills".to_string(),
                "Efficiency".to_string(),
                "Technology".to_string(),
            ],
            image: "https://images.unsplash.com/photo-1504917595217-d4dc5ebe6122?w=800&h=400&fit=crop".to_string(),
            // 2024-01-10T00:00:00Z
            date: Some(1_704_844_800_000),
            read_time: Some(7),
        },
    ]
}
