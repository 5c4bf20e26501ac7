//! Blog post repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Slugs are allocated from the title on create and stay unique.
//! - `read_time` is estimated from `content` unless a draft sets it, and is
//!   re-estimated whenever a patch replaces `content`.

use crate::model::blog_post::{
    estimate_read_time, BlogPost, BlogPostId, BlogPostPatch, NewBlogPost,
};
use crate::model::now_epoch_ms;
use crate::repo::{
    allocate_slug, claim_slug, ensure_connection_ready, from_json_column, parse_uuid,
    to_json_column, RepoError, RepoResult,
};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const ENTITY: &str = "blog post";

const BLOG_POST_SELECT_SQL: &str = "SELECT
    id,
    title,
    slug,
    excerpt,
    content,
    author,
    date,
    category,
    tags,
    image,
    read_time,
    updated_at
FROM blog_posts";

/// Repository interface for blog posts.
pub trait BlogPostRepository {
    /// Lists posts newest `date` first.
    fn list_posts(&self) -> RepoResult<Vec<BlogPost>>;
    fn get_post(&self, id: BlogPostId) -> RepoResult<Option<BlogPost>>;
    fn get_post_by_slug(&self, slug: &str) -> RepoResult<Option<BlogPost>>;
    fn create_post(&self, draft: &NewBlogPost) -> RepoResult<BlogPost>;
    fn update_post(&self, id: BlogPostId, patch: &BlogPostPatch) -> RepoResult<BlogPost>;
    /// Deletes by id. Returns `false` when nothing was deleted.
    fn delete_post(&self, id: BlogPostId) -> RepoResult<bool>;
    fn count_posts(&self) -> RepoResult<i64>;
}

/// SQLite-backed blog post repository.
pub struct SqliteBlogPostRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBlogPostRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["blog_posts"])?;
        Ok(Self { conn })
    }
}

impl BlogPostRepository for SqliteBlogPostRepository<'_> {
    fn list_posts(&self) -> RepoResult<Vec<BlogPost>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BLOG_POST_SELECT_SQL} ORDER BY date DESC, rowid DESC;"))?;
        let mut rows = stmt.query([])?;
        let mut posts = Vec::new();
        while let Some(row) = rows.next()? {
            posts.push(parse_blog_post_row(row)?);
        }
        Ok(posts)
    }

    fn get_post(&self, id: BlogPostId) -> RepoResult<Option<BlogPost>> {
        select_post(self.conn, "id", &id.to_string())
    }

    fn get_post_by_slug(&self, slug: &str) -> RepoResult<Option<BlogPost>> {
        select_post(self.conn, "slug", slug)
    }

    fn create_post(&self, draft: &NewBlogPost) -> RepoResult<BlogPost> {
        draft.validate()?;

        let tx = self.conn.unchecked_transaction()?;
        let now = now_epoch_ms();
        let post = BlogPost {
            id: Uuid::new_v4(),
            title: draft.title.trim().to_string(),
            slug: allocate_slug(&tx, "blog_posts", &draft.title)?,
            excerpt: draft.excerpt.clone(),
            content: draft.content.clone(),
            author: draft.author.trim().to_string(),
            date: draft.date.unwrap_or(now),
            category: draft.category.trim().to_string(),
            tags: draft.tags.clone(),
            image: draft.image.clone(),
            read_time: draft
                .read_time
                .unwrap_or_else(|| estimate_read_time(&draft.content)),
            updated_at: now,
        };
        post.validate()?;

        tx.execute(
            "INSERT INTO blog_posts (
                id,
                title,
                slug,
                excerpt,
                content,
                author,
                date,
                category,
                tags,
                image,
                read_time,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12);",
            params![
                post.id.to_string(),
                post.title.as_str(),
                post.slug.as_str(),
                post.excerpt.as_str(),
                post.content.as_str(),
                post.author.as_str(),
                post.date,
                post.category.as_str(),
                to_json_column(&post.tags, "blog_posts.tags")?,
                post.image.as_str(),
                post.read_time,
                post.updated_at,
            ],
        )?;
        tx.commit()?;
        Ok(post)
    }

    fn update_post(&self, id: BlogPostId, patch: &BlogPostPatch) -> RepoResult<BlogPost> {
        let tx = self.conn.unchecked_transaction()?;
        let mut post = select_post(&tx, "id", &id.to_string())?
            .ok_or(RepoError::NotFound { entity: ENTITY, id })?;

        let claimed_slug = match patch.slug.as_deref() {
            Some(requested) => Some(claim_slug(&tx, ENTITY, "blog_posts", requested, id)?),
            None => None,
        };

        patch.apply(&mut post);
        if let Some(slug) = claimed_slug {
            post.slug = slug;
        }
        post.title = post.title.trim().to_string();
        post.updated_at = now_epoch_ms();
        post.validate()?;

        tx.execute(
            "UPDATE blog_posts
             SET
                title = ?2,
                slug = ?3,
                excerpt = ?4,
                content = ?5,
                author = ?6,
                category = ?7,
                tags = ?8,
                image = ?9,
                read_time = ?10,
                updated_at = ?11
             WHERE id = ?1;",
            params![
                id.to_string(),
                post.title.as_str(),
                post.slug.as_str(),
                post.excerpt.as_str(),
                post.content.as_str(),
                post.author.as_str(),
                post.category.as_str(),
                to_json_column(&post.tags, "blog_posts.tags")?,
                post.image.as_str(),
                post.read_time,
                post.updated_at,
            ],
        )?;
        tx.commit()?;
        Ok(post)
    }

    fn delete_post(&self, id: BlogPostId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM blog_posts WHERE id = ?1;", [id.to_string()])?;
        Ok(changed > 0)
    }

    fn count_posts(&self) -> RepoResult<i64> {
        let total = self
            .conn
            .query_row("SELECT COUNT(*) FROM blog_posts;", [], |row| row.get(0))?;
        Ok(total)
    }
}

fn select_post(conn: &Connection, column: &str, value: &str) -> RepoResult<Option<BlogPost>> {
    let mut stmt = conn.prepare(&format!("{BLOG_POST_SELECT_SQL} WHERE {column} = ?1;"))?;
    let mut rows = stmt.query([value])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_blog_post_row(row)?));
    }
    Ok(None)
}

fn parse_blog_post_row(row: &Row<'_>) -> RepoResult<BlogPost> {
    let id_text: String = row.get("id")?;
    let tags: String = row.get("tags")?;
    Ok(BlogPost {
        id: parse_uuid(&id_text, "blog_posts.id")?,
        title: row.get("title")?,
        slug: row.get("slug")?,
        excerpt: row.get("excerpt")?,
        content: row.get("content")?,
        author: row.get("author")?,
        date: row.get("date")?,
        category: row.get("category")?,
        tags: from_json_column(&tags, "blog_posts.tags")?,
        image: row.get("image")?,
        read_time: row.get("read_time")?,
        updated_at: row.get("updated_at")?,
    })
}
