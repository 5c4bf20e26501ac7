//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts per collection.
//! - Keep SQL, JSON column encoding and slug allocation inside this layer.
//!
//! # Invariants
//! - Write paths validate records before SQL mutations.
//! - Every product write refreshes category `product_count` in the same
//!   transaction.
//! - Repositories only accept connections migrated to the latest version.

pub mod blog_repo;
pub mod cart_repo;
pub mod category_repo;
pub mod inquiry_repo;
pub mod product_repo;
pub mod recent_view_repo;

use crate::db::migrations::{current_version, latest_version};
use crate::db::DbError;
use crate::model::text::{generate_slug, unique_slug, FALLBACK_SLUG};
use crate::model::validation::ValidationError;
use rusqlite::Connection;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by every storefront collection.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    /// No row with this id exists in the named collection.
    NotFound { entity: &'static str, id: Uuid },
    /// An explicit slug is already used by another row.
    SlugTaken { entity: &'static str, slug: String },
    /// Connection schema is not at the version this binary expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    /// Persisted row cannot be decoded into a valid record.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::SlugTaken { entity, slug } => {
                write!(f, "{entity} slug `{slug}` is already in use")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "repository requires table `{table}`")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Verifies schema version and required tables before a repository is used.
pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    tables: &[&'static str],
) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for &table in tables {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

/// Allocates a free slug derived from `name` in `table`.
pub(crate) fn allocate_slug(conn: &Connection, table: &str, name: &str) -> RepoResult<String> {
    let mut base = generate_slug(name);
    if base.is_empty() {
        base = FALLBACK_SLUG.to_string();
    }
    let taken = slugs_with_prefix(conn, table, &base)?;
    Ok(unique_slug(&base, &taken))
}

/// Normalizes an explicitly requested slug and checks it is free for `owner`.
pub(crate) fn claim_slug(
    conn: &Connection,
    entity: &'static str,
    table: &str,
    requested: &str,
    owner: Uuid,
) -> RepoResult<String> {
    let slug = generate_slug(requested);
    if slug.is_empty() {
        return Err(ValidationError::BlankField("slug").into());
    }

    let owner_text = owner.to_string();
    let used_by_other: i64 = conn.query_row(
        &format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE slug = ?1 AND id != ?2);"),
        [slug.as_str(), owner_text.as_str()],
        |row| row.get(0),
    )?;
    if used_by_other == 1 {
        return Err(RepoError::SlugTaken { entity, slug });
    }
    Ok(slug)
}

fn slugs_with_prefix(conn: &Connection, table: &str, base: &str) -> RepoResult<HashSet<String>> {
    let prefix = format!("{base}-");
    let prefix_len = i64::try_from(prefix.len()).unwrap_or(i64::MAX);
    let mut stmt = conn.prepare(&format!(
        "SELECT slug FROM {table} WHERE slug = ?1 OR substr(slug, 1, ?2) = ?3;"
    ))?;
    let mut rows = stmt.query(rusqlite::params![base, prefix_len, prefix])?;
    let mut taken = HashSet::new();
    while let Some(row) = rows.next()? {
        taken.insert(row.get::<_, String>(0)?);
    }
    Ok(taken)
}

pub(crate) fn parse_uuid(value: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}

pub(crate) fn to_json_column<T: Serialize>(value: &T, column: &str) -> RepoResult<String> {
    serde_json::to_string(value)
        .map_err(|err| RepoError::InvalidData(format!("cannot encode {column}: {err}")))
}

pub(crate) fn from_json_column<T: DeserializeOwned>(text: &str, column: &str) -> RepoResult<T> {
    serde_json::from_str(text)
        .map_err(|err| RepoError::InvalidData(format!("invalid JSON in {column}: {err}")))
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

pub(crate) fn int_to_bool(value: i64, column: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean value `{other}` in {column}"
        ))),
    }
}
