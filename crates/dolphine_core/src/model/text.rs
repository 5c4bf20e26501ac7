//! Slug and tag-list helpers.
//!
//! # Invariants
//! - Generated slugs only contain `[a-z0-9-]` and never start or end with `-`.
//! - `unique_slug` never returns a value contained in `taken`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static NON_SLUG_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid slug regex"));

/// Slug used when a name contains no slug-safe characters at all.
pub const FALLBACK_SLUG: &str = "item";

/// Derives a URL slug from a display name.
///
/// Lowercases the input, collapses every run of characters outside
/// `[a-z0-9]` into one `-`, then strips a leading and trailing `-`.
pub fn generate_slug(name: &str) -> String {
    let lowered = name.to_lowercase();
    let dashed = NON_SLUG_RUN_RE.replace_all(&lowered, "-");
    let trimmed = dashed.strip_prefix('-').unwrap_or(&dashed);
    let trimmed = trimmed.strip_suffix('-').unwrap_or(trimmed);
    trimmed.to_string()
}

/// Picks the first free slug among `base`, `base-2`, `base-3`, ...
///
/// An empty `base` is replaced by [`FALLBACK_SLUG`].
pub fn unique_slug(base: &str, taken: &HashSet<String>) -> String {
    let base = if base.is_empty() { FALLBACK_SLUG } else { base };
    if !taken.contains(base) {
        return base.to_string();
    }

    let mut suffix = 2_u32;
    loop {
        let candidate = format!("{base}-{suffix}");
        if !taken.contains(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

/// Splits comma-separated tag input, trimming and dropping empty entries.
pub fn parse_tag_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
