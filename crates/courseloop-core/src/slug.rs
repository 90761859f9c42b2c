//! Slug and year-month derivation
//!
//! Slugs are business-owned, URL-safe and derived deterministically from the
//! source record so re-running reconciliation never churns them.

use chrono::{DateTime, Datelike, Utc};

/// Format a timestamp as a `yyyy-mm` year-month string.
#[must_use]
pub fn year_month(ts: DateTime<Utc>) -> String {
    format!("{:04}-{:02}", ts.year(), ts.month())
}

/// Lowercase a name and collapse non-alphanumeric runs into `_`.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_sep = true;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_sep = false;
        } else if !last_was_sep {
            slug.push('_');
            last_was_sep = true;
        }
    }
    while slug.ends_with('_') {
        slug.pop();
    }
    slug
}

/// Derive a course slug from the open date's year-month and the name.
///
/// Deterministic: two sources with the same open month and name produce the
/// same slug. Without an open date the slug is the name alone.
#[must_use]
pub fn course_slug(name: &str, date_open: Option<DateTime<Utc>>) -> String {
    match date_open {
        Some(ts) => format!(
            "{:04}_{:02}_{}",
            ts.year(),
            ts.month(),
            slugify(name)
        ),
        None => slugify(name),
    }
}
