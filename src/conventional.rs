//! Conventional-commit header classification.
//!
//! Each header is tested in a fixed order: the breaking-change marker first,
//! then the type token, then the catch-all. A header therefore lands in at
//! most one category; headers that are not conventional are dropped.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{CategorizedCommits, CommitCategory, CommitRecord};

/// `type!:`, `type!(scope):` or `type(scope)!:`
static BREAKING_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9][a-z0-9_.-]*(?:(?:\([^)]+\))?!|!(?:\([^)]+\))?):")
        .expect("breaking-change header pattern is valid")
});

/// `type:` or `type(scope):`
static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-z0-9][a-z0-9_.-]*)(?:\([^)]+\))?:")
        .expect("conventional header pattern is valid")
});

/// Category of a single commit subject, or `None` if it is not conventional
pub fn classify_header(subject: &str) -> Option<CommitCategory> {
    if BREAKING_HEADER.is_match(subject) {
        return Some(CommitCategory::Major);
    }

    let captures = HEADER.captures(subject)?;
    let category = match &captures[1] {
        "feat" => CommitCategory::Minor,
        "fix" => CommitCategory::Patch,
        "docs" => CommitCategory::Docs,
        _ => CommitCategory::Other,
    };
    Some(category)
}

/// Partition commits into categories, keeping their input order
pub fn classify<I>(records: I) -> CategorizedCommits
where
    I: IntoIterator<Item = CommitRecord>,
{
    records
        .into_iter()
        .filter_map(|record| classify_header(&record.subject).map(|category| (category, record)))
        .collect()
}
