//! Release notes rendering

use crate::domain::{CategorizedCommits, CommitCategory, CommitRecord, Version};

/// Section heading for a category in the release notes
pub fn section_title(category: CommitCategory) -> &'static str {
    match category {
        CommitCategory::Major => "Breaking Changes",
        CommitCategory::Minor => "Features",
        CommitCategory::Patch => "Bug Fixes",
        CommitCategory::Docs => "Documentation",
        CommitCategory::Other => "Other",
    }
}

/// Render the release notes for `version`.
///
/// Sections always appear in the order of [CommitCategory::ALL] and only when
/// they have commits; bullets keep the order of `commits`.
pub fn render(version: &Version, commits: &CategorizedCommits) -> String {
    let mut notes = format!("# Version {}\n", version);

    for (category, records) in commits.non_empty() {
        notes.push_str("\n## ");
        notes.push_str(section_title(category));
        notes.push_str("\n\n");
        for record in records {
            push_bullet(&mut notes, record);
        }
    }

    notes
}

fn push_bullet(notes: &mut String, record: &CommitRecord) {
    notes.push_str("- ");
    notes.push_str(&record.subject);
    if !record.hash.is_empty() {
        notes.push_str(" (");
        notes.push_str(&record.hash);
        notes.push(')');
    }
    notes.push('\n');
}
