use std::collections::BTreeMap;
use std::fmt;

/// Release-relevant category of a conventional commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CommitCategory {
    Major,
    Minor,
    Patch,
    Docs,
    Other,
}

impl CommitCategory {
    /// All categories, in release-notes section order
    pub const ALL: [CommitCategory; 5] = [
        CommitCategory::Major,
        CommitCategory::Minor,
        CommitCategory::Patch,
        CommitCategory::Docs,
        CommitCategory::Other,
    ];

    /// Short lowercase name used in logs and messages
    pub fn name(self) -> &'static str {
        match self {
            CommitCategory::Major => "major",
            CommitCategory::Minor => "minor",
            CommitCategory::Patch => "patch",
            CommitCategory::Docs => "docs",
            CommitCategory::Other => "other",
        }
    }
}

impl fmt::Display for CommitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single commit as read from history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub subject: String,
    pub hash: String,
}

impl CommitRecord {
    pub fn new(subject: impl Into<String>, hash: impl Into<String>) -> Self {
        CommitRecord {
            subject: subject.into(),
            hash: hash.into(),
        }
    }
}

/// Commits grouped by category, each group newest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorizedCommits {
    groups: BTreeMap<CommitCategory, Vec<CommitRecord>>,
}

impl CategorizedCommits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to the end of a category
    pub fn push(&mut self, category: CommitCategory, record: CommitRecord) {
        self.groups.entry(category).or_default().push(record);
    }

    /// Replace the records of a category wholesale
    pub fn insert(&mut self, category: CommitCategory, records: Vec<CommitRecord>) {
        self.groups.insert(category, records);
    }

    pub fn get(&self, category: CommitCategory) -> &[CommitRecord] {
        self.groups
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn has(&self, category: CommitCategory) -> bool {
        !self.get(category).is_empty()
    }

    /// True when no category holds any commit
    pub fn is_empty(&self) -> bool {
        CommitCategory::ALL.iter().all(|c| !self.has(*c))
    }

    /// Total number of records across categories
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Non-empty categories with their records, in section order
    pub fn non_empty(&self) -> impl Iterator<Item = (CommitCategory, &[CommitRecord])> {
        CommitCategory::ALL
            .into_iter()
            .map(|c| (c, self.get(c)))
            .filter(|(_, records)| !records.is_empty())
    }
}

impl FromIterator<(CommitCategory, CommitRecord)> for CategorizedCommits {
    fn from_iter<I: IntoIterator<Item = (CommitCategory, CommitRecord)>>(iter: I) -> Self {
        let mut commits = CategorizedCommits::new();
        for (category, record) in iter {
            commits.push(category, record);
        }
        commits
    }
}
