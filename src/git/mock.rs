use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard};

use crate::conventional::classify;
use crate::domain::{CommitCategory, CommitRecord, TagPattern};
use crate::error::{Result, ShipitError};
use crate::git::{newest_matching_tag, Repository};

/// Operations a [MockRepository] can be told to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MockOperation {
    FetchTags,
    LatestTag,
    Log,
    CreateTag,
    PushTag,
    DeleteLocalTag,
    DeleteRemoteTag,
}

/// A mutating call recorded by [MockRepository]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    CreateTag(String),
    PushTag(String),
    DeleteLocalTag(String),
    DeleteRemoteTag(String),
}

#[derive(Default)]
struct MockState {
    history: Vec<CommitRecord>,
    local_tags: BTreeSet<String>,
    remote_tags: BTreeSet<String>,
    failures: BTreeSet<MockOperation>,
    calls: Vec<MockCall>,
    fetches: usize,
}

/// In-memory repository for testing without actual git operations.
///
/// `history` holds the commits since the latest release, newest first; the
/// `since` argument of [Repository::log] is not interpreted.
#[derive(Default)]
pub struct MockRepository {
    state: Mutex<MockState>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a commit on top of history (it becomes the newest)
    pub fn add_commit(&self, subject: &str, hash: &str) {
        self.lock().history.insert(0, CommitRecord::new(subject, hash));
    }

    /// Add a tag present both locally and on the remote
    pub fn add_release_tag(&self, name: &str) {
        let mut state = self.lock();
        state.local_tags.insert(name.to_string());
        state.remote_tags.insert(name.to_string());
    }

    /// Make every future call of `operation` fail
    pub fn fail_on(&self, operation: MockOperation) {
        self.lock().failures.insert(operation);
    }

    /// Mutating calls made so far, in order
    pub fn calls(&self) -> Vec<MockCall> {
        self.lock().calls.clone()
    }

    /// Number of tag fetches attempted so far
    pub fn fetch_count(&self) -> usize {
        self.lock().fetches
    }

    pub fn has_local_tag(&self, name: &str) -> bool {
        self.lock().local_tags.contains(name)
    }

    pub fn has_remote_tag(&self, name: &str) -> bool {
        self.lock().remote_tags.contains(name)
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check(state: &MockState, operation: MockOperation) -> Result<()> {
        if state.failures.contains(&operation) {
            Err(ShipitError::remote(format!(
                "injected failure for {:?}",
                operation
            )))
        } else {
            Ok(())
        }
    }
}

impl Repository for MockRepository {
    fn fetch_tags(&self) -> Result<()> {
        let mut state = self.lock();
        state.fetches += 1;
        Self::check(&state, MockOperation::FetchTags)
    }

    fn latest_tag(&self, pattern: &TagPattern) -> Result<Option<String>> {
        let state = self.lock();
        Self::check(&state, MockOperation::LatestTag)?;
        Ok(
            newest_matching_tag(state.remote_tags.iter().map(String::as_str), pattern)
                .map(str::to_string),
        )
    }

    fn log(&self, category: CommitCategory, _since: Option<&str>) -> Result<Vec<CommitRecord>> {
        let state = self.lock();
        Self::check(&state, MockOperation::Log)?;
        Ok(classify(state.history.iter().cloned())
            .get(category)
            .to_vec())
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        let mut state = self.lock();
        state.calls.push(MockCall::CreateTag(name.to_string()));
        Self::check(&state, MockOperation::CreateTag)?;
        if !state.local_tags.insert(name.to_string()) {
            return Err(ShipitError::tag(format!("Tag '{}' already exists", name)));
        }
        Ok(())
    }

    fn push_tag(&self, name: &str) -> Result<()> {
        let mut state = self.lock();
        state.calls.push(MockCall::PushTag(name.to_string()));
        Self::check(&state, MockOperation::PushTag)?;
        if !state.local_tags.contains(name) {
            return Err(ShipitError::remote(format!("No local tag '{}'", name)));
        }
        state.remote_tags.insert(name.to_string());
        Ok(())
    }

    fn delete_local_tag(&self, name: &str) -> Result<()> {
        let mut state = self.lock();
        state.calls.push(MockCall::DeleteLocalTag(name.to_string()));
        Self::check(&state, MockOperation::DeleteLocalTag)?;
        if !state.local_tags.remove(name) {
            return Err(ShipitError::tag(format!("Tag '{}' not found", name)));
        }
        Ok(())
    }

    fn delete_remote_tag(&self, name: &str) -> Result<()> {
        let mut state = self.lock();
        state.calls.push(MockCall::DeleteRemoteTag(name.to_string()));
        Self::check(&state, MockOperation::DeleteRemoteTag)?;
        state.remote_tags.remove(name);
        Ok(())
    }
}
