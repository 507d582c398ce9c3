//! Release transaction: tag, push, publish, with compensating rollback.
//!
//! The forward steps and the compensations each one owes are declared by
//! [ReleaseStep]; [ReleaseOrchestrator] executes them as a saga.

pub mod orchestrator;

pub use orchestrator::ReleaseOrchestrator;

use std::fmt;

/// Lifecycle of one release run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseState {
    Pending,
    Tagged,
    Pushed,
    Published,
    /// A forward step failed before anything owed a compensation
    Failed,
    RollingBack,
    RolledBack,
    RollbackFailed,
}

impl ReleaseState {
    /// Whether no further transition can happen
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ReleaseState::Published
                | ReleaseState::Failed
                | ReleaseState::RolledBack
                | ReleaseState::RollbackFailed
        )
    }
}

impl fmt::Display for ReleaseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReleaseState::Pending => "pending",
            ReleaseState::Tagged => "tagged",
            ReleaseState::Pushed => "pushed",
            ReleaseState::Published => "published",
            ReleaseState::Failed => "failed",
            ReleaseState::RollingBack => "rolling-back",
            ReleaseState::RolledBack => "rolled-back",
            ReleaseState::RollbackFailed => "rollback-failed",
        };
        f.write_str(name)
    }
}

/// Forward step of the release saga
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseStep {
    CreateTag,
    PushTag,
    PublishRelease,
}

/// Action undoing the durable effect of a completed step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compensation {
    DeleteLocalTag,
    DeleteRemoteTag,
}

impl ReleaseStep {
    /// Forward steps in execution order
    pub const SEQUENCE: [ReleaseStep; 3] = [
        ReleaseStep::CreateTag,
        ReleaseStep::PushTag,
        ReleaseStep::PublishRelease,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ReleaseStep::CreateTag => "create-tag",
            ReleaseStep::PushTag => "push-tag",
            ReleaseStep::PublishRelease => "publish-release",
        }
    }

    /// State reached once this step succeeds
    pub fn reached_state(self) -> ReleaseState {
        match self {
            ReleaseStep::CreateTag => ReleaseState::Tagged,
            ReleaseStep::PushTag => ReleaseState::Pushed,
            ReleaseStep::PublishRelease => ReleaseState::Published,
        }
    }

    /// Compensations owed, in order, if a later step fails.
    ///
    /// A created tag is only shared once it is pushed, so the tag's rollback
    /// (local, then remote) hangs off the push step.
    pub fn compensations(self) -> &'static [Compensation] {
        match self {
            ReleaseStep::CreateTag => &[],
            ReleaseStep::PushTag => &[Compensation::DeleteLocalTag, Compensation::DeleteRemoteTag],
            ReleaseStep::PublishRelease => &[],
        }
    }
}

impl Compensation {
    pub fn name(self) -> &'static str {
        match self {
            Compensation::DeleteLocalTag => "delete-local-tag",
            Compensation::DeleteRemoteTag => "delete-remote-tag",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_reaches_published() {
        let states: Vec<_> = ReleaseStep::SEQUENCE
            .iter()
            .map(|step| step.reached_state())
            .collect();
        assert_eq!(
            states,
            vec![
                ReleaseState::Tagged,
                ReleaseState::Pushed,
                ReleaseState::Published
            ]
        );
    }

    #[test]
    fn test_only_push_owes_compensation() {
        assert!(ReleaseStep::CreateTag.compensations().is_empty());
        assert!(ReleaseStep::PublishRelease.compensations().is_empty());
        assert_eq!(
            ReleaseStep::PushTag.compensations(),
            &[Compensation::DeleteLocalTag, Compensation::DeleteRemoteTag]
        );
    }

    #[test]
    fn test_terminal_states() {
        assert!(ReleaseState::Published.is_terminal());
        assert!(ReleaseState::RolledBack.is_terminal());
        assert!(ReleaseState::RollbackFailed.is_terminal());
        assert!(ReleaseState::Failed.is_terminal());
        assert!(!ReleaseState::Tagged.is_terminal());
        assert!(!ReleaseState::Pending.is_terminal());
        assert!(!ReleaseState::RollingBack.is_terminal());
    }
}
