use crate::domain::{TagPattern, Version};
use crate::error::{CompensationFailure, Result, ShipitError};
use crate::git::Repository;
use crate::publish::ReleasePublisher;
use crate::release::{Compensation, ReleaseState, ReleaseStep};

/// Drives one release through tag, push and publish.
///
/// Steps run strictly one after another. When a step fails, the
/// compensations owed by the steps that already succeeded run in reverse
/// step order; every compensation is attempted and its failure collected.
/// Nothing is retried. Every run that returns ends in a terminal
/// [ReleaseState].
pub struct ReleaseOrchestrator<'a, R: ?Sized, P: ?Sized> {
    repo: &'a R,
    publisher: &'a P,
    tag_pattern: TagPattern,
    state: ReleaseState,
    completed: Vec<ReleaseStep>,
}

impl<'a, R, P> ReleaseOrchestrator<'a, R, P>
where
    R: Repository + ?Sized,
    P: ReleasePublisher + ?Sized,
{
    pub fn new(repo: &'a R, publisher: &'a P, tag_pattern: TagPattern) -> Self {
        ReleaseOrchestrator {
            repo,
            publisher,
            tag_pattern,
            state: ReleaseState::Pending,
            completed: Vec::new(),
        }
    }

    pub fn state(&self) -> ReleaseState {
        self.state
    }

    /// Forward steps that succeeded, in execution order
    pub fn completed_steps(&self) -> &[ReleaseStep] {
        &self.completed
    }

    /// Whether the run ended with a tag that exists only locally
    pub fn left_local_tag(&self) -> bool {
        self.state == ReleaseState::Failed
            && self.completed.contains(&ReleaseStep::CreateTag)
            && !self.completed.contains(&ReleaseStep::PushTag)
    }

    /// Release `version` with `notes` as the body; returns the release URL.
    ///
    /// # Errors
    ///
    /// The first failing step's error, after any owed compensations ran.
    /// If a compensation itself failed, a [ShipitError::Compensation]
    /// wrapping the step error and every compensation failure.
    pub fn execute(&mut self, version: &Version, notes: &str) -> Result<String> {
        let tag = self.tag_pattern.format(version);
        let title = version.to_string();
        let mut url = String::new();

        for step in ReleaseStep::SEQUENCE {
            tracing::debug!(step = step.name(), %tag, "starting release step");

            let outcome = match step {
                ReleaseStep::CreateTag => self.repo.create_tag(&tag),
                ReleaseStep::PushTag => self.repo.push_tag(&tag),
                ReleaseStep::PublishRelease => self
                    .publisher
                    .publish_release(&tag, &title, notes)
                    .map(|published| url = published),
            };

            if let Err(error) = outcome {
                tracing::error!(step = step.name(), %tag, %error, "release step failed");
                return Err(self.compensate(&tag, error));
            }

            self.completed.push(step);
            self.transition(step.reached_state());
        }

        Ok(url)
    }

    fn compensate(&mut self, tag: &str, step_error: ShipitError) -> ShipitError {
        let owed: Vec<Compensation> = self
            .completed
            .iter()
            .rev()
            .flat_map(|step| step.compensations().iter().copied())
            .collect();

        if owed.is_empty() {
            self.transition(ReleaseState::Failed);
            return step_error;
        }

        self.transition(ReleaseState::RollingBack);

        let mut failures = Vec::new();
        for compensation in owed {
            let result = match compensation {
                Compensation::DeleteLocalTag => self.repo.delete_local_tag(tag),
                Compensation::DeleteRemoteTag => self.repo.delete_remote_tag(tag),
            };

            match result {
                Ok(()) => tracing::info!(action = compensation.name(), %tag, "compensated"),
                Err(error) => {
                    tracing::error!(action = compensation.name(), %tag, %error, "compensation failed");
                    failures.push(CompensationFailure {
                        action: compensation.name(),
                        error,
                    });
                }
            }
        }

        if failures.is_empty() {
            self.transition(ReleaseState::RolledBack);
            step_error
        } else {
            self.transition(ReleaseState::RollbackFailed);
            ShipitError::Compensation {
                source: Box::new(step_error),
                failures,
            }
        }
    }

    fn transition(&mut self, next: ReleaseState) {
        tracing::debug!(from = %self.state, to = %next, "release state transition");
        self.state = next;
    }
}
