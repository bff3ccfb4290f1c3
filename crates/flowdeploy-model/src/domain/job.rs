use crate::{DeployOutcome, DeploySnapshot, JobId, ModelError};

/// Lifecycle of a deployment job as seen by the poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    /// Accepted by the platform, not polled yet.
    Submitted,
    /// Polled at least once, not done.
    Polling,
    Succeeded,
    Failed,
}

impl JobState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Succeeded | JobState::Failed)
    }
}

/// Explicit state machine `Submitted -> Polling -> Succeeded | Failed`.
///
/// Transitions are driven only by [`DeployJob::observe`]; timing and retries
/// belong to whoever feeds it snapshots.
#[derive(Debug, Clone)]
pub struct DeployJob {
    id: JobId,
    state: JobState,
    polls: u32,
    last: Option<DeploySnapshot>,
}

impl DeployJob {
    pub fn submitted(id: JobId) -> Self {
        Self {
            id,
            state: JobState::Submitted,
            polls: 0,
            last: None,
        }
    }

    pub fn id(&self) -> &JobId {
        &self.id
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    /// Number of snapshots observed so far.
    pub fn polls(&self) -> u32 {
        self.polls
    }

    pub fn last_snapshot(&self) -> Option<&DeploySnapshot> {
        self.last.as_ref()
    }

    /// Records a poll result.
    ///
    /// Returns `Some(outcome)` when the snapshot reports the job done.
    pub fn observe(
        &mut self,
        snapshot: DeploySnapshot,
    ) -> Result<Option<DeployOutcome>, ModelError> {
        if self.state.is_terminal() {
            return Err(ModelError::JobFinished {
                job: self.id.to_string(),
            });
        }
        self.polls += 1;

        if !snapshot.is_done() {
            self.state = JobState::Polling;
            self.last = Some(snapshot);
            return Ok(None);
        }

        let outcome = DeployOutcome::from_snapshot(snapshot.clone());
        self.state = if outcome.is_success() {
            JobState::Succeeded
        } else {
            JobState::Failed
        };
        self.last = Some(snapshot);
        Ok(Some(outcome))
    }
}
