use serde::{Deserialize, Serialize};

use crate::DeploySnapshot;

/// Final result of a deployment job, carrying the terminal snapshot verbatim.
///
/// A `Failed` outcome is still a completed job: the platform ran it and
/// reported failure. Interpreting component-level problems is left to the
/// caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum DeployOutcome {
    Succeeded(DeploySnapshot),
    Failed(DeploySnapshot),
}

impl DeployOutcome {
    pub fn from_snapshot(snapshot: DeploySnapshot) -> Self {
        if snapshot.is_success() {
            DeployOutcome::Succeeded(snapshot)
        } else {
            DeployOutcome::Failed(snapshot)
        }
    }

    pub fn snapshot(&self) -> &DeploySnapshot {
        match self {
            DeployOutcome::Succeeded(s) | DeployOutcome::Failed(s) => s,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DeployOutcome::Succeeded(_))
    }
}
