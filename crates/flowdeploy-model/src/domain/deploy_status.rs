use std::{convert::Infallible, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Status label of a deployment job as reported by the remote platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeployStatus {
    /// Queued, not started yet.
    Pending,
    /// Components are being deployed.
    InProgress,
    /// Every component deployed.
    Succeeded,
    /// Some components deployed; only possible without rollback-on-error.
    SucceededPartial,
    /// The deployment failed and was rolled back.
    Failed,
    /// Cancellation requested, not finished.
    Canceling,
    /// The deployment was canceled.
    Canceled,
    /// A label this crate does not know; kept verbatim.
    Unknown(String),
}

impl DeployStatus {
    /// Returns `true` if no further progress will happen.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DeployStatus::Succeeded
                | DeployStatus::SucceededPartial
                | DeployStatus::Failed
                | DeployStatus::Canceled
        )
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DeployStatus::Succeeded | DeployStatus::SucceededPartial)
    }

    pub fn as_str(&self) -> &str {
        match self {
            DeployStatus::Pending => "Pending",
            DeployStatus::InProgress => "InProgress",
            DeployStatus::Succeeded => "Succeeded",
            DeployStatus::SucceededPartial => "SucceededPartial",
            DeployStatus::Failed => "Failed",
            DeployStatus::Canceling => "Canceling",
            DeployStatus::Canceled => "Canceled",
            DeployStatus::Unknown(label) => label,
        }
    }
}

impl FromStr for DeployStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "Pending" | "Queued" => DeployStatus::Pending,
            "InProgress" => DeployStatus::InProgress,
            "Succeeded" => DeployStatus::Succeeded,
            "SucceededPartial" => DeployStatus::SucceededPartial,
            "Failed" => DeployStatus::Failed,
            "Canceling" => DeployStatus::Canceling,
            "Canceled" => DeployStatus::Canceled,
            other => DeployStatus::Unknown(other.to_string()),
        })
    }
}

impl From<String> for DeployStatus {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(status) => status,
            Err(never) => match never {},
        }
    }
}

impl From<DeployStatus> for String {
    fn from(status: DeployStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for DeployStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
