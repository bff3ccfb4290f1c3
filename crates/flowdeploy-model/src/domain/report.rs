use serde::{Deserialize, Serialize};

use crate::{DeployOutcome, InstanceName};

/// What one completed deployment attempt produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployReport {
    /// Unique name the flow was deployed under.
    pub instance_name: InstanceName,
    pub outcome: DeployOutcome,
    /// Number of status polls issued.
    pub polls: u32,
}
