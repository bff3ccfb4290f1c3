use serde::{Deserialize, Serialize};

use crate::{DeployStatus, Flag, JobId};

/// Result of one status poll of a deployment job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploySnapshot {
    pub id: JobId,
    /// The platform finished working on the job.
    pub done: Flag,
    pub status: DeployStatus,
    #[serde(default)]
    pub success: Flag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_status_code: Option<String>,
    #[serde(default)]
    pub number_components_total: u32,
    #[serde(default)]
    pub number_components_deployed: u32,
    #[serde(default)]
    pub number_component_errors: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub component_failures: Vec<ComponentFailure>,
}

/// One component the platform refused to deploy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentFailure {
    #[serde(default)]
    pub component_type: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub problem_type: String,
    #[serde(default)]
    pub problem: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<u32>,
}

impl DeploySnapshot {
    /// Minimal snapshot with only the identity, status and done flag.
    pub fn new(id: JobId, status: DeployStatus, done: bool) -> Self {
        Self {
            id,
            done: Flag(done),
            success: Flag(status.is_success()),
            status,
            state_detail: None,
            error_message: None,
            error_status_code: None,
            number_components_total: 0,
            number_components_deployed: 0,
            number_component_errors: 0,
            component_failures: Vec::new(),
        }
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.done.is_set()
    }

    pub fn is_success(&self) -> bool {
        self.success.is_set() || self.status.is_success()
    }
}
