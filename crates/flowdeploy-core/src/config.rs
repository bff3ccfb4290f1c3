use std::{path::PathBuf, time::Duration};

use flowdeploy_model::DEFAULT_API_VERSION;

use crate::remote::DeployOptions;

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
const DEFAULT_SCRATCH_DIR: &str = "temp";

/// How a submitted job is watched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Pause between two status polls.
    pub interval: Duration,
    /// Give up after this long; `None` polls until the platform reports done.
    pub max_wait: Option<Duration>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_wait: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory under which per-attempt workspaces are created.
    pub scratch_root: PathBuf,
    pub api_version: String,
    /// Increment `<versionNumber>` in the flow document before packaging.
    pub bump_version: bool,
    pub poll: PollPolicy,
    pub deploy: DeployOptions,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            scratch_root: PathBuf::from(DEFAULT_SCRATCH_DIR),
            api_version: DEFAULT_API_VERSION.to_string(),
            bump_version: true,
            poll: PollPolicy::default(),
            deploy: DeployOptions::default(),
        }
    }
}
