mod constants;
pub use constants::{
    DEFAULT_API_VERSION, FLOW_FILE_SUFFIX, FLOW_TYPE, FLOWS_DIR, MANIFEST_FILE, METADATA_NAMESPACE,
};

mod flag;
pub use flag::Flag;

mod flow_name;
pub use flow_name::FlowName;

mod instance_name;
pub use instance_name::InstanceName;

mod artifact;
pub use artifact::FlowArtifact;

mod request;
pub use request::{DeployRequest, FlowDefinition};

mod manifest;
pub use manifest::PackageManifest;

mod job_id;
pub use job_id::JobId;

mod deploy_status;
pub use deploy_status::DeployStatus;

mod snapshot;
pub use snapshot::{ComponentFailure, DeploySnapshot};

mod outcome;
pub use outcome::DeployOutcome;

mod job;
pub use job::{DeployJob, JobState};

mod report;
pub use report::DeployReport;

/// Metadata API version string, e.g. `"65.0"`.
pub type ApiVersion = String;
