pub mod error;
pub use error::CoreError;

pub mod clock;
pub use clock::{Clock, ManualClock, SystemClock};

pub mod remote;
pub use remote::{DeployOptions, MetadataService, RemoteError, Session};

pub mod config;
pub use config::{PipelineConfig, PollPolicy};

pub mod workspace;
pub use workspace::{Workspace, WorkspaceManager};

pub mod compose;
pub use compose::{ComposedPackage, Composer, InstanceNamer};

pub mod archive;
pub use archive::{Archive, ArchiveBuilder};

pub mod deployer;
pub use deployer::{Deployer, Submission};

pub mod pipeline;
pub use pipeline::DeployPipeline;
