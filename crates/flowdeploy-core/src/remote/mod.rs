use async_trait::async_trait;
use flowdeploy_model::{DeploySnapshot, JobId};
use secrecy::SecretString;
use thiserror::Error;

/// Failure reported by a [`MetadataService`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteError {
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("rejected: {0}")]
    Rejected(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Authenticated session with the remote platform.
#[derive(Debug, Clone)]
pub struct Session {
    pub session_id: SecretString,
    /// Endpoint that accepts metadata calls for this session.
    pub metadata_url: String,
    pub user_id: Option<String>,
}

/// Options sent along with a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeployOptions {
    /// The archive holds one package rooted at the archive root.
    pub single_package: bool,
    /// Roll back every component if any one fails.
    pub rollback_on_error: bool,
    /// Validate only; nothing is saved on the platform.
    pub check_only: bool,
}

impl Default for DeployOptions {
    fn default() -> Self {
        Self {
            single_package: true,
            rollback_on_error: true,
            check_only: false,
        }
    }
}

/// Remote metadata deployment service.
///
/// The pipeline depends only on this seam: authenticate, hand over an
/// archive, then poll the returned job handle.
#[async_trait]
pub trait MetadataService: Send + Sync + 'static {
    async fn login(&self) -> Result<Session, RemoteError>;

    /// Starts an asynchronous deployment of `archive` (ZIP bytes).
    async fn deploy(
        &self,
        session: &Session,
        archive: &[u8],
        options: &DeployOptions,
    ) -> Result<JobId, RemoteError>;

    async fn check_deploy_status(
        &self,
        session: &Session,
        job: &JobId,
        include_details: bool,
    ) -> Result<DeploySnapshot, RemoteError>;
}
