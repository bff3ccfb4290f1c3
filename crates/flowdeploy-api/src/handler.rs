use async_trait::async_trait;
use flowdeploy_model::{DeployReport, DeployRequest};

use crate::error::ApiError;

/// Backend behind the HTTP surface.
///
/// [`PipelineApiAdapter`](crate::PipelineApiAdapter) is the production
/// implementation; tests plug in their own.
#[async_trait]
pub trait ApiHandler: Send + Sync + 'static {
    /// Runs one full deployment attempt and returns its report.
    async fn deploy_flow(&self, request: DeployRequest) -> Result<DeployReport, ApiError>;
}
