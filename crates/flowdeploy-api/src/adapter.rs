use std::sync::Arc;

use async_trait::async_trait;
use flowdeploy_core::DeployPipeline;
use flowdeploy_model::{DeployReport, DeployRequest};
use tokio_util::sync::CancellationToken;

use crate::error::ApiError;
use crate::handler::ApiHandler;

/// Bridges [`DeployPipeline`] to [`ApiHandler`].
///
/// Each request polls under a child of `shutdown`, so cancelling the root
/// token stops every in-flight attempt (workspaces are still released).
pub struct PipelineApiAdapter {
    pipeline: Arc<DeployPipeline>,
    shutdown: CancellationToken,
}

impl PipelineApiAdapter {
    pub fn new(pipeline: Arc<DeployPipeline>, shutdown: CancellationToken) -> Self {
        Self { pipeline, shutdown }
    }
}

#[async_trait]
impl ApiHandler for PipelineApiAdapter {
    async fn deploy_flow(&self, request: DeployRequest) -> Result<DeployReport, ApiError> {
        let cancel = self.shutdown.child_token();
        self.pipeline
            .deploy(request, &cancel)
            .await
            .map_err(ApiError::from)
    }
}
