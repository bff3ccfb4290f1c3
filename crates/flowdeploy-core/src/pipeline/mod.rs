use std::sync::Arc;

use flowdeploy_model::{DeployReport, DeployRequest, FlowDefinition, InstanceName};
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, info_span, warn};

use crate::{
    archive::ArchiveBuilder,
    clock::{Clock, SystemClock},
    compose::{Composer, InstanceNamer},
    config::PipelineConfig,
    deployer::Deployer,
    error::CoreError,
    remote::MetadataService,
    workspace::{Workspace, WorkspaceManager},
};

/// One flow deployment, end to end.
///
/// validate -> name -> acquire workspace -> compose -> archive -> submit ->
/// poll -> release workspace. The workspace is released on every path out
/// of [`DeployPipeline::deploy`], including failures.
pub struct DeployPipeline {
    workspaces: WorkspaceManager,
    namer: InstanceNamer,
    composer: Composer,
    archiver: ArchiveBuilder,
    deployer: Deployer,
    clock: Arc<dyn Clock>,
}

impl DeployPipeline {
    pub fn new(
        config: PipelineConfig,
        service: Arc<dyn MetadataService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            workspaces: WorkspaceManager::new(config.scratch_root),
            namer: InstanceNamer::new(),
            composer: Composer::new(config.api_version, config.bump_version),
            archiver: ArchiveBuilder::new(),
            deployer: Deployer::new(service, clock.clone(), config.poll, config.deploy),
            clock,
        }
    }

    pub fn with_system_clock(config: PipelineConfig, service: Arc<dyn MetadataService>) -> Self {
        Self::new(config, service, Arc::new(SystemClock))
    }

    pub fn workspaces(&self) -> &WorkspaceManager {
        &self.workspaces
    }

    pub async fn deploy(
        &self,
        request: DeployRequest,
        cancel: &CancellationToken,
    ) -> Result<DeployReport, CoreError> {
        let definition = request.validate()?;
        let instance = self.namer.next(&definition.name, self.clock.as_ref());

        let span = info_span!("deploy", flow = %definition.name, %instance);
        async move {
            let workspace = self.workspaces.acquire(&instance).await?;
            let result = self.run(&workspace, &definition, &instance, cancel).await;

            if let Err(e) = workspace.release().await {
                warn!(error = %e, "failed to release workspace");
            }
            match &result {
                Ok(report) => info!(
                    polls = report.polls,
                    success = report.outcome.is_success(),
                    "deployment attempt completed"
                ),
                Err(e) => warn!(error = %e, "deployment attempt failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn run(
        &self,
        workspace: &Workspace,
        definition: &FlowDefinition,
        instance: &InstanceName,
        cancel: &CancellationToken,
    ) -> Result<DeployReport, CoreError> {
        let artifact = self.composer.artifact(definition, instance);
        self.composer.write(workspace, &artifact).await?;

        let archive = self.archiver.build(workspace, instance).await?;
        debug!(size = archive.bytes.len(), "submitting archive");

        let mut submission = self.deployer.submit(&archive.bytes).await?;
        let outcome = self
            .deployer
            .await_completion(&mut submission, cancel)
            .await?;

        Ok(DeployReport {
            instance_name: instance.clone(),
            outcome,
            polls: submission.job().polls(),
        })
    }
}
