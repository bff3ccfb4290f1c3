use std::{sync::Arc, time::Duration};

use flowdeploy_model::{DeployJob, DeployOutcome, JobId};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

use crate::{
    clock::Clock,
    config::PollPolicy,
    error::CoreError,
    remote::{DeployOptions, MetadataService, RemoteError, Session},
};

/// A deployment accepted by the remote platform.
#[derive(Debug)]
pub struct Submission {
    session: Session,
    job: DeployJob,
}

impl Submission {
    pub fn job(&self) -> &DeployJob {
        &self.job
    }

    pub fn job_id(&self) -> &JobId {
        self.job.id()
    }
}

/// Submits archives and watches the resulting jobs until they finish.
pub struct Deployer {
    service: Arc<dyn MetadataService>,
    clock: Arc<dyn Clock>,
    policy: PollPolicy,
    options: DeployOptions,
}

impl Deployer {
    pub fn new(
        service: Arc<dyn MetadataService>,
        clock: Arc<dyn Clock>,
        policy: PollPolicy,
        options: DeployOptions,
    ) -> Self {
        Self {
            service,
            clock,
            policy,
            options,
        }
    }

    /// Authenticates and starts an asynchronous deployment of `archive`.
    #[instrument(level = "debug", skip_all, fields(size = archive.len()))]
    pub async fn submit(&self, archive: &[u8]) -> Result<Submission, CoreError> {
        let session = self.service.login().await.map_err(CoreError::Auth)?;
        debug!(session = ?session, "logged in");

        let id = self
            .service
            .deploy(&session, archive, &self.options)
            .await
            .map_err(|e| match e {
                RemoteError::Unauthorized(_) => CoreError::Auth(e),
                _ => CoreError::Submit(e),
            })?;

        info!(job = %id, "deployment started");
        Ok(Submission {
            session,
            job: DeployJob::submitted(id),
        })
    }

    /// Polls the job until the platform reports it done.
    ///
    /// The first poll is issued immediately and the policy interval is waited
    /// between polls. Without `max_wait` there is no upper bound; the only
    /// other way out is `cancel`.
    #[instrument(level = "debug", skip_all, fields(job = %submission.job_id()))]
    pub async fn await_completion(
        &self,
        submission: &mut Submission,
        cancel: &CancellationToken,
    ) -> Result<DeployOutcome, CoreError> {
        let started = self.clock.epoch_millis();
        let job_id = submission.job_id().clone();

        loop {
            let poll = self
                .service
                .check_deploy_status(&submission.session, &job_id, true);
            let snapshot = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(CoreError::Canceled { job: job_id }),
                res = poll => res.map_err(|source| CoreError::Poll { job: job_id.clone(), source })?,
            };

            info!(
                job = %job_id,
                poll = submission.job.polls() + 1,
                status = %snapshot.status,
                done = snapshot.is_done(),
                "deployment status"
            );

            match submission.job.observe(snapshot) {
                Ok(Some(outcome)) => {
                    info!(job = %job_id, success = outcome.is_success(), "deployment finished");
                    return Ok(outcome);
                }
                Ok(None) => {}
                Err(e) => return Err(CoreError::Internal(e.to_string())),
            }

            if let Some(max_wait) = self.policy.max_wait {
                let waited =
                    Duration::from_millis(self.clock.epoch_millis().saturating_sub(started));
                if waited >= max_wait {
                    return Err(CoreError::Timeout {
                        job: job_id,
                        waited,
                    });
                }
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(CoreError::Canceled { job: job_id }),
                _ = self.clock.sleep(self.policy.interval) => {}
            }
        }
    }
}
