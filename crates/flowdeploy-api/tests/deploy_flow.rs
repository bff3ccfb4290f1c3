use std::sync::{
    Arc,
    atomic::{AtomicU32, Ordering},
};

use async_trait::async_trait;
use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use flowdeploy_api::{API_KEY_HEADER, HttpApi, PipelineApiAdapter};
use flowdeploy_core::{
    DeployOptions, DeployPipeline, ManualClock, MetadataService, PipelineConfig, RemoteError,
    Session,
};
use flowdeploy_model::{DeploySnapshot, DeployStatus, JobId};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

/// Finishes the job on the `finish_after`-th status poll.
struct Org {
    finish_after: u32,
    polls: AtomicU32,
}

#[async_trait]
impl MetadataService for Org {
    async fn login(&self) -> Result<Session, RemoteError> {
        Ok(Session {
            session_id: "sid".into(),
            metadata_url: "http://org.invalid/m".into(),
            user_id: None,
        })
    }

    async fn deploy(
        &self,
        _session: &Session,
        archive: &[u8],
        _options: &DeployOptions,
    ) -> Result<JobId, RemoteError> {
        assert!(archive.starts_with(b"PK"));
        Ok(JobId::new("0Af000000000042"))
    }

    async fn check_deploy_status(
        &self,
        _session: &Session,
        job: &JobId,
        _include_details: bool,
    ) -> Result<DeploySnapshot, RemoteError> {
        let n = self.polls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(if n >= self.finish_after {
            DeploySnapshot::new(job.clone(), DeployStatus::Succeeded, true)
        } else {
            DeploySnapshot::new(job.clone(), DeployStatus::InProgress, false)
        })
    }
}

struct Harness {
    router: axum::Router,
    scratch: tempfile::TempDir,
    clock: Arc<ManualClock>,
}

fn harness(finish_after: u32, shutdown: CancellationToken) -> Harness {
    let scratch = tempfile::tempdir().unwrap();
    let clock = Arc::new(ManualClock::new(1_700_000_000_000));
    let config = PipelineConfig {
        scratch_root: scratch.path().join("temp"),
        ..Default::default()
    };
    let service = Arc::new(Org {
        finish_after,
        polls: AtomicU32::new(0),
    });
    let pipeline = Arc::new(DeployPipeline::new(config, service, clock.clone()));
    let adapter = Arc::new(PipelineApiAdapter::new(pipeline, shutdown));

    Harness {
        router: HttpApi::new(adapter, "key").router(),
        scratch,
        clock,
    }
}

fn deploy_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/deploy-flow")
        .header("content-type", "application/json")
        .header(API_KEY_HEADER, "key")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn leftovers(h: &Harness) -> usize {
    match std::fs::read_dir(h.scratch.path().join("temp")) {
        Ok(entries) => entries.count(),
        Err(_) => 0,
    }
}

#[tokio::test]
async fn deploys_through_http_and_cleans_up() {
    let h = harness(4, CancellationToken::new());
    let response = h
        .router
        .clone()
        .oneshot(deploy_request(
            r#"{"flowXml":"<Flow><versionNumber>3</versionNumber></Flow>","flowName":"MyFlow"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["flowName"], "MyFlow_1700000000000");
    assert_eq!(body["details"]["outcome"], "succeeded");

    assert_eq!(h.clock.sleeps().len(), 3);
    assert_eq!(leftovers(&h), 0);
}

#[tokio::test]
async fn invalid_request_creates_no_workspace() {
    let h = harness(1, CancellationToken::new());
    let response = h
        .router
        .clone()
        .oneshot(deploy_request(r#"{"flowXml":""}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(!h.scratch.path().join("temp").exists());
}

#[tokio::test]
async fn shutdown_cancels_polling_and_cleans_up() {
    let shutdown = CancellationToken::new();
    let h = harness(u32::MAX, shutdown.clone());
    shutdown.cancel();

    let response = h
        .router
        .clone()
        .oneshot(deploy_request(r#"{"flowXml":"<Flow/>","flowName":"MyFlow"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].as_str().unwrap().contains("canceled"));
    assert_eq!(leftovers(&h), 0);
}
