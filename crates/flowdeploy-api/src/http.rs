use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Request, State, rejection::JsonRejection},
    http::HeaderValue,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::post,
};
use flowdeploy_model::{DeployOutcome, DeployRequest, InstanceName};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use subtle::ConstantTimeEq;
use tracing::{Instrument, debug, info_span, warn};
use uuid::Uuid;

use crate::{error::ApiError, handler::ApiHandler};

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";
const REQUEST_ID_HEADER: &str = "x-request-id";

/// HTTP API service builder.
pub struct HttpApi<H> {
    handler: Arc<H>,
    api_key: Arc<SecretString>,
}

impl<H> HttpApi<H>
where
    H: ApiHandler,
{
    pub fn new(handler: Arc<H>, api_key: impl Into<SecretString>) -> Self {
        Self {
            handler,
            api_key: Arc::new(api_key.into()),
        }
    }

    /// Build axum router with mounted endpoints.
    ///
    /// Routes:
    /// - POST /deploy-flow - Deploy a flow and wait for the job to finish
    ///
    /// Every route requires the `x-api-key` header.
    pub fn router(self) -> Router {
        Router::new()
            .route("/deploy-flow", post(deploy_flow::<H>))
            .route_layer(middleware::from_fn_with_state(
                self.api_key,
                require_api_key,
            ))
            .with_state(self.handler)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeployFlowResponse {
    status: &'static str,
    /// The unique instance name, not the requested logical name.
    flow_name: InstanceName,
    details: DeployOutcome,
}

/// Constant-time comparison of the presented key against the configured one.
fn key_matches(expected: &SecretString, presented: Option<&[u8]>) -> bool {
    let Some(presented) = presented else {
        return false;
    };
    let expected = expected.expose_secret().as_bytes();
    if expected.len() != presented.len() {
        return false;
    }
    expected.ct_eq(presented).into()
}

async fn require_api_key(
    State(expected): State<Arc<SecretString>>,
    request: Request,
    next: Next,
) -> Response {
    let presented = request.headers().get(API_KEY_HEADER).map(|v| v.as_bytes());

    if !key_matches(&expected, presented) {
        debug!(uri = %request.uri(), "missing or invalid api key");
        return ApiError::Unauthorized.into_response();
    }
    next.run(request).await
}

/// POST /deploy-flow
async fn deploy_flow<H>(
    State(handler): State<Arc<H>>,
    body: Result<Json<DeployRequest>, JsonRejection>,
) -> Response
where
    H: ApiHandler,
{
    let request_id = Uuid::new_v4();
    let span = info_span!("request", %request_id, route = "/deploy-flow");

    let mut response = match handle(handler.as_ref(), body).instrument(span).await {
        Ok(body) => Json(body).into_response(),
        Err(e) => e.into_response(),
    };
    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

async fn handle<H>(
    handler: &H,
    body: Result<Json<DeployRequest>, JsonRejection>,
) -> Result<DeployFlowResponse, ApiError>
where
    H: ApiHandler,
{
    let Json(request) = body.map_err(|rejection| ApiError::InvalidRequest(rejection.body_text()))?;

    // Bad input never reaches the pipeline, so no scratch directory is created.
    let definition = request.validate().inspect_err(|e| debug!(error = %e, "rejected request"))?;

    let report = handler
        .deploy_flow(DeployRequest::from(definition))
        .await
        .inspect_err(|e| warn!(error = %e, "deployment failed"))?;

    Ok(DeployFlowResponse {
        status: "success",
        flow_name: report.instance_name,
        details: report.outcome,
    })
}
