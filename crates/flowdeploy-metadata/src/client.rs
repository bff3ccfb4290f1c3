use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use flowdeploy_core::{DeployOptions, MetadataService, RemoteError, Session};
use flowdeploy_model::{DeploySnapshot, JobId};
use reqwest::{Client, StatusCode, header::CONTENT_TYPE};
use secrecy::ExposeSecret;
use tracing::{debug, instrument, trace};

use crate::{config::MetadataConfig, envelope, parse};

/// [`MetadataService`] over the platform's SOAP partner and metadata APIs.
///
/// Every `login` opens a new session; nothing is cached between attempts.
pub struct SoapMetadataClient {
    http: Client,
    config: MetadataConfig,
}

impl SoapMetadataClient {
    pub fn new(config: MetadataConfig) -> Result<Self, RemoteError> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| RemoteError::Transport(format!("failed to build http client: {e}")))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &MetadataConfig {
        &self.config
    }

    /// Posts a SOAP envelope and returns the response body.
    ///
    /// Faults arrive with HTTP 500 and are left to the caller's parser; any
    /// other non-success status without a fault body is a transport error.
    async fn call(&self, url: &str, action: &str, body: String) -> Result<String, RemoteError> {
        trace!(%url, action, "soap call");
        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "text/xml; charset=UTF-8")
            .header("SOAPAction", action)
            .body(body)
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        if !status.is_success() && parse::fault(&text).is_none() {
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    RemoteError::Unauthorized(format!("{action}: HTTP {status}"))
                }
                _ => RemoteError::Transport(format!("{action}: HTTP {status}")),
            });
        }
        Ok(text)
    }
}

#[async_trait]
impl MetadataService for SoapMetadataClient {
    #[instrument(level = "debug", skip(self), fields(user = %self.config.username))]
    async fn login(&self) -> Result<Session, RemoteError> {
        let password = format!(
            "{}{}",
            self.config.password.expose_secret(),
            self.config.security_token.expose_secret()
        );
        let body = envelope::login(&self.config.username, &password);

        let response = self
            .call(&self.config.login_endpoint(), "login", body)
            .await?;
        let session = parse::login(&response)?;
        debug!(metadata_url = %session.metadata_url, "session established");
        Ok(session)
    }

    #[instrument(level = "debug", skip_all, fields(size = archive.len()))]
    async fn deploy(
        &self,
        session: &Session,
        archive: &[u8],
        options: &DeployOptions,
    ) -> Result<JobId, RemoteError> {
        let body = envelope::deploy(session.session_id.expose_secret(), &STANDARD.encode(archive), options);
        let response = self.call(&session.metadata_url, "deploy", body).await?;
        parse::deploy(&response)
    }

    #[instrument(level = "trace", skip(self, session))]
    async fn check_deploy_status(
        &self,
        session: &Session,
        job: &JobId,
        include_details: bool,
    ) -> Result<DeploySnapshot, RemoteError> {
        let body = envelope::check_deploy_status(session.session_id.expose_secret(), job, include_details);
        let response = self
            .call(&session.metadata_url, "checkDeployStatus", body)
            .await?;
        parse::deploy_status(&response)
    }
}
