use std::time::Duration;

use flowdeploy_model::DEFAULT_API_VERSION;
use secrecy::SecretString;

pub const DEFAULT_LOGIN_URL: &str = "https://login.salesforce.com";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Connection settings of the remote metadata platform.
#[derive(Debug, Clone)]
pub struct MetadataConfig {
    pub login_url: String,
    pub username: String,
    pub password: SecretString,
    /// Appended to the password on login.
    pub security_token: SecretString,
    pub api_version: String,
    pub request_timeout: Duration,
}

impl MetadataConfig {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login_url: DEFAULT_LOGIN_URL.to_string(),
            username: username.into(),
            password: SecretString::from(password.into()),
            security_token: SecretString::from(String::new()),
            api_version: DEFAULT_API_VERSION.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_login_url(mut self, url: impl Into<String>) -> Self {
        self.login_url = url.into();
        self
    }

    pub fn with_security_token(mut self, token: impl Into<String>) -> Self {
        self.security_token = SecretString::from(token.into());
        self
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Partner SOAP endpoint used for login.
    pub fn login_endpoint(&self) -> String {
        format!(
            "{}/services/Soap/u/{}",
            self.login_url.trim_end_matches('/'),
            self.api_version
        )
    }
}
