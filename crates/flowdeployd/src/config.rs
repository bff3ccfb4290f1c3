use std::{
    fmt,
    net::SocketAddr,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

use flowdeploy_core::{PipelineConfig, PollPolicy};
use flowdeploy_metadata::MetadataConfig;
use flowdeploy_observe::{LoggerConfig, LoggerError, LoggerFormat};
use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_BIND: &str = "0.0.0.0:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var}={value:?} is invalid: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error(transparent)]
    Logger(#[from] LoggerError),
}

/// Everything the daemon needs, resolved once at startup.
#[derive(Debug)]
pub struct AppConfig {
    pub api_key: SecretString,
    pub bind: SocketAddr,
    pub metadata: MetadataConfig,
    pub pipeline: PipelineConfig,
    pub logger: LoggerConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::from_lookup(|key| std::env::var(key).ok(), &cwd)
    }

    /// Builds the config from `lookup`; blank values count as unset.
    pub fn from_lookup<F>(lookup: F, cwd: &Path) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let api_key = SecretString::from(require("FLOWDEPLOY_API_KEY")?);

        let mut metadata = MetadataConfig::new(require("SF_USERNAME")?, require("SF_PASSWORD")?);
        if let Some(token) = get("SF_TOKEN") {
            metadata = metadata.with_security_token(token);
        }
        if let Some(url) = get("SF_LOGIN_URL") {
            metadata = metadata.with_login_url(url.trim_end_matches('/'));
        }
        if let Some(version) = get("SF_API_VERSION") {
            metadata = metadata.with_api_version(version);
        }

        let mut bind: SocketAddr = parse(
            "FLOWDEPLOY_BIND",
            get("FLOWDEPLOY_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string()),
        )?;
        if let Some(port) = get("PORT") {
            bind.set_port(parse("PORT", port)?);
        }

        let mut poll = PollPolicy::default();
        if let Some(ms) = get("FLOWDEPLOY_POLL_INTERVAL_MS") {
            let ms: u64 = parse("FLOWDEPLOY_POLL_INTERVAL_MS", ms)?;
            poll.interval = Duration::from_millis(ms);
        }
        if let Some(secs) = get("FLOWDEPLOY_MAX_WAIT_SECS") {
            let secs: u64 = parse("FLOWDEPLOY_MAX_WAIT_SECS", secs)?;
            poll.max_wait = Some(Duration::from_secs(secs));
        }

        let pipeline = PipelineConfig {
            scratch_root: get("FLOWDEPLOY_SCRATCH_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| cwd.join("temp")),
            api_version: metadata.api_version.clone(),
            poll,
            ..Default::default()
        };

        let mut logger = LoggerConfig::default();
        if let Some(level) = get("LOG_LEVEL") {
            logger = logger.with_level(level);
        }
        if let Some(format) = get("LOG_FORMAT") {
            logger = logger.with_format(format.parse::<LoggerFormat>()?);
        }

        Ok(Self {
            api_key,
            bind,
            metadata,
            pipeline,
            logger,
        })
    }
}

fn parse<T>(var: &'static str, value: String) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        reason: e.to_string(),
        value,
    })
}
