use std::{io, path::PathBuf, time::Duration};

use flowdeploy_model::{JobId, ModelError};
use thiserror::Error;

use crate::remote::RemoteError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{0}")]
    InvalidInput(#[from] ModelError),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("workspace is missing {}", .0.display())]
    MissingArtifact(PathBuf),

    #[error("archive error: {0}")]
    Archive(String),

    #[error("authentication failed: {0}")]
    Auth(#[source] RemoteError),

    #[error("deployment rejected: {0}")]
    Submit(#[source] RemoteError),

    #[error("status poll for job {job} failed: {source}")]
    Poll {
        job: JobId,
        #[source]
        source: RemoteError,
    },

    #[error("job {job} did not finish within {waited:?}")]
    Timeout { job: JobId, waited: Duration },

    #[error("polling of job {job} was canceled")]
    Canceled { job: JobId },

    #[error("internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Returns `true` if the caller can fix the request and try again.
    pub fn is_client_error(&self) -> bool {
        matches!(self, CoreError::InvalidInput(_))
    }
}

pub(crate) fn io_err(context: impl Into<String>) -> impl FnOnce(io::Error) -> CoreError {
    let context = context.into();
    move |source| CoreError::Io { context, source }
}
