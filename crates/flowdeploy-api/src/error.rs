use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use flowdeploy_core::CoreError;
use flowdeploy_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<ModelError> for ApiError {
    fn from(err: ModelError) -> Self {
        ApiError::InvalidRequest(err.to_string())
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Core(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use flowdeploy_core::RemoteError;

    use super::*;

    #[test]
    fn maps_errors_to_status_codes() {
        assert_eq!(ApiError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::from(ModelError::Missing("flowXml")).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Core(CoreError::InvalidInput(ModelError::Missing("flowName"))).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Core(CoreError::Auth(RemoteError::Unauthorized("INVALID_LOGIN".into())))
                .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn core_message_passes_through() {
        let err = ApiError::Core(CoreError::Internal("boom".into()));
        assert_eq!(err.to_string(), "internal error: boom");
    }
}
