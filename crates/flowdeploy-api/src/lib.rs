mod error;
pub use error::ApiError;

mod handler;
pub use handler::ApiHandler;

mod adapter;
pub use adapter::PipelineApiAdapter;

mod http;
pub use http::{API_KEY_HEADER, HttpApi};

pub use axum;
