use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{fields} are required")]
    MissingFields { fields: String },

    #[error("invalid flow name '{name}': {reason}")]
    InvalidFlowName { name: String, reason: &'static str },

    #[error("job {job} already reached a terminal state")]
    JobFinished { job: String },
}
