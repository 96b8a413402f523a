use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error while accessing a file or resource: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0} Not found")]
    NotFound(String),

    #[error("Unrecognized command: '{0}'")]
    ParseCommand(String),

    #[error("Invalid number format: {0}")]
    ParseInt(#[from] std::num::ParseIntError),

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Network failure, non-success status or an unreadable response body.
    #[error("Remote operation failed: {0}")]
    FailedRequest(#[from] reqwest::Error),

    #[error("Invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0} is already in progress")]
    Busy(String),

    #[error("Contact controller is no longer active")]
    Inactive,
}

impl AppError {
    pub fn is_remote(&self) -> bool {
        matches!(self, AppError::FailedRequest(_))
    }
}
