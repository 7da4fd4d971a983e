use isbn_http::error::AppError;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure modes of a single lookup.
///
/// Only `NotFound` is visible to callers as its own status; the rest all
/// surface as 500 with the error chain as message.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Book not found")]
    NotFound,

    /// Transport failure: connect, timeout, or reading the body
    #[error("upstream request failed")]
    Network(#[source] BoxError),

    /// Body was not JSON
    #[error("upstream returned invalid JSON")]
    Parse(#[source] serde_json::Error),

    /// JSON did not match the expected edition layout
    #[error("unexpected upstream record shape")]
    Shape(#[source] serde_json::Error),
}

impl LookupError {
    pub fn network(err: impl Into<BoxError>) -> Self {
        Self::Network(err.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::NotFound)
    }
}

impl From<LookupError> for AppError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::NotFound => AppError::not_found(err.to_string()),
            other => AppError::Internal(other.into()),
        }
    }
}
