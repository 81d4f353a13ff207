use itemstore_core::envelope::{status, Response};
use itemstore_core::item::ItemError;
use itemstore_core::storage::RepositoryError;
use thiserror::Error;

/// Failures the dispatcher turns into an error envelope.
///
/// Handlers return `Result<Response, ApiError>` so `?` works on repository
/// and parsing results; [`ApiError::into_response`] renders the error.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Storage(#[from] RepositoryError),
    #[error(transparent)]
    InvalidItem(#[from] ItemError),
    #[error("Method {0} not allowed")]
    MethodNotAllowed(String),
}

impl ApiError {
    /// Storage and input failures are both the caller's 400; only unknown
    /// verbs get their own status.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Storage(_) | ApiError::InvalidItem(_) => status::BAD_REQUEST,
            ApiError::MethodNotAllowed(_) => status::METHOD_NOT_ALLOWED,
        }
    }

    pub fn into_response(self) -> Response {
        let status_code = self.status_code();
        tracing::warn!(status = status_code, error = %self, "Request failed");

        match self {
            ApiError::MethodNotAllowed(verb) => Response::method_not_allowed(&verb),
            err => Response::error(status_code, err.to_string()),
        }
    }
}
