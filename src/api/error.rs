//! API Errors

use thiserror::Error;

/// Errors surfaced by the API client.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The backend answered 404.
    #[error("not found: {path}")]
    NotFound { path: String },

    /// The backend answered 401; the session interceptor has already run.
    #[error("authentication required")]
    Unauthorized,

    /// The project has no (type, repeat count) association for the type.
    /// Raised before any request is issued.
    #[error("project {project_id} has no association for type {type_id}")]
    MissingAssociation { project_id: String, type_id: u32 },

    /// Any other non-2xx status.
    #[error("server error ({status}): {message}")]
    Status { status: u16, message: String },

    /// The request never produced a response (network, CORS, ...).
    #[error("request failed: {0}")]
    Transport(String),

    /// The response body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}
