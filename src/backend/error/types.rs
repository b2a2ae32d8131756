/**
 * Backend Error Types
 *
 * Errors returned by the datastore services. Each variant knows the HTTP
 * status it maps to, so a caller holding an axum router can return them
 * directly from a handler.
 *
 * # Status Mapping
 *
 * - Rejected input (content or request validation) - 422
 * - Malformed but well-typed requests - 400
 * - Missing rows - 404
 * - Acting on something the caller does not own - 403
 * - Duplicate relationships - 409
 * - Datastore and serialization failures - 500
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::content::ValidationError;
use crate::shared::SharedError;

/// Backend-specific error types
///
/// ```rust
/// use aigm::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::not_found("Message not found");
/// assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Request that cannot be acted on, e.g. befriending yourself
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    /// The caller is not a participant, member or author
    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    /// A relationship already exists in a conflicting state
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Datastore failure; details are logged, never returned
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// Validation or content error from the shared module
    #[error(transparent)]
    SharedError(#[from] SharedError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl BackendError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::SharedError(err) => match err {
                SharedError::SerializationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                SharedError::ValidationError { .. } | SharedError::Content(_) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
            },
            Self::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message suitable for a response body
    pub fn message(&self) -> String {
        match self {
            Self::BadRequest { message }
            | Self::NotFound { message }
            | Self::Forbidden { message }
            | Self::Conflict { message } => message.clone(),
            Self::Database(_) => "Internal server error".to_string(),
            Self::SharedError(err) => err.detail(),
            Self::SerializationError(err) => err.to_string(),
        }
    }
}

impl From<sqlx::Error> for BackendError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!(error = %err, "database error");
        Self::Database(err)
    }
}

impl From<ValidationError> for BackendError {
    fn from(err: ValidationError) -> Self {
        Self::SharedError(SharedError::Content(err))
    }
}
