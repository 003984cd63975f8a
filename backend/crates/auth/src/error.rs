//! Auth Error Types
//!
//! The closed set of outcomes the auth service reports, and their mapping
//! onto the unified `kernel::error::AppError`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::repository::BoxError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password; callers cannot tell which
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Unknown tenant at login, or unknown identity at admin lookup
    #[error("Invalid app id")]
    InvalidAppId,

    /// Email already registered
    #[error("User already exists")]
    UserExists,

    /// Unexpected store, hashing or signing failure
    ///
    /// Only the operation name is rendered; the cause is reachable through
    /// `Error::source` for logging.
    #[error("Internal error in {op}")]
    Internal {
        op: &'static str,
        #[source]
        source: BoxError,
    },
}

impl AuthError {
    pub(crate) fn internal(op: &'static str, source: impl Into<BoxError>) -> Self {
        AuthError::Internal {
            op,
            source: source.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials => ErrorKind::Unauthorized,
            AuthError::InvalidAppId => ErrorKind::BadRequest,
            AuthError::UserExists => ErrorKind::Conflict,
            AuthError::Internal { .. } => ErrorKind::InternalServerError,
        }
    }

}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

/// `Internal` renders a generic message; its cause moves into the
/// `AppError` source so it stays available to logging only.
impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Internal { source, .. } => {
                AppError::internal("Internal error").with_source(source)
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}
