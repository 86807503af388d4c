use thiserror::Error;

/// Failure taxonomy for a single remote call, as seen at the API seam.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// 401/403-equivalent response on an admin-only operation.
    #[error("not authorized: {0}")]
    Unauthorized(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    /// Server answered but reported failure.
    #[error("{0}")]
    Api(String),
    /// The request never produced a usable response.
    #[error("transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

/// Expected login failures. Bad credentials are a normal outcome, not a
/// fault, so they come back as a value carrying the message to show.
#[derive(Debug, Clone, Error)]
pub enum LoginError {
    #[error("{0}")]
    InvalidCredentials(String),
    #[error("{0}")]
    Transport(String),
}

/// Failures of repository operations that sit above the API seam.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Rejected locally, before any request is issued.
    #[error("not signed in")]
    NotAuthenticated,
    /// The remote service rejected our token; the session has been
    /// cleared and the admin must sign in again.
    #[error("session expired, please sign in again: {0}")]
    SessionExpired(String),
    #[error(transparent)]
    Api(ApiError),
}
