use thiserror::Error;

/// Boundary parsing failures.
///
/// The evaluator itself never returns these; they are raised only while
/// turning untyped input (strings, session JSON) into typed values.
#[derive(Debug, Error)]
pub enum AuthzError {
    #[error("invalid role: {0}")]
    InvalidRole(String),
    #[error("invalid permission level: {0}")]
    InvalidLevel(String),
    #[error("invalid resource: {0:?}")]
    InvalidResource(String),
    #[error("invalid grant: {0}")]
    InvalidGrant(String),
    #[error("invalid session payload: {0}")]
    InvalidSession(#[from] serde_json::Error),
}

pub type AuthzResult<T> = Result<T, AuthzError>;
