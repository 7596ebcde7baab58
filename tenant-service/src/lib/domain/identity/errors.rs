use auth::AuthenticationError;
use auth::TokenMissing;
use thiserror::Error;

/// Error for numeric identifier parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdError {
    #[error("Invalid identifier: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for identity and session operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid identifier in token: {0}")]
    InvalidTokenIdentifier(#[from] IdError),

    #[error(transparent)]
    TokenMissing(#[from] TokenMissing),

    #[error(transparent)]
    Authentication(#[from] AuthenticationError),

    /// Access and refresh token describe different sessions.
    #[error("Access and refresh token do not belong together")]
    SessionMismatch,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Identity {user_id} has no access to workspace {workspace_id} of tenant {tenant_id}")]
    NotAMember {
        user_id: i64,
        tenant_id: i64,
        workspace_id: i64,
    },

    #[error("Identity {user_id} belongs to no workspace")]
    NoMembership { user_id: i64 },

    // Infrastructure errors
    #[error("Identity store error: {0}")]
    Store(String),

    #[error("Background task failed: {0}")]
    Task(String),
}

impl From<auth::JwtError> for IdentityError {
    fn from(err: auth::JwtError) -> Self {
        IdentityError::Authentication(AuthenticationError::JwtError(err))
    }
}

impl From<auth::PasswordError> for IdentityError {
    fn from(err: auth::PasswordError) -> Self {
        IdentityError::Authentication(AuthenticationError::PasswordError(err))
    }
}
