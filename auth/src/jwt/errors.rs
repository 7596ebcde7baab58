use thiserror::Error;

use crate::keys::KeyError;
use crate::settings::SettingsError;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Key configuration error: {0}")]
    Configuration(#[from] KeyError),

    #[error("Invalid token settings: {0}")]
    InvalidSettings(#[from] SettingsError),

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    /// Signature or format is invalid. Carries no detail.
    #[error("Bad token")]
    BadToken,

    #[error("Token is expired")]
    TokenExpired,
}

/// Claim content rejected after a successful signature check.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClaimsError {
    #[error("Invalid Access Token")]
    InvalidAccessToken,

    #[error("Invalid Refresh Token")]
    InvalidRefreshToken,
}
