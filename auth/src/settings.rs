use serde::Deserialize;
use thiserror::Error;

/// Upper bound for either token lifetime: one year.
pub const MAX_VALIDITY_SECS: i64 = 366 * 24 * 60 * 60;

/// Token settings rejected at startup.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Token setting {0} must not be empty")]
    Empty(&'static str),

    #[error("Token setting {name} must be between 1 and {max} seconds, got {value}")]
    ValidityOutOfRange {
        name: &'static str,
        value: i64,
        max: i64,
    },
}

/// Immutable token parameters shared by the issuer and the claim validator.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TokenSettings {
    /// Expected `iss` claim
    pub issuer: String,

    /// Expected `aud` claim
    pub audience: String,

    /// Access token lifetime in seconds
    pub access_token_validity_secs: i64,

    /// Refresh token lifetime in seconds
    pub refresh_token_validity_secs: i64,
}

impl TokenSettings {
    pub fn new(
        issuer: impl Into<String>,
        audience: impl Into<String>,
        access_token_validity_secs: i64,
        refresh_token_validity_secs: i64,
    ) -> Self {
        Self {
            issuer: issuer.into(),
            audience: audience.into(),
            access_token_validity_secs,
            refresh_token_validity_secs,
        }
    }

    /// Check the settings before any token is issued with them.
    ///
    /// # Errors
    /// * `Empty` - Issuer or audience is blank
    /// * `ValidityOutOfRange` - A lifetime is not positive or exceeds [`MAX_VALIDITY_SECS`]
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.issuer.trim().is_empty() {
            return Err(SettingsError::Empty("issuer"));
        }
        if self.audience.trim().is_empty() {
            return Err(SettingsError::Empty("audience"));
        }

        for (name, value) in [
            ("access_token_validity_secs", self.access_token_validity_secs),
            ("refresh_token_validity_secs", self.refresh_token_validity_secs),
        ] {
            if !(1..=MAX_VALIDITY_SECS).contains(&value) {
                return Err(SettingsError::ValidityOutOfRange {
                    name,
                    value,
                    max: MAX_VALIDITY_SECS,
                });
            }
        }

        Ok(())
    }
}
