use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::settings::TokenSettings;

/// Workspace role carried by access tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Editor,
    Viewer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Editor => "EDITOR",
            Role::Viewer => "VIEWER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims of a short-lived access token.
///
/// Identifiers are carried as decimal strings, matching what the JSON payload
/// exposes to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessTokenClaims {
    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// Subject (user identifier)
    pub sub: String,

    /// Tenant identifier
    #[serde(rename = "tid")]
    pub tenant_id: String,

    /// Workspace identifier
    #[serde(rename = "wid")]
    pub workspace_id: String,

    pub role: Role,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl AccessTokenClaims {
    /// Build access claims valid from `issued_at` for the configured access lifetime.
    pub fn new(
        settings: &TokenSettings,
        user_id: i64,
        tenant_id: i64,
        workspace_id: i64,
        role: Role,
        issued_at: i64,
    ) -> Self {
        Self {
            iss: settings.issuer.clone(),
            aud: settings.audience.clone(),
            sub: user_id.to_string(),
            tenant_id: tenant_id.to_string(),
            workspace_id: workspace_id.to_string(),
            role,
            iat: issued_at,
            exp: issued_at.saturating_add(settings.access_token_validity_secs),
        }
    }
}

/// Claims of a long-lived refresh token. Carries no role or workspace.
///
/// Unknown fields are rejected so an access token never decodes as a refresh token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RefreshTokenClaims {
    pub iss: String,
    pub aud: String,
    pub sub: String,

    #[serde(rename = "tid")]
    pub tenant_id: String,

    pub iat: i64,
    pub exp: i64,
}

impl RefreshTokenClaims {
    /// Build refresh claims valid from `issued_at` for the configured refresh lifetime.
    pub fn new(settings: &TokenSettings, user_id: i64, tenant_id: i64, issued_at: i64) -> Self {
        Self {
            iss: settings.issuer.clone(),
            aud: settings.audience.clone(),
            sub: user_id.to_string(),
            tenant_id: tenant_id.to_string(),
            iat: issued_at,
            exp: issued_at.saturating_add(settings.refresh_token_validity_secs),
        }
    }
}
