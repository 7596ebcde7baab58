use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::jwt::AccessTokenClaims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::RefreshTokenClaims;
use crate::jwt::Role;
use crate::settings::TokenSettings;

/// Access and refresh token issued together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Produces access/refresh token pairs for an authenticated identity.
pub struct TokenIssuer {
    handler: Arc<JwtHandler>,
    settings: TokenSettings,
}

impl TokenIssuer {
    pub fn new(handler: Arc<JwtHandler>, settings: TokenSettings) -> Self {
        Self { handler, settings }
    }

    pub fn settings(&self) -> &TokenSettings {
        &self.settings
    }

    /// Issue a token pair valid from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Either token could not be signed; no partial pair is returned
    pub fn issue(
        &self,
        user_id: i64,
        tenant_id: i64,
        workspace_id: i64,
        role: Role,
    ) -> Result<TokenPair, JwtError> {
        self.issue_at(user_id, tenant_id, workspace_id, role, Utc::now().timestamp())
    }

    /// Issue a token pair with an explicit issue time (Unix seconds).
    pub fn issue_at(
        &self,
        user_id: i64,
        tenant_id: i64,
        workspace_id: i64,
        role: Role,
        issued_at: i64,
    ) -> Result<TokenPair, JwtError> {
        let access_claims = AccessTokenClaims::new(
            &self.settings,
            user_id,
            tenant_id,
            workspace_id,
            role,
            issued_at,
        );
        let access_token = self.sign(&access_claims)?;

        let refresh_claims = RefreshTokenClaims::new(&self.settings, user_id, tenant_id, issued_at);
        let refresh_token = self.sign(&refresh_claims)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    fn sign<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let token = self.handler.encode(claims)?;
        if token.is_empty() {
            return Err(JwtError::EncodingFailed("signer returned an empty token".to_string()));
        }
        Ok(token)
    }
}
