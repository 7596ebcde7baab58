use std::sync::Arc;

use crate::issuer::TokenIssuer;
use crate::issuer::TokenPair;
use crate::jwt::AccessTokenClaims;
use crate::jwt::ClaimValidator;
use crate::jwt::ClaimsError;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::RefreshTokenClaims;
use crate::jwt::Role;
use crate::keys::KeyProvider;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::settings::TokenSettings;

/// Authentication coordinator combining password verification and token handling.
///
/// Holds only immutable state, so a single instance is shared behind an `Arc`
/// by every request handler.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: Arc<JwtHandler>,
    issuer: TokenIssuer,
    validator: ClaimValidator,
}

/// Authentication operation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),

    #[error("{0}")]
    InvalidClaims(#[from] ClaimsError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `keys` - RSA key pair for signing and verification
    /// * `settings` - Issuer, audience and token lifetimes
    ///
    /// # Errors
    /// * `Configuration` - Key material is not usable
    /// * `InvalidSettings` - Issuer, audience or a lifetime is unusable
    pub fn new(keys: &impl KeyProvider, settings: TokenSettings) -> Result<Self, JwtError> {
        settings.validate()?;
        let jwt_handler = Arc::new(JwtHandler::new(keys)?);
        let validator = ClaimValidator::new(&settings);
        let issuer = TokenIssuer::new(Arc::clone(&jwt_handler), settings);

        Ok(Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler,
            issuer,
            validator,
        })
    }

    pub fn settings(&self) -> &TokenSettings {
        self.issuer.settings()
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a password against a stored hash. Mismatch is `Ok(false)`.
    pub fn verify_password(
        &self,
        password: &str,
        stored_hash: &str,
    ) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Issue a token pair for an identity whose credentials or tokens were
    /// already checked by the caller.
    pub fn issue_tokens(
        &self,
        user_id: i64,
        tenant_id: i64,
        workspace_id: i64,
        role: Role,
    ) -> Result<TokenPair, JwtError> {
        self.issuer.issue(user_id, tenant_id, workspace_id, role)
    }

    /// Verify an access token (signature and expiry) and its claims.
    ///
    /// # Errors
    /// * `JwtError` - Token is forged, malformed or expired
    /// * `InvalidClaims` - Claims are not ours or not well formed
    pub fn validate_access_token(
        &self,
        token: &str,
    ) -> Result<AccessTokenClaims, AuthenticationError> {
        let claims: AccessTokenClaims = self.jwt_handler.validate(token)?;
        self.validator.validate_access_claims(&claims)?;
        Ok(claims)
    }

    /// Verify an access token's signature and claims while ignoring expiry.
    pub fn inspect_access_token(
        &self,
        token: &str,
    ) -> Result<AccessTokenClaims, AuthenticationError> {
        let claims: AccessTokenClaims = self.jwt_handler.decode(token)?;
        self.validator.validate_access_claims(&claims)?;
        Ok(claims)
    }

    /// Verify a refresh token (signature and expiry) and its claims.
    pub fn validate_refresh_token(
        &self,
        token: &str,
    ) -> Result<RefreshTokenClaims, AuthenticationError> {
        let claims: RefreshTokenClaims = self.jwt_handler.validate(token)?;
        self.validator.validate_refresh_claims(&claims)?;
        Ok(claims)
    }
}
