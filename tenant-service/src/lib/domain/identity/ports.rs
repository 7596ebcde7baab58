use async_trait::async_trait;
use auth::TokenPair;

use crate::identity::errors::IdentityError;
use crate::identity::models::AuthenticatedPrincipal;
use crate::identity::models::EmailAddress;
use crate::identity::models::Identity;
use crate::identity::models::LoginCommand;
use crate::identity::models::LoginOutcome;
use crate::identity::models::UserId;

/// Port for session operations: login, refresh and access token checks.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify credentials and issue a token pair for a tenant workspace.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `NotAMember` - Identity has no role in the requested workspace
    /// * `Authentication` - Stored hash unusable or signing failed
    /// * `Store` - Identity store failed
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, IdentityError>;

    /// Exchange a (possibly expired) access token and a live refresh token
    /// for a new pair.
    ///
    /// # Errors
    /// * `Authentication` - Either token is forged, malformed, expired (refresh) or invalid
    /// * `SessionMismatch` - Tokens carry different subject or tenant
    /// * `InvalidCredentials` - Identity no longer exists
    /// * `NotAMember` - Identity lost access to the workspace
    async fn refresh(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<TokenPair, IdentityError>;

    /// Validate an access token and return the principal it names.
    ///
    /// # Errors
    /// * `Authentication` - Token is forged, malformed, expired or invalid
    fn authorize(&self, access_token: &str) -> Result<AuthenticatedPrincipal, IdentityError>;
}

/// Read access to identity records. Persistence lives outside this service.
#[async_trait]
pub trait IdentityRepository: Send + Sync + 'static {
    /// Retrieve identity by email address.
    ///
    /// # Errors
    /// * `Store` - Store operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Identity>, IdentityError>;

    /// Retrieve identity by identifier.
    ///
    /// # Errors
    /// * `Store` - Store operation failed
    async fn find_by_id(&self, id: UserId) -> Result<Option<Identity>, IdentityError>;
}
