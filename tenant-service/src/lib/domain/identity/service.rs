use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::TokenPair;

use crate::identity::errors::IdentityError;
use crate::identity::models::AuthenticatedPrincipal;
use crate::identity::models::LoginCommand;
use crate::identity::models::LoginOutcome;
use crate::identity::ports::AuthServicePort;
use crate::identity::ports::IdentityRepository;

/// Domain service implementation for session operations.
pub struct AuthService<IR>
where
    IR: IdentityRepository,
{
    repository: Arc<IR>,
    authenticator: Arc<Authenticator>,
}

impl<IR> AuthService<IR>
where
    IR: IdentityRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Identity store implementation
    /// * `authenticator` - Token and password operations
    pub fn new(repository: Arc<IR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<IR> AuthServicePort for AuthService<IR>
where
    IR: IdentityRepository,
{
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, IdentityError> {
        let identity = self
            .repository
            .find_by_email(&command.email)
            .await?
            .ok_or(IdentityError::InvalidCredentials)?;

        // Password first, so membership is never revealed to a wrong password.
        // Argon2 is CPU bound and stays off the async workers.
        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let password_hash = identity.password_hash.clone();
        let verified = tokio::task::spawn_blocking(move || {
            authenticator.verify_password(&password, &password_hash)
        })
        .await
        .map_err(|e| IdentityError::Task(e.to_string()))??;

        if !verified {
            return Err(IdentityError::InvalidCredentials);
        }

        let membership = match command.workspace {
            Some((tenant_id, workspace_id)) => *identity
                .membership(tenant_id, workspace_id)
                .ok_or(IdentityError::NotAMember {
                    user_id: identity.id.0,
                    tenant_id: tenant_id.0,
                    workspace_id: workspace_id.0,
                })?,
            None => *identity
                .memberships
                .first()
                .ok_or(IdentityError::NoMembership {
                    user_id: identity.id.0,
                })?,
        };

        let tokens = self.authenticator.issue_tokens(
            identity.id.0,
            membership.tenant_id.0,
            membership.workspace_id.0,
            membership.role,
        )?;

        tracing::info!(
            user_id = identity.id.0,
            tenant_id = membership.tenant_id.0,
            workspace_id = membership.workspace_id.0,
            role = %membership.role,
            "Login succeeded"
        );

        Ok(LoginOutcome { identity, tokens })
    }

    async fn refresh(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<TokenPair, IdentityError> {
        let access_claims = self.authenticator.inspect_access_token(access_token)?;
        let refresh_claims = self.authenticator.validate_refresh_token(refresh_token)?;

        if access_claims.sub != refresh_claims.sub
            || access_claims.tenant_id != refresh_claims.tenant_id
        {
            return Err(IdentityError::SessionMismatch);
        }

        let principal = AuthenticatedPrincipal::try_from(&access_claims)?;

        // Re-read the record so revoked memberships and role changes apply on refresh.
        let identity = self
            .repository
            .find_by_id(principal.user_id)
            .await?
            .ok_or(IdentityError::InvalidCredentials)?;

        let membership = identity
            .membership(principal.tenant_id, principal.workspace_id)
            .ok_or(IdentityError::NotAMember {
                user_id: principal.user_id.0,
                tenant_id: principal.tenant_id.0,
                workspace_id: principal.workspace_id.0,
            })?;

        let tokens = self.authenticator.issue_tokens(
            principal.user_id.0,
            principal.tenant_id.0,
            principal.workspace_id.0,
            membership.role,
        )?;

        tracing::info!(
            user_id = principal.user_id.0,
            tenant_id = principal.tenant_id.0,
            workspace_id = principal.workspace_id.0,
            "Tokens refreshed"
        );

        Ok(tokens)
    }

    fn authorize(&self, access_token: &str) -> Result<AuthenticatedPrincipal, IdentityError> {
        let claims = self.authenticator.validate_access_token(access_token)?;
        Ok(AuthenticatedPrincipal::try_from(&claims)?)
    }
}
