use std::fmt;
use std::str::FromStr;

use auth::AccessTokenClaims;
use auth::Role;

use crate::identity::errors::EmailError;
use crate::identity::errors::IdError;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub i64);

        impl $name {
            /// Parse the decimal form carried in token claims.
            ///
            /// # Errors
            /// * `InvalidFormat` - Not a decimal integer in range
            pub fn from_claim(value: &str) -> Result<Self, IdError> {
                value
                    .parse::<i64>()
                    .map($name)
                    .map_err(|e| IdError::InvalidFormat(format!("{}: {}", value, e)))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

numeric_id!(
    /// Identity (user) unique identifier
    UserId
);
numeric_id!(
    /// Tenant unique identifier
    TenantId
);
numeric_id!(
    /// Workspace unique identifier, scoped to a tenant
    WorkspaceId
);

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser. Stored lowercased so
/// lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        let email = email.trim().to_lowercase();
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Role held by an identity inside one workspace of one tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Membership {
    pub tenant_id: TenantId,
    pub workspace_id: WorkspaceId,
    pub role: Role,
}

/// Identity record as supplied by the identity store.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: UserId,
    pub name: String,
    pub email: EmailAddress,
    pub password_hash: String,
    pub memberships: Vec<Membership>,
}

impl Identity {
    /// Find the membership for a tenant workspace, if any.
    pub fn membership(
        &self,
        tenant_id: TenantId,
        workspace_id: WorkspaceId,
    ) -> Option<&Membership> {
        self.memberships
            .iter()
            .find(|m| m.tenant_id == tenant_id && m.workspace_id == workspace_id)
    }
}

/// Identity re-established from a validated access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedPrincipal {
    pub user_id: UserId,
    pub tenant_id: TenantId,
    pub workspace_id: WorkspaceId,
    pub role: Role,
}

impl TryFrom<&AccessTokenClaims> for AuthenticatedPrincipal {
    type Error = IdError;

    fn try_from(claims: &AccessTokenClaims) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: UserId::from_claim(&claims.sub)?,
            tenant_id: TenantId::from_claim(&claims.tenant_id)?,
            workspace_id: WorkspaceId::from_claim(&claims.workspace_id)?,
            role: claims.role,
        })
    }
}

/// Command to log in to a tenant workspace
#[derive(Debug)]
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: String,
    /// Workspace to sign in to. `None` picks the identity's first membership.
    pub workspace: Option<(TenantId, WorkspaceId)>,
}

/// Successful login: the identity and its fresh token pair.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub identity: Identity,
    pub tokens: auth::TokenPair,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_normalized() {
        let email = EmailAddress::new("  Alice@Example.COM ".to_string()).unwrap();
        assert_eq!(email.as_str(), "alice@example.com");
    }

    #[test]
    fn test_invalid_email() {
        assert!(EmailAddress::new("not-an-email".to_string()).is_err());
    }

    #[test]
    fn test_id_from_claim() {
        assert_eq!(UserId::from_claim("42"), Ok(UserId(42)));
        assert!(TenantId::from_claim("99999999999999999999").is_err());
        assert!(WorkspaceId::from_claim("abc").is_err());
    }

    #[test]
    fn test_membership_lookup() {
        let identity = Identity {
            id: UserId(1),
            name: "Alice".to_string(),
            email: EmailAddress::new("alice@example.com".to_string()).unwrap(),
            password_hash: String::new(),
            memberships: vec![Membership {
                tenant_id: TenantId(7),
                workspace_id: WorkspaceId(3),
                role: Role::Editor,
            }],
        };

        assert_eq!(
            identity.membership(TenantId(7), WorkspaceId(3)).map(|m| m.role),
            Some(Role::Editor)
        );
        assert!(identity.membership(TenantId(7), WorkspaceId(4)).is_none());
    }
}
