use std::collections::HashMap;

use async_trait::async_trait;

use crate::identity::errors::IdentityError;
use crate::identity::models::EmailAddress;
use crate::identity::models::Identity;
use crate::identity::models::UserId;
use crate::identity::ports::IdentityRepository;

/// Read-only identity store held in memory.
///
/// Stands in for the external identity store; records are loaded once at
/// startup and never change.
pub struct InMemoryIdentityRepository {
    by_id: HashMap<UserId, Identity>,
    id_by_email: HashMap<EmailAddress, UserId>,
}

impl InMemoryIdentityRepository {
    /// Index the given identities.
    ///
    /// # Errors
    /// * `Store` - Two records share an id or an email address
    pub fn new(identities: Vec<Identity>) -> Result<Self, IdentityError> {
        let mut by_id = HashMap::with_capacity(identities.len());
        let mut id_by_email = HashMap::with_capacity(identities.len());

        for identity in identities {
            if id_by_email
                .insert(identity.email.clone(), identity.id)
                .is_some()
            {
                return Err(IdentityError::Store(format!(
                    "duplicate email {}",
                    identity.email.as_str()
                )));
            }
            let id = identity.id;
            if by_id.insert(id, identity).is_some() {
                return Err(IdentityError::Store(format!("duplicate identity id {}", id)));
            }
        }

        Ok(Self { by_id, id_by_email })
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[async_trait]
impl IdentityRepository for InMemoryIdentityRepository {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Identity>, IdentityError> {
        Ok(self
            .id_by_email
            .get(email)
            .and_then(|id| self.by_id.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<Identity>, IdentityError> {
        Ok(self.by_id.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(id: i64, email: &str) -> Identity {
        Identity {
            id: UserId(id),
            name: format!("user-{}", id),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: String::new(),
            memberships: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_lookup_by_email_and_id() {
        let repository = InMemoryIdentityRepository::new(vec![
            identity(1, "alice@example.com"),
            identity(2, "bob@example.com"),
        ])
        .unwrap();

        let email = EmailAddress::new("BOB@example.com".to_string()).unwrap();
        let found = repository.find_by_email(&email).await.unwrap().unwrap();
        assert_eq!(found.id, UserId(2));

        let found = repository.find_by_id(UserId(1)).await.unwrap().unwrap();
        assert_eq!(found.email.as_str(), "alice@example.com");

        assert!(repository.find_by_id(UserId(3)).await.unwrap().is_none());
    }

    #[test]
    fn test_rejects_duplicates() {
        let result = InMemoryIdentityRepository::new(vec![
            identity(1, "alice@example.com"),
            identity(2, "alice@example.com"),
        ]);
        assert!(matches!(result, Err(IdentityError::Store(_))));

        let result = InMemoryIdentityRepository::new(vec![
            identity(1, "alice@example.com"),
            identity(1, "bob@example.com"),
        ]);
        assert!(matches!(result, Err(IdentityError::Store(_))));
    }
}
