use serde::Serialize;

use crate::identity::models::Identity;

pub mod login;
pub mod logout;
pub mod me;
pub mod refresh;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<&Identity> for UserData {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id.0,
            name: identity.name.clone(),
            email: identity.email.as_str().to_string(),
        }
    }
}
