use serde::{Deserialize, Serialize};

/// Credential record kept in the registered users list
///
/// The password is stored and compared in plaintext. This is not a security
/// model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAccount {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    /// Creation time (RFC 3339)
    pub created_at: String,
}

/// Account snapshot kept under the session key, without credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredUser {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Creation time (RFC 3339)
    pub created_at: String,
}

impl StoredAccount {
    /// Strip the credentials for the session snapshot
    pub fn to_user(&self) -> StoredUser {
        StoredUser {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            created_at: self.created_at.clone(),
        }
    }
}
