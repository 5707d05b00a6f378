//! Store keys used by the application

/// Key holding the signed-in user
pub const SESSION_KEY: &str = "user-session";

/// Key holding the list of registered accounts
pub const REGISTERED_USERS_KEY: &str = "registered-users";

/// Key holding one account's readings
pub fn records_key(owner_id: &str) -> String {
    format!("records-{}", owner_id)
}

/// Key holding one account's dependents
pub fn dependents_key(owner_id: &str) -> String {
    format!("dependents-{}", owner_id)
}
