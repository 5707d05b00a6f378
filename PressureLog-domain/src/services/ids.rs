use chrono::Utc;
use uuid::Uuid;

/// Identifier prefix for readings
pub const READING_ID_PREFIX: &str = "bp";
/// Identifier prefix for dependents
pub const DEPENDENT_ID_PREFIX: &str = "family";
/// Identifier prefix for registered accounts
pub const USER_ID_PREFIX: &str = "user";

/// Generate an identifier of the form `<prefix>-<unix millis>-<random>`
pub fn generate_unique_id(prefix: &str) -> String {
    format!(
        "{}-{}-{}",
        prefix,
        Utc::now().timestamp_millis(),
        Uuid::new_v4().simple()
    )
}
