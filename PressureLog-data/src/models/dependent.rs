use serde::{Deserialize, Serialize};

/// Storage model for a family member tracked under an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDependent {
    /// Unique identifier for the dependent
    pub id: String,

    /// Display name
    pub name: String,

    /// Free-form relationship label (e.g. "Spouse")
    pub relationship: String,

    /// Age in years
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,

    /// Free-form gender label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    /// Owning account
    pub owner_id: String,
}
