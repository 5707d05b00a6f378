use serde::{Deserialize, Serialize};

/// Subject kind marker for the account owner
pub const SUBJECT_KIND_SELF: &str = "self";

/// Subject kind marker for a dependent
pub const SUBJECT_KIND_DEPENDENT: &str = "dependent";

/// Storage model for a blood pressure reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredReading {
    /// Unique identifier for the reading
    pub id: String,

    /// Systolic blood pressure (the higher number)
    pub systolic: u16,

    /// Diastolic blood pressure (the lower number)
    pub diastolic: u16,

    /// Optional pulse rate in beats per minute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pulse: Option<u16>,

    /// When the reading was taken (RFC 3339)
    pub timestamp: String,

    /// Optional notes about the reading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Account that recorded the reading
    pub owner_id: String,

    /// Person that was measured
    pub subject_id: String,

    /// Either "self" or "dependent"
    pub subject_kind: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_wire_format() {
        let reading = StoredReading {
            id: "bp-1".to_string(),
            systolic: 120,
            diastolic: 80,
            pulse: None,
            timestamp: "2024-03-01T08:30:00+00:00".to_string(),
            notes: Some("Before breakfast".to_string()),
            owner_id: "user-1".to_string(),
            subject_id: "user-1".to_string(),
            subject_kind: SUBJECT_KIND_SELF.to_string(),
        };

        let json = serde_json::to_value(&reading).unwrap();
        assert_eq!(json["ownerId"], "user-1");
        assert_eq!(json["subjectKind"], "self");
        assert!(json.get("pulse").is_none());

        let parsed: StoredReading = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, reading);
    }
}
