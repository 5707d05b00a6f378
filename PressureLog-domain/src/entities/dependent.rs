use serde::{Deserialize, Serialize};
use validator::Validate;

/// A family member whose readings are tracked under an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependent {
    pub id: String,
    pub name: String,
    /// Free-form label such as "Spouse" or "Son"
    pub relationship: String,
    pub age: Option<u8>,
    pub gender: Option<String>,
    /// Owning account
    pub owner_id: String,
}

/// Input for adding a dependent
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewDependent {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,

    #[validate(length(min = 1, message = "Relationship is required"))]
    pub relationship: String,

    #[validate(range(min = 1, max = 119, message = "Age must be between 1 and 119"))]
    pub age: Option<u8>,

    pub gender: Option<String>,
}

/// Partial update of a dependent
///
/// `None` leaves a field unchanged. For `age` and `gender`, `Some(None)` clears
/// the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct DependentUpdate {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, message = "Relationship is required"))]
    pub relationship: Option<String>,

    #[validate(range(min = 1, max = 119, message = "Age must be between 1 and 119"))]
    pub age: Option<Option<u8>>,

    pub gender: Option<Option<String>>,
}

impl Dependent {
    /// Apply a partial update in place
    pub fn apply(&mut self, update: DependentUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(relationship) = update.relationship {
            self.relationship = relationship;
        }
        if let Some(age) = update.age {
            self.age = age;
        }
        if let Some(gender) = update.gender {
            self.gender = gender;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_bounds() {
        let mut member = NewDependent {
            name: "Sarah Doe".to_string(),
            relationship: "Spouse".to_string(),
            age: Some(35),
            gender: Some("Female".to_string()),
        };
        assert!(member.validate().is_ok());

        member.age = Some(0);
        assert!(member.validate().is_err());

        member.age = Some(120);
        assert!(member.validate().is_err());

        member.age = None;
        assert!(member.validate().is_ok());
    }

    #[test]
    fn test_apply_keeps_unset_fields() {
        let mut member = Dependent {
            id: "family-1".to_string(),
            name: "Michael Doe".to_string(),
            relationship: "Son".to_string(),
            age: Some(12),
            gender: Some("Male".to_string()),
            owner_id: "user-1".to_string(),
        };

        member.apply(DependentUpdate {
            age: Some(Some(13)),
            ..DependentUpdate::default()
        });

        assert_eq!(member.age, Some(13));
        assert_eq!(member.gender.as_deref(), Some("Male"));
        assert_eq!(member.name, "Michael Doe");
        assert_eq!(member.id, "family-1");
    }

    #[test]
    fn test_apply_clears_optional_fields() {
        let mut member = Dependent {
            id: "family-1".to_string(),
            name: "Sarah Doe".to_string(),
            relationship: "Spouse".to_string(),
            age: Some(35),
            gender: Some("Female".to_string()),
            owner_id: "user-1".to_string(),
        };

        member.apply(DependentUpdate {
            age: Some(None),
            gender: Some(None),
            ..DependentUpdate::default()
        });

        assert_eq!(member.age, None);
        assert_eq!(member.gender, None);
        assert_eq!(member.relationship, "Spouse");
    }

    #[test]
    fn test_update_age_bounds() {
        let mut update = DependentUpdate {
            age: Some(Some(120)),
            ..DependentUpdate::default()
        };
        assert!(update.validate().is_err());

        update.age = Some(None);
        assert!(update.validate().is_ok());
    }
}
