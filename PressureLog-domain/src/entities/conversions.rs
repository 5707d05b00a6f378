use chrono::{DateTime, SecondsFormat, Utc};
use pressure_log_data::models::{StoredDependent, StoredReading, StoredUser};
use thiserror::Error;

use crate::entities::account::User;
use crate::entities::blood_pressure::{Reading, SubjectKind};
use crate::entities::dependent::Dependent;

/// Conversion functions between domain entities and storage models
/// These functions follow the pattern convert_to_[target_layer]_[model_name]

/// A stored record that cannot be represented as a domain entity
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Invalid timestamp '{value}' on record {id}")]
    InvalidTimestamp { id: String, value: String },

    #[error("Unknown subject kind '{value}' on record {id}")]
    UnknownSubjectKind { id: String, value: String },
}

/// Render an instant the way it is stored
///
/// Sub-second digits are only written when present so parsing the result
/// yields the same instant.
pub fn format_timestamp(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parse a stored RFC 3339 timestamp into UTC
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|instant| instant.with_timezone(&Utc))
}

/// Convert from storage model to domain entity for a reading
pub fn convert_to_domain_reading(stored: StoredReading) -> Result<Reading, ConversionError> {
    let timestamp = parse_timestamp(&stored.timestamp).ok_or_else(|| {
        ConversionError::InvalidTimestamp {
            id: stored.id.clone(),
            value: stored.timestamp.clone(),
        }
    })?;
    let subject_kind = SubjectKind::from_marker(&stored.subject_kind).ok_or_else(|| {
        ConversionError::UnknownSubjectKind {
            id: stored.id.clone(),
            value: stored.subject_kind.clone(),
        }
    })?;

    Ok(Reading {
        id: stored.id,
        systolic: stored.systolic,
        diastolic: stored.diastolic,
        pulse: stored.pulse,
        timestamp,
        notes: stored.notes,
        owner_id: stored.owner_id,
        subject_id: stored.subject_id,
        subject_kind,
    })
}

/// Convert from domain entity to storage model for a reading
pub fn convert_to_data_reading(reading: &Reading) -> StoredReading {
    StoredReading {
        id: reading.id.clone(),
        systolic: reading.systolic,
        diastolic: reading.diastolic,
        pulse: reading.pulse,
        timestamp: format_timestamp(&reading.timestamp),
        notes: reading.notes.clone(),
        owner_id: reading.owner_id.clone(),
        subject_id: reading.subject_id.clone(),
        subject_kind: reading.subject_kind.as_str().to_string(),
    }
}

/// Convert from storage model to domain entity for a dependent
pub fn convert_to_domain_dependent(stored: StoredDependent) -> Dependent {
    Dependent {
        id: stored.id,
        name: stored.name,
        relationship: stored.relationship,
        age: stored.age,
        gender: stored.gender,
        owner_id: stored.owner_id,
    }
}

/// Convert from domain entity to storage model for a dependent
pub fn convert_to_data_dependent(dependent: &Dependent) -> StoredDependent {
    StoredDependent {
        id: dependent.id.clone(),
        name: dependent.name.clone(),
        relationship: dependent.relationship.clone(),
        age: dependent.age,
        gender: dependent.gender.clone(),
        owner_id: dependent.owner_id.clone(),
    }
}

/// Convert from the session snapshot to a domain user
pub fn convert_to_domain_user(stored: StoredUser) -> Result<User, ConversionError> {
    let created_at = parse_timestamp(&stored.created_at).ok_or_else(|| {
        ConversionError::InvalidTimestamp {
            id: stored.id.clone(),
            value: stored.created_at.clone(),
        }
    })?;

    Ok(User {
        id: stored.id,
        name: stored.name,
        email: stored.email,
        created_at,
    })
}

/// Convert from domain user to the session snapshot
pub fn convert_to_data_user(user: &User) -> StoredUser {
    StoredUser {
        id: user.id.clone(),
        name: user.name.clone(),
        email: user.email.clone(),
        created_at: format_timestamp(&user.created_at),
    }
}
