use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::services::classification::classify;

/// Whose measurement a reading is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubjectKind {
    /// The account owner
    #[serde(rename = "self")]
    Owner,
    /// A dependent of the account owner
    #[serde(rename = "dependent")]
    Dependent,
}

impl SubjectKind {
    /// Storage marker for this kind
    pub fn as_str(self) -> &'static str {
        match self {
            SubjectKind::Owner => pressure_log_data::models::blood_pressure::SUBJECT_KIND_SELF,
            SubjectKind::Dependent => pressure_log_data::models::blood_pressure::SUBJECT_KIND_DEPENDENT,
        }
    }

    /// Parse a storage marker; older snapshots use "user" and "family"
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "self" | "user" => Some(SubjectKind::Owner),
            "dependent" | "family" => Some(SubjectKind::Dependent),
            _ => None,
        }
    }
}

impl fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain model for a blood pressure reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    /// Unique identifier for the reading
    pub id: String,

    /// Systolic blood pressure (the higher number)
    pub systolic: u16,

    /// Diastolic blood pressure (the lower number)
    pub diastolic: u16,

    /// Optional pulse rate in beats per minute
    pub pulse: Option<u16>,

    /// When the reading was taken
    pub timestamp: DateTime<Utc>,

    /// Optional notes about the reading
    pub notes: Option<String>,

    /// Account that recorded the reading
    pub owner_id: String,

    /// Person that was measured
    pub subject_id: String,

    /// Namespace of `subject_id`
    pub subject_kind: SubjectKind,
}

impl Reading {
    /// Clinical category of this reading
    pub fn category(&self) -> BloodPressureCategory {
        classify(i32::from(self.systolic), i32::from(self.diastolic))
    }
}

/// Input for recording a new reading
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewReading {
    /// Systolic blood pressure (the higher number)
    #[validate(range(min = 1, max = 299, message = "Systolic must be between 1 and 299"))]
    pub systolic: u16,

    /// Diastolic blood pressure (the lower number)
    #[validate(range(min = 1, max = 199, message = "Diastolic must be between 1 and 199"))]
    pub diastolic: u16,

    /// Optional pulse rate in beats per minute
    #[validate(range(min = 1, max = 249, message = "Pulse must be between 1 and 249"))]
    pub pulse: Option<u16>,

    /// When the reading was taken
    pub timestamp: DateTime<Utc>,

    /// Optional notes about the reading
    #[validate(length(max = 1000, message = "Notes cannot exceed 1000 characters"))]
    pub notes: Option<String>,

    /// Person that was measured
    pub subject_id: String,

    /// Namespace of `subject_id`
    pub subject_kind: SubjectKind,
}

/// Blood pressure category based on measurements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BloodPressureCategory {
    /// Systolic < 120 and diastolic < 80
    Normal,

    /// Systolic 120-129 and diastolic < 80
    Elevated,

    /// Systolic 130-139 or diastolic 80-89
    Stage1Hypertension,

    /// Systolic ≥ 140 or diastolic ≥ 90
    Stage2Hypertension,

    /// Systolic ≥ 180 or diastolic ≥ 120
    HypertensiveCrisis,

    /// No rule matched
    Undefined,
}

impl BloodPressureCategory {
    /// The five clinical categories in order of severity
    pub const CLINICAL: [BloodPressureCategory; 5] = [
        BloodPressureCategory::Normal,
        BloodPressureCategory::Elevated,
        BloodPressureCategory::Stage1Hypertension,
        BloodPressureCategory::Stage2Hypertension,
        BloodPressureCategory::HypertensiveCrisis,
    ];

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            BloodPressureCategory::Normal => "Normal",
            BloodPressureCategory::Elevated => "Elevated",
            BloodPressureCategory::Stage1Hypertension => "Stage 1 Hypertension",
            BloodPressureCategory::Stage2Hypertension => "Stage 2 Hypertension",
            BloodPressureCategory::HypertensiveCrisis => "Hypertensive Crisis",
            BloodPressureCategory::Undefined => "Undefined",
        }
    }

    /// Parse a display label
    pub fn from_label(label: &str) -> Option<Self> {
        Self::CLINICAL
            .into_iter()
            .chain(std::iter::once(BloodPressureCategory::Undefined))
            .find(|category| category.label() == label)
    }
}

impl fmt::Display for BloodPressureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display color associated with a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryColor {
    Green,
    Yellow,
    Orange,
    Red,
    DarkRed,
    Gray,
}

impl CategoryColor {
    /// Style token used by the presentation layer
    pub fn token(self) -> &'static str {
        match self {
            CategoryColor::Green => "bg-green-500",
            CategoryColor::Yellow => "bg-yellow-400",
            CategoryColor::Orange => "bg-orange-500",
            CategoryColor::Red => "bg-red-500",
            CategoryColor::DarkRed => "bg-red-700",
            CategoryColor::Gray => "bg-gray-400",
        }
    }

    /// Chart fill color
    pub fn hex(self) -> &'static str {
        match self {
            CategoryColor::Green => "#22c55e",
            CategoryColor::Yellow => "#facc15",
            CategoryColor::Orange => "#f97316",
            CategoryColor::Red => "#ef4444",
            CategoryColor::DarkRed => "#b91c1c",
            CategoryColor::Gray => "#9ca3af",
        }
    }
}
