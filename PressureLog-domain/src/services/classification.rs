use crate::entities::blood_pressure::{BloodPressureCategory, CategoryColor, Reading};

/// Categorize blood pressure based on measurements
///
/// Rules are checked in order and the first match wins. Every integer pair
/// gets a category; `Undefined` is the fallback when no rule applies.
pub fn classify(systolic: i32, diastolic: i32) -> BloodPressureCategory {
    if systolic >= 180 || diastolic >= 120 {
        BloodPressureCategory::HypertensiveCrisis
    } else if systolic >= 140 || diastolic >= 90 {
        BloodPressureCategory::Stage2Hypertension
    } else if (130..140).contains(&systolic) || (80..90).contains(&diastolic) {
        BloodPressureCategory::Stage1Hypertension
    } else if (120..130).contains(&systolic) && diastolic < 80 {
        BloodPressureCategory::Elevated
    } else if systolic < 120 && diastolic < 80 {
        BloodPressureCategory::Normal
    } else {
        BloodPressureCategory::Undefined
    }
}

/// Display color for a category
pub fn color_for(category: BloodPressureCategory) -> CategoryColor {
    match category {
        BloodPressureCategory::Normal => CategoryColor::Green,
        BloodPressureCategory::Elevated => CategoryColor::Yellow,
        BloodPressureCategory::Stage1Hypertension => CategoryColor::Orange,
        BloodPressureCategory::Stage2Hypertension => CategoryColor::Red,
        BloodPressureCategory::HypertensiveCrisis => CategoryColor::DarkRed,
        BloodPressureCategory::Undefined => CategoryColor::Gray,
    }
}

/// Display color for a category label; unknown labels are gray
pub fn color_for_label(label: &str) -> CategoryColor {
    BloodPressureCategory::from_label(label)
        .map(color_for)
        .unwrap_or(CategoryColor::Gray)
}

/// Check if a reading indicates a hypertensive crisis
pub fn is_hypertensive_crisis(reading: &Reading) -> bool {
    reading.category() == BloodPressureCategory::HypertensiveCrisis
}
