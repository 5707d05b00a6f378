//! Derived, never-persisted views over a collection of readings

use std::fmt;

use serde::Serialize;

use super::blood_pressure::{BloodPressureCategory, CategoryColor};
use crate::services::classification::{classify, color_for};

/// Summary statistics over a set of readings
///
/// Means are rounded to the nearest integer with halves rounded up. Extrema
/// are independent: the lowest systolic and the lowest diastolic may come from
/// different readings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub total_records: usize,
    pub average_systolic: u16,
    pub average_diastolic: u16,
    /// Mean over the readings that carry a pulse, 0 if none do
    pub average_pulse: u16,
    pub min_systolic: u16,
    pub max_systolic: u16,
    pub min_diastolic: u16,
    pub max_diastolic: u16,
    pub normal_readings: usize,
    pub elevated_readings: usize,
    pub stage1_readings: usize,
    pub stage2_readings: usize,
    pub crisis_readings: usize,
    pub undefined_readings: usize,
}

impl StatsSnapshot {
    /// Number of readings in `category`
    pub fn count_for(&self, category: BloodPressureCategory) -> usize {
        match category {
            BloodPressureCategory::Normal => self.normal_readings,
            BloodPressureCategory::Elevated => self.elevated_readings,
            BloodPressureCategory::Stage1Hypertension => self.stage1_readings,
            BloodPressureCategory::Stage2Hypertension => self.stage2_readings,
            BloodPressureCategory::HypertensiveCrisis => self.crisis_readings,
            BloodPressureCategory::Undefined => self.undefined_readings,
        }
    }

    pub(crate) fn increment(&mut self, category: BloodPressureCategory) {
        let slot = match category {
            BloodPressureCategory::Normal => &mut self.normal_readings,
            BloodPressureCategory::Elevated => &mut self.elevated_readings,
            BloodPressureCategory::Stage1Hypertension => &mut self.stage1_readings,
            BloodPressureCategory::Stage2Hypertension => &mut self.stage2_readings,
            BloodPressureCategory::HypertensiveCrisis => &mut self.crisis_readings,
            BloodPressureCategory::Undefined => &mut self.undefined_readings,
        };
        *slot += 1;
    }

    /// Category of the rounded mean reading, `None` for an empty snapshot
    pub fn average_category(&self) -> Option<BloodPressureCategory> {
        (!self.is_empty()).then(|| {
            classify(
                i32::from(self.average_systolic),
                i32::from(self.average_diastolic),
            )
        })
    }

    /// Non-empty categories in order of severity, Undefined last
    pub fn distribution(&self) -> Vec<CategoryShare> {
        BloodPressureCategory::CLINICAL
            .into_iter()
            .chain(std::iter::once(BloodPressureCategory::Undefined))
            .filter_map(|category| {
                let count = self.count_for(category);
                (count > 0).then(|| CategoryShare {
                    category,
                    count,
                    color: color_for(category),
                })
            })
            .collect()
    }

    /// Whether the snapshot was computed over no readings
    pub fn is_empty(&self) -> bool {
        self.total_records == 0
    }
}

/// One slice of the category distribution chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryShare {
    pub category: BloodPressureCategory,
    pub count: usize,
    pub color: CategoryColor,
}

/// Mean systolic/diastolic of one group of readings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowAverage<K> {
    pub key: K,
    pub mean_systolic: u16,
    pub mean_diastolic: u16,
    /// Readings in the group; 0 for a zero-filled slot
    pub count: usize,
}

/// Part of the day a reading was taken in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    /// Report order
    pub const ALL: [TimeOfDay; 4] = [
        TimeOfDay::Morning,
        TimeOfDay::Afternoon,
        TimeOfDay::Evening,
        TimeOfDay::Night,
    ];

    /// Slot for an hour of the day (0-23)
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            17..=21 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Evening => "Evening",
            TimeOfDay::Night => "Night",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One of the four trailing weekly windows; week 4 is the most recent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct WeekWindow(pub u8);

impl WeekWindow {
    /// Number of trailing windows in the weekly report
    pub const COUNT: u8 = 4;

    /// Window for the `offset`-th week back from now (0 = most recent)
    pub fn from_offset(offset: u8) -> Option<Self> {
        (offset < Self::COUNT).then(|| WeekWindow(Self::COUNT - offset))
    }
}

impl fmt::Display for WeekWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Week {}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_of_day_boundaries() {
        assert_eq!(TimeOfDay::from_hour(4), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(5), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(11), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(12), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(16), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(17), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(21), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(22), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(0), TimeOfDay::Night);
    }

    #[test]
    fn test_week_window_labels() {
        assert_eq!(WeekWindow::from_offset(0), Some(WeekWindow(4)));
        assert_eq!(WeekWindow::from_offset(3), Some(WeekWindow(1)));
        assert_eq!(WeekWindow::from_offset(4), None);
        assert_eq!(WeekWindow(2).to_string(), "Week 2");
    }

    #[test]
    fn test_count_for_matches_increment() {
        let mut stats = StatsSnapshot::default();
        stats.increment(BloodPressureCategory::Stage2Hypertension);
        stats.increment(BloodPressureCategory::Stage2Hypertension);
        stats.increment(BloodPressureCategory::Normal);

        assert_eq!(stats.count_for(BloodPressureCategory::Stage2Hypertension), 2);
        assert_eq!(stats.count_for(BloodPressureCategory::Normal), 1);
        assert_eq!(stats.count_for(BloodPressureCategory::Undefined), 0);
    }

    #[test]
    fn test_distribution_skips_empty_categories() {
        let mut stats = StatsSnapshot::default();
        stats.increment(BloodPressureCategory::HypertensiveCrisis);
        stats.increment(BloodPressureCategory::Normal);
        stats.increment(BloodPressureCategory::Normal);

        let shares = stats.distribution();
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].category, BloodPressureCategory::Normal);
        assert_eq!(shares[0].count, 2);
        assert_eq!(shares[0].color, CategoryColor::Green);
        assert_eq!(shares[0].color.hex(), "#22c55e");
        assert_eq!(shares[1].category, BloodPressureCategory::HypertensiveCrisis);
        assert_eq!(shares[1].color, CategoryColor::DarkRed);
        assert_eq!(shares[1].color.hex(), "#b91c1c");
    }

    #[test]
    fn test_average_category_of_empty_snapshot() {
        assert_eq!(StatsSnapshot::default().average_category(), None);
    }
}
