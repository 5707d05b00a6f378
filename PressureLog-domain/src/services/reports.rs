//! Dashboard and period report builders

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::analytics::{CategoryShare, StatsSnapshot, TimeOfDay, WeekWindow, WindowAverage};
use crate::entities::blood_pressure::{BloodPressureCategory, Reading};
use crate::entities::dependent::Dependent;
use crate::services::grouping::{
    daily_averages, sort_by_time, time_of_day_averages, weekly_averages, within_last_days,
};
use crate::services::statistics::aggregate;

const DEFAULT_REPORT_WINDOW_DAYS: u32 = 30;
const DEFAULT_RECENT_LIMIT: usize = 5;
const DEFAULT_TREND_LIMIT: usize = 14;

/// Sizes of the windows used by the report builders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Days covered by the period report
    pub report_window_days: u32,
    /// Newest readings listed on the dashboard
    pub recent_limit: usize,
    /// Most recent readings feeding the dashboard trend chart
    pub trend_limit: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            report_window_days: DEFAULT_REPORT_WINDOW_DAYS,
            recent_limit: DEFAULT_RECENT_LIMIT,
            trend_limit: DEFAULT_TREND_LIMIT,
        }
    }
}

/// Everything the dashboard shows
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub stats: StatsSnapshot,
    pub average_category: Option<BloodPressureCategory>,
    pub dependent_count: usize,
    /// Newest first
    pub recent: Vec<Reading>,
    pub distribution: Vec<CategoryShare>,
    /// Daily means of the most recent readings, oldest day first
    pub trend: Vec<WindowAverage<NaiveDate>>,
}

/// Build the dashboard from all readings of an account
pub fn dashboard_summary<Tz: TimeZone>(
    readings: &[Reading],
    dependents: &[Dependent],
    tz: &Tz,
    config: &ReportConfig,
) -> DashboardSummary {
    let stats = aggregate(readings);

    let newest_first = sort_by_time(readings, false);
    let recent = newest_first
        .iter()
        .take(config.recent_limit)
        .cloned()
        .collect();

    let trend_source: Vec<Reading> = newest_first
        .into_iter()
        .take(config.trend_limit)
        .collect();

    DashboardSummary {
        stats,
        average_category: stats.average_category(),
        dependent_count: dependents.len(),
        recent,
        distribution: stats.distribution(),
        trend: daily_averages(&trend_source, tz),
    }
}

/// Analysis of the readings in the report window
#[derive(Debug, Clone, Serialize)]
pub struct PeriodReport {
    pub window_days: u32,
    pub generated_at: DateTime<Utc>,
    pub stats: StatsSnapshot,
    pub average_category: Option<BloodPressureCategory>,
    /// Oldest week first, empty weeks omitted
    pub weekly: Vec<WindowAverage<WeekWindow>>,
    /// One entry per part of the day, in [`TimeOfDay::ALL`] order
    pub time_of_day: Vec<WindowAverage<TimeOfDay>>,
}

impl PeriodReport {
    /// Whether any part of the day received a reading
    pub fn has_time_of_day_data(&self) -> bool {
        self.time_of_day.iter().any(|slot| slot.count > 0)
    }
}

/// Build the report over the last `report_window_days` days
pub fn period_report<Tz: TimeZone>(
    readings: &[Reading],
    now: DateTime<Utc>,
    tz: &Tz,
    config: &ReportConfig,
) -> PeriodReport {
    let in_window = within_last_days(readings, now, config.report_window_days);
    let stats = aggregate(&in_window);

    PeriodReport {
        window_days: config.report_window_days,
        generated_at: now,
        stats,
        average_category: stats.average_category(),
        weekly: weekly_averages(&in_window, now),
        time_of_day: time_of_day_averages(&in_window, tz),
    }
}
