// Domain services
// Classification, statistics and grouping are pure functions over readings.
// The record service owns the readings and dependents of the signed-in account.

pub mod classification;
pub mod grouping;
pub mod ids;
pub mod records;
pub mod reports;
pub mod statistics;
pub mod validation;

// Re-export the main entry points
pub use classification::{classify, color_for, color_for_label, is_hypertensive_crisis};
pub use grouping::{
    daily_averages, day_label, sort_by_time, time_of_day_averages, weekly_averages,
    windowed_averages, windowed_averages_over, within_last_days,
};
pub use records::{CascadeOutcome, RecordError, RecordService, SubjectFilter};
pub use reports::{dashboard_summary, period_report, DashboardSummary, PeriodReport, ReportConfig};
pub use statistics::aggregate;
