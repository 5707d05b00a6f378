use tracing::debug;

use crate::entities::analytics::StatsSnapshot;
use crate::entities::blood_pressure::Reading;

/// Mean of `count` values summing to `sum`, rounded half up
///
/// Returns 0 for an empty set.
pub(crate) fn rounded_mean(sum: u64, count: u64) -> u16 {
    if count == 0 {
        return 0;
    }
    let mean = (2 * sum + count) / (2 * count);
    u16::try_from(mean).unwrap_or(u16::MAX)
}

/// Calculate summary statistics from readings
///
/// An empty slice yields an all-zero snapshot. Pulse is averaged over the
/// readings that carry one.
pub fn aggregate(readings: &[Reading]) -> StatsSnapshot {
    let mut stats = StatsSnapshot::default();
    if readings.is_empty() {
        return stats;
    }

    let mut systolic_sum: u64 = 0;
    let mut diastolic_sum: u64 = 0;
    let mut pulse_sum: u64 = 0;
    let mut pulse_count: u64 = 0;

    stats.min_systolic = u16::MAX;
    stats.min_diastolic = u16::MAX;

    for reading in readings {
        systolic_sum += u64::from(reading.systolic);
        diastolic_sum += u64::from(reading.diastolic);

        if let Some(pulse) = reading.pulse {
            pulse_sum += u64::from(pulse);
            pulse_count += 1;
        }

        stats.max_systolic = stats.max_systolic.max(reading.systolic);
        stats.max_diastolic = stats.max_diastolic.max(reading.diastolic);
        stats.min_systolic = stats.min_systolic.min(reading.systolic);
        stats.min_diastolic = stats.min_diastolic.min(reading.diastolic);

        stats.increment(reading.category());
    }

    let count = readings.len() as u64;
    stats.total_records = readings.len();
    stats.average_systolic = rounded_mean(systolic_sum, count);
    stats.average_diastolic = rounded_mean(diastolic_sum, count);
    stats.average_pulse = rounded_mean(pulse_sum, pulse_count);

    debug!(
        "Aggregated {} readings: {}/{} mmHg",
        stats.total_records, stats.average_systolic, stats.average_diastolic
    );

    stats
}
