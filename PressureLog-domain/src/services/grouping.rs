//! Sorting and bucketing of readings for trend charts
//!
//! Two policies exist for empty groups. [`windowed_averages`] omits them and is
//! used when the set of keys comes from the data (days, weeks).
//! [`windowed_averages_over`] takes a fixed enumeration of keys and reports
//! every one of them, with zero means for keys that received no readings.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Timelike, Utc};

use crate::entities::analytics::{TimeOfDay, WeekWindow, WindowAverage};
use crate::entities::blood_pressure::Reading;
use crate::services::statistics::rounded_mean;

/// Running sums for one group
#[derive(Debug, Default, Clone, Copy)]
struct Accumulator {
    systolic: u64,
    diastolic: u64,
    count: u64,
}

impl Accumulator {
    fn add(&mut self, reading: &Reading) {
        self.systolic += u64::from(reading.systolic);
        self.diastolic += u64::from(reading.diastolic);
        self.count += 1;
    }

    fn finish<K>(self, key: K) -> WindowAverage<K> {
        WindowAverage {
            key,
            mean_systolic: rounded_mean(self.systolic, self.count),
            mean_diastolic: rounded_mean(self.diastolic, self.count),
            count: self.count as usize,
        }
    }
}

/// Readings ordered by timestamp
///
/// The sort is stable: readings with equal timestamps keep their input order
/// in both directions.
pub fn sort_by_time(readings: &[Reading], ascending: bool) -> Vec<Reading> {
    let mut sorted = readings.to_vec();
    if ascending {
        sorted.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    } else {
        sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    }
    sorted
}

/// Average readings per key, in key order; keys without readings are omitted
///
/// Readings for which `key_fn` returns `None` are skipped.
pub fn windowed_averages<K, F>(readings: &[Reading], key_fn: F) -> Vec<WindowAverage<K>>
where
    K: Ord,
    F: Fn(&Reading) -> Option<K>,
{
    let mut groups: BTreeMap<K, Accumulator> = BTreeMap::new();
    for reading in readings {
        if let Some(key) = key_fn(reading) {
            groups.entry(key).or_default().add(reading);
        }
    }

    groups
        .into_iter()
        .map(|(key, acc)| acc.finish(key))
        .collect()
}

/// Average readings over a fixed list of keys, in the order given
///
/// Every key is reported; keys that received no readings have zero means and
/// a count of 0.
pub fn windowed_averages_over<K, F>(
    readings: &[Reading],
    keys: &[K],
    key_fn: F,
) -> Vec<WindowAverage<K>>
where
    K: PartialEq + Clone,
    F: Fn(&Reading) -> Option<K>,
{
    let mut slots = vec![Accumulator::default(); keys.len()];
    for reading in readings {
        let Some(key) = key_fn(reading) else {
            continue;
        };
        if let Some(index) = keys.iter().position(|candidate| *candidate == key) {
            slots[index].add(reading);
        }
    }

    keys.iter()
        .cloned()
        .zip(slots)
        .map(|(key, acc)| acc.finish(key))
        .collect()
}

/// Averages per part of the day, hours taken in `tz`
pub fn time_of_day_averages<Tz: TimeZone>(
    readings: &[Reading],
    tz: &Tz,
) -> Vec<WindowAverage<TimeOfDay>> {
    windowed_averages_over(readings, &TimeOfDay::ALL, |reading| {
        Some(TimeOfDay::from_hour(
            reading.timestamp.with_timezone(tz).hour(),
        ))
    })
}

/// Trailing week a reading falls in, if any of the last four
///
/// Window `i` covers `[now - (i+1)·7d, now - i·7d)`.
pub fn week_window(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> Option<WeekWindow> {
    (0..WeekWindow::COUNT).find_map(|offset| {
        let end = now - Duration::days(7 * i64::from(offset));
        let start = end - Duration::days(7);
        if timestamp >= start && timestamp < end {
            WeekWindow::from_offset(offset)
        } else {
            None
        }
    })
}

/// Averages over the four trailing weeks, oldest first; empty weeks are dropped
pub fn weekly_averages(readings: &[Reading], now: DateTime<Utc>) -> Vec<WindowAverage<WeekWindow>> {
    windowed_averages(readings, |reading| week_window(reading.timestamp, now))
}

/// Averages per calendar day in `tz`, chronological; days without readings are omitted
pub fn daily_averages<Tz: TimeZone>(readings: &[Reading], tz: &Tz) -> Vec<WindowAverage<NaiveDate>> {
    windowed_averages(readings, |reading| {
        Some(reading.timestamp.with_timezone(tz).date_naive())
    })
}

/// Short chart label for a day, e.g. "Oct 14"
pub fn day_label(day: NaiveDate) -> String {
    day.format("%b %-d").to_string()
}

/// Readings taken no earlier than `days` days before `now`
///
/// There is no upper bound, so readings dated after `now` are kept.
pub fn within_last_days(readings: &[Reading], now: DateTime<Utc>, days: u32) -> Vec<Reading> {
    let cutoff = now - Duration::days(i64::from(days));
    readings
        .iter()
        .filter(|reading| reading.timestamp >= cutoff)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixture_now, reading_at, reading_at_time};
    use chrono::FixedOffset;

    #[test]
    fn test_sort_is_stable_in_both_directions() {
        let now = fixture_now();
        let mut first = reading_at_time(120, 80, now);
        first.id = "first".to_string();
        let mut second = reading_at_time(130, 85, now);
        second.id = "second".to_string();
        let older = reading_at_time(110, 70, now - Duration::hours(3));
        let readings = vec![first, older, second];

        let ascending = sort_by_time(&readings, true);
        let ids: Vec<&str> = ascending.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids[1..], ["first", "second"]);

        let descending = sort_by_time(&readings, false);
        let ids: Vec<&str> = descending.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids[..2], ["first", "second"]);
    }

    #[test]
    fn test_sort_is_idempotent_and_reversible() {
        let readings = vec![
            reading_at(120, 80, 3),
            reading_at(121, 80, 0),
            reading_at(122, 80, 5),
            reading_at(123, 80, 1),
        ];

        let ascending = sort_by_time(&readings, true);
        assert_eq!(sort_by_time(&ascending, true), ascending);

        let mut reversed = sort_by_time(&readings, false);
        reversed.reverse();
        assert_eq!(reversed, ascending);
        assert!(ascending.windows(2).all(|pair| pair[0].timestamp <= pair[1].timestamp));
    }

    #[test]
    fn test_daily_average_of_two_readings() {
        let now = fixture_now();
        let readings = vec![
            reading_at_time(120, 80, now),
            reading_at_time(130, 90, now + Duration::minutes(30)),
        ];

        let days = daily_averages(&readings, &Utc);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].mean_systolic, 125);
        assert_eq!(days[0].mean_diastolic, 85);
        assert_eq!(days[0].count, 2);
    }

    #[test]
    fn test_daily_averages_omit_empty_days_and_run_chronologically() {
        let readings = vec![reading_at(120, 80, 0), reading_at(140, 90, 4), reading_at(130, 84, 2)];

        let days = daily_averages(&readings, &Utc);
        assert_eq!(days.len(), 3);
        assert!(days.windows(2).all(|pair| pair[0].key < pair[1].key));
        assert_eq!(days[0].mean_systolic, 140);
    }

    #[test]
    fn test_day_label() {
        let day = NaiveDate::from_ymd_opt(2024, 10, 4).unwrap();
        assert_eq!(day_label(day), "Oct 4");
    }

    #[test]
    fn test_time_of_day_zero_fills_missing_slots() {
        let base = Utc.with_ymd_and_hms(2024, 10, 14, 0, 0, 0).unwrap();
        let readings = vec![
            reading_at_time(120, 80, base + Duration::hours(7)),
            reading_at_time(130, 90, base + Duration::hours(9)),
            reading_at_time(140, 95, base + Duration::hours(23)),
        ];

        let slots = time_of_day_averages(&readings, &Utc);
        let keys: Vec<TimeOfDay> = slots.iter().map(|slot| slot.key).collect();
        assert_eq!(keys, TimeOfDay::ALL);

        assert_eq!(slots[0].count, 2);
        assert_eq!(slots[0].mean_systolic, 125);
        assert_eq!(slots[1].count, 0);
        assert_eq!(slots[1].mean_systolic, 0);
        assert_eq!(slots[2].count, 0);
        assert_eq!(slots[3].count, 1);
    }

    #[test]
    fn test_time_of_day_uses_local_hours() {
        let tz = FixedOffset::east_opt(5 * 3600).unwrap();
        // 02:00 UTC is 07:00 at +05:00
        let reading = reading_at_time(
            120,
            80,
            Utc.with_ymd_and_hms(2024, 10, 14, 2, 0, 0).unwrap(),
        );

        let slots = time_of_day_averages(&[reading], &tz);
        assert_eq!(slots[0].key, TimeOfDay::Morning);
        assert_eq!(slots[0].count, 1);
    }

    #[test]
    fn test_week_window_boundaries() {
        let now = fixture_now();
        let week = Duration::days(7);

        assert_eq!(week_window(now - Duration::seconds(1), now), Some(WeekWindow(4)));
        assert_eq!(week_window(now, now), None);
        assert_eq!(week_window(now - week, now), Some(WeekWindow(4)));
        assert_eq!(
            week_window(now - week - Duration::seconds(1), now),
            Some(WeekWindow(3))
        );
        assert_eq!(week_window(now - week * 4, now), Some(WeekWindow(1)));
        assert_eq!(week_window(now - week * 4 - Duration::seconds(1), now), None);
    }

    #[test]
    fn test_weekly_averages_drop_empty_weeks() {
        let now = fixture_now();
        let readings = vec![
            reading_at(120, 80, 1),
            reading_at(130, 90, 2),
            reading_at(150, 95, 22),
            reading_at(100, 60, 40),
        ];

        let weeks = weekly_averages(&readings, now);
        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[0].key.to_string(), "Week 1");
        assert_eq!(weeks[0].mean_systolic, 150);
        assert_eq!(weeks[1].key.to_string(), "Week 4");
        assert_eq!(weeks[1].mean_systolic, 125);
        assert_eq!(weeks[1].count, 2);
    }

    #[test]
    fn test_within_last_days() {
        let now = fixture_now();
        let readings = vec![
            reading_at(120, 80, 0),
            reading_at(120, 80, 29),
            reading_at(120, 80, 31),
            reading_at_time(120, 80, now + Duration::hours(2)),
        ];

        assert_eq!(within_last_days(&readings, now, 30).len(), 3);
    }
}
