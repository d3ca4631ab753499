use crate::models::{CurrentStatistics, ExercisesStatistics, FinishedActivity, FullStatistics};
use crate::tracker::date_key;
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::{BTreeMap, HashSet};

const STREAK_SCAN_DAYS: i64 = 365;

pub fn current_statistics(history: &[FinishedActivity], now: NaiveDate) -> CurrentStatistics {
    let week_from = date_key(week_start(now));
    let today = date_key(now);
    let month_prefix = format!("{:04}-{:02}", now.year(), now.month());
    let year_prefix = format!("{:04}", now.year());

    let mut stats = CurrentStatistics::default();
    for entry in active(history) {
        let date = entry.date.as_str();
        if date >= week_from.as_str() && date <= today.as_str() {
            stats.week.record(&entry.activity_type);
        }
        if date.starts_with(&month_prefix) {
            stats.month.record(&entry.activity_type);
        }
        if date.starts_with(&year_prefix) {
            stats.year.record(&entry.activity_type);
        }
    }
    stats.streak = streak(history, now);
    stats
}

/// Consecutive days ending at `now` with at least one completion.
pub fn streak(history: &[FinishedActivity], now: NaiveDate) -> u32 {
    let days: HashSet<&str> = active(history).map(|entry| entry.date.as_str()).collect();

    let mut count = 0;
    for offset in 0..STREAK_SCAN_DAYS {
        let day = date_key(now - Duration::days(offset));
        if !days.contains(day.as_str()) {
            break;
        }
        count += 1;
    }
    count
}

pub fn full_statistics(history: &[FinishedActivity]) -> FullStatistics {
    let mut stats = FullStatistics::default();
    for entry in active(history) {
        let date = entry.date.as_str();
        bucket(&mut stats.weekly, date).record(&entry.activity_type);
        if let Some(month) = date.get(..7) {
            bucket(&mut stats.monthly, month).record(&entry.activity_type);
        }
        if let Some(year) = date.get(..4) {
            bucket(&mut stats.yearly, year).record(&entry.activity_type);
        }
    }
    stats
}

fn bucket<'a>(
    map: &'a mut BTreeMap<String, ExercisesStatistics>,
    key: &str,
) -> &'a mut ExercisesStatistics {
    map.entry(key.to_string()).or_default()
}

fn active(history: &[FinishedActivity]) -> impl Iterator<Item = &FinishedActivity> {
    history.iter().filter(|entry| !entry.is_canceled())
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(date: &str, activity_type: &str, id: u32) -> FinishedActivity {
        FinishedActivity {
            date: date.to_string(),
            activity_type: activity_type.to_string(),
            id,
            timestamp: 0,
            canceled: None,
        }
    }

    fn fixture() -> Vec<FinishedActivity> {
        vec![
            entry("2025-04-03", "stretching", 12),
            entry("2026-01-05", "stretching", 12),
            entry("2026-02-08", "stretching", 12),
            entry("2026-02-09", "fitness", 1),
            entry("2026-02-10", "fitness", 1),
        ]
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn current_statistics_windows() {
        let stats = current_statistics(&fixture(), day(2026, 2, 15));

        assert_eq!(stats.week.total, 2);
        assert_eq!(stats.week.by_type.get("fitness"), Some(&2));
        assert_eq!(stats.week.by_type.get("stretching"), None);
        assert_eq!(stats.month.total, 3);
        assert_eq!(stats.year.total, 4);
        assert_eq!(stats.year.by_type.get("stretching"), Some(&2));
        assert_eq!(stats.streak, 0);
    }

    #[test]
    fn empty_history_is_all_zero() {
        let stats = current_statistics(&[], day(2026, 2, 15));
        assert_eq!(stats, CurrentStatistics::default());
    }

    #[test]
    fn week_ignores_days_after_now() {
        let history = vec![entry("2026-02-11", "fitness", 3), entry("2026-02-12", "fitness", 5)];
        let stats = current_statistics(&history, day(2026, 2, 11));
        assert_eq!(stats.week.total, 1);
    }

    #[test]
    fn streak_counts_only_unbroken_tail() {
        let now = day(2026, 2, 15);
        assert_eq!(streak(&[entry("2026-02-15", "fitness", 1)], now), 1);

        let gap = vec![
            entry("2026-02-13", "stretching", 12),
            entry("2026-02-15", "fitness", 1),
        ];
        assert_eq!(streak(&gap, now), 1);

        let run = vec![
            entry("2026-02-13", "stretching", 12),
            entry("2026-02-14", "fitness", 1),
            entry("2026-02-14", "stretching", 14),
            entry("2026-02-15", "fitness", 3),
        ];
        assert_eq!(streak(&run, now), 3);
    }

    #[test]
    fn streak_scan_stops_after_a_year() {
        let now = day(2026, 2, 15);
        let history: Vec<FinishedActivity> = (0..400)
            .map(|offset| {
                let date = date_key(now - Duration::days(offset));
                entry(&date, "fitness", 1)
            })
            .collect();
        assert_eq!(streak(&history, now), 365);
        assert_eq!(current_statistics(&history, now).streak, 365);
    }

    #[test]
    fn streak_crosses_month_boundary() {
        let history = vec![
            entry("2026-01-31", "fitness", 1),
            entry("2026-02-01", "stretching", 12),
        ];
        assert_eq!(streak(&history, day(2026, 2, 1)), 2);
    }

    #[test]
    fn canceled_entries_are_excluded() {
        let mut history = vec![entry("2026-02-14", "fitness", 1), entry("2026-02-15", "fitness", 3)];
        history[1].canceled = Some(true);

        let stats = current_statistics(&history, day(2026, 2, 15));
        assert_eq!(stats.week.total, 1);
        assert_eq!(stats.streak, 0);
    }

    #[test]
    fn full_statistics_buckets_by_period() {
        let stats = full_statistics(&fixture());

        assert_eq!(stats.weekly.len(), 5);
        assert_eq!(stats.monthly.get("2026-02").map(|s| s.total), Some(3));
        assert_eq!(stats.monthly.get("2025-04").map(|s| s.total), Some(1));
        assert_eq!(stats.yearly.get("2026").map(|s| s.total), Some(4));
        assert_eq!(
            stats.yearly.get("2026").and_then(|s| s.by_type.get("fitness")),
            Some(&2)
        );
    }
}
