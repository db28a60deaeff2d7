//! Time-series bucketing
//!
//! Rolls interval counts up into coarser buckets (hourly by default) and
//! orders bucket keys for display:
//! - keys compare as strings, so time keys must be zero-padded
//! - the [`UNKNOWN_BUCKET`] key always sorts last

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::types::IntervalRecord;

/// Key for records whose timestamp cannot be read
pub const UNKNOWN_BUCKET: &str = "Unknown";

/// One aggregated bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub key: String,
    pub total: u64,
}

/// Display ordering of bucket keys: lexicographic, `"Unknown"` last
pub fn compare_keys(a: &str, b: &str) -> Ordering {
    match (a == UNKNOWN_BUCKET, b == UNKNOWN_BUCKET) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.cmp(b),
    }
}

/// Sum record counts per key, ordered by [`compare_keys`]
pub fn bucket<F>(records: &[IntervalRecord], key_fn: F) -> Vec<Bucket>
where
    F: Fn(&IntervalRecord) -> String,
{
    let mut totals: HashMap<String, u64> = HashMap::new();
    for record in records {
        *totals.entry(key_fn(record)).or_insert(0) += record.count;
    }

    let mut buckets: Vec<Bucket> = totals
        .into_iter()
        .map(|(key, total)| Bucket { key, total })
        .collect();
    buckets.sort_by(|a, b| compare_keys(&a.key, &b.key));
    buckets
}

/// Hourly buckets keyed `"HH:00"`
pub fn bucket_hourly(records: &[IntervalRecord]) -> Vec<Bucket> {
    bucket(records, |r| hour_key(&r.end_time))
}

/// Parse `HH:MM[:SS]` into (hour, minute)
fn parse_hour_minute(time: &str) -> Option<(u32, u32)> {
    let mut parts = time.trim().split(':');
    let hour = parse_component(parts.next()?, 23)?;
    let minute = parse_component(parts.next()?, 59)?;
    if let Some(second) = parts.next() {
        parse_component(second, 59)?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some((hour, minute))
}

fn parse_component(part: &str, max: u32) -> Option<u32> {
    if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok().filter(|v| *v <= max)
}

/// Hour bucket for an interval end time: `"08:45:00"` -> `"08:00"`.
///
/// Single-digit hours are zero-padded; anything unreadable maps to
/// [`UNKNOWN_BUCKET`].
pub fn hour_key(end_time: &str) -> String {
    match parse_hour_minute(end_time) {
        Some((hour, _)) => format!("{hour:02}:00"),
        None => UNKNOWN_BUCKET.to_string(),
    }
}

/// Interval chart label: `"08:45:00"` -> `"08:45"`
pub fn minute_label(end_time: &str) -> String {
    match parse_hour_minute(end_time) {
        Some((hour, minute)) => format!("{hour:02}:{minute:02}"),
        None => end_time.trim().to_string(),
    }
}

/// Only half-hour ticks get a visible label on interval charts
pub fn is_major_tick(label: &str) -> bool {
    matches!(label.split_once(':'), Some((_, "00" | "30")))
}

/// Order arbitrary time keys (GI time slots) the same way buckets are ordered
pub fn sort_time_keys<'a, I>(keys: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut keys: Vec<&str> = keys.into_iter().collect();
    keys.sort_by(|a, b| compare_keys(a, b));
    keys
}

/// Index and value of the first maximum; `None` if empty or all zero
pub fn peak(values: &[u64]) -> Option<(usize, u64)> {
    let max = values.iter().copied().max()?;
    if max == 0 {
        return None;
    }
    values.iter().position(|v| *v == max).map(|idx| (idx, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(end_time: &str, count: u64) -> IntervalRecord {
        IntervalRecord {
            end_time: end_time.to_string(),
            count,
        }
    }

    fn as_pairs(buckets: &[Bucket]) -> Vec<(&str, u64)> {
        buckets.iter().map(|b| (b.key.as_str(), b.total)).collect()
    }

    #[test]
    fn test_hourly_scenario() {
        let records = vec![record("08:15:00", 3), record("08:45:00", 5), record("09:05:00", 2)];

        let buckets = bucket_hourly(&records);

        assert_eq!(as_pairs(&buckets), vec![("08:00", 8), ("09:00", 2)]);
    }

    #[test]
    fn test_empty_input() {
        assert!(bucket_hourly(&[]).is_empty());
    }

    #[test]
    fn test_total_is_preserved() {
        let records = vec![
            record("06:00:00", 7),
            record("garbage", 4),
            record("06:30:00", 1),
            record("23:59:59", 11),
            record("", 2),
        ];

        let buckets = bucket_hourly(&records);

        let input: u64 = records.iter().map(|r| r.count).sum();
        let output: u64 = buckets.iter().map(|b| b.total).sum();
        assert_eq!(input, output);
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let records = vec![
            record("10:15:00", 1),
            record("bad", 9),
            record("07:45:00", 2),
            record("10:30:00", 3),
        ];
        let mut reversed = records.clone();
        reversed.reverse();

        assert_eq!(bucket_hourly(&records), bucket_hourly(&reversed));
    }

    #[test]
    fn test_unknown_sorts_last() {
        let records = vec![record("x", 1), record("00:10:00", 1)];

        // "zz" > "Unknown" as strings
        let buckets = bucket(&records, |r| {
            if r.end_time == "x" { UNKNOWN_BUCKET.to_string() } else { "zz".to_string() }
        });
        assert_eq!(as_pairs(&buckets), vec![("zz", 1), (UNKNOWN_BUCKET, 1)]);

        let hourly = bucket_hourly(&records);
        assert_eq!(as_pairs(&hourly), vec![("00:00", 1), (UNKNOWN_BUCKET, 1)]);
    }

    #[test]
    fn test_hour_key() {
        assert_eq!(hour_key("08:45:00"), "08:00");
        assert_eq!(hour_key("8:15"), "08:00");
        assert_eq!(hour_key("23:59"), "23:00");
        assert_eq!(hour_key("24:00:00"), UNKNOWN_BUCKET);
        assert_eq!(hour_key("08:61:00"), UNKNOWN_BUCKET);
        assert_eq!(hour_key("0815"), UNKNOWN_BUCKET);
        assert_eq!(hour_key("Unknown"), UNKNOWN_BUCKET);
    }

    #[test]
    fn test_minute_label_and_ticks() {
        assert_eq!(minute_label("14:30:00"), "14:30");
        assert_eq!(minute_label("7:05"), "07:05");
        assert_eq!(minute_label("Unknown"), "Unknown");

        assert!(is_major_tick("14:30"));
        assert!(is_major_tick("15:00"));
        assert!(!is_major_tick("15:15"));
        assert!(!is_major_tick("Unknown"));
    }

    #[test]
    fn test_sort_time_keys() {
        let keys = ["14:30:00", "Unknown", "09:00:00", "11:15:00"];
        assert_eq!(sort_time_keys(keys), vec!["09:00:00", "11:15:00", "14:30:00", "Unknown"]);
    }

    #[test]
    fn test_peak() {
        assert_eq!(peak(&[3, 9, 2, 9]), Some((1, 9)));
        assert_eq!(peak(&[0, 0]), None);
        assert_eq!(peak(&[]), None);
    }
}
