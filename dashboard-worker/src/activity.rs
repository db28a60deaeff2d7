//! Bin activity normalization for the heatmap
//!
//! Maps raw activity counts onto a low / medium / high scale relative to
//! the observed range. Locations without activity get no level at all,
//! which the heatmap renders differently from "low".

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{ActivityOverlay, BinActivity};

const LOW_CEILING_PCT: f64 = 33.33;
const MEDIUM_CEILING_PCT: f64 = 66.66;

/// Activity level shown on a heatmap cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Low,
    Medium,
    High,
}

impl ActivityLevel {
    /// Classify a percentage of the observed range
    pub fn from_percent(pct: f64) -> Self {
        if pct < LOW_CEILING_PCT {
            ActivityLevel::Low
        } else if pct < MEDIUM_CEILING_PCT {
            ActivityLevel::Medium
        } else {
            ActivityLevel::High
        }
    }
}

/// Observed activity range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRange {
    pub min: u64,
    pub max: u64,
}

impl ActivityRange {
    pub fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    /// Range over all counts; `0..0` when empty
    pub fn observe<'a, I>(counts: I) -> Self
    where
        I: IntoIterator<Item = &'a u64>,
    {
        let mut iter = counts.into_iter().copied();
        let Some(first) = iter.next() else {
            return Self::new(0, 0);
        };
        iter.fold(Self::new(first, first), |range, c| {
            Self::new(range.min.min(c), range.max.max(c))
        })
    }

    /// Range from the overlay, falling back to its data for missing bounds
    pub fn for_overlay(overlay: &ActivityOverlay) -> Self {
        let observed = Self::observe(overlay.activity_data.iter().map(|a| &a.activity_count));
        Self::new(
            overlay.min_activity.unwrap_or(observed.min),
            overlay.max_activity.unwrap_or(observed.max),
        )
    }

    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    /// Level for one count; `None` means no activity
    pub fn level(&self, count: u64) -> Option<ActivityLevel> {
        if count == 0 {
            return None;
        }
        if self.is_degenerate() {
            return Some(ActivityLevel::Low);
        }
        let span = self.max as f64 - self.min as f64;
        let pct = ((count as f64 - self.min as f64) / span * 100.0).clamp(0.0, 100.0);
        Some(ActivityLevel::from_percent(pct))
    }
}

/// Level per location; locations with no activity are left out
pub fn normalize(counts: &BTreeMap<String, u64>, range: ActivityRange) -> BTreeMap<String, ActivityLevel> {
    counts
        .iter()
        .filter_map(|(location, count)| range.level(*count).map(|level| (location.clone(), level)))
        .collect()
}

/// Counts per location from the overlay (duplicates are summed)
pub fn counts_by_location(overlay: &ActivityOverlay) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    for activity in &overlay.activity_data {
        *counts.entry(activity.location.clone()).or_insert(0) += activity.activity_count;
    }
    counts
}

/// Bin prefix of a source bin: leading letters followed by digits.
///
/// `"C24490D"` -> `"C24490"`. Values without that shape are kept as-is.
/// Surrounding whitespace is trimmed before matching and blank values yield
/// `None`, so padded exports and empty cells do not form their own bins.
pub fn bin_prefix(source_bin: &str) -> Option<&str> {
    let value = source_bin.trim();
    if value.is_empty() {
        return None;
    }

    let letters = value.bytes().take_while(u8::is_ascii_alphabetic).count();
    let digits = value[letters..].bytes().take_while(u8::is_ascii_digit).count();
    if letters == 0 || digits == 0 {
        return Some(value);
    }
    Some(&value[..letters + digits])
}

/// Build an overlay from raw source-bin values, most active first
pub fn aggregate_source_bins<'a, I>(source_bins: I) -> ActivityOverlay
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    let mut total = 0;
    for prefix in source_bins.into_iter().filter_map(bin_prefix) {
        *counts.entry(prefix.to_string()).or_insert(0) += 1;
        total += 1;
    }

    let range = ActivityRange::observe(counts.values());
    let mut activity_data: Vec<BinActivity> = counts
        .into_iter()
        .map(|(location, activity_count)| BinActivity { location, activity_count })
        .collect();
    activity_data.sort_by(|a, b| b.activity_count.cmp(&a.activity_count));

    ActivityOverlay {
        activity_data,
        min_activity: Some(range.min),
        max_activity: Some(range.max),
        total_activities: total,
        source_bins: Vec::new(),
    }
}

/// Overlay ready for rendering: aggregated locally if only raw bins were sent
pub fn resolve_overlay(overlay: ActivityOverlay) -> ActivityOverlay {
    if overlay.activity_data.is_empty() && !overlay.source_bins.is_empty() {
        aggregate_source_bins(overlay.source_bins.iter().map(String::as_str))
    } else {
        overlay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, u64)]) -> BTreeMap<String, u64> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), *v)).collect()
    }

    #[test]
    fn test_degenerate_range() {
        let levels = normalize(&counts(&[("A", 5), ("B", 5), ("C", 0)]), ActivityRange::new(5, 5));

        assert_eq!(levels.len(), 2);
        assert_eq!(levels["A"], ActivityLevel::Low);
        assert_eq!(levels["B"], ActivityLevel::Low);
        assert!(!levels.contains_key("C"));
    }

    #[test]
    fn test_thresholds() {
        let range = ActivityRange::new(0, 100);

        assert_eq!(range.level(70), Some(ActivityLevel::High));
        assert_eq!(range.level(50), Some(ActivityLevel::Medium));
        assert_eq!(range.level(10), Some(ActivityLevel::Low));
        assert_eq!(range.level(33), Some(ActivityLevel::Low));
        assert_eq!(range.level(34), Some(ActivityLevel::Medium));
        assert_eq!(range.level(67), Some(ActivityLevel::High));
        assert_eq!(range.level(0), None);
    }

    #[test]
    fn test_counts_outside_range_are_clamped() {
        let range = ActivityRange::new(10, 20);
        assert_eq!(range.level(3), Some(ActivityLevel::Low));
        assert_eq!(range.level(500), Some(ActivityLevel::High));
    }

    #[test]
    fn test_observe() {
        assert_eq!(ActivityRange::observe(&[4, 9, 2]), ActivityRange::new(2, 9));
        assert_eq!(ActivityRange::observe(&[]), ActivityRange::new(0, 0));
    }

    #[test]
    fn test_range_for_overlay_falls_back_to_data() {
        let overlay = ActivityOverlay {
            activity_data: vec![
                BinActivity { location: "C1".into(), activity_count: 3 },
                BinActivity { location: "C2".into(), activity_count: 12 },
            ],
            min_activity: None,
            max_activity: Some(20),
            ..ActivityOverlay::default()
        };
        assert_eq!(ActivityRange::for_overlay(&overlay), ActivityRange::new(3, 20));
    }

    #[test]
    fn test_bin_prefix() {
        assert_eq!(bin_prefix("C24490D"), Some("C24490"));
        assert_eq!(bin_prefix("AB12"), Some("AB12"));
        assert_eq!(bin_prefix("  X7-3 "), Some("X7"));
        assert_eq!(bin_prefix("1234"), Some("1234"));
        assert_eq!(bin_prefix("STAGE"), Some("STAGE"));
        assert_eq!(bin_prefix("   "), None);
        assert_eq!(bin_prefix(""), None);
        assert_eq!(bin_prefix(" C1A "), Some("C1"));
    }

    #[test]
    fn test_aggregate_source_bins() {
        let overlay = aggregate_source_bins(["C24490D", "C24490A", "C1000B", "", "C24490"]);

        assert_eq!(overlay.total_activities, 4);
        assert_eq!(overlay.activity_data[0].location, "C24490");
        assert_eq!(overlay.activity_data[0].activity_count, 3);
        assert_eq!(overlay.min_activity, Some(1));
        assert_eq!(overlay.max_activity, Some(3));
    }

    #[test]
    fn test_resolve_overlay_prefers_activity_data() {
        let overlay = ActivityOverlay {
            activity_data: vec![BinActivity { location: "C1".into(), activity_count: 1 }],
            source_bins: vec!["D1".into()],
            ..ActivityOverlay::default()
        };
        let resolved = resolve_overlay(overlay);
        assert_eq!(resolved.activity_data[0].location, "C1");

        let raw = ActivityOverlay {
            source_bins: vec!["D1X".into(), "D1Y".into()],
            ..ActivityOverlay::default()
        };
        let resolved = resolve_overlay(raw);
        assert_eq!(resolved.activity_data[0].location, "D1");
        assert_eq!(resolved.activity_data[0].activity_count, 2);
    }
}
