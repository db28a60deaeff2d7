//! Wire types for the statistics API
//!
//! Every feed answers with a `success` flag. The payload lives under
//! `data`, `layout` or at the top level depending on the feed; the
//! [`Envelope`] trait hides that difference from the poller.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

/// One fixed-width interval with its count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalRecord {
    #[serde(rename = "interval_end", alias = "end_time")]
    pub end_time: String,
    #[serde(alias = "total_picks", alias = "box_count")]
    pub count: u64,
}

/// A named operational entity (picker, palletizer) and its count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntity {
    #[serde(alias = "picker", alias = "user")]
    pub name: String,
    #[serde(alias = "total_picks", alias = "box_count")]
    pub count: u64,
}

/// Interval series with optional per-entity totals (picks, palletized and conveyor boxes)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntervalSeries {
    #[serde(default)]
    pub intervals: Vec<IntervalRecord>,
    #[serde(default, alias = "total_picks", alias = "total_boxes")]
    pub total: u64,
    #[serde(
        default,
        rename = "entity_totals",
        alias = "picker_totals",
        alias = "palletizer_totals",
        alias = "users"
    )]
    pub entities: Vec<RankedEntity>,
}

impl IntervalSeries {
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty() && self.entities.is_empty() && self.total == 0
    }
}

/// Counters shared by the day summary and each of its groupings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupStats {
    #[serde(default)]
    pub deliveries: Option<u64>,
    #[serde(default)]
    pub hu: Option<u64>,
    #[serde(default)]
    pub lines: Option<u64>,
    #[serde(default)]
    pub lines_picked: Option<u64>,
    #[serde(default)]
    pub lines_not_picked: Option<u64>,
    #[serde(default)]
    pub qty: Option<u64>,
}

/// Statistics for one delivery day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayStats {
    #[serde(flatten)]
    pub totals: GroupStats,
    #[serde(default)]
    pub by_status: BTreeMap<String, GroupStats>,
    #[serde(default)]
    pub by_process: BTreeMap<String, GroupStats>,
    #[serde(default)]
    pub by_nesting: BTreeMap<String, GroupStats>,
    #[serde(default)]
    pub by_cons: BTreeMap<String, GroupStats>,
    #[serde(default)]
    pub by_vas: BTreeMap<String, GroupStats>,
    #[serde(default)]
    pub by_dg_vas: BTreeMap<String, GroupStats>,
    #[serde(default)]
    pub by_gi_time: Option<BTreeMap<String, GroupStats>>,
}

/// `by_date` entry of the statistics feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateEntry {
    /// `YYYY-MM-DD`
    pub date: String,
    #[serde(default)]
    pub stats: Option<DayStats>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatisticsData {
    #[serde(default)]
    pub by_date: Vec<DateEntry>,
}

/// PGI deliveries and lines
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PgiLines {
    #[serde(default)]
    pub total_deliveries: u64,
    #[serde(default)]
    pub total_lines: u64,
}

/// Bin cell in the heatmap layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bin {
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Bin {
    pub fn is_empty(&self) -> bool {
        self.status.as_deref() == Some("empty")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BinLayout {
    pub columns: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
    #[serde(default)]
    pub bins: Vec<Bin>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinActivity {
    pub location: String,
    pub activity_count: u64,
}

/// Activity overlay for the heatmap
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityOverlay {
    #[serde(default)]
    pub activity_data: Vec<BinActivity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_activity: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_activity: Option<u64>,
    #[serde(default)]
    pub total_activities: u64,
    /// Raw source-bin values, aggregated locally when `activity_data` is absent
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_bins: Vec<String>,
}

// ============================================================================
// Envelopes
// ============================================================================

/// A feed response: success flag plus a payload that may be absent
pub trait Envelope {
    type Payload;

    /// Split the envelope into its payload.
    ///
    /// `success: false` is an upstream failure; `success: true` without a
    /// payload is a valid answer with no data.
    fn into_payload(self) -> Result<Option<Self::Payload>>;
}

fn upstream_failure(error: Option<String>) -> DashboardError {
    DashboardError::Upstream(error.unwrap_or_else(|| "unknown error".to_string()))
}

/// `{ success, data, error?, last_modified? }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
}

impl<T> Envelope for DataResponse<T> {
    type Payload = T;

    fn into_payload(self) -> Result<Option<T>> {
        if self.success {
            Ok(self.data)
        } else {
            Err(upstream_failure(self.error))
        }
    }
}

/// Statistics feed: day-by-day breakdown plus the entry for today
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Option<StatisticsData>,
    #[serde(default)]
    pub today_data: Option<DateEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub today: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
}

impl Envelope for StatisticsResponse {
    type Payload = StatisticsResponse;

    fn into_payload(self) -> Result<Option<StatisticsResponse>> {
        if !self.success {
            return Err(upstream_failure(self.error));
        }
        let has_days = self.data.as_ref().is_some_and(|d| !d.by_date.is_empty());
        if has_days || self.today_data.is_some() {
            Ok(Some(self))
        } else {
            Ok(None)
        }
    }
}

/// `{ success, layout, error? }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutResponse {
    pub success: bool,
    #[serde(default)]
    pub layout: Option<BinLayout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope for LayoutResponse {
    type Payload = BinLayout;

    fn into_payload(self) -> Result<Option<BinLayout>> {
        if self.success {
            Ok(self.layout.filter(|l| !l.bins.is_empty()))
        } else {
            Err(upstream_failure(self.error))
        }
    }
}

/// `{ success, activity_data, min_activity, max_activity, total_activities, error? }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityResponse {
    pub success: bool,
    #[serde(flatten)]
    pub overlay: ActivityOverlay,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope for ActivityResponse {
    type Payload = ActivityOverlay;

    fn into_payload(self) -> Result<Option<ActivityOverlay>> {
        if !self.success {
            return Err(upstream_failure(self.error));
        }
        if self.overlay.activity_data.is_empty() && self.overlay.source_bins.is_empty() {
            Ok(None)
        } else {
            Ok(Some(self.overlay))
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub environment: String,
    pub timestamp: String,
}
