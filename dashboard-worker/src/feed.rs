//! Feeds of the statistics API and their stored snapshots

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DashboardError, Result};
use crate::types::{
    ActivityResponse, DataResponse, Envelope, IntervalSeries, LayoutResponse, PgiLines,
    StatisticsResponse,
};

/// One polled endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feed {
    /// Open deliveries by day, status, process and GI time
    Statistics,
    /// Picks per interval and per picker
    LtapStatistics,
    /// Palletized boxes per interval and per palletizer
    ZuHistoryStatistics,
    /// Conveyor boxes per interval
    CdhdrStatistics,
    /// PGI deliveries and lines
    PgidLinesStatistics,
    /// Heatmap grid
    BinLocations,
    /// Heatmap activity overlay
    BinActivity,
}

impl Feed {
    pub const ALL: [Feed; 7] = [
        Feed::Statistics,
        Feed::LtapStatistics,
        Feed::ZuHistoryStatistics,
        Feed::CdhdrStatistics,
        Feed::PgidLinesStatistics,
        Feed::BinLocations,
        Feed::BinActivity,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Feed::Statistics => "statistics",
            Feed::LtapStatistics => "ltap_statistics",
            Feed::ZuHistoryStatistics => "zu_history_statistics",
            Feed::CdhdrStatistics => "cdhdr_statistics",
            Feed::PgidLinesStatistics => "pgid_lines_statistics",
            Feed::BinLocations => "bin_locations",
            Feed::BinActivity => "bin_activity",
        }
    }

    /// Position in [`Feed::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|feed| feed.name() == name)
    }

    /// Path on the statistics API (and on this worker's passthrough)
    pub fn api_path(self) -> String {
        format!("/api/{}", self.name())
    }

    /// KV key of the latest snapshot
    pub fn storage_key(self) -> String {
        format!("feed:{}", self.name())
    }

    /// Check a response body against this feed's envelope
    pub fn classify(self, body: Value) -> FeedOutcome {
        let checked = match self {
            Feed::Statistics => has_payload::<StatisticsResponse>(&body),
            Feed::LtapStatistics | Feed::ZuHistoryStatistics | Feed::CdhdrStatistics => {
                decode_payload::<DataResponse<IntervalSeries>>(&body)
                    .map(|series| series.is_some_and(|s| !s.is_empty()))
            }
            Feed::PgidLinesStatistics => has_payload::<DataResponse<PgiLines>>(&body),
            Feed::BinLocations => has_payload::<LayoutResponse>(&body),
            Feed::BinActivity => has_payload::<ActivityResponse>(&body),
        };

        match checked {
            Ok(true) => FeedOutcome::Ready { body },
            Ok(false) => FeedOutcome::NoData {
                reason: format!("{} returned no data", self.name()),
            },
            Err(err) => FeedOutcome::from_error(&err),
        }
    }
}

fn decode_payload<E>(body: &Value) -> Result<Option<E::Payload>>
where
    E: Envelope + DeserializeOwned,
{
    E::deserialize(body)
        .map_err(|e| DashboardError::Payload(e.to_string()))?
        .into_payload()
}

fn has_payload<E>(body: &Value) -> Result<bool>
where
    E: Envelope + DeserializeOwned,
{
    decode_payload::<E>(body).map(|payload| payload.is_some())
}

/// Why a fetch failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Unreachable or non-2xx
    Transport,
    /// `success: false`
    Upstream,
    /// Unexpected body shape
    Malformed,
    /// Worker-side failure
    Internal,
}

/// Result of one fetch, as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FeedOutcome {
    Ready { body: Value },
    NoData { reason: String },
    Failed { kind: FailureKind, message: String },
}

impl FeedOutcome {
    pub fn from_error(err: &DashboardError) -> Self {
        let kind = match err {
            DashboardError::NoData(reason) => {
                return FeedOutcome::NoData { reason: reason.clone() };
            }
            DashboardError::Http(_) | DashboardError::Api { .. } => FailureKind::Transport,
            DashboardError::Upstream(_) => FailureKind::Upstream,
            DashboardError::Payload(_) | DashboardError::Json(_) => FailureKind::Malformed,
            DashboardError::Config(_) | DashboardError::Worker(_) | DashboardError::Storage(_) => {
                FailureKind::Internal
            }
        };
        FeedOutcome::Failed {
            kind,
            message: err.to_string(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FeedOutcome::Ready { .. } => "ready",
            FeedOutcome::NoData { .. } => "no_data",
            FeedOutcome::Failed { .. } => "failed",
        }
    }
}

/// Latest result of a feed, tagged with the sequence number of its fetch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedSnapshot {
    pub feed: Feed,
    pub seq: u64,
    pub fetched_at: String,
    pub outcome: FeedOutcome,
}

impl FeedSnapshot {
    /// Typed payload, or the error its degraded state stands for
    pub fn decode<E>(&self) -> Result<E::Payload>
    where
        E: Envelope + DeserializeOwned,
    {
        match &self.outcome {
            FeedOutcome::Ready { body } => decode_payload::<E>(body)?
                .ok_or_else(|| DashboardError::NoData(format!("{} returned no data", self.feed.name()))),
            FeedOutcome::NoData { reason } => Err(DashboardError::NoData(reason.clone())),
            FeedOutcome::Failed { kind, message } => Err(match kind {
                FailureKind::Transport => DashboardError::Http(message.clone()),
                FailureKind::Upstream => DashboardError::Upstream(message.clone()),
                FailureKind::Malformed => DashboardError::Payload(message.clone()),
                FailureKind::Internal => DashboardError::Worker(message.clone()),
            }),
        }
    }

    /// Body served on the passthrough endpoint
    pub fn passthrough(&self) -> Value {
        match &self.outcome {
            FeedOutcome::Ready { body } => body.clone(),
            FeedOutcome::NoData { reason } => serde_json::json!({
                "success": true,
                "data": null,
                "message": reason,
            }),
            FeedOutcome::Failed { message, .. } => serde_json::json!({
                "success": false,
                "error": message,
            }),
        }
    }
}

/// Decode a possibly missing snapshot; never fetched counts as no data
pub fn decode_snapshot<E>(snapshot: Option<&FeedSnapshot>, feed: Feed) -> Result<E::Payload>
where
    E: Envelope + DeserializeOwned,
{
    match snapshot {
        Some(snapshot) => snapshot.decode::<E>(),
        None => Err(DashboardError::NoData(format!("{} not fetched yet", feed.name()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot(feed: Feed, outcome: FeedOutcome) -> FeedSnapshot {
        FeedSnapshot {
            feed,
            seq: 1,
            fetched_at: "2025-03-10T08:00:00Z".to_string(),
            outcome,
        }
    }

    #[test]
    fn test_feed_names_round_trip() {
        for feed in Feed::ALL {
            assert_eq!(Feed::from_name(feed.name()), Some(feed));
        }
        assert_eq!(Feed::from_name("nope"), None);
        assert_eq!(Feed::CdhdrStatistics.api_path(), "/api/cdhdr_statistics");
        assert_eq!(Feed::BinActivity.storage_key(), "feed:bin_activity");
    }

    #[test]
    fn test_classify_ready() {
        let body = json!({"success": true, "data": {"intervals": [{"interval_end": "08:15:00", "box_count": 3}], "total_boxes": 3}});
        assert_eq!(Feed::CdhdrStatistics.classify(body).label(), "ready");
    }

    #[test]
    fn test_classify_upstream_failure() {
        let body = json!({"success": false, "error": "CDHDR statistics file not found"});
        let outcome = Feed::CdhdrStatistics.classify(body);
        assert!(matches!(outcome, FeedOutcome::Failed { kind: FailureKind::Upstream, .. }));
    }

    #[test]
    fn test_classify_malformed() {
        let body = json!({"success": true, "data": {"intervals": "not a list"}});
        let outcome = Feed::LtapStatistics.classify(body);
        assert!(matches!(outcome, FeedOutcome::Failed { kind: FailureKind::Malformed, .. }));

        let outcome = Feed::BinLocations.classify(json!([1, 2, 3]));
        assert!(matches!(outcome, FeedOutcome::Failed { kind: FailureKind::Malformed, .. }));
    }

    #[test]
    fn test_classify_no_data() {
        let outcome = Feed::PgidLinesStatistics.classify(json!({"success": true}));
        assert_eq!(outcome.label(), "no_data");

        let outcome = Feed::ZuHistoryStatistics.classify(json!({"success": true, "data": {"intervals": []}}));
        assert_eq!(outcome.label(), "no_data");
    }

    #[test]
    fn test_outcome_from_transport_error() {
        let outcome = FeedOutcome::from_error(&DashboardError::Api { status: 502, message: "bad gateway".into() });
        assert!(matches!(outcome, FeedOutcome::Failed { kind: FailureKind::Transport, .. }));
    }

    #[test]
    fn test_decode_degraded_snapshots() {
        let failed = snapshot(
            Feed::PgidLinesStatistics,
            FeedOutcome::Failed { kind: FailureKind::Transport, message: "timeout".into() },
        );
        let err = failed.decode::<DataResponse<PgiLines>>().unwrap_err();
        assert!(matches!(err, DashboardError::Http(_)));

        let empty = snapshot(Feed::PgidLinesStatistics, FeedOutcome::NoData { reason: "nothing".into() });
        let err = empty.decode::<DataResponse<PgiLines>>().unwrap_err();
        assert!(matches!(err, DashboardError::NoData(_)));

        let err = decode_snapshot::<DataResponse<PgiLines>>(None, Feed::PgidLinesStatistics).unwrap_err();
        assert!(matches!(err, DashboardError::NoData(_)));
    }

    #[test]
    fn test_passthrough() {
        let body = json!({"success": true, "data": {"total_deliveries": 1, "total_lines": 2}});
        let ready = snapshot(Feed::PgidLinesStatistics, FeedOutcome::Ready { body: body.clone() });
        assert_eq!(ready.passthrough(), body);

        let failed = snapshot(
            Feed::PgidLinesStatistics,
            FeedOutcome::Failed { kind: FailureKind::Upstream, message: "missing".into() },
        );
        assert_eq!(failed.passthrough()["success"], json!(false));
    }

    #[test]
    fn test_snapshot_storage_format() {
        let snap = snapshot(Feed::BinActivity, FeedOutcome::NoData { reason: "empty".into() });
        let stored = serde_json::to_value(&snap).unwrap();
        assert_eq!(stored["feed"], json!("bin_activity"));
        assert_eq!(stored["outcome"]["state"], json!("no_data"));

        let restored: FeedSnapshot = serde_json::from_value(stored).unwrap();
        assert_eq!(restored, snap);
    }
}
