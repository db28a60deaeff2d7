//! Dashboard poller - one refresh cycle per scheduled trigger
//!
//! Fetches every feed concurrently and stores the latest snapshot per feed.
//! Each fetch takes a sequence number when it starts; a result is stored only
//! if its number is higher than the stored one, so a slow fetch that finishes
//! after a newer one never overwrites it.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use futures::future::join_all;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::feed::{Feed, FeedOutcome, FeedSnapshot};

/// Monotonic sequence numbers, seeded from the wall clock, plus the highest
/// seq applied per feed by this isolate
#[derive(Debug)]
pub struct Sequencer {
    last: AtomicU64,
    applied: [AtomicU64; Feed::ALL.len()],
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sequencer {
    pub const fn new() -> Self {
        Self {
            last: AtomicU64::new(0),
            applied: [const { AtomicU64::new(0) }; Feed::ALL.len()],
        }
    }

    /// `max(last + 1, now_ms)`: strictly increasing here, roughly ordered across isolates
    pub fn next(&self, now_ms: u64) -> u64 {
        let bump = |last: u64| now_ms.max(last.saturating_add(1));
        match self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(bump(last)))
        {
            Ok(prev) | Err(prev) => bump(prev),
        }
    }

    /// Raise the applied mark of `feed` to `seq`.
    ///
    /// Fails with the current mark unless `seq` is greater. Runs without
    /// yielding, so of two overlapping applies only the newer one passes.
    pub fn claim(&self, feed: Feed, seq: u64) -> std::result::Result<(), u64> {
        self.applied[feed.index()]
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |mark| (seq > mark).then_some(seq))
            .map(|_| ())
    }
}

fn now_ms() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
}

/// Where feed bodies come from
#[allow(async_fn_in_trait)]
pub trait StatsSource {
    async fn fetch(&self, feed: Feed) -> Result<Value>;
}

/// Where the latest snapshot per feed lives
#[allow(async_fn_in_trait)]
pub trait SnapshotStore {
    async fn load(&self, feed: Feed) -> Result<Option<FeedSnapshot>>;
    async fn save(&self, snapshot: &FeedSnapshot) -> Result<()>;
}

/// What happened to a fetched snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ApplyResult {
    Applied,
    /// A newer snapshot was already stored
    Discarded { stored_seq: u64 },
    StoreFailed { message: String },
}

/// Per-feed line of a refresh report
#[derive(Debug, Clone, Serialize)]
pub struct FeedReport {
    pub feed: Feed,
    pub seq: u64,
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub apply: ApplyResult,
}

/// Result of one refresh cycle
#[derive(Debug, Clone, Serialize)]
pub struct RefreshReport {
    pub cycle_id: String,
    pub started_at: String,
    pub feeds: Vec<FeedReport>,
}

impl RefreshReport {
    pub fn applied(&self) -> usize {
        self.feeds
            .iter()
            .filter(|f| f.apply == ApplyResult::Applied)
            .count()
    }

    pub fn discarded(&self) -> usize {
        self.feeds
            .iter()
            .filter(|f| matches!(f.apply, ApplyResult::Discarded { .. }))
            .count()
    }

    /// Feeds whose fetch failed or whose snapshot could not be stored
    pub fn failures(&self) -> impl Iterator<Item = &FeedReport> {
        self.feeds
            .iter()
            .filter(|f| f.outcome == "failed" || matches!(f.apply, ApplyResult::StoreFailed { .. }))
    }
}

/// Polls the statistics API into the snapshot store
pub struct DashboardPoller<'a, S, T> {
    source: S,
    store: T,
    sequencer: &'a Sequencer,
}

impl<'a, S: StatsSource, T: SnapshotStore> DashboardPoller<'a, S, T> {
    pub fn new(source: S, store: T, sequencer: &'a Sequencer) -> Self {
        Self {
            source,
            store,
            sequencer,
        }
    }

    /// Run one refresh cycle over `feeds`
    pub async fn refresh(&self, feeds: &[Feed]) -> RefreshReport {
        let cycle_id = uuid::Uuid::new_v4().to_string();
        let started_at = Utc::now().to_rfc3339();

        let feeds = join_all(feeds.iter().map(|feed| self.refresh_feed(*feed))).await;

        RefreshReport {
            cycle_id,
            started_at,
            feeds,
        }
    }

    async fn refresh_feed(&self, feed: Feed) -> FeedReport {
        let seq = self.sequencer.next(now_ms());

        let outcome = match self.source.fetch(feed).await {
            Ok(body) => feed.classify(body),
            Err(e) => FeedOutcome::from_error(&e),
        };

        let message = match &outcome {
            FeedOutcome::Ready { .. } => None,
            FeedOutcome::NoData { reason } => Some(reason.clone()),
            FeedOutcome::Failed { message, .. } => Some(message.clone()),
        };

        let snapshot = FeedSnapshot {
            feed,
            seq,
            fetched_at: Utc::now().to_rfc3339(),
            outcome,
        };
        let apply = self.apply(&snapshot).await;

        FeedReport {
            feed,
            seq,
            outcome: snapshot.outcome.label(),
            message,
            apply,
        }
    }

    /// Store `snapshot` unless a snapshot with a higher or equal seq is already stored
    pub async fn apply(&self, snapshot: &FeedSnapshot) -> ApplyResult {
        // must happen before the first await
        if let Err(stored_seq) = self.sequencer.claim(snapshot.feed, snapshot.seq) {
            return ApplyResult::Discarded { stored_seq };
        }

        // other isolates write the same keys; an unreadable stored snapshot is overwritten
        if let Ok(Some(stored)) = self.store.load(snapshot.feed).await {
            if stored.seq >= snapshot.seq {
                return ApplyResult::Discarded {
                    stored_seq: stored.seq,
                };
            }
        }

        match self.store.save(snapshot).await {
            Ok(()) => ApplyResult::Applied,
            Err(e) => ApplyResult::StoreFailed {
                message: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;
    use crate::feed::FailureKind;
    use serde_json::json;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct MemoryStore {
        snapshots: Rc<RefCell<HashMap<Feed, FeedSnapshot>>>,
    }

    impl MemoryStore {
        fn get(&self, feed: Feed) -> Option<FeedSnapshot> {
            self.snapshots.borrow().get(&feed).cloned()
        }
    }

    impl SnapshotStore for MemoryStore {
        async fn load(&self, feed: Feed) -> Result<Option<FeedSnapshot>> {
            Ok(self.get(feed))
        }

        async fn save(&self, snapshot: &FeedSnapshot) -> Result<()> {
            self.snapshots
                .borrow_mut()
                .insert(snapshot.feed, snapshot.clone());
            Ok(())
        }
    }

    /// Memory store whose calls yield like a remote KV
    #[derive(Clone, Default)]
    struct YieldingStore {
        inner: MemoryStore,
    }

    impl SnapshotStore for YieldingStore {
        async fn load(&self, feed: Feed) -> Result<Option<FeedSnapshot>> {
            tokio::task::yield_now().await;
            self.inner.load(feed).await
        }

        async fn save(&self, snapshot: &FeedSnapshot) -> Result<()> {
            tokio::task::yield_now().await;
            self.inner.save(snapshot).await
        }
    }

    struct BrokenStore;

    impl SnapshotStore for BrokenStore {
        async fn load(&self, _feed: Feed) -> Result<Option<FeedSnapshot>> {
            Err(DashboardError::Storage("kv unavailable".into()))
        }

        async fn save(&self, _snapshot: &FeedSnapshot) -> Result<()> {
            Err(DashboardError::Storage("kv unavailable".into()))
        }
    }

    /// Answers with a PGI body after `delay` yields
    struct PgiSource {
        total_lines: u64,
        delay: usize,
    }

    impl StatsSource for PgiSource {
        async fn fetch(&self, _feed: Feed) -> Result<Value> {
            for _ in 0..self.delay {
                tokio::task::yield_now().await;
            }
            Ok(json!({"success": true, "data": {"total_deliveries": 1, "total_lines": self.total_lines}}))
        }
    }

    /// Fails by feed: transport for CDHDR, upstream failure for LTAP, empty PGI
    struct MixedSource;

    impl StatsSource for MixedSource {
        async fn fetch(&self, feed: Feed) -> Result<Value> {
            match feed {
                Feed::CdhdrStatistics => Err(DashboardError::Api {
                    status: 503,
                    message: "Service Unavailable".into(),
                }),
                Feed::LtapStatistics => Ok(json!({"success": false, "error": "LTAP statistics file not found"})),
                Feed::PgidLinesStatistics => Ok(json!({"success": true, "data": null})),
                _ => Ok(json!({"success": true, "layout": {"columns": 1, "bins": [{"location": "C1"}]}})),
            }
        }
    }

    fn stored_lines(store: &MemoryStore) -> u64 {
        let snapshot = store.get(Feed::PgidLinesStatistics).unwrap();
        match snapshot.outcome {
            FeedOutcome::Ready { body } => body["data"]["total_lines"].as_u64().unwrap(),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_sequencer_strictly_increasing() {
        let sequencer = Sequencer::new();

        assert_eq!(sequencer.next(1_000), 1_000);
        assert_eq!(sequencer.next(1_000), 1_001);
        // clock went backwards
        assert_eq!(sequencer.next(900), 1_002);
        assert_eq!(sequencer.next(5_000), 5_000);
    }

    #[tokio::test]
    async fn test_refresh_stores_every_feed() {
        let store = MemoryStore::default();
        let sequencer = Sequencer::new();
        let poller = DashboardPoller::new(PgiSource { total_lines: 9, delay: 0 }, store.clone(), &sequencer);

        let report = poller.refresh(&[Feed::PgidLinesStatistics]).await;

        assert_eq!(report.feeds.len(), 1);
        assert_eq!(report.applied(), 1);
        assert_eq!(stored_lines(&store), 9);
    }

    #[tokio::test]
    async fn test_classifies_failures() {
        let store = MemoryStore::default();
        let sequencer = Sequencer::new();
        let poller = DashboardPoller::new(MixedSource, store.clone(), &sequencer);

        let report = poller
            .refresh(&[Feed::CdhdrStatistics, Feed::LtapStatistics, Feed::PgidLinesStatistics, Feed::BinLocations])
            .await;

        assert_eq!(report.applied(), 4);
        assert_eq!(report.failures().count(), 2);

        let cdhdr = store.get(Feed::CdhdrStatistics).unwrap();
        assert!(matches!(cdhdr.outcome, FeedOutcome::Failed { kind: FailureKind::Transport, .. }));
        let ltap = store.get(Feed::LtapStatistics).unwrap();
        assert!(matches!(ltap.outcome, FeedOutcome::Failed { kind: FailureKind::Upstream, .. }));
        assert_eq!(store.get(Feed::PgidLinesStatistics).unwrap().outcome.label(), "no_data");
        assert_eq!(store.get(Feed::BinLocations).unwrap().outcome.label(), "ready");
    }

    #[tokio::test]
    async fn test_failed_refresh_replaces_ready_snapshot() {
        let store = MemoryStore::default();
        let sequencer = Sequencer::new();
        let poller = DashboardPoller::new(MixedSource, store.clone(), &sequencer);

        let ready = FeedSnapshot {
            feed: Feed::CdhdrStatistics,
            seq: sequencer.next(now_ms()),
            fetched_at: String::new(),
            outcome: FeedOutcome::Ready {
                body: json!({"success": true, "data": {"intervals": [{"interval_end": "08:15:00", "box_count": 4}]}}),
            },
        };
        assert_eq!(poller.apply(&ready).await, ApplyResult::Applied);

        poller.refresh(&[Feed::CdhdrStatistics]).await;

        assert_eq!(store.get(Feed::CdhdrStatistics).unwrap().outcome.label(), "failed");
    }

    #[tokio::test]
    async fn test_stale_result_is_discarded() {
        let store = MemoryStore::default();
        let sequencer = Sequencer::new();
        let slow = DashboardPoller::new(PgiSource { total_lines: 1, delay: 5 }, store.clone(), &sequencer);
        let fast = DashboardPoller::new(PgiSource { total_lines: 2, delay: 0 }, store.clone(), &sequencer);

        // slow starts first (lower seq) but finishes last
        let (old, new) = futures::join!(
            slow.refresh(&[Feed::PgidLinesStatistics]),
            fast.refresh(&[Feed::PgidLinesStatistics]),
        );

        assert!(old.feeds[0].seq < new.feeds[0].seq);
        assert_eq!(new.feeds[0].apply, ApplyResult::Applied);
        assert_eq!(
            old.feeds[0].apply,
            ApplyResult::Discarded { stored_seq: new.feeds[0].seq }
        );
        assert_eq!(old.discarded(), 1);
        assert_eq!(stored_lines(&store), 2);
    }

    #[tokio::test]
    async fn test_apply_keeps_newer_snapshot() {
        let store = MemoryStore::default();
        let sequencer = Sequencer::new();
        let poller = DashboardPoller::new(MixedSource, store.clone(), &sequencer);

        let snapshot = |seq| FeedSnapshot {
            feed: Feed::BinActivity,
            seq,
            fetched_at: String::new(),
            outcome: FeedOutcome::NoData { reason: format!("seq {seq}") },
        };

        assert_eq!(poller.apply(&snapshot(10)).await, ApplyResult::Applied);
        assert_eq!(poller.apply(&snapshot(7)).await, ApplyResult::Discarded { stored_seq: 10 });
        assert_eq!(poller.apply(&snapshot(10)).await, ApplyResult::Discarded { stored_seq: 10 });
        assert_eq!(poller.apply(&snapshot(11)).await, ApplyResult::Applied);
        assert_eq!(store.get(Feed::BinActivity).unwrap().seq, 11);
    }

    fn activity_snapshot(seq: u64) -> FeedSnapshot {
        FeedSnapshot {
            feed: Feed::BinActivity,
            seq,
            fetched_at: String::new(),
            outcome: FeedOutcome::NoData { reason: format!("seq {seq}") },
        }
    }

    #[tokio::test]
    async fn test_overlapping_applies_keep_newer() {
        let store = YieldingStore::default();
        let sequencer = Sequencer::new();
        let poller = DashboardPoller::new(MixedSource, store.clone(), &sequencer);

        let snap_20 = activity_snapshot(20);
        let snap_10 = activity_snapshot(10);
        let (newer, older) = futures::join!(poller.apply(&snap_20), poller.apply(&snap_10),);

        assert_eq!(newer, ApplyResult::Applied);
        assert_eq!(older, ApplyResult::Discarded { stored_seq: 20 });
        assert_eq!(store.inner.get(Feed::BinActivity).unwrap().seq, 20);
    }

    #[tokio::test]
    async fn test_overlapping_applies_in_seq_order() {
        let store = YieldingStore::default();
        let sequencer = Sequencer::new();
        let poller = DashboardPoller::new(MixedSource, store.clone(), &sequencer);

        let snap_10 = activity_snapshot(10);
        let snap_20 = activity_snapshot(20);
        let (older, newer) = futures::join!(poller.apply(&snap_10), poller.apply(&snap_20),);

        assert_eq!(older, ApplyResult::Applied);
        assert_eq!(newer, ApplyResult::Applied);
        assert_eq!(store.inner.get(Feed::BinActivity).unwrap().seq, 20);
    }

    #[test]
    fn test_claim_is_per_feed() {
        let sequencer = Sequencer::new();

        assert_eq!(sequencer.claim(Feed::Statistics, 5), Ok(()));
        assert_eq!(sequencer.claim(Feed::Statistics, 5), Err(5));
        assert_eq!(sequencer.claim(Feed::Statistics, 4), Err(5));
        assert_eq!(sequencer.claim(Feed::BinActivity, 1), Ok(()));
        assert_eq!(sequencer.claim(Feed::Statistics, 6), Ok(()));
    }

    #[tokio::test]
    async fn test_store_failure_is_reported() {
        let sequencer = Sequencer::new();
        let poller = DashboardPoller::new(PgiSource { total_lines: 3, delay: 0 }, BrokenStore, &sequencer);

        let report = poller.refresh(&[Feed::PgidLinesStatistics]).await;

        assert!(matches!(report.feeds[0].apply, ApplyResult::StoreFailed { .. }));
        assert_eq!(report.failures().count(), 1);
    }
}
