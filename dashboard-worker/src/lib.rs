//! MSB Dashboard - Warehouse Operations Dashboard for Cloudflare Workers
//!
//! Polls a warehouse statistics API and serves live dashboards built from
//! the latest result of every feed.
//!
//! # Architecture
//! - Scheduled trigger runs one refresh cycle: all feeds fetched concurrently
//! - KV storage holds the latest snapshot per feed, guarded by sequence numbers
//! - Fetch handler serves pages, raw feed passthrough and per-panel views
//!
//! # Features
//! - Open deliveries overview for today or the next working day
//! - Picks, palletized and conveyor charts (interval, hourly, leaderboard)
//! - Bin heatmap coloured by activity level
//! - Error / No Data placeholders when a feed is degraded

// Clippy configuration
#![allow(clippy::cast_precision_loss)] // Float casts OK for display percentages
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)] // Route table
#![allow(clippy::doc_markdown)] // Doc style flexibility
#![allow(clippy::needless_pass_by_value)] // Worker framework patterns

mod activity;
mod bucketing;
mod client;
mod config;
mod dashboard;
mod error;
mod feed;
mod poller;
mod ranking;
mod types;
mod view;

use serde::de::DeserializeOwned;
use worker::{
    Context, Env, Request, Response, Router, ScheduleContext, ScheduledEvent, console_error,
    console_log, console_warn, event,
};

pub use client::StatsClient;
pub use config::Config;
pub use error::{DashboardError, Result};
pub use feed::{Feed, FeedOutcome, FeedSnapshot};
pub use poller::{DashboardPoller, RefreshReport, Sequencer, SnapshotStore, StatsSource};
pub use types::*;
pub use view::{Panel, UiState};

use feed::decode_snapshot;
use view::charts::IntervalPanel;

/// Result type alias for worker operations
type WResult<T> = std::result::Result<T, worker::Error>;

const KV_BINDING: &str = "DASHBOARD";

/// Sequence numbers for every refresh cycle run by this isolate
static SEQUENCER: Sequencer = Sequencer::new();

/// Main Worker entry point
#[event(fetch)]
async fn fetch(req: Request, env: Env, _ctx: Context) -> WResult<Response> {
    console_error_panic_hook::set_once();

    let router = Router::new();

    router
        // Health check
        .get_async("/health", |_req, ctx| async move {
            let config = match Config::from_env(&ctx.env) {
                Ok(c) => c,
                Err(e) => return Response::error(format!("Config error: {e}"), 500),
            };

            Response::from_json(&HealthResponse {
                status: "healthy".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                environment: config.environment,
                timestamp: chrono::Utc::now().to_rfc3339(),
            })
        })
        // Pages
        .get("/", |_req, ctx| {
            Response::from_html(dashboard::dashboard_html(&page_config(&ctx.env)))
        })
        .get("/dashboard", |_req, ctx| {
            Response::from_html(dashboard::dashboard_html(&page_config(&ctx.env)))
        })
        .get("/heatmap", |_req, ctx| {
            Response::from_html(dashboard::heatmap_html(&page_config(&ctx.env)))
        })
        .get("/conveyor", |_req, ctx| {
            Response::from_html(dashboard::conveyor_html(&page_config(&ctx.env)))
        })
        // Raw feeds, as last stored
        .get_async("/api/statistics", |req, ctx| async move { passthrough(&req, &ctx.env).await })
        .get_async("/api/ltap_statistics", |req, ctx| async move { passthrough(&req, &ctx.env).await })
        .get_async("/api/zu_history_statistics", |req, ctx| async move {
            passthrough(&req, &ctx.env).await
        })
        .get_async("/api/cdhdr_statistics", |req, ctx| async move { passthrough(&req, &ctx.env).await })
        .get_async("/api/pgid_lines_statistics", |req, ctx| async move {
            passthrough(&req, &ctx.env).await
        })
        .get_async("/api/bin_locations", |req, ctx| async move { passthrough(&req, &ctx.env).await })
        .get_async("/api/bin_activity", |req, ctx| async move { passthrough(&req, &ctx.env).await })
        // Panel views
        .get_async("/api/view/overview", |req, ctx| async move {
            let config = Config::from_env(&ctx.env)?;
            let ui = ui_state(&req, &config)?;
            let store = KvSnapshots::from_env(&ctx.env)?;

            let data = load_feed::<StatisticsResponse>(&store, Feed::Statistics).await;
            Response::from_json(&view::overview::overview(
                data,
                ui.day,
                chrono::Utc::now().naive_utc(),
                config.last_modified_offset_hours,
            ))
        })
        .get_async("/api/view/gi_time", |req, ctx| async move {
            let config = Config::from_env(&ctx.env)?;
            let ui = ui_state(&req, &config)?;
            let store = KvSnapshots::from_env(&ctx.env)?;

            let data = load_feed::<StatisticsResponse>(&store, Feed::Statistics).await;
            Response::from_json(&view::overview::gi_time(
                data,
                ui.day,
                chrono::Utc::now().naive_utc(),
                config.last_modified_offset_hours,
            ))
        })
        .get_async("/api/view/picks", |req, ctx| async move { chart_view(&req, &ctx.env).await })
        .get_async("/api/view/palletized", |req, ctx| async move { chart_view(&req, &ctx.env).await })
        .get_async("/api/view/conveyor", |req, ctx| async move { chart_view(&req, &ctx.env).await })
        .get_async("/api/view/pgi", |_req, ctx| async move {
            let store = KvSnapshots::from_env(&ctx.env)?;
            let data = load_feed::<DataResponse<PgiLines>>(&store, Feed::PgidLinesStatistics).await;
            Response::from_json(&view::charts::pgi(data))
        })
        .get_async("/api/view/heatmap", |_req, ctx| async move {
            let config = Config::from_env(&ctx.env)?;
            let store = KvSnapshots::from_env(&ctx.env)?;

            let (layout, activity) = futures::join!(
                load_feed::<LayoutResponse>(&store, Feed::BinLocations),
                load_feed::<ActivityResponse>(&store, Feed::BinActivity),
            );
            Response::from_json(&view::heatmap::heatmap(
                layout,
                activity,
                config.heatmap_column_gap_px,
            ))
        })
        // Manual refresh
        .post_async("/api/refresh", |_req, ctx| async move {
            match run_refresh(&ctx.env).await {
                Ok(report) => Response::from_json(&report),
                Err(e) => {
                    console_error!("Refresh failed: {}", e);
                    Response::from_json(&serde_json::json!({
                        "error": true,
                        "message": format!("{e}"),
                    }))
                }
            }
        })
        // Fallback
        .run(req, env)
        .await
}

/// Scheduled trigger (cron job)
#[event(scheduled)]
async fn scheduled(_event: ScheduledEvent, env: Env, _ctx: ScheduleContext) {
    console_error_panic_hook::set_once();

    if let Err(e) = run_refresh(&env).await {
        console_error!("Refresh cycle error: {}", e);
    }
}

/// Run one refresh cycle over every feed and log its report
async fn run_refresh(env: &Env) -> Result<RefreshReport> {
    let config = Config::from_env(env)?;
    let store = KvSnapshots::from_env(env)?;
    let poller = DashboardPoller::new(StatsClient::new(&config), store, &SEQUENCER);

    let report = poller.refresh(&Feed::ALL).await;
    log_report(&config, &report);
    Ok(report)
}

fn log_report(config: &Config, report: &RefreshReport) {
    console_log!(
        "Refresh {}: {} applied, {} discarded of {} feeds",
        report.cycle_id,
        report.applied(),
        report.discarded(),
        report.feeds.len()
    );

    for feed in report.failures() {
        console_warn!(
            "Feed {} degraded (seq {}): {} {}",
            feed.feed.name(),
            feed.seq,
            feed.outcome,
            feed.message.as_deref().unwrap_or("")
        );
    }

    if config.is_debug() {
        for feed in &report.feeds {
            console_log!(
                "Feed {} seq {}: {} / {:?}",
                feed.feed.name(),
                feed.seq,
                feed.outcome,
                feed.apply
            );
        }
    }
}

/// Page settings; pages still render when the worker is misconfigured
fn page_config(env: &Env) -> Config {
    Config::from_env(env).unwrap_or_default()
}

fn ui_state(req: &Request, config: &Config) -> WResult<UiState> {
    let url = req.url()?;
    Ok(UiState::from_query(url.query_pairs(), config.page_size))
}

/// Serve the stored body of the feed named by the request path
async fn passthrough(req: &Request, env: &Env) -> WResult<Response> {
    let path = req.path();
    let Some(feed) = path.strip_prefix("/api/").and_then(Feed::from_name) else {
        return Response::error("Not Found", 404);
    };

    let store = KvSnapshots::from_env(env)?;
    match store.load(feed).await {
        Ok(Some(snapshot)) => Response::from_json(&snapshot.passthrough()),
        Ok(None) => Response::from_json(&serde_json::json!({
            "success": true,
            "data": null,
            "message": format!("{} not fetched yet", feed.name()),
        })),
        Err(e) => Response::from_json(&serde_json::json!({
            "success": false,
            "error": format!("{e}"),
        })),
    }
}

/// Interval panel named by the last path segment
async fn chart_view(req: &Request, env: &Env) -> WResult<Response> {
    let path = req.path();
    let Some(panel) = path.rsplit('/').next().and_then(IntervalPanel::by_name) else {
        return Response::error("Not Found", 404);
    };

    let config = Config::from_env(env)?;
    let ui = ui_state(req, &config)?;
    let store = KvSnapshots::from_env(env)?;

    let data = load_feed::<DataResponse<IntervalSeries>>(&store, panel.feed).await;
    Response::from_json(&view::charts::chart(
        &panel,
        data,
        &ui,
        config.conveyor_hourly_target,
    ))
}

/// Typed payload of a stored feed; storage failures degrade like fetch failures
async fn load_feed<E>(store: &KvSnapshots, feed: Feed) -> Result<E::Payload>
where
    E: Envelope + DeserializeOwned,
{
    let snapshot = store.load(feed).await?;
    decode_snapshot::<E>(snapshot.as_ref(), feed)
}

/// Snapshot store backed by Workers KV
struct KvSnapshots {
    kv: worker::kv::KvStore,
}

impl KvSnapshots {
    fn from_env(env: &Env) -> Result<Self> {
        let kv = env
            .kv(KV_BINDING)
            .map_err(|e| DashboardError::Storage(format!("KV binding {KV_BINDING}: {e}")))?;
        Ok(Self { kv })
    }
}

impl SnapshotStore for KvSnapshots {
    async fn load(&self, feed: Feed) -> Result<Option<FeedSnapshot>> {
        self.kv
            .get(&feed.storage_key())
            .json::<FeedSnapshot>()
            .await
            .map_err(|e| DashboardError::Storage(e.to_string()))
    }

    async fn save(&self, snapshot: &FeedSnapshot) -> Result<()> {
        self.kv
            .put(&snapshot.feed.storage_key(), snapshot)
            .map_err(|e| DashboardError::Storage(e.to_string()))?
            .execute()
            .await
            .map_err(|e| DashboardError::Storage(e.to_string()))
    }
}
