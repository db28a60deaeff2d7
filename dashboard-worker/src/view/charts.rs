//! Interval chart panels (picks, palletized boxes, conveyor boxes) and PGI totals

use serde::Serialize;

use crate::bucketing::{bucket_hourly, is_major_tick, minute_label, peak};
use crate::error::Result;
use crate::feed::Feed;
use crate::ranking::{Page, paginate, rank};
use crate::types::{IntervalSeries, PgiLines};
use crate::view::{ChartKind, FieldSet, Panel, UiState, group_thousands};

/// Static description of an interval panel
#[derive(Debug, Clone, Copy)]
pub struct IntervalPanel {
    pub feed: Feed,
    /// DOM id of the total counter
    pub total_field: &'static str,
    /// Counted unit, as in "Peak: 42 picks"
    pub unit: &'static str,
    pub interval_label: &'static str,
    pub hourly_label: &'static str,
    /// Leaderboard series label; `None` if the panel has no leaderboard
    pub ranking_label: Option<&'static str>,
    /// Hourly view draws the boxes/hour target line
    pub shows_target: bool,
}

pub const PICKS: IntervalPanel = IntervalPanel {
    feed: Feed::LtapStatistics,
    total_field: "total-picks-count",
    unit: "picks",
    interval_label: "Picks per Interval",
    hourly_label: "Picks per Hour",
    ranking_label: Some("Picks per Picker"),
    shows_target: false,
};

pub const PALLETIZED: IntervalPanel = IntervalPanel {
    feed: Feed::ZuHistoryStatistics,
    total_field: "total-palletized-count",
    unit: "boxes",
    interval_label: "Boxes per Interval",
    hourly_label: "Boxes per Hour",
    ranking_label: Some("Boxes per Palletizer"),
    shows_target: false,
};

pub const CONVEYOR: IntervalPanel = IntervalPanel {
    feed: Feed::CdhdrStatistics,
    total_field: "total-boxes-count",
    unit: "boxes",
    interval_label: "Boxes per Interval",
    hourly_label: "Boxes per Hour",
    ranking_label: None,
    shows_target: true,
};

impl IntervalPanel {
    /// Panel for a view endpoint name
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "picks" => Some(PICKS),
            "palletized" => Some(PALLETIZED),
            "conveyor" => Some(CONVEYOR),
            _ => None,
        }
    }

    /// Requested chart, or the interval chart if this panel has no leaderboard
    pub fn effective_chart(&self, requested: ChartKind) -> ChartKind {
        match requested {
            ChartKind::Ranking if self.ranking_label.is_none() => ChartKind::Interval,
            other => other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeakMarker {
    pub index: usize,
    pub value: u64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetLine {
    pub label: String,
    pub values: Vec<u64>,
}

/// Leaderboard controls
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page_index: usize,
    pub page_count: usize,
    pub has_prev: bool,
    pub has_next: bool,
    /// Page the prev / next buttons request
    pub prev_page: usize,
    pub next_page: usize,
    pub show_controls: bool,
    pub indicator: String,
}

impl From<&Page<'_>> for Pagination {
    fn from(page: &Page<'_>) -> Self {
        Self {
            page_index: page.state.page_index,
            page_count: page.page_count,
            has_prev: !page.state.is_first(),
            has_next: !page.state.is_last(page.page_count),
            prev_page: page.state.prev().page_index,
            next_page: page.state.next(page.page_count).page_index,
            show_controls: page.shows_controls(),
            indicator: page.indicator(),
        }
    }
}

/// One rendered chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartView {
    pub chart: ChartKind,
    pub fields: FieldSet,
    pub series_label: String,
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    /// Which interval labels are drawn
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub major_ticks: Vec<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peak: Option<PeakMarker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<TargetLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Render one interval panel for the requested chart and page
pub fn chart_view(panel: &IntervalPanel, series: &IntervalSeries, ui: &UiState, hourly_target: u64) -> ChartView {
    let chart = panel.effective_chart(ui.chart);

    let mut fields = FieldSet::new();
    fields.insert(panel.total_field.to_string(), group_thousands(series.total));

    let mut view = ChartView {
        chart,
        fields,
        series_label: String::new(),
        labels: Vec::new(),
        values: Vec::new(),
        major_ticks: Vec::new(),
        peak: None,
        target: None,
        pagination: None,
    };

    match chart {
        ChartKind::Interval => {
            view.series_label = panel.interval_label.to_string();
            view.labels = series.intervals.iter().map(|r| minute_label(&r.end_time)).collect();
            view.values = series.intervals.iter().map(|r| r.count).collect();
            view.major_ticks = view.labels.iter().map(|l| is_major_tick(l)).collect();
            view.peak = peak(&view.values).map(|(index, value)| PeakMarker {
                index,
                value,
                label: format!("Peak: {value} {}", panel.unit),
            });
        }
        ChartKind::Hourly => {
            let buckets = bucket_hourly(&series.intervals);
            view.series_label = panel.hourly_label.to_string();
            view.values = buckets.iter().map(|b| b.total).collect();
            view.labels = buckets.into_iter().map(|b| b.key).collect();
            if panel.shows_target {
                view.target = Some(TargetLine {
                    label: format!("Target ({hourly_target})"),
                    values: vec![hourly_target; view.labels.len()],
                });
            }
        }
        ChartKind::Ranking => {
            let ranked = rank(&series.entities);
            let page = paginate(&ranked, ui.page);
            view.series_label = panel.ranking_label.unwrap_or_default().to_string();
            view.labels = page.items.iter().map(|e| e.name.clone()).collect();
            view.values = page.items.iter().map(|e| e.count).collect();
            view.pagination = Some(Pagination::from(&page));
        }
    }

    view
}

/// Chart panel from a decoded feed; failures blank the total counter
pub fn chart(
    panel: &IntervalPanel,
    data: Result<IntervalSeries>,
    ui: &UiState,
    hourly_target: u64,
) -> Panel<ChartView> {
    Panel::from_result(
        data.map(|series| chart_view(panel, &series, ui, hourly_target)),
        &[panel.total_field],
    )
}

pub const PGI_FIELDS: [&str; 2] = ["deliveries-pgi", "pgi-lines"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PgiView {
    pub fields: FieldSet,
}

pub fn pgi(data: Result<PgiLines>) -> Panel<PgiView> {
    Panel::from_result(
        data.map(|pgi| {
            let mut fields = FieldSet::new();
            fields.insert(PGI_FIELDS[0].to_string(), group_thousands(pgi.total_deliveries));
            fields.insert(PGI_FIELDS[1].to_string(), format!("{} LINES", group_thousands(pgi.total_lines)));
            PgiView { fields }
        }),
        &PGI_FIELDS,
    )
}
