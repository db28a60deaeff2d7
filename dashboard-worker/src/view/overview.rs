//! Overview panel and GI-time chart built from the statistics feed

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, TimeDelta, Weekday};
use serde::Serialize;

use crate::bucketing::{UNKNOWN_BUCKET, minute_label, sort_time_keys};
use crate::error::{DashboardError, Placeholder, Result};
use crate::types::{DayStats, GroupStats, StatisticsResponse};
use crate::view::{DaySelection, FieldSet, Panel, group_thousands, placeholder_fields};

const NOT_AVAILABLE: &str = "N/A";

pub const DAY_INDICATOR: &str = "day-indicator";
pub const LAST_UPDATE: &str = "last-update";

/// Day-level fields: "N/A" when missing or zero
const TOP_FIELDS: [&str; 9] = [
    "open-deliveries",
    "open-hu",
    "open-lines",
    "open-picked-lines",
    "open-lines-not-picked",
    "lines-per-hu",
    "total-quantity",
    "picked-percentage",
    "not-picked-percentage",
];

#[derive(Debug, Clone, Copy)]
enum Counter {
    Deliveries,
    Hu,
    Lines,
    LinesPicked,
    LinesNotPicked,
    Qty,
}

impl Counter {
    fn suffix(self) -> &'static str {
        match self {
            Counter::Deliveries => "deliveries",
            Counter::Hu => "hu",
            Counter::Lines => "lines",
            Counter::LinesPicked => "lines-picked",
            Counter::LinesNotPicked => "lines-not-picked",
            Counter::Qty => "qty",
        }
    }

    fn of(self, group: &GroupStats) -> Option<u64> {
        match self {
            Counter::Deliveries => group.deliveries,
            Counter::Hu => group.hu,
            Counter::Lines => group.lines,
            Counter::LinesPicked => group.lines_picked,
            Counter::LinesNotPicked => group.lines_not_picked,
            Counter::Qty => group.qty,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Grouping {
    Status,
    Process,
    Nesting,
    Consolidation,
    Vas,
    DangerousGoods,
}

impl Grouping {
    fn of(self, stats: &DayStats) -> &BTreeMap<String, GroupStats> {
        match self {
            Grouping::Status => &stats.by_status,
            Grouping::Process => &stats.by_process,
            Grouping::Nesting => &stats.by_nesting,
            Grouping::Consolidation => &stats.by_cons,
            Grouping::Vas => &stats.by_vas,
            Grouping::DangerousGoods => &stats.by_dg_vas,
        }
    }
}

/// One box of the overview, fed by a single group of a grouping
struct Section {
    prefix: &'static str,
    grouping: Grouping,
    key: &'static str,
    counters: &'static [Counter],
    /// Zero in a present group shows "N/A" instead of "0"
    zero_is_missing: bool,
}

const FLAG_COUNTERS: &[Counter] = &[Counter::Deliveries, Counter::Hu, Counter::Lines, Counter::LinesNotPicked];
const VAS_COUNTERS: &[Counter] = &[
    Counter::Deliveries,
    Counter::Hu,
    Counter::Lines,
    Counter::LinesNotPicked,
    Counter::Qty,
];

const SECTIONS: [Section; 9] = [
    Section {
        prefix: "status-a",
        grouping: Grouping::Status,
        key: "A",
        counters: &[Counter::Deliveries, Counter::Hu],
        zero_is_missing: true,
    },
    Section {
        prefix: "status-b",
        grouping: Grouping::Status,
        key: "B",
        counters: &[
            Counter::Deliveries,
            Counter::Hu,
            Counter::Lines,
            Counter::LinesPicked,
            Counter::LinesNotPicked,
        ],
        zero_is_missing: true,
    },
    Section {
        prefix: "status-c",
        grouping: Grouping::Status,
        key: "C",
        counters: &[Counter::Deliveries, Counter::Hu, Counter::Lines],
        zero_is_missing: true,
    },
    Section {
        prefix: "process-p2b",
        grouping: Grouping::Process,
        key: "P2B",
        counters: &[Counter::Deliveries, Counter::Lines],
        zero_is_missing: false,
    },
    Section {
        prefix: "process-legacy",
        grouping: Grouping::Process,
        key: "LEGACY",
        counters: &[Counter::Deliveries, Counter::Lines],
        zero_is_missing: false,
    },
    Section {
        prefix: "nesting",
        grouping: Grouping::Nesting,
        key: "true",
        counters: FLAG_COUNTERS,
        zero_is_missing: false,
    },
    Section {
        prefix: "cons",
        grouping: Grouping::Consolidation,
        key: "true",
        counters: FLAG_COUNTERS,
        zero_is_missing: false,
    },
    Section {
        prefix: "vas",
        grouping: Grouping::Vas,
        key: "True",
        counters: VAS_COUNTERS,
        zero_is_missing: false,
    },
    Section {
        prefix: "dg",
        grouping: Grouping::DangerousGoods,
        key: "True",
        counters: VAS_COUNTERS,
        zero_is_missing: false,
    },
];

/// Every value field of the overview (without day indicator and last update)
pub fn field_ids() -> Vec<String> {
    let mut ids: Vec<String> = TOP_FIELDS.iter().map(|id| (*id).to_string()).collect();
    for section in &SECTIONS {
        for counter in section.counters {
            ids.push(format!("{}-{}", section.prefix, counter.suffix()));
        }
    }
    ids
}

fn positive(value: Option<u64>) -> Option<u64> {
    value.filter(|v| *v > 0)
}

fn or_na(value: Option<u64>) -> String {
    positive(value).map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string())
}

fn or_zero(value: Option<u64>) -> String {
    positive(value).unwrap_or(0).to_string()
}

fn percent_of_lines(part: Option<u64>, lines: Option<u64>) -> String {
    match (part, positive(lines)) {
        (Some(part), Some(lines)) => format!("{:.1}% OF LINES", part as f64 / lines as f64 * 100.0),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Text of every overview field for one day
pub fn overview_fields(stats: &DayStats) -> FieldSet {
    let totals = &stats.totals;
    let mut fields = FieldSet::new();
    let mut set = |id: &str, value: String| {
        fields.insert(id.to_string(), value);
    };

    set("open-deliveries", or_na(totals.deliveries));
    set("open-hu", or_na(totals.hu));
    set("open-lines", or_na(totals.lines));
    set("open-picked-lines", or_na(totals.lines_picked));
    set("open-lines-not-picked", or_na(totals.lines_not_picked));

    set(
        "lines-per-hu",
        match (positive(totals.lines), positive(totals.hu)) {
            (Some(lines), Some(hu)) => format!("{:.1} LINES / HU", lines as f64 / hu as f64),
            _ => NOT_AVAILABLE.to_string(),
        },
    );
    set(
        "total-quantity",
        positive(totals.qty).map_or_else(
            || NOT_AVAILABLE.to_string(),
            |qty| format!("{} QUANTITY", group_thousands(qty)),
        ),
    );
    set("picked-percentage", percent_of_lines(totals.lines_picked, totals.lines));
    set("not-picked-percentage", percent_of_lines(totals.lines_not_picked, totals.lines));

    for section in &SECTIONS {
        let group = section.grouping.of(stats).get(section.key);
        for counter in section.counters {
            let id = format!("{}-{}", section.prefix, counter.suffix());
            let value = match group {
                None => "0".to_string(),
                Some(group) if section.zero_is_missing => or_na(counter.of(group)),
                Some(group) => or_zero(counter.of(group)),
            };
            set(&id, value);
        }
    }

    fields
}

/// Next working day: Saturday and Sunday skip to Monday
pub fn next_working_day(today: NaiveDate) -> NaiveDate {
    let skip = match today.weekday() {
        Weekday::Fri => 3,
        Weekday::Sat => 2,
        _ => 1,
    };
    today.checked_add_days(Days::new(skip)).unwrap_or(today)
}

/// `DD-MM-YY`
pub fn short_date(date: NaiveDate) -> String {
    date.format("%d-%m-%y").to_string()
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.naive_utc())
        })
}

/// `at + offset_hours`; `None` when out of range
fn shift_hours(at: NaiveDateTime, offset_hours: i64) -> Option<NaiveDateTime> {
    TimeDelta::try_hours(offset_hours).and_then(|offset| at.checked_add_signed(offset))
}

/// `"Last Update: DD-MM-YY HH:MM:SS"`, shifted by `offset_hours`
pub fn last_update_label(last_modified: &str, offset_hours: i64) -> Option<String> {
    let shifted = shift_hours(parse_timestamp(last_modified)?, offset_hours)?;
    Some(format!("Last Update: {}", shifted.format("%d-%m-%y %H:%M:%S")))
}

/// Date the statistics call "today", else the shifted clock's date
pub fn today_of(response: Option<&StatisticsResponse>, now: NaiveDateTime, offset_hours: i64) -> NaiveDate {
    response
        .and_then(|r| r.today.as_deref())
        .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok())
        .unwrap_or_else(|| shift_hours(now, offset_hours).unwrap_or(now).date())
}

fn entry_for(response: &StatisticsResponse, date: NaiveDate) -> Option<&DayStats> {
    let wanted = date.format("%Y-%m-%d").to_string();
    response
        .data
        .as_ref()?
        .by_date
        .iter()
        .find(|entry| entry.date == wanted)?
        .stats
        .as_ref()
}

/// Stats for the selected day
fn select_day(response: &StatisticsResponse, day: DaySelection, today: NaiveDate) -> Result<&DayStats> {
    match day {
        DaySelection::Today => response
            .today_data
            .as_ref()
            .and_then(|entry| entry.stats.as_ref())
            .or_else(|| {
                response
                    .data
                    .as_ref()
                    .and_then(|d| d.by_date.first())
                    .and_then(|entry| entry.stats.as_ref())
            })
            .ok_or_else(|| DashboardError::Upstream("no statistics for today".into())),
        DaySelection::Tomorrow => {
            let date = next_working_day(today);
            entry_for(response, date)
                .ok_or_else(|| DashboardError::NoData(format!("no statistics for {date}")))
        }
    }
}

/// Overview panel view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub fields: FieldSet,
}

/// Build the overview for the selected day.
///
/// Today falls back to the first listed day; with nothing to show it is an
/// error. A missing next working day is "No Data".
pub fn overview(
    data: Result<StatisticsResponse>,
    day: DaySelection,
    now: NaiveDateTime,
    offset_hours: i64,
) -> Panel<Overview> {
    let today = today_of(data.as_ref().ok(), now, offset_hours);

    let result = data.and_then(|response| {
        let stats = select_day(&response, day, today)?;
        let mut fields = overview_fields(stats);

        let indicator = match day {
            DaySelection::Today => "Showing: Today".to_string(),
            DaySelection::Tomorrow => format!("Showing: {} (Tomorrow)", short_date(next_working_day(today))),
        };
        fields.insert(DAY_INDICATOR.to_string(), indicator);

        if let Some(label) = response
            .last_modified
            .as_deref()
            .and_then(|raw| last_update_label(raw, offset_hours))
        {
            fields.insert(LAST_UPDATE.to_string(), label);
        }
        Ok(Overview { fields })
    });

    match result {
        Ok(view) => Panel::Ready(view),
        Err(err) => {
            let placeholder = match day {
                DaySelection::Today => Placeholder::Error,
                DaySelection::Tomorrow => err.placeholder(),
            };
            let mut fields = placeholder_fields(field_ids(), placeholder);
            if day == DaySelection::Tomorrow && placeholder == Placeholder::NoData {
                fields.insert(
                    DAY_INDICATOR.to_string(),
                    format!("Showing: {} (No Data Available)", short_date(next_working_day(today))),
                );
            }
            Panel::with_placeholder(placeholder, err.to_string(), fields)
        }
    }
}

/// GI-time chart view: one slot per GI time, Unknown last
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GiTimeChart {
    pub labels: Vec<String>,
    pub deliveries: Vec<u64>,
    pub hu: Vec<u64>,
    pub lines: Vec<u64>,
    pub lines_picked: Vec<u64>,
    pub lines_not_picked: Vec<u64>,
}

pub fn gi_time_chart(by_gi_time: &BTreeMap<String, GroupStats>) -> GiTimeChart {
    let mut chart = GiTimeChart::default();
    for key in sort_time_keys(by_gi_time.keys().map(String::as_str)) {
        let Some(slot) = by_gi_time.get(key) else {
            continue;
        };
        chart.labels.push(if key == UNKNOWN_BUCKET {
            key.to_string()
        } else {
            minute_label(key)
        });
        chart.deliveries.push(slot.deliveries.unwrap_or(0));
        chart.hu.push(slot.hu.unwrap_or(0));
        chart.lines.push(slot.lines.unwrap_or(0));
        chart.lines_picked.push(slot.lines_picked.unwrap_or(0));
        chart.lines_not_picked.push(slot.lines_not_picked.unwrap_or(0));
    }
    chart
}

fn gi_time_for(response: &StatisticsResponse, day: DaySelection, today: NaiveDate) -> Result<GiTimeChart> {
    let slots = match day {
        DaySelection::Today => response
            .today_data
            .as_ref()
            .and_then(|entry| entry.stats.as_ref())
            .and_then(|stats| stats.by_gi_time.as_ref())
            .or_else(|| {
                response.data.as_ref().and_then(|d| {
                    d.by_date
                        .iter()
                        .find_map(|entry| entry.stats.as_ref()?.by_gi_time.as_ref())
                })
            }),
        DaySelection::Tomorrow => select_day(response, day, today)?.by_gi_time.as_ref(),
    };

    slots
        .map(gi_time_chart)
        .ok_or_else(|| DashboardError::NoData("no GI time data".into()))
}

/// GI-time chart for the selected day
pub fn gi_time(
    data: Result<StatisticsResponse>,
    day: DaySelection,
    now: NaiveDateTime,
    offset_hours: i64,
) -> Panel<GiTimeChart> {
    let today = today_of(data.as_ref().ok(), now, offset_hours);
    Panel::from_result(data.and_then(|response| gi_time_for(&response, day, today)), &[])
}
