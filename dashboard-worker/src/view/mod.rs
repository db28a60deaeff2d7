//! Render-ready view models
//!
//! Every view is a pure function of stored feed data and the [`UiState`]
//! the browser sends along with the request. The browser only copies the
//! results into the DOM and into Chart.js datasets.

pub mod charts;
pub mod heatmap;
pub mod overview;

use std::collections::BTreeMap;
use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Placeholder, Result};
use crate::ranking::PageState;

/// Text per DOM element id
pub type FieldSet = BTreeMap<String, String>;

/// Which chart a panel shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    #[default]
    Interval,
    Hourly,
    /// Leaderboard of pickers or palletizers
    #[serde(alias = "picker", alias = "palletizer")]
    Ranking,
}

impl ChartKind {
    pub fn from_param(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "interval" => Some(ChartKind::Interval),
            "hourly" => Some(ChartKind::Hourly),
            "ranking" | "picker" | "palletizer" => Some(ChartKind::Ranking),
            _ => None,
        }
    }
}

/// Day shown by the overview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DaySelection {
    #[default]
    Today,
    /// Next working day
    Tomorrow,
}

impl DaySelection {
    pub fn from_param(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "today" => Some(DaySelection::Today),
            "tomorrow" => Some(DaySelection::Tomorrow),
            _ => None,
        }
    }
}

/// UI state carried by each view request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    pub chart: ChartKind,
    pub page: PageState,
    pub day: DaySelection,
}

impl UiState {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            chart: ChartKind::default(),
            page: PageState::first(page_size),
            day: DaySelection::default(),
        }
    }

    /// Parse `chart`, `page` and `day` query parameters; bad values keep their defaults
    pub fn from_query<I, K, V>(pairs: I, page_size: NonZeroUsize) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut state = Self::new(page_size);
        for (key, value) in pairs {
            let value = value.as_ref();
            match key.as_ref() {
                "chart" => {
                    if let Some(chart) = ChartKind::from_param(value) {
                        state.chart = chart;
                    }
                }
                "page" => {
                    if let Ok(page_index) = value.trim().parse() {
                        state.page = PageState::new(page_index, page_size);
                    }
                }
                "day" => {
                    if let Some(day) = DaySelection::from_param(value) {
                        state.day = day;
                    }
                }
                _ => {}
            }
        }
        state
    }
}

/// A panel view: the rendered data, or the placeholder every field shows instead
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Panel<T> {
    Ready(T),
    Error { message: String, fields: FieldSet },
    NoData { message: String, fields: FieldSet },
}

impl<T> Panel<T> {
    /// Degraded panel with `field_ids` set to the error's placeholder
    pub fn degraded(err: &DashboardError, field_ids: &[&str]) -> Self {
        let placeholder = err.placeholder();
        Self::with_placeholder(placeholder, err.to_string(), placeholder_fields(field_ids, placeholder))
    }

    pub fn with_placeholder(placeholder: Placeholder, message: String, fields: FieldSet) -> Self {
        match placeholder {
            Placeholder::Error => Panel::Error { message, fields },
            Placeholder::NoData => Panel::NoData { message, fields },
        }
    }

    pub fn from_result(result: Result<T>, field_ids: &[&str]) -> Self {
        match result {
            Ok(view) => Panel::Ready(view),
            Err(e) => Self::degraded(&e, field_ids),
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Panel::Ready(view) => Some(view),
            _ => None,
        }
    }

    /// Fields of a degraded panel
    pub fn placeholder_fields(&self) -> Option<&FieldSet> {
        match self {
            Panel::Ready(_) => None,
            Panel::Error { fields, .. } | Panel::NoData { fields, .. } => Some(fields),
        }
    }
}

/// Every id in `field_ids` set to the placeholder text
pub fn placeholder_fields<I, S>(field_ids: I, placeholder: Placeholder) -> FieldSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    field_ids
        .into_iter()
        .map(|id| (id.as_ref().to_string(), placeholder.text().to_string()))
        .collect()
}

/// `1234567` -> `"1,234,567"`
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_ui_state_from_query() {
        let state = UiState::from_query([("chart", "picker"), ("page", "2"), ("day", "tomorrow")], size(10));

        assert_eq!(state.chart, ChartKind::Ranking);
        assert_eq!(state.page, PageState::new(2, size(10)));
        assert_eq!(state.day, DaySelection::Tomorrow);
    }

    #[test]
    fn test_ui_state_bad_values_keep_defaults() {
        let state = UiState::from_query(
            vec![
                ("chart".to_string(), "pie".to_string()),
                ("page".to_string(), "-1".to_string()),
                ("day".to_string(), "yesterday".to_string()),
                ("other".to_string(), "x".to_string()),
            ],
            size(5),
        );

        assert_eq!(state, UiState::new(size(5)));
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_degraded_panel() {
        let panel: Panel<()> = Panel::degraded(&DashboardError::Upstream("file not found".into()), &["a", "b"]);
        let fields = panel.placeholder_fields().unwrap();
        assert_eq!(fields["a"], "Error");
        assert_eq!(fields.len(), 2);

        let panel: Panel<()> = Panel::degraded(&DashboardError::NoData("empty".into()), &["a"]);
        assert!(matches!(panel, Panel::NoData { .. }));
        assert_eq!(panel.placeholder_fields().unwrap()["a"], "No Data");
    }

    #[test]
    fn test_panel_serializes_state_tag() {
        #[derive(Serialize)]
        struct View {
            total: u64,
        }

        let json = serde_json::to_value(Panel::Ready(View { total: 3 })).unwrap();
        assert_eq!(json["state"], "ready");
        assert_eq!(json["total"], 3);

        let json = serde_json::to_value(Panel::<View>::degraded(&DashboardError::Http("down".into()), &["x"])).unwrap();
        assert_eq!(json["state"], "error");
        assert_eq!(json["fields"]["x"], "Error");
    }
}
