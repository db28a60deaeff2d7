//! Bin heatmap view

use serde::Serialize;

use crate::activity::{ActivityLevel, ActivityRange, counts_by_location, normalize, resolve_overlay};
use crate::error::Result;
use crate::types::{ActivityOverlay, Bin, BinLayout};
use crate::view::Panel;

pub const HEATMAP_FIELD: &str = "heatmap";

/// One bin on the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatmapCell {
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
    pub empty: bool,
    pub count: u64,
    /// `None` for bins without activity
    pub level: Option<ActivityLevel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatmapView {
    pub columns: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
    pub column_gap_px: u32,
    pub cells: Vec<HeatmapCell>,
    /// False when the activity feed is unavailable; cells then carry no level
    pub activity_available: bool,
    pub min_activity: u64,
    pub max_activity: u64,
    pub total_activities: u64,
}

/// Grid placement: row and column when both are set, column alone otherwise
fn placement(bin: &Bin) -> (Option<u32>, Option<u32>) {
    let row = bin.row.filter(|r| *r > 0);
    let column = bin.column.filter(|c| *c > 0);
    match (row, column) {
        (Some(row), Some(column)) => (Some(row), Some(column)),
        (_, column) => (None, column),
    }
}

pub fn heatmap_view(layout: &BinLayout, overlay: Option<ActivityOverlay>, column_gap_px: u32) -> HeatmapView {
    let activity_available = overlay.is_some();
    let overlay = overlay.map(resolve_overlay).unwrap_or_default();
    let range = ActivityRange::for_overlay(&overlay);
    let counts = counts_by_location(&overlay);
    let levels = normalize(&counts, range);

    let cells = layout
        .bins
        .iter()
        .map(|bin| {
            let (row, column) = placement(bin);
            let count = counts.get(&bin.location).copied().unwrap_or(0);
            HeatmapCell {
                location: bin.location.clone(),
                row,
                column,
                empty: bin.is_empty(),
                count,
                level: levels.get(&bin.location).copied(),
            }
        })
        .collect();

    HeatmapView {
        columns: layout.columns,
        rows: layout.rows,
        column_gap_px,
        cells,
        activity_available,
        min_activity: range.min,
        max_activity: range.max,
        total_activities: overlay.total_activities,
    }
}

/// Heatmap panel; the layout is required, the activity overlay is optional
pub fn heatmap(
    layout: Result<BinLayout>,
    activity: Result<ActivityOverlay>,
    column_gap_px: u32,
) -> Panel<HeatmapView> {
    Panel::from_result(
        layout.map(|layout| heatmap_view(&layout, activity.ok(), column_gap_px)),
        &[HEATMAP_FIELD],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;
    use crate::types::BinActivity;

    fn bin(location: &str, row: Option<u32>, column: Option<u32>, status: Option<&str>) -> Bin {
        Bin {
            location: location.to_string(),
            row,
            column,
            status: status.map(str::to_string),
        }
    }

    fn layout() -> BinLayout {
        BinLayout {
            columns: 3,
            rows: Some(2),
            bins: vec![
                bin("C1", Some(1), Some(1), None),
                bin("C2", None, Some(2), None),
                bin("C3", Some(2), None, Some("empty")),
                bin("C4", Some(2), Some(3), None),
            ],
        }
    }

    fn overlay() -> ActivityOverlay {
        ActivityOverlay {
            activity_data: vec![
                BinActivity { location: "C1".into(), activity_count: 10 },
                BinActivity { location: "C2".into(), activity_count: 55 },
                BinActivity { location: "C4".into(), activity_count: 100 },
            ],
            min_activity: Some(0),
            max_activity: Some(100),
            total_activities: 165,
            source_bins: Vec::new(),
        }
    }

    #[test]
    fn test_cells_placement_and_levels() {
        let view = heatmap_view(&layout(), Some(overlay()), 4);

        assert_eq!(view.columns, 3);
        assert_eq!(view.column_gap_px, 4);
        assert_eq!(view.cells.len(), 4);

        let c1 = &view.cells[0];
        assert_eq!((c1.row, c1.column), (Some(1), Some(1)));
        assert_eq!(c1.level, Some(ActivityLevel::Low));

        let c2 = &view.cells[1];
        assert_eq!((c2.row, c2.column), (None, Some(2)));
        assert_eq!(c2.level, Some(ActivityLevel::Medium));

        let c3 = &view.cells[2];
        assert_eq!((c3.row, c3.column), (None, None));
        assert!(c3.empty);
        assert_eq!(c3.count, 0);
        assert_eq!(c3.level, None);

        assert_eq!(view.cells[3].level, Some(ActivityLevel::High));
        assert_eq!(view.total_activities, 165);
    }

    #[test]
    fn test_missing_activity_still_renders_layout() {
        let panel = heatmap(Ok(layout()), Err(DashboardError::Upstream("CSV file not found".into())), 4);

        let view = panel.ready().unwrap();
        assert!(!view.activity_available);
        assert!(view.cells.iter().all(|c| c.level.is_none()));
    }

    #[test]
    fn test_missing_layout_is_error() {
        let panel = heatmap(Err(DashboardError::Http("timeout".into())), Ok(overlay()), 4);
        assert_eq!(panel.placeholder_fields().unwrap()[HEATMAP_FIELD], "Error");
    }

    #[test]
    fn test_raw_source_bins_are_aggregated() {
        let raw = ActivityOverlay {
            source_bins: vec!["C1A".into(), "C1B".into(), "C4X".into()],
            ..ActivityOverlay::default()
        };

        let view = heatmap_view(&layout(), Some(raw), 4);

        assert_eq!(view.cells[0].count, 2);
        assert_eq!(view.cells[0].level, Some(ActivityLevel::High));
        assert_eq!(view.cells[3].level, Some(ActivityLevel::Low));
    }
}
