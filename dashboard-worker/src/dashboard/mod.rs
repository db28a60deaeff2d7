//! Dashboard module - warehouse operations web interface
//!
//! Three pages share one stylesheet and one set of script helpers:
//! the main dashboard, the bin heatmap and the conveyor wall display.
//!
//! # Architecture
//! - `html.rs`: Page structure; element ids are view field keys
//! - `css.rs`: Styling with CSS custom properties
//! - `js.rs`: View polling, field updates, Chart.js rendering
//!
//! # Features
//! - Day toggle (today / next working day)
//! - Interval, hourly and leaderboard charts with paging
//! - Activity-coloured bin grid
//! - Auto-refresh at the configured interval

mod css;
mod html;
mod js;

use crate::config::Config;

const CHART_JS: &str = "https://cdn.jsdelivr.net/npm/chart.js";

fn page(title: &str, config: &Config, body: &str, script: &str) -> String {
    let refresh_ms = config.refresh_interval_seconds.saturating_mul(1000);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <script src="{chart_js}"></script>
    <style>
{css}
    </style>
</head>
<body>
{body}
    <script>
const CONFIG = {{ apiBase: '', refreshInterval: {refresh_ms} }};
{common}
{script}
    </script>
</body>
</html>"#,
        chart_js = CHART_JS,
        css = css::STYLES,
        common = js::COMMON,
    )
}

/// Generate the main dashboard page
pub fn dashboard_html(config: &Config) -> String {
    page("Warehouse Operations", config, html::MAIN_TEMPLATE, js::MAIN_SCRIPT)
}

/// Generate the bin heatmap page
pub fn heatmap_html(config: &Config) -> String {
    page("Bin Heatmap", config, html::HEATMAP_TEMPLATE, js::HEATMAP_SCRIPT)
}

/// Generate the conveyor wall display
pub fn conveyor_html(config: &Config) -> String {
    page("Conveyor", config, html::CONVEYOR_TEMPLATE, js::CONVEYOR_SCRIPT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_interval_injected() {
        let config = Config {
            refresh_interval_seconds: 45,
            ..Config::default()
        };
        let html = dashboard_html(&config);
        assert!(html.contains("refreshInterval: 45000"));
        assert!(html.contains(r#"id="ltap-chart""#));
        assert!(html.contains(CHART_JS));
    }

    #[test]
    fn test_pages_carry_their_own_script() {
        let config = Config::default();
        assert!(heatmap_html(&config).contains("function renderHeatmap"));
        assert!(!heatmap_html(&config).contains("function renderPagination"));
        assert!(conveyor_html(&config).contains(r#"id="conveyor-chart""#));
    }

    #[test]
    fn test_views_render_only_latest_response() {
        let html = dashboard_html(&Config::default());
        for key in ["'overview'", "'gi_time'", "'pgi'", "beginRequest(name)"] {
            assert!(html.contains(key), "{key} is not guarded");
        }
        assert!(html.contains("if (!isLatest(name, token)) return;"));
        assert!(heatmap_html(&Config::default()).contains("isLatest('heatmap', token)"));
    }
}
