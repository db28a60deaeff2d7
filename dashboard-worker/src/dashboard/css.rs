//! Dashboard CSS styles
//!
//! Shared by the dashboard, heatmap and conveyor pages.
//! Uses CSS custom properties (variables) for theming.

pub const STYLES: &str = r"
* { box-sizing: border-box; margin: 0; padding: 0; }

:root {
    --bg: #0d1117;
    --card: #161b22;
    --border: #30363d;
    --text: #c9d1d9;
    --text-dim: #8b949e;
    --green: #3fb950;
    --red: #f85149;
    --blue: #1919ec;
    --yellow: #d29922;
    --purple: #7e57c2;
    --column-gap: 4px;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    background: var(--bg);
    color: var(--text);
    padding: 20px;
    min-height: 100vh;
}

.container { max-width: 1400px; margin: 0 auto; }
.container-full { max-width: none; }

/* Header */
header {
    display: flex;
    justify-content: space-between;
    align-items: center;
    margin-bottom: 24px;
    padding-bottom: 16px;
    border-bottom: 1px solid var(--border);
}

h1 { font-size: 24px; font-weight: 600; }

.header-controls {
    display: flex;
    align-items: center;
    gap: 12px;
}

.refresh-time { font-size: 12px; color: var(--text-dim); }
.day-indicator { font-size: 13px; color: var(--yellow); }
.total { font-size: 18px; color: var(--text); margin-left: 8px; }

/* Buttons */
.btn {
    padding: 8px 16px;
    border-radius: 6px;
    border: none;
    font-size: 13px;
    font-weight: 500;
    cursor: pointer;
    text-decoration: none;
    transition: all 0.2s;
}

.btn:disabled { opacity: 0.6; cursor: not-allowed; }
.btn-primary { background: var(--blue); color: #fff; }
.btn-primary:hover:not(:disabled) { background: #3535f0; }
.btn-secondary { background: var(--border); color: var(--text); }
.btn-secondary:hover:not(:disabled) { background: #3d444d; }
.btn.tomorrow-active { background: var(--yellow); color: var(--bg); }

/* Grid Layout */
.grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(300px, 1fr));
    gap: 16px;
}

.card-wide { grid-column: 1 / -1; }

/* Cards */
.card {
    background: var(--card);
    border: 1px solid var(--border);
    border-radius: 12px;
    padding: 20px;
}

.card-header {
    display: flex;
    justify-content: space-between;
    align-items: center;
    margin-bottom: 16px;
}

.card-title {
    font-size: 14px;
    color: var(--text-dim);
    text-transform: uppercase;
    letter-spacing: 0.5px;
}

.card-value { font-size: 28px; font-weight: 700; }

/* Metrics Grid */
.metrics {
    display: flex;
    flex-wrap: wrap;
    gap: 16px;
    margin-top: 12px;
}

.metric { flex: 1; min-width: 100px; }
.metric-label { font-size: 11px; color: var(--text-dim); text-transform: uppercase; }
.metric-value { font-size: 18px; font-weight: 600; margin-top: 2px; }
.metric-sub { font-size: 13px; color: var(--text-dim); margin-top: 4px; }

/* Chart sections */
.section {
    background: var(--card);
    border: 1px solid var(--border);
    border-radius: 12px;
    padding: 20px;
    margin-top: 16px;
}

.section-header {
    display: flex;
    justify-content: space-between;
    align-items: center;
    margin-bottom: 12px;
}

.section-title {
    font-size: 14px;
    color: var(--text-dim);
    text-transform: uppercase;
    letter-spacing: 0.5px;
}

.chart-container { position: relative; height: 320px; }
.chart-tall { height: calc(100vh - 140px); }

.chart-selector { display: flex; gap: 6px; }

.chart-button {
    padding: 5px 12px;
    border-radius: 6px;
    border: 1px solid var(--border);
    background: transparent;
    color: var(--text-dim);
    font-size: 12px;
    cursor: pointer;
}

.chart-button.active { background: var(--blue); border-color: var(--blue); color: #fff; }

.chart-footer {
    display: flex;
    justify-content: space-between;
    align-items: center;
    min-height: 32px;
    margin-top: 8px;
}

.peak-indicator { font-size: 12px; color: var(--yellow); }

/* Pagination */
.pagination-container { display: none; align-items: center; gap: 10px; }
.pagination-container.visible { display: flex; }

.pagination-button {
    padding: 4px 10px;
    border-radius: 6px;
    border: 1px solid var(--border);
    background: var(--border);
    color: var(--text);
    cursor: pointer;
}

.pagination-button:disabled { opacity: 0.4; cursor: not-allowed; }
.page-indicator { font-size: 12px; color: var(--text-dim); }

/* Heatmap */
.heatmap {
    display: grid;
    gap: var(--column-gap);
}

.bin {
    background: var(--card);
    border: 1px solid var(--border);
    border-radius: 4px;
    padding: 6px 2px;
    font-size: 10px;
    text-align: center;
    cursor: pointer;
}

.bin.empty { opacity: 0.35; border-style: dashed; }
.bin.low, .swatch.low { background: rgba(63, 185, 80, 0.45); }
.bin.medium, .swatch.medium { background: rgba(210, 153, 34, 0.6); }
.bin.high, .swatch.high { background: rgba(248, 81, 73, 0.75); }

.legend { font-size: 12px; color: var(--text-dim); display: flex; align-items: center; gap: 6px; }
.swatch { display: inline-block; width: 12px; height: 12px; border-radius: 2px; }

.error-message { color: var(--red); padding: 24px; text-align: center; grid-column: 1 / -1; }

footer { margin-top: 24px; font-size: 12px; color: var(--text-dim); text-align: center; }
footer a { color: var(--text-dim); }

/* Responsive */
@media (max-width: 600px) {
    .grid { grid-template-columns: 1fr; }
    header { flex-direction: column; gap: 12px; }
    .header-controls { flex-wrap: wrap; justify-content: center; }
}
";
