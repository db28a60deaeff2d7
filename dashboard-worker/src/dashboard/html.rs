//! Dashboard HTML templates
//!
//! Element ids match the field keys of the `/api/view/*` responses, so the
//! script can copy fields into the page without knowing what they mean.

pub const MAIN_TEMPLATE: &str = r#"
    <div class="container">
        <header>
            <div>
                <h1>Warehouse Operations</h1>
                <span class="refresh-time" id="last-update">Last Update: --</span>
            </div>
            <div class="header-controls">
                <span class="day-indicator" id="day-indicator">Showing: Today</span>
                <button class="btn btn-secondary" id="toggle-day-button">Show Tomorrow</button>
                <button class="btn btn-primary" id="refresh-button">Refresh</button>
            </div>
        </header>

        <div class="grid">
            <!-- Open deliveries -->
            <div class="card card-wide">
                <div class="card-header"><span class="card-title">Open Deliveries</span></div>
                <div class="metrics metrics-5">
                    <div class="metric"><div class="metric-label">Deliveries</div><div class="metric-value" id="open-deliveries">--</div></div>
                    <div class="metric"><div class="metric-label">HU</div><div class="metric-value" id="open-hu">--</div></div>
                    <div class="metric"><div class="metric-label">Lines</div><div class="metric-value" id="open-lines">--</div></div>
                    <div class="metric"><div class="metric-label">Picked</div><div class="metric-value" id="open-picked-lines">--</div></div>
                    <div class="metric"><div class="metric-label">Not Picked</div><div class="metric-value" id="open-lines-not-picked">--</div></div>
                </div>
                <div class="metrics metrics-4">
                    <div class="metric"><div class="metric-sub" id="lines-per-hu">--</div></div>
                    <div class="metric"><div class="metric-sub" id="total-quantity">--</div></div>
                    <div class="metric"><div class="metric-sub" id="picked-percentage">--</div></div>
                    <div class="metric"><div class="metric-sub" id="not-picked-percentage">--</div></div>
                </div>
            </div>

            <!-- Status -->
            <div class="card">
                <div class="card-header"><span class="card-title">Status A</span></div>
                <div class="metrics">
                    <div class="metric"><div class="metric-label">Deliveries</div><div class="metric-value" id="status-a-deliveries">--</div></div>
                    <div class="metric"><div class="metric-label">HU</div><div class="metric-value" id="status-a-hu">--</div></div>
                </div>
            </div>
            <div class="card">
                <div class="card-header"><span class="card-title">Status B</span></div>
                <div class="metrics">
                    <div class="metric"><div class="metric-label">Deliveries</div><div class="metric-value" id="status-b-deliveries">--</div></div>
                    <div class="metric"><div class="metric-label">HU</div><div class="metric-value" id="status-b-hu">--</div></div>
                    <div class="metric"><div class="metric-label">Lines</div><div class="metric-value" id="status-b-lines">--</div></div>
                    <div class="metric"><div class="metric-label">Picked</div><div class="metric-value" id="status-b-lines-picked">--</div></div>
                    <div class="metric"><div class="metric-label">Not Picked</div><div class="metric-value" id="status-b-lines-not-picked">--</div></div>
                </div>
            </div>
            <div class="card">
                <div class="card-header"><span class="card-title">Status C</span></div>
                <div class="metrics">
                    <div class="metric"><div class="metric-label">Deliveries</div><div class="metric-value" id="status-c-deliveries">--</div></div>
                    <div class="metric"><div class="metric-label">HU</div><div class="metric-value" id="status-c-hu">--</div></div>
                    <div class="metric"><div class="metric-label">Lines</div><div class="metric-value" id="status-c-lines">--</div></div>
                </div>
            </div>

            <!-- Process -->
            <div class="card">
                <div class="card-header"><span class="card-title">Process</span></div>
                <div class="metrics">
                    <div class="metric"><div class="metric-label">P2B Deliveries</div><div class="metric-value" id="process-p2b-deliveries">--</div></div>
                    <div class="metric"><div class="metric-label">P2B Lines</div><div class="metric-value" id="process-p2b-lines">--</div></div>
                    <div class="metric"><div class="metric-label">Legacy Deliveries</div><div class="metric-value" id="process-legacy-deliveries">--</div></div>
                    <div class="metric"><div class="metric-label">Legacy Lines</div><div class="metric-value" id="process-legacy-lines">--</div></div>
                </div>
            </div>

            <!-- Nesting / consolidation -->
            <div class="card">
                <div class="card-header"><span class="card-title">Nesting / Consolidation</span></div>
                <div class="metrics">
                    <div class="metric"><div class="metric-label">Nesting Deliveries</div><div class="metric-value" id="nesting-deliveries">--</div></div>
                    <div class="metric"><div class="metric-label">Nesting HU</div><div class="metric-value" id="nesting-hu">--</div></div>
                    <div class="metric"><div class="metric-label">Nesting Lines</div><div class="metric-value" id="nesting-lines">--</div></div>
                    <div class="metric"><div class="metric-label">Nesting Not Picked</div><div class="metric-value" id="nesting-lines-not-picked">--</div></div>
                    <div class="metric"><div class="metric-label">Cons Deliveries</div><div class="metric-value" id="cons-deliveries">--</div></div>
                    <div class="metric"><div class="metric-label">Cons HU</div><div class="metric-value" id="cons-hu">--</div></div>
                    <div class="metric"><div class="metric-label">Cons Lines</div><div class="metric-value" id="cons-lines">--</div></div>
                    <div class="metric"><div class="metric-label">Cons Not Picked</div><div class="metric-value" id="cons-lines-not-picked">--</div></div>
                </div>
            </div>

            <!-- VAS / DG -->
            <div class="card">
                <div class="card-header"><span class="card-title">VAS / DG</span></div>
                <div class="metrics">
                    <div class="metric"><div class="metric-label">VAS Deliveries</div><div class="metric-value" id="vas-deliveries">--</div></div>
                    <div class="metric"><div class="metric-label">VAS HU</div><div class="metric-value" id="vas-hu">--</div></div>
                    <div class="metric"><div class="metric-label">VAS Lines</div><div class="metric-value" id="vas-lines">--</div></div>
                    <div class="metric"><div class="metric-label">VAS Not Picked</div><div class="metric-value" id="vas-lines-not-picked">--</div></div>
                    <div class="metric"><div class="metric-label">VAS Qty</div><div class="metric-value" id="vas-qty">--</div></div>
                    <div class="metric"><div class="metric-label">DG Deliveries</div><div class="metric-value" id="dg-deliveries">--</div></div>
                    <div class="metric"><div class="metric-label">DG HU</div><div class="metric-value" id="dg-hu">--</div></div>
                    <div class="metric"><div class="metric-label">DG Lines</div><div class="metric-value" id="dg-lines">--</div></div>
                    <div class="metric"><div class="metric-label">DG Not Picked</div><div class="metric-value" id="dg-lines-not-picked">--</div></div>
                    <div class="metric"><div class="metric-label">DG Qty</div><div class="metric-value" id="dg-qty">--</div></div>
                </div>
            </div>

            <!-- PGI -->
            <div class="card">
                <div class="card-header"><span class="card-title">PGI</span></div>
                <div class="card-value" id="deliveries-pgi">--</div>
                <div class="metric-sub" id="pgi-lines">--</div>
            </div>
        </div>

        <!-- GI time -->
        <div class="section">
            <div class="section-header"><span class="section-title">GI Time</span></div>
            <div class="chart-container"><canvas id="gi-time-chart"></canvas></div>
        </div>

        <!-- Picks -->
        <div class="section" data-panel="picks">
            <div class="section-header">
                <span class="section-title">Picks <span class="total" id="total-picks-count">--</span></span>
                <div class="chart-selector">
                    <button class="chart-button active" data-chart="interval">Interval</button>
                    <button class="chart-button" data-chart="hourly">Hourly</button>
                    <button class="chart-button" data-chart="ranking">Pickers</button>
                </div>
            </div>
            <div class="chart-container"><canvas id="ltap-chart"></canvas></div>
            <div class="chart-footer">
                <span class="peak-indicator" data-role="peak"></span>
                <div class="pagination-container" data-role="pagination">
                    <button class="pagination-button" data-role="prev">&laquo; Prev</button>
                    <span class="page-indicator" data-role="indicator"></span>
                    <button class="pagination-button" data-role="next">Next &raquo;</button>
                </div>
            </div>
        </div>

        <!-- Palletized -->
        <div class="section" data-panel="palletized">
            <div class="section-header">
                <span class="section-title">Palletized <span class="total" id="total-palletized-count">--</span></span>
                <div class="chart-selector">
                    <button class="chart-button active" data-chart="interval">Interval</button>
                    <button class="chart-button" data-chart="hourly">Hourly</button>
                    <button class="chart-button" data-chart="ranking">Palletizers</button>
                </div>
            </div>
            <div class="chart-container"><canvas id="zu-history-chart"></canvas></div>
            <div class="chart-footer">
                <span class="peak-indicator" data-role="peak"></span>
                <div class="pagination-container" data-role="pagination">
                    <button class="pagination-button" data-role="prev">&laquo; Prev</button>
                    <span class="page-indicator" data-role="indicator"></span>
                    <button class="pagination-button" data-role="next">Next &raquo;</button>
                </div>
            </div>
        </div>

        <!-- Conveyor -->
        <div class="section" data-panel="conveyor">
            <div class="section-header">
                <span class="section-title">Conveyor <span class="total" id="total-boxes-count">--</span></span>
                <div class="chart-selector">
                    <button class="chart-button active" data-chart="interval">Interval</button>
                    <button class="chart-button" data-chart="hourly">Hourly</button>
                </div>
            </div>
            <div class="chart-container"><canvas id="cdhdr-chart"></canvas></div>
            <div class="chart-footer">
                <span class="peak-indicator" data-role="peak"></span>
            </div>
        </div>

        <footer>
            <a href="/heatmap">Bin Heatmap</a> &middot; <a href="/conveyor">Conveyor</a> &middot; <a href="/health">Health</a>
        </footer>
    </div>
"#;

pub const HEATMAP_TEMPLATE: &str = r#"
    <div class="container">
        <header>
            <div>
                <h1>Bin Heatmap</h1>
                <span class="refresh-time" id="last-update">Last Update: --</span>
            </div>
            <div class="header-controls">
                <span class="legend"><span class="swatch low"></span>Low <span class="swatch medium"></span>Medium <span class="swatch high"></span>High</span>
                <a class="btn btn-secondary" href="/">Dashboard</a>
            </div>
        </header>
        <div class="heatmap" id="heatmap"></div>
    </div>
"#;

pub const CONVEYOR_TEMPLATE: &str = r#"
    <div class="container container-full">
        <header>
            <div>
                <h1>Conveyor <span class="total" id="total-boxes-count">--</span></h1>
                <span class="refresh-time" id="last-update">Last Update: --</span>
            </div>
            <div class="header-controls">
                <a class="btn btn-secondary" href="/">Dashboard</a>
            </div>
        </header>
        <div class="chart-container chart-tall"><canvas id="conveyor-chart"></canvas></div>
    </div>
"#;
