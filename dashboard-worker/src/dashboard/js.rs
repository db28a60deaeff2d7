//! Dashboard JavaScript
//!
//! Client-side logic for the dashboard pages:
//! - Polls the `/api/view/*` endpoints with the current UI state
//! - Copies text fields into the DOM by element id
//! - Draws Chart.js charts from the returned series
//!
//! All counting, bucketing, ranking and paging happens in the worker. The
//! browser only keeps the UI state (chart kind, page, day) and sends it
//! with every request.

/// Helpers shared by every page; expects a global `CONFIG`
pub const COMMON: &str = r#"
// ============================================================================
// API Functions
// ============================================================================
async function fetchJSON(endpoint, params) {
    const query = params ? '?' + new URLSearchParams(params).toString() : '';
    try {
        const res = await fetch(CONFIG.apiBase + endpoint + query);
        return await res.json();
    } catch (e) {
        console.error(`Error fetching ${endpoint}:`, e);
        return null;
    }
}

// Only the newest request per view may render; older responses are dropped
const latestRequest = {};

function beginRequest(key) {
    latestRequest[key] = (latestRequest[key] || 0) + 1;
    return latestRequest[key];
}

function isLatest(key, token) {
    return latestRequest[key] === token;
}

// ============================================================================
// DOM Helpers
// ============================================================================
function applyFields(fields) {
    if (!fields) return;
    for (const [id, text] of Object.entries(fields)) {
        const el = document.getElementById(id);
        if (el) el.textContent = text;
    }
}

// A failed request renders like a failed feed
function applyUnreachable(fieldIds) {
    const fields = {};
    fieldIds.forEach(id => { fields[id] = 'Error'; });
    applyFields(fields);
}

// ============================================================================
// Chart Helpers
// ============================================================================
const charts = {};

const AXIS = {
    ticks: { color: '#ffffff' },
    grid: { color: 'rgba(255, 255, 255, 0.1)' }
};

function axis(title, extra) {
    return Object.assign({}, AXIS, { title: { display: true, text: title, color: '#ffffff' } }, extra || {});
}

function destroyChart(canvasId) {
    if (charts[canvasId]) {
        charts[canvasId].destroy();
        delete charts[canvasId];
    }
}

function drawChart(canvasId, config) {
    destroyChart(canvasId);
    const canvas = document.getElementById(canvasId);
    if (!canvas || typeof Chart === 'undefined') return;
    charts[canvasId] = new Chart(canvas.getContext('2d'), config);
}

function baseOptions(xTitle, yTitle) {
    return {
        responsive: true,
        maintainAspectRatio: false,
        animation: false,
        layout: { padding: { top: 10, right: 20, bottom: 10, left: 20 } },
        scales: { x: axis(xTitle), y: axis(yTitle, { beginAtZero: true }) },
        plugins: { legend: { position: 'top', labels: { color: '#ffffff' } } }
    };
}
"#;

/// Main dashboard: overview, GI time, interval panels, PGI
pub const MAIN_SCRIPT: &str = r#"
// ============================================================================
// State
// ============================================================================
const ui = {
    day: 'today',
    panels: {
        picks: { chart: 'interval', page: 0, canvas: 'ltap-chart', totalField: 'total-picks-count', entity: 'Picker', count: 'Number of Picks' },
        palletized: { chart: 'interval', page: 0, canvas: 'zu-history-chart', totalField: 'total-palletized-count', entity: 'Palletizer', count: 'Number of Boxes' },
        conveyor: { chart: 'interval', page: 0, canvas: 'cdhdr-chart', totalField: 'total-boxes-count', entity: '', count: 'Number of Boxes' }
    }
};

const OVERVIEW_FIELDS = [
    'open-deliveries', 'open-hu', 'open-lines', 'open-picked-lines', 'open-lines-not-picked',
    'lines-per-hu', 'total-quantity', 'picked-percentage', 'not-picked-percentage'
];

// ============================================================================
// Overview
// ============================================================================
async function updateOverview() {
    const token = beginRequest('overview');
    const view = await fetchJSON('/api/view/overview', { day: ui.day });
    if (!isLatest('overview', token)) return;
    if (!view) {
        applyUnreachable(OVERVIEW_FIELDS);
        return;
    }
    applyFields(view.fields);
}

async function updateGiTime() {
    const token = beginRequest('gi_time');
    const view = await fetchJSON('/api/view/gi_time', { day: ui.day });
    if (!isLatest('gi_time', token)) return;
    if (!view || view.state !== 'ready') {
        destroyChart('gi-time-chart');
        return;
    }
    const options = baseOptions('Time of Day', 'Count');
    options.plugins.tooltip = { mode: 'index', intersect: false };
    drawChart('gi-time-chart', {
        type: 'bar',
        data: {
            labels: view.labels,
            datasets: [
                { label: 'Deliveries', data: view.deliveries, backgroundColor: '#1919ec', borderWidth: 1 },
                { label: 'Lines', data: view.lines, backgroundColor: '#e91e63', borderWidth: 1 },
                { label: 'Lines Not Picked', data: view.lines_not_picked, backgroundColor: '#7e57c2', borderWidth: 1 }
            ]
        },
        options
    });
}

async function updatePgi() {
    const token = beginRequest('pgi');
    const view = await fetchJSON('/api/view/pgi');
    if (!isLatest('pgi', token)) return;
    if (!view) {
        applyUnreachable(['deliveries-pgi', 'pgi-lines']);
        return;
    }
    applyFields(view.fields);
}

function toggleDay() {
    ui.day = ui.day === 'today' ? 'tomorrow' : 'today';
    const button = document.getElementById('toggle-day-button');
    button.textContent = ui.day === 'today' ? 'Show Tomorrow' : 'Show Today';
    button.classList.toggle('tomorrow-active', ui.day === 'tomorrow');
    updateOverview();
    updateGiTime();
}

// ============================================================================
// Interval Panels
// ============================================================================
function panelElement(name, role) {
    return document.querySelector(`[data-panel="${name}"] [data-role="${role}"]`);
}

function renderPagination(name, pagination) {
    const container = panelElement(name, 'pagination');
    if (!container) return;
    const visible = !!pagination && pagination.show_controls;
    container.classList.toggle('visible', visible);
    if (!visible) return;
    panelElement(name, 'indicator').textContent = pagination.indicator;
    panelElement(name, 'prev').disabled = !pagination.has_prev;
    panelElement(name, 'next').disabled = !pagination.has_next;
}

function chartConfig(panel, view) {
    if (view.chart === 'ranking') {
        const options = baseOptions(panel.count, panel.entity);
        options.indexAxis = 'y';
        options.scales.x.beginAtZero = true;
        options.plugins.tooltip = { enabled: false };
        return {
            type: 'bar',
            data: { labels: view.labels, datasets: [{ label: view.series_label, data: view.values, backgroundColor: '#4949f2', borderColor: '#1919ec', borderWidth: 1 }] },
            options
        };
    }

    if (view.chart === 'hourly') {
        const datasets = [{ label: view.series_label, data: view.values, backgroundColor: '#1919ec', borderColor: '#0000aa', borderWidth: 1 }];
        if (view.target) {
            datasets.push({ label: view.target.label, data: view.target.values, type: 'line', borderColor: '#FFD700', borderWidth: 3, borderDash: [10, 5], pointRadius: 0, fill: false });
        }
        return { type: 'bar', data: { labels: view.labels, datasets }, options: baseOptions('Hour', panel.count) };
    }

    const options = baseOptions('Interval End', panel.count);
    const ticks = view.major_ticks || [];
    options.scales.x.ticks = {
        color: '#ffffff',
        autoSkip: false,
        callback: function(value, index) { return ticks[index] ? view.labels[index] : ''; }
    };
    return {
        type: 'line',
        data: { labels: view.labels, datasets: [{ label: view.series_label, data: view.values, backgroundColor: 'rgba(25, 25, 236, 0.2)', borderColor: '#1919ec', borderWidth: 2, tension: 0.3, fill: true, pointRadius: 3 }] },
        options
    };
}

async function updatePanel(name) {
    const panel = ui.panels[name];
    const token = beginRequest(name);
    const view = await fetchJSON('/api/view/' + name, { chart: panel.chart, page: panel.page });
    if (!isLatest(name, token)) return;
    const peak = panelElement(name, 'peak');
    if (peak) peak.textContent = '';
    panel.pagination = null;

    if (!view) {
        applyUnreachable([panel.totalField]);
        destroyChart(panel.canvas);
        renderPagination(name, null);
        return;
    }

    applyFields(view.fields);
    if (view.state !== 'ready') {
        destroyChart(panel.canvas);
        renderPagination(name, null);
        return;
    }

    // the worker clamps out-of-range pages
    panel.pagination = view.pagination || null;
    if (view.pagination) panel.page = view.pagination.page_index;
    if (peak && view.peak) peak.textContent = view.peak.label;
    renderPagination(name, view.pagination);
    drawChart(panel.canvas, chartConfig(panel, view));
}

function bindPanel(name) {
    const section = document.querySelector(`[data-panel="${name}"]`);
    if (!section) return;
    const panel = ui.panels[name];

    section.querySelectorAll('.chart-button').forEach(button => {
        button.addEventListener('click', () => {
            section.querySelectorAll('.chart-button').forEach(b => b.classList.remove('active'));
            button.classList.add('active');
            panel.chart = button.dataset.chart;
            panel.page = 0;
            updatePanel(name);
        });
    });

    const prev = panelElement(name, 'prev');
    const next = panelElement(name, 'next');
    if (prev) prev.addEventListener('click', () => {
        if (panel.pagination && panel.pagination.has_prev) { panel.page = panel.pagination.prev_page; updatePanel(name); }
    });
    if (next) next.addEventListener('click', () => {
        if (panel.pagination && panel.pagination.has_next) { panel.page = panel.pagination.next_page; updatePanel(name); }
    });
}

// ============================================================================
// Refresh
// ============================================================================
function refreshAll() {
    updateOverview();
    updateGiTime();
    updatePgi();
    Object.keys(ui.panels).forEach(updatePanel);
}

async function forceRefresh() {
    const button = document.getElementById('refresh-button');
    button.disabled = true;
    try {
        await fetch(CONFIG.apiBase + '/api/refresh', { method: 'POST' });
    } catch (e) {
        console.error('Refresh failed:', e);
    }
    button.disabled = false;
    refreshAll();
}

document.addEventListener('DOMContentLoaded', () => {
    Object.keys(ui.panels).forEach(bindPanel);
    document.getElementById('toggle-day-button').addEventListener('click', toggleDay);
    document.getElementById('refresh-button').addEventListener('click', forceRefresh);
    refreshAll();
    setInterval(refreshAll, CONFIG.refreshInterval);
});
"#;

/// Heatmap page
pub const HEATMAP_SCRIPT: &str = r#"
// ============================================================================
// Heatmap
// ============================================================================
function updateTimestamp() {
    const now = new Date();
    const pad = v => String(v).padStart(2, '0');
    const stamp = `${pad(now.getDate())}-${pad(now.getMonth() + 1)}-${String(now.getFullYear()).slice(2)} ${pad(now.getHours())}:${pad(now.getMinutes())}:${pad(now.getSeconds())}`;
    document.getElementById('last-update').textContent = `Last Update: ${stamp}`;
}

function renderHeatmap(view) {
    const container = document.getElementById('heatmap');
    container.innerHTML = '';
    container.style.gridTemplateColumns = `repeat(${view.columns}, 1fr)`;
    document.documentElement.style.setProperty('--column-gap', view.column_gap_px + 'px');

    view.cells.forEach(cell => {
        const el = document.createElement('div');
        el.className = 'bin';
        el.textContent = cell.location;
        el.dataset.location = cell.location;
        if (cell.column) el.dataset.column = cell.column;
        if (cell.empty) el.classList.add('empty');
        if (cell.level) el.classList.add(cell.level);
        if (cell.row) el.style.gridRow = cell.row;
        if (cell.column) el.style.gridColumn = cell.column;
        el.title = `${cell.location}: ${cell.count} activities`;
        container.appendChild(el);
    });
}

function showError() {
    document.getElementById('heatmap').innerHTML =
        '<div class="error-message">Error loading bin locations. Please try again later.</div>';
}

async function updateHeatmap() {
    const token = beginRequest('heatmap');
    const view = await fetchJSON('/api/view/heatmap');
    if (!isLatest('heatmap', token)) return;
    if (!view || view.state !== 'ready') {
        showError();
        return;
    }
    renderHeatmap(view);
    updateTimestamp();
}

document.addEventListener('DOMContentLoaded', () => {
    updateHeatmap();
    setInterval(updateHeatmap, CONFIG.refreshInterval);
});
"#;

/// Conveyor wall display: hourly boxes against the target
pub const CONVEYOR_SCRIPT: &str = r#"
// ============================================================================
// Conveyor
// ============================================================================
async function updateConveyor() {
    const token = beginRequest('conveyor');
    const view = await fetchJSON('/api/view/conveyor', { chart: 'hourly' });
    if (!isLatest('conveyor', token)) return;
    if (!view) {
        applyUnreachable(['total-boxes-count']);
        return;
    }
    applyFields(view.fields);
    if (view.state !== 'ready') {
        destroyChart('conveyor-chart');
        return;
    }

    const big = { color: '#ffffff', font: { size: 16 } };
    const options = baseOptions('Hour', 'Number of Boxes');
    options.layout.padding.top = 30;
    options.scales.x.ticks = big;
    options.scales.y.ticks = big;
    options.plugins.legend.labels = { color: '#ffffff', font: { size: 16, weight: 'bold' }, padding: 20 };
    options.plugins.tooltip = { mode: 'index', intersect: false };

    const datasets = [{ label: view.series_label, data: view.values, backgroundColor: '#e91e63', borderColor: '#c2185b', borderWidth: 1 }];
    if (view.target) {
        options.scales.y.suggestedMax = Math.max(...view.target.values) + 100;
        datasets.push({ label: view.target.label, data: view.target.values, type: 'line', borderColor: '#FFD700', borderWidth: 3, borderDash: [10, 5], pointRadius: 0, fill: false });
    }

    drawChart('conveyor-chart', { type: 'bar', data: { labels: view.labels, datasets }, options });
}

document.addEventListener('DOMContentLoaded', () => {
    updateConveyor();
    setInterval(updateConveyor, CONFIG.refreshInterval);
});
"#;
