use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::fmt::Write;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod sessions;

use crate::controller::{ContentSnapshot, ViewController};
use crate::league::Category;
use crate::view::html;
pub use sessions::Sessions;

pub struct AppState {
    pub sessions: Sessions,
}

/// Build the Axum router for the dashboard.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/healthz", get(|| async { "ok" }))
        .route("/api/select/:category", post(select_handler))
        .route("/api/content", get(content_handler))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

type ApiResult<T> = Result<T, (StatusCode, String)>;

fn view_for(state: &AppState, session: u64) -> ApiResult<ViewController> {
    state
        .sessions
        .get(session)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("unknown session {}", session)))
}

/// Open a view for this page, start on the overview tab and serve the shell.
async fn index_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (session, controller) = state.sessions.open();
    let loading = controller.select(Category::Home);
    Html(render_shell(session, &loading))
}

#[derive(Debug, Deserialize)]
struct SelectQuery {
    session: u64,
}

/// POST /api/select/{category}?session=S
async fn select_handler(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
    Query(query): Query<SelectQuery>,
) -> ApiResult<Json<ContentSnapshot>> {
    let category: Category = category
        .parse()
        .map_err(|e: crate::league::UnknownCategory| (StatusCode::NOT_FOUND, e.to_string()))?;
    let controller = view_for(&state, query.session)?;
    Ok(Json(controller.select(category)))
}

#[derive(Debug, Deserialize)]
struct ContentQuery {
    session: u64,
    after: Option<u64>,
}

/// GET /api/content?session=S&after=N — waits for generation N to settle when given.
async fn content_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ContentQuery>,
) -> ApiResult<Json<ContentSnapshot>> {
    let controller = view_for(&state, query.session)?;
    let snapshot = match query.after {
        Some(generation) => controller.wait_settled(generation).await,
        None => controller.snapshot(),
    };
    Ok(Json(snapshot))
}

fn render_shell(session: u64, snapshot: &ContentSnapshot) -> String {
    let mut tabs = String::new();
    for category in Category::all() {
        let active = if category == snapshot.category { " active" } else { "" };
        let _ = write!(
            tabs,
            r#"<button class="tab-button{}" data-league="{}">{}</button>"#,
            active,
            category.code(),
            html::escape(category.display_name())
        );
    }

    let charts = snapshot
        .charts
        .as_ref()
        .map(html::chart_payload_script)
        .unwrap_or_default();

    SHELL_HTML
        .replace("{{TABS}}", &tabs)
        .replace("{{SESSION}}", &session.to_string())
        .replace("{{GENERATION}}", &snapshot.generation.to_string())
        .replace("{{SETTLED}}", &snapshot.is_settled().to_string())
        .replace("{{CHARTS}}", &charts)
        .replace("{{CONTENT}}", &snapshot.html)
}

/// Embedded shell page (HTML + CSS + JS). Content is rendered server-side;
/// the script only swaps fragments and hands chart series to Chart.js.
const SHELL_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Model Picks Dashboard</title>
<script src="https://cdn.jsdelivr.net/npm/chart.js@4"></script>
<style>
  :root {
    --bg: #0f1117;
    --card: #1a1d27;
    --border: #2a2d3a;
    --accent: #6c63ff;
    --green: #00c896;
    --red: #ff4f6a;
    --text: #e0e0e0;
    --muted: #8888aa;
  }
  * { box-sizing: border-box; margin: 0; padding: 0; }
  body { background: var(--bg); color: var(--text); font-family: 'Segoe UI', system-ui, sans-serif; }
  header { display: flex; align-items: center; gap: 1rem; padding: 1rem 2rem; border-bottom: 1px solid var(--border); }
  header h1 { font-size: 1.4rem; font-weight: 700; }
  nav { display: flex; gap: .5rem; padding: 1rem 2rem 0; }
  .tab-button { background: none; border: 1px solid var(--border); color: var(--muted); padding: .45rem 1rem; border-radius: 6px; cursor: pointer; }
  .tab-button.active { border-color: var(--accent); color: var(--accent); }
  main { padding: 1.5rem 2rem; display: grid; gap: 1rem; }
  h2 { margin: .5rem 0 1rem; }
  hr { border: none; border-top: 1px solid var(--border); margin: 1rem 0; }
  .accuracy-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(220px, 1fr)); gap: 1rem; }
  .accuracy-col, .game-card, .chart-container { background: var(--card); border: 1px solid var(--border); border-radius: 10px; padding: 1.2rem; }
  .metric { color: var(--muted); font-size: .9rem; margin: .3rem 0; }
  .metric strong { color: var(--text); margin-left: .3rem; }
  .game-cards-container { display: grid; grid-template-columns: repeat(auto-fill, minmax(360px, 1fr)); gap: 1rem; }
  .scores-metrics-grid { display: grid; grid-template-columns: 1fr 1fr; gap: 1rem; margin: .8rem 0; }
  .prediction-result { margin: .25rem 0; }
  .loading, .info { color: var(--muted); text-align: center; padding: 2rem; }
  .error { color: var(--red); text-align: center; padding: 2rem; }
</style>
</head>
<body>
<header><h1>Model Picks</h1></header>
<nav>{{TABS}}</nav>
<main id="app-content" data-session="{{SESSION}}" data-generation="{{GENERATION}}" data-settled="{{SETTLED}}">{{CONTENT}}</main>
{{CHARTS}}
<script>
const contentArea = document.getElementById('app-content');
const session = contentArea.dataset.session;
let latest = Number(contentArea.dataset.generation);
let charts = [];

function drawCharts(payload) {
  charts.forEach(c => c.destroy());
  charts = [];
  if (!payload || typeof Chart === 'undefined') return;
  [payload.profit, payload.win_pct].forEach(chart => {
    const canvas = document.getElementById(chart.surface);
    if (!canvas) return;
    charts.push(new Chart(canvas, {
      type: 'line',
      data: { labels: chart.labels, datasets: chart.datasets },
      options: { spanGaps: false }
    }));
  });
}

function syncTabs(category) {
  document.querySelectorAll('.tab-button').forEach(b => {
    b.classList.toggle('active', b.dataset.league === category);
  });
}

function show(snapshot) {
  if (snapshot.generation < latest) return;
  latest = snapshot.generation;
  syncTabs(snapshot.category);
  contentArea.innerHTML = snapshot.html;
  drawCharts(snapshot.charts);
}

// Sessions are dropped on restart or eviction; a fresh page gets a new one.
function expired(r) {
  if (r.status === 404) { location.reload(); return true; }
  return !r.ok;
}

async function settle(generation) {
  const r = await fetch('/api/content?session=' + session + '&after=' + generation);
  if (expired(r)) return;
  show(await r.json());
}

document.querySelectorAll('.tab-button').forEach(button => {
  button.addEventListener('click', async (e) => {
    document.querySelector('.tab-button.active')?.classList.remove('active');
    e.target.classList.add('active');
    const r = await fetch('/api/select/' + e.target.dataset.league + '?session=' + session, { method: 'POST' });
    if (expired(r)) return;
    const loading = await r.json();
    show(loading);
    settle(loading.generation);
  });
});

const embedded = document.getElementById('chart-data');
if (embedded) drawCharts(JSON.parse(embedded.textContent));
if (contentArea.dataset.settled !== 'true') settle(latest);
</script>
</body>
</html>"#;
