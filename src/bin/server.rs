//! Sidebar demo server
//!
//! Serves a server-rendered page carrying the sidebar markup, plus the
//! wasm package built with `wasm-pack build --target web --no-default-features --features wasm`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use sidebar_ui::config::UiConfig;
use sidebar_ui::markup::{escape_html, render_sidebar, NavItem};

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

struct AppState {
    config: UiConfig,
    config_json: String,
    nav: Vec<NavItem>,
}

fn demo_nav() -> Vec<NavItem> {
    vec![
        NavItem::new("Dashboard", "/"),
        NavItem::new("Reports", "/reports"),
        NavItem::new("Teams", "/teams"),
        NavItem::new("Settings", "/settings"),
    ]
}

fn render_page(state: &AppState, path: &str) -> Option<String> {
    let title = state.nav.iter().find(|item| item.href == path)?.label.clone();
    let sidebar = render_sidebar(&state.config.sidebar, &state.nav, path);
    let rows: String = (1..=40)
        .map(|i| format!("<tr><td>{i}</td><td>Entry {i}</td></tr>"))
        .collect();
    Some(format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
body.sidebar-open {{ position: fixed; width: 100%; overflow: hidden; }}
.sidebar {{ position: fixed; top: 0; left: -260px; width: 260px; height: 100%; background: #1e2230; transition: left .3s; z-index: 20; }}
.sidebar.show {{ left: 0; }}
.sidebar a {{ display: block; color: #fff; padding: 12px 16px; }}
.sidebar a.active {{ background: #03c75a; }}
.sidebar-overlay {{ display: none; position: fixed; inset: 0; background: rgba(0,0,0,.4); z-index: 10; }}
.sidebar-overlay.show {{ display: block; }}
@media (min-width: 768px) {{ .sidebar {{ left: 0; }} .main-content {{ margin-left: 260px; }} #sidebarToggle {{ display: none; }} }}
</style>
</head>
<body>
{sidebar}
<main class="main-content">
<h1>{heading}</h1>
<div class="stat-card"><h4>12,480</h4></div>
<table class="table"><tbody>{rows}</tbody></table>
</main>
<script type="module">
import init, {{ SidebarUi }} from "/pkg/sidebar_ui.js";
await init();
window.sidebarUi = new SidebarUi({config});
</script>
</body>
</html>"#,
        title = escape_html(&title),
        heading = escape_html(&title),
        config = script_string_literal(&state.config_json),
    ))
}

/// JSON string literal that is safe inside an inline `<script>`: no `</script>`
/// or `<!--` can appear in the output
fn script_string_literal(text: &str) -> String {
    serde_json::to_string(text)
        .unwrap_or_else(|_| "null".to_string())
        .replace('<', "\\u003c")
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    page(&state, "/")
}

async fn section(State(state): State<Arc<AppState>>, Path(section): Path<String>) -> impl IntoResponse {
    page(&state, &format!("/{section}"))
}

fn page(state: &AppState, path: &str) -> (StatusCode, Html<String>) {
    match render_page(state, path) {
        Some(html) => (StatusCode::OK, Html(html)),
        None => {
            log::debug!("no demo page for {path}");
            (StatusCode::NOT_FOUND, Html("<h1>Not found</h1>".to_string()))
        }
    }
}

fn load_config() -> anyhow::Result<UiConfig> {
    match std::env::var("SIDEBAR_UI_CONFIG") {
        Ok(path) => {
            let json = std::fs::read_to_string(&path)?;
            Ok(UiConfig::from_json(&json)?)
        }
        Err(_) => Ok(UiConfig::default()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = load_config()?;
    let state = Arc::new(AppState {
        config_json: serde_json::to_string(&config)?,
        config,
        nav: demo_nav(),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/:section", get(section))
        .nest_service("/pkg", ServeDir::new("pkg"))
        .layer(cors)
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], 8087));
    log::info!("sidebar demo listening on http://{addr}");
    println!("Sidebar demo listening on http://{}", addr);
    println!("  Health check: GET /health");
    println!("  Pages:        GET /, /reports, /teams, /settings");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
