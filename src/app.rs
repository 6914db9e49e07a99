use axum::{
    Json, Router,
    extract::State,
    response::Html,
    routing::{get, post},
};
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::table::Table;
use crate::view::{self, Selections, View};

pub struct AppState {
    table: Table,
}

pub async fn run(table: Table, bind: &str) -> Result<(), Box<dyn std::error::Error>> {
    // Setup app state; the table is read-only for the life of the process
    let app_state = Arc::new(AppState { table });

    // Build router
    let app = Router::new()
        .route("/", get(serve_dashboard))
        .route("/api/options", get(get_options))
        .route("/api/view", post(render_view))
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = TcpListener::bind(bind).await?;
    log::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn serve_dashboard() -> Html<&'static str> {
    Html(include_str!("./static/dashboard.html"))
}

/// The compare-mode control values. The tabbed view's group selectors come
/// back per tab from `/api/view`, already filtered to the metrics present.
async fn get_options(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let table = &state.table;
    Json(json!({
        "metrics": table.metrics(),
        "campaigns": table.campaigns(),
        "chart_types": ["Line", "Bar"],
    }))
}

/// Full synchronous recomputation for the posted selections; the page calls
/// this on every selection change.
async fn render_view(
    State(state): State<Arc<AppState>>,
    Json(selections): Json<Selections>,
) -> Json<View> {
    Json(view::render(&state.table, &selections))
}
