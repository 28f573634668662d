use std::path::PathBuf;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use anyhow::Context;
use log::info;
use serde_json::json;

use seir_spread::api::{density_levels, run_request, RunRequest};
use seir_spread::config::{RunLimits, ServerConfig};
use seir_spread::logging;

#[derive(Clone)]
struct AppState {
    run_log_dir: Option<PathBuf>,
    limits: RunLimits,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::setup();
    let cfg = ServerConfig::from_env();

    let state = AppState {
        run_log_dir: cfg.run_log_dir.clone(),
        limits: cfg.limits,
    };

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/crowd_density_levels", get(crowd_density_levels))
        .route("/simulate", post(simulate))
        .with_state(state);

    let addr = cfg.socket_addr()?;
    info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.context("bind failed")?;
    axum::serve(listener, app).await.context("server failed")?;
    Ok(())
}

async fn healthz() -> impl IntoResponse {
    Json(json!({"ok": true}))
}

async fn crowd_density_levels() -> impl IntoResponse {
    Json(density_levels())
}

async fn simulate(State(st): State<AppState>, Json(req): Json<RunRequest>) -> impl IntoResponse {
    // integration is CPU-bound; keep it off the async workers
    let join = tokio::task::spawn_blocking(move || run_request(req, &st.limits, st.run_log_dir.as_deref()));

    match join.await {
        Ok(Ok(resp)) => (StatusCode::OK, Json(resp)).into_response(),
        Ok(Err((code, body))) => (code, Json(body)).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"return_code": 2, "error": format!("join error: {e}")})),
        )
            .into_response(),
    }
}
