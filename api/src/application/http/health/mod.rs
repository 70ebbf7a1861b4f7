use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

use crate::application::http::server::app_state::AppState;

pub fn health_routes(root_path: &str) -> Router<AppState> {
    Router::new()
        .route(&format!("{root_path}/"), get(root))
        .route(&format!("{root_path}/health"), get(health))
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to the Forkcast backend" }))
}

async fn health() -> &'static str {
    "OK"
}
