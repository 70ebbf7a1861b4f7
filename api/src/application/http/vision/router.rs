use axum::{Router, routing::post};
use utoipa::OpenApi;

use super::handlers::analyze_image::{__path_analyze_image, analyze_image};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(analyze_image))]
pub struct VisionApiDoc;

pub fn vision_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/analyze-image", state.args.server.root_path),
        post(analyze_image),
    )
}
