use axum::extract::{Multipart, State};
use base64::{Engine as _, engine::general_purpose};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};
use forkcast_core::domain::vision::{entities::AnalyzeImageInput, ports::VisionService};

const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024; // 10MB

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeImageResponse {
    /// Distinct detected item names, first-seen order.
    pub food_items: Vec<String>,
    /// Annotated image, base64-encoded in the source format when possible.
    pub labeled_image: String,
}

#[utoipa::path(
    post,
    path = "/analyze-image",
    tag = "vision",
    summary = "Detect and label food in an image",
    description = "Runs the image through the vision model, parses detections and returns the annotated image",
    responses(
        (status = 200, body = AnalyzeImageResponse)
    ),
)]
pub async fn analyze_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response<AnalyzeImageResponse>, ApiError> {
    let mut image_data: Option<Vec<u8>> = None;
    let mut mime_type: Option<String> = None;
    let mut custom_prompt: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "image" => {
                mime_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read image: {}", e)))?;

                if data.len() > MAX_IMAGE_SIZE {
                    return Err(ApiError::BadRequest(format!(
                        "Image too large. Max size is {} bytes",
                        MAX_IMAGE_SIZE
                    )));
                }

                image_data = Some(data.to_vec());
            }
            "prompt" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read prompt: {}", e)))?;
                custom_prompt = Some(value);
            }
            _ => {}
        }
    }

    let image_data =
        image_data.ok_or_else(|| ApiError::BadRequest("Missing image field".to_string()))?;

    let analysis = state
        .service
        .analyze_image(AnalyzeImageInput {
            image_data,
            mime_type: mime_type.unwrap_or_else(|| "image/jpeg".to_string()),
            custom_prompt,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(AnalyzeImageResponse {
        food_items: analysis.detections.names,
        labeled_image: general_purpose::STANDARD.encode(&analysis.labeled_image),
    }))
}
