use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::IntoResponse,
};
use forkcast_core::domain::common::entities::app_errors::CoreError;
use serde::{Serialize, de::DeserializeOwned};
use validator::Validate;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    UnprocessableEntity(String),

    #[error("{0}")]
    InternalServerError(String),
}

#[derive(Debug, Serialize)]
struct ApiErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (
            status,
            Json(ApiErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Invalid(msg) => ApiError::BadRequest(msg),
            other => ApiError::InternalServerError(other.to_string()),
        }
    }
}

/// JSON extractor that runs `validator` checks before the handler sees the
/// payload.
pub struct ValidateJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(format!("invalid JSON body: {e}")))?;
        value
            .validate()
            .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;
        Ok(ValidateJson(value))
    }
}
