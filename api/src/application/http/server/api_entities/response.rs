use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;

/// Typed success response. Keeps handler signatures honest about the payload
/// they produce.
pub enum Response<T>
where
    T: Serialize,
{
    OK(T),
}

impl<T> IntoResponse for Response<T>
where
    T: Serialize,
{
    fn into_response(self) -> axum::response::Response {
        match self {
            Response::OK(payload) => (StatusCode::OK, Json(payload)).into_response(),
        }
    }
}
