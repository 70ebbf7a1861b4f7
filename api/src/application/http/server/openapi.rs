use utoipa::OpenApi;

use crate::application::http::{recipe::router::RecipeApiDoc, vision::router::VisionApiDoc};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Forkcast API"
    )
)]
struct BaseApiDoc;

pub struct ApiDoc;

impl ApiDoc {
    // utoipa's `nest(...)` rejects an empty path prefix, so the sub-APIs are
    // merged at the root via `merge_from` instead.
    pub fn openapi() -> utoipa::openapi::OpenApi {
        BaseApiDoc::openapi()
            .merge_from(VisionApiDoc::openapi())
            .merge_from(RecipeApiDoc::openapi())
    }
}
