use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Normalized bounding box in `[ymin, xmin, ymax, xmax]` order, values
/// semantically in `[0, 1]`. Upstream does not guarantee ordering or range;
/// validation happens in [`crate::domain::vision::geometry`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BoundingBox(pub [f32; 4]);

impl BoundingBox {
    pub fn y_min(&self) -> f32 {
        self.0[0]
    }

    pub fn x_min(&self) -> f32 {
        self.0[1]
    }

    pub fn y_max(&self) -> f32 {
        self.0[2]
    }

    pub fn x_max(&self) -> f32 {
        self.0[3]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DetectedItem {
    pub name: String,
    pub bbox: BoundingBox,
}

/// Outcome of parsing a model reply. `names` holds the distinct item names in
/// first-seen order; `items` keeps every box, so one name may appear with
/// several boxes (multiple instances of the same food).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ParsedDetections {
    pub items: Vec<DetectedItem>,
    pub names: Vec<String>,
}

impl ParsedDetections {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct AnalyzeImageInput {
    pub image_data: Vec<u8>,
    pub mime_type: String,
    pub custom_prompt: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ImageAnalysis {
    pub detections: ParsedDetections,
    /// Re-encoded image with boxes and labels drawn on. Falls back to the
    /// unmodified input buffer when the source image cannot be decoded.
    pub labeled_image: Vec<u8>,
}
