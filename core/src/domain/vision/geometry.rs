use crate::domain::vision::entities::BoundingBox;

/// A box covering at least this fraction of either image dimension is
/// rejected. Policy threshold, not a geometric necessity: it filters the
/// degenerate "whole image" boxes some models like to return.
pub const MAX_SPAN_FRACTION: f32 = 0.9;

/// Box in pixel space, guaranteed non-degenerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBox {
    pub x_min: u32,
    pub y_min: u32,
    pub x_max: u32,
    pub y_max: u32,
}

impl PixelBox {
    pub fn width(&self) -> u32 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> u32 {
        self.y_max - self.y_min
    }
}

/// Clamps every coordinate to the unit interval. Idempotent.
pub fn clamp_unit(bbox: BoundingBox) -> BoundingBox {
    BoundingBox(bbox.0.map(|v| v.clamp(0.0, 1.0)))
}

/// Converts a normalized box to pixel coordinates against an image of the
/// given dimensions. Returns `None` (do not render) when the box collapses
/// after rounding or spans >= [`MAX_SPAN_FRACTION`] of either dimension.
pub fn to_pixel_box(bbox: BoundingBox, width: u32, height: u32) -> Option<PixelBox> {
    if width == 0 || height == 0 {
        return None;
    }

    let clamped = clamp_unit(bbox);
    let x_min = (clamped.x_min() * width as f32).round() as u32;
    let x_max = (clamped.x_max() * width as f32).round() as u32;
    let y_min = (clamped.y_min() * height as f32).round() as u32;
    let y_max = (clamped.y_max() * height as f32).round() as u32;

    if x_max <= x_min || y_max <= y_min {
        return None;
    }

    if (x_max - x_min) as f32 >= MAX_SPAN_FRACTION * width as f32
        || (y_max - y_min) as f32 >= MAX_SPAN_FRACTION * height as f32
    {
        return None;
    }

    Some(PixelBox {
        x_min,
        y_min,
        x_max,
        y_max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_is_idempotent_on_valid_boxes() {
        let bbox = BoundingBox([0.1, 0.2, 0.5, 0.6]);
        assert_eq!(clamp_unit(bbox), bbox);
        assert_eq!(clamp_unit(clamp_unit(bbox)), bbox);
    }

    #[test]
    fn clamp_pulls_out_of_range_values_into_unit_interval() {
        let bbox = clamp_unit(BoundingBox([-0.5, 1.7, 0.4, 2.0]));
        assert_eq!(bbox, BoundingBox([0.0, 1.0, 0.4, 1.0]));
    }

    #[test]
    fn pixel_conversion_rounds() {
        let bbox = BoundingBox([0.1, 0.25, 0.5, 0.75]);
        let px = to_pixel_box(bbox, 200, 100).unwrap();
        assert_eq!(
            px,
            PixelBox {
                x_min: 50,
                y_min: 10,
                x_max: 150,
                y_max: 50
            }
        );
    }

    #[test]
    fn rejects_collapsed_boxes() {
        // xmax <= xmin after rounding
        assert!(to_pixel_box(BoundingBox([0.1, 0.5, 0.5, 0.5]), 100, 100).is_none());
        // inverted coordinates
        assert!(to_pixel_box(BoundingBox([0.8, 0.8, 0.2, 0.2]), 100, 100).is_none());
    }

    #[test]
    fn rejects_near_full_frame_boxes() {
        assert!(to_pixel_box(BoundingBox([0.0, 0.0, 1.0, 1.0]), 640, 480).is_none());
        // 90% of the width exactly is still rejected
        assert!(to_pixel_box(BoundingBox([0.2, 0.0, 0.4, 0.9]), 100, 100).is_none());
        // just under the threshold passes
        assert!(to_pixel_box(BoundingBox([0.2, 0.0, 0.4, 0.89]), 100, 100).is_some());
    }

    #[test]
    fn rejects_zero_sized_images() {
        assert!(to_pixel_box(BoundingBox([0.1, 0.1, 0.5, 0.5]), 0, 100).is_none());
    }
}
