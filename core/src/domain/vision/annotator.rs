use std::{io::Cursor, sync::Arc};

use ab_glyph::{FontVec, PxScale};
use font8x8::{BASIC_FONTS, UnicodeFonts};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use imageproc::{
    drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut, text_size},
    rect::Rect,
};

use crate::domain::{
    common::AnnotatorConfig,
    vision::{entities::ParsedDetections, geometry},
};

const STROKE_WIDTH: u32 = 3;
const BOX_COLOR: Rgb<u8> = Rgb([230, 57, 70]);
const LABEL_TEXT_COLOR: Rgb<u8> = Rgb([255, 255, 255]);
const LABEL_FONT_SIZE: f32 = 20.0;
const LABEL_PADDING: u32 = 3;

// Fallback glyphs are 8x8; rendered at 2x they stay legible on photos.
const BITMAP_GLYPH_SIZE: u32 = 8;
const BITMAP_GLYPH_SCALE: u32 = 2;

/// Draws validated boxes and labels onto an encoded image buffer. All
/// failures degrade: a bad box is skipped, an undecodable buffer is returned
/// unchanged. Rendering never aborts a request.
#[derive(Clone)]
pub struct Annotator {
    font: Option<Arc<FontVec>>,
}

impl Annotator {
    pub fn new(config: &AnnotatorConfig) -> Self {
        let font = config.font_path.as_ref().and_then(|path| {
            match std::fs::read(path).map_err(|e| e.to_string()).and_then(|data| {
                FontVec::try_from_vec(data).map_err(|e| e.to_string())
            }) {
                Ok(font) => Some(Arc::new(font)),
                Err(err) => {
                    tracing::warn!(
                        "failed to load label font from {}: {err}, using bitmap fallback",
                        path.display()
                    );
                    None
                }
            }
        });
        Self { font }
    }

    /// Annotates the image with every valid detection and re-encodes it.
    /// PNG input stays PNG; anything else is encoded as JPEG.
    pub fn annotate(&self, image_data: &[u8], detections: &ParsedDetections) -> Vec<u8> {
        let source_format = image::guess_format(image_data).ok();

        let image = match image::load_from_memory(image_data) {
            Ok(image) => image,
            Err(err) => {
                tracing::warn!("failed to decode image for annotation: {err}");
                return image_data.to_vec();
            }
        };

        let mut canvas = image.to_rgb8();
        let (width, height) = canvas.dimensions();

        for item in &detections.items {
            match geometry::to_pixel_box(item.bbox, width, height) {
                Some(pixel_box) => self.draw_box_with_label(&mut canvas, pixel_box, &item.name),
                None => {
                    tracing::warn!(
                        "skipping invalid box {:?} for item {:?}",
                        item.bbox,
                        item.name
                    );
                }
            }
        }

        let output_format = match source_format {
            Some(ImageFormat::Png) => ImageFormat::Png,
            _ => ImageFormat::Jpeg,
        };

        let mut encoded = Vec::new();
        match DynamicImage::ImageRgb8(canvas).write_to(&mut Cursor::new(&mut encoded), output_format)
        {
            Ok(()) => encoded,
            Err(err) => {
                tracing::warn!("failed to re-encode annotated image: {err}");
                image_data.to_vec()
            }
        }
    }

    fn draw_box_with_label(&self, canvas: &mut RgbImage, pixel_box: geometry::PixelBox, name: &str) {
        for inset in 0..STROKE_WIDTH {
            if pixel_box.width() <= 2 * inset || pixel_box.height() <= 2 * inset {
                break;
            }
            let rect = Rect::at(
                (pixel_box.x_min + inset) as i32,
                (pixel_box.y_min + inset) as i32,
            )
            .of_size(
                pixel_box.width() - 2 * inset,
                pixel_box.height() - 2 * inset,
            );
            draw_hollow_rect_mut(canvas, rect, BOX_COLOR);
        }

        let (text_width, text_height) = self.measure(name);
        if text_width == 0 {
            return;
        }

        let label_height = text_height + 2 * LABEL_PADDING;
        let label_y = pixel_box.y_min.saturating_sub(label_height);
        let label_x = pixel_box.x_min;
        let label_width = (text_width + 2 * LABEL_PADDING).min(canvas.width() - label_x);
        if label_width == 0 {
            return;
        }

        draw_filled_rect_mut(
            canvas,
            Rect::at(label_x as i32, label_y as i32).of_size(label_width, label_height),
            BOX_COLOR,
        );

        let text_x = label_x + LABEL_PADDING;
        let text_y = label_y + LABEL_PADDING;
        match &self.font {
            Some(font) => {
                draw_text_mut(
                    canvas,
                    LABEL_TEXT_COLOR,
                    text_x as i32,
                    text_y as i32,
                    PxScale::from(LABEL_FONT_SIZE),
                    font.as_ref(),
                    name,
                );
            }
            None => draw_bitmap_text(canvas, text_x, text_y, name),
        }
    }

    fn measure(&self, text: &str) -> (u32, u32) {
        match &self.font {
            Some(font) => text_size(PxScale::from(LABEL_FONT_SIZE), font.as_ref(), text),
            None => (
                text.chars().count() as u32 * BITMAP_GLYPH_SIZE * BITMAP_GLYPH_SCALE,
                BITMAP_GLYPH_SIZE * BITMAP_GLYPH_SCALE,
            ),
        }
    }
}

/// Renders text with the built-in 8x8 bitmap font. Used when no TTF is
/// configured so labels are never silently dropped.
fn draw_bitmap_text(canvas: &mut RgbImage, x: u32, y: u32, text: &str) {
    let mut pen_x = x;
    for ch in text.chars() {
        let glyph = match BASIC_FONTS.get(ch) {
            Some(glyph) => glyph,
            None => BASIC_FONTS.get('?').unwrap_or_default(),
        };
        for (row_index, row) in glyph.iter().enumerate() {
            for bit in 0..BITMAP_GLYPH_SIZE {
                if (*row >> bit) & 1 == 0 {
                    continue;
                }
                for dy in 0..BITMAP_GLYPH_SCALE {
                    for dx in 0..BITMAP_GLYPH_SCALE {
                        let px = pen_x + bit * BITMAP_GLYPH_SCALE + dx;
                        let py = y + row_index as u32 * BITMAP_GLYPH_SCALE + dy;
                        if px < canvas.width() && py < canvas.height() {
                            canvas.put_pixel(px, py, LABEL_TEXT_COLOR);
                        }
                    }
                }
            }
        }
        pen_x += BITMAP_GLYPH_SIZE * BITMAP_GLYPH_SCALE;
    }
}
