//! Deterministic story image renderer.
//!
//! Produces a flat gradient background selected by template palette plus a
//! lineage tag row. Same `(lines, template)` input always yields the same
//! buffer, which is what the pipeline tests rely on.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};

use crate::error::CoreError;
use crate::lines::StoryLines;
use crate::template::TemplateKey;

/// Story image width in pixels.
pub const IMAGE_WIDTH: u32 = 1080;
/// Story image height in pixels.
pub const IMAGE_HEIGHT: u32 = 1920;
/// Download descriptor size string.
pub const IMAGE_SIZE: &str = "1080x1920";

/// Gradient amplitude added across the width (red) and height (green).
const GRADIENT_SPAN: u32 = 50;

/// Number of headline characters carried into the lineage tag.
const TAG_HEADLINE_CHARS: usize = 16;
/// Maximum lineage tag length in pixels.
const TAG_MAX_CHARS: usize = 64;

/// Render one story variant to an in-memory PNG.
///
/// The per-pixel color is the template's base RGB modulated by a linear
/// gradient: red grows across the width, green down the height, blue is
/// fixed, alpha is opaque. The row two above the bottom carries the
/// lineage tag (`"{key}|{headline[..16]}"`) as raw byte values in the red
/// channel, one character per pixel. The tag is not human-legible; it lets
/// tests verify which copy produced which buffer.
pub fn render_png(lines: &StoryLines, template: TemplateKey) -> Result<Vec<u8>, CoreError> {
    let [base_r, base_g, base_b] = template.palette();

    let mut img = RgbaImage::new(IMAGE_WIDTH, IMAGE_HEIGHT);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let r = u32::from(base_r) + x * GRADIENT_SPAN / IMAGE_WIDTH;
        let g = u32::from(base_g) + y * GRADIENT_SPAN / IMAGE_HEIGHT;
        pixel.0 = [r.min(255) as u8, g.min(255) as u8, base_b, 255];
    }

    let tag = lineage_tag(lines, template);
    let tag_y = IMAGE_HEIGHT - 2;
    for (i, byte) in tag.iter().take(TAG_MAX_CHARS).enumerate() {
        img.get_pixel_mut(i as u32, tag_y).0[0] = *byte;
    }

    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(img.as_raw(), IMAGE_WIDTH, IMAGE_HEIGHT, ExtendedColorType::Rgba8)
        .map_err(|e| CoreError::Internal(format!("PNG encoding failed: {e}")))?;
    Ok(out)
}

/// Lineage tag bytes: template key, a separator, and the first characters
/// of the headline. Each character contributes its low byte.
fn lineage_tag(lines: &StoryLines, template: TemplateKey) -> Vec<u8> {
    let head: String = lines.headline.chars().take(TAG_HEADLINE_CHARS).collect();
    format!("{}|{head}", template.as_str())
        .chars()
        .map(|c| (c as u32 & 0xFF) as u8)
        .collect()
}
