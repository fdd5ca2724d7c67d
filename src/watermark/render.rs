//! Drawing the caption overlay and compositing it onto the photo.

use ab_glyph::{Font, ScaleFont, point};
use image::{DynamicImage, Rgba, RgbaImage, RgbImage, imageops};

use super::WatermarkStyle;
use super::font::WatermarkFont;

/// Top-left corner of the caption box on a canvas `image_height` tall.
///
/// The caption sits `margin_left` in from the left edge with its box ending
/// `margin_bottom` above the bottom edge. On canvases shorter than the
/// caption the y coordinate goes negative and the text is clipped.
pub fn caption_origin(image_height: u32, text_height: u32, style: &WatermarkStyle) -> (i64, i64) {
    let x = i64::from(style.margin_left);
    let y = i64::from(image_height) - i64::from(text_height) - i64::from(style.margin_bottom);
    (x, y)
}

/// A fully transparent canvas of the given size with `caption` drawn on it.
///
/// Text pixels are `style.color` with alpha `coverage * style.opacity`;
/// everything else stays transparent white.
pub fn render_overlay(
    width: u32,
    height: u32,
    caption: &str,
    font: &WatermarkFont,
    style: &WatermarkStyle,
) -> RgbaImage {
    let [r, g, b] = style.color;
    let mut overlay = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 0]));

    let face = font.face();
    let scale = font.scale_for(style.font_size);
    let scaled = face.as_scaled(scale);
    let (_, text_height) = font.measure(caption, style.font_size);
    let (origin_x, origin_y) = caption_origin(height, text_height, style);

    let baseline_y = origin_y as f32 + scaled.ascent();
    let mut cursor_x = origin_x as f32;
    let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

    for c in caption.chars() {
        let glyph_id = scaled.glyph_id(c);
        if let Some(prev) = prev_glyph {
            cursor_x += scaled.kern(prev, glyph_id);
        }

        let glyph = glyph_id.with_scale_and_position(scale, point(cursor_x, baseline_y));
        if let Some(outlined) = face.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|px, py, coverage| {
                let x = i64::from(px) + bounds.min.x as i64;
                let y = i64::from(py) + bounds.min.y as i64;
                if x < 0 || y < 0 || x >= i64::from(width) || y >= i64::from(height) {
                    return;
                }

                let alpha = (coverage.clamp(0.0, 1.0) * f32::from(style.opacity)).round() as u8;
                let pixel = overlay.get_pixel_mut(x as u32, y as u32);
                // Glyph boxes can overlap; keep the stronger coverage.
                if alpha > pixel[3] {
                    *pixel = Rgba([r, g, b, alpha]);
                }
            });
        }

        cursor_x += scaled.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }

    overlay
}

/// Burn `caption` into a copy of `image` and return it flattened to RGB.
///
/// The source image is not modified.
pub fn apply_watermark(
    image: &DynamicImage,
    caption: &str,
    font: &WatermarkFont,
    style: &WatermarkStyle,
) -> RgbImage {
    let mut base = image.to_rgba8();
    let overlay = render_overlay(base.width(), base.height(), caption, font, style);
    imageops::overlay(&mut base, &overlay, 0, 0);
    DynamicImage::ImageRgba8(base).to_rgb8()
}
