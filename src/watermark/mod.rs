//! Caption watermarking.
//!
//! The caption is drawn in white at low opacity on a transparent layer the
//! size of the photo, anchored to the lower-left corner, then alpha-composited
//! over an RGBA copy of the photo and flattened back to RGB.
//!
//! ```rust,no_run
//! use exif_watermark::watermark::{WatermarkFont, WatermarkStyle, apply_watermark};
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let font = WatermarkFont::load(Path::new("DejaVuSans.ttf"))?;
//! let photo = image::open("photo1.jpg")?;
//! let marked = apply_watermark(&photo, "Photo by Jane", &font, &WatermarkStyle::default());
//! marked.save("marked.jpg")?;
//! # Ok(())
//! # }
//! ```

mod font;
mod render;

pub use font::{WatermarkFont, locate_font};
pub use render::{apply_watermark, caption_origin, render_overlay};

use crate::config::{self, Config};

/// How the caption is drawn. Always the fixed values from [`crate::config`]
/// in the shipped binary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatermarkStyle {
    /// Size in points.
    pub font_size: f32,
    pub color: [u8; 3],
    /// Maximum alpha of text pixels, out of 255.
    pub opacity: u8,
    pub margin_left: u32,
    pub margin_bottom: u32,
}

impl Default for WatermarkStyle {
    fn default() -> Self {
        Self {
            font_size: config::FONT_SIZE_PT,
            color: config::TEXT_COLOR,
            opacity: config::TEXT_OPACITY,
            margin_left: config::MARGIN_LEFT,
            margin_bottom: config::MARGIN_BOTTOM,
        }
    }
}

impl From<&Config> for WatermarkStyle {
    fn from(config: &Config) -> Self {
        Self {
            font_size: config.font_size,
            color: config.text_color,
            opacity: config.opacity,
            margin_left: config.margin_left,
            margin_bottom: config.margin_bottom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_style_is_fixed() {
        let style = WatermarkStyle::default();
        assert_eq!(style.font_size, 72.0);
        assert_eq!(style.color, [255, 255, 255]);
        assert_eq!(style.opacity, 70);
        assert_eq!(style.margin_left, 50);
        assert_eq!(style.margin_bottom, 20);
    }

    #[test]
    fn style_from_default_config_matches_default() {
        assert_eq!(WatermarkStyle::from(&Config::default()), WatermarkStyle::default());
    }
}
