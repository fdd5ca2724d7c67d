use std::path::PathBuf;

/// File name of the face the caption is drawn in.
pub const FONT_FILE: &str = "DejaVuSans.ttf";
/// Caption size in points (1pt = 1px).
pub const FONT_SIZE_PT: f32 = 72.0;
/// Alpha of the caption text, out of 255.
pub const TEXT_OPACITY: u8 = 70;
/// Caption color before opacity is applied.
pub const TEXT_COLOR: [u8; 3] = [255, 255, 255];
/// Distance of the caption from the left edge, in pixels.
pub const MARGIN_LEFT: u32 = 50;
/// Gap between the bottom of the caption box and the bottom edge, in pixels.
pub const MARGIN_BOTTOM: u32 = 20;
/// JPEG quality of the written copies.
pub const JPEG_QUALITY: u8 = 80;
/// Extension (case-sensitive, without the dot) of the files picked up.
pub const INPUT_EXTENSION: &str = "jpg";
/// Directory the watermarked copies land in.
pub const OUTPUT_DIR: &str = "output";
/// Prepended to the original file name to form the output name.
pub const OUTPUT_PREFIX: &str = "s-";

/// Settings for one batch run.
///
/// There is no file or environment layer: the binary always runs with
/// [`Config::default`], which is built from the constants above. Tests and
/// library callers point the directories and font elsewhere.
///
/// ```rust
/// use exif_watermark::config::{Config, JPEG_QUALITY};
///
/// let config = Config::default();
/// assert_eq!(config.jpeg_quality, JPEG_QUALITY);
/// assert_eq!(config.output_dir.to_str(), Some("output"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory scanned (non-recursively) for input photos.
    pub input_dir: PathBuf,
    /// Directory watermarked copies are written to; created when missing.
    pub output_dir: PathBuf,
    pub output_prefix: String,
    pub input_extension: String,
    /// Font file path, or a bare file name looked up in the working directory
    /// and then the system font directories.
    pub font: PathBuf,
    pub font_size: f32,
    pub opacity: u8,
    pub text_color: [u8; 3],
    pub margin_left: u32,
    pub margin_bottom: u32,
    pub jpeg_quality: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from(OUTPUT_DIR),
            output_prefix: OUTPUT_PREFIX.to_string(),
            input_extension: INPUT_EXTENSION.to_string(),
            font: PathBuf::from(FONT_FILE),
            font_size: FONT_SIZE_PT,
            opacity: TEXT_OPACITY,
            text_color: TEXT_COLOR,
            margin_left: MARGIN_LEFT,
            margin_bottom: MARGIN_BOTTOM,
            jpeg_quality: JPEG_QUALITY,
        }
    }
}

impl Config {
    /// Same fixed settings, reading from `input_dir` and writing to
    /// `input_dir/output`.
    pub fn for_dir(input_dir: impl Into<PathBuf>) -> Self {
        let input_dir = input_dir.into();
        Self {
            output_dir: input_dir.join(OUTPUT_DIR),
            input_dir,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_fixed_constants() {
        let config = Config::default();
        assert_eq!(config.input_dir, PathBuf::from("."));
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.output_prefix, "s-");
        assert_eq!(config.input_extension, "jpg");
        assert_eq!(config.font, PathBuf::from(FONT_FILE));
        assert_eq!(config.font_size, 72.0);
        assert_eq!(config.opacity, 70);
        assert_eq!(config.text_color, [255, 255, 255]);
        assert_eq!(config.margin_left, 50);
        assert_eq!(config.margin_bottom, 20);
        assert_eq!(config.jpeg_quality, 80);
    }

    #[test]
    fn for_dir_nests_output() {
        let config = Config::for_dir("/photos");
        assert_eq!(config.input_dir, PathBuf::from("/photos"));
        assert_eq!(config.output_dir, PathBuf::from("/photos/output"));
        assert_eq!(config.jpeg_quality, JPEG_QUALITY);
    }
}
