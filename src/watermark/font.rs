//! Loading and measuring the caption font.

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// A parsed TrueType/OpenType face used to draw captions.
pub struct WatermarkFont {
    font: FontVec,
    path: PathBuf,
}

impl std::fmt::Debug for WatermarkFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatermarkFont")
            .field("path", &self.path)
            .field("glyphs", &self.font.glyph_count())
            .finish()
    }
}

impl WatermarkFont {
    /// Locate `font` (see [`locate_font`]) and parse it.
    pub fn load(font: &Path) -> Result<Self> {
        let path = locate_font(font)?;
        let data = std::fs::read(&path).map_err(|e| Error::io(&path, e))?;
        let font = Self::from_bytes(data, path)?;
        log::debug!("Loaded watermark font {}", font.path.display());
        Ok(font)
    }

    /// Parse font data already in memory. `path` is only used for reporting.
    pub fn from_bytes(data: Vec<u8>, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        match FontVec::try_from_vec(data) {
            Ok(font) => Ok(Self { font, path }),
            Err(e) => Err(Error::FontLoad {
                path,
                reason: e.to_string(),
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn face(&self) -> &FontVec {
        &self.font
    }

    /// Pixel scale for a size in points, treating 1pt as 1px of em height.
    pub fn scale_for(&self, size_pt: f32) -> PxScale {
        match self.font.units_per_em() {
            Some(units_per_em) if units_per_em > 0.0 => {
                PxScale::from(size_pt * self.font.height_unscaled() / units_per_em)
            }
            _ => PxScale::from(size_pt),
        }
    }

    /// Width and height in pixels of `text` drawn on one line at `size_pt`.
    ///
    /// Height is the face's full line box (ascent to descent), independent
    /// of which glyphs the text contains.
    pub fn measure(&self, text: &str, size_pt: f32) -> (u32, u32) {
        let scaled = self.font.as_scaled(self.scale_for(size_pt));

        let mut width = 0.0f32;
        let mut prev_glyph: Option<ab_glyph::GlyphId> = None;
        for c in text.chars() {
            let glyph_id = scaled.glyph_id(c);
            if let Some(prev) = prev_glyph {
                width += scaled.kern(prev, glyph_id);
            }
            width += scaled.h_advance(glyph_id);
            prev_glyph = Some(glyph_id);
        }

        (width.ceil().max(0.0) as u32, scaled.height().ceil() as u32)
    }
}

/// Resolve the font file to load.
///
/// A path that exists is used as-is (relative paths are relative to the
/// working directory). Otherwise its file name is searched for in the
/// platform font directories.
pub fn locate_font(font: &Path) -> Result<PathBuf> {
    locate_font_in(font, &system_font_dirs())
}

pub(crate) fn locate_font_in(font: &Path, search_dirs: &[PathBuf]) -> Result<PathBuf> {
    if font.is_file() {
        return Ok(font.to_path_buf());
    }

    let not_found = || Error::FontNotFound(font.display().to_string());
    let name = font.file_name().ok_or_else(not_found)?;

    for dir in search_dirs.iter().filter(|d| d.is_dir()) {
        let found = WalkDir::new(dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .find(|e| e.file_type().is_file() && e.file_name() == name);
        if let Some(entry) = found {
            log::debug!("Found font {} in {}", name.to_string_lossy(), dir.display());
            return Ok(entry.into_path());
        }
    }

    Err(not_found())
}

fn system_font_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    let home = std::env::var_os("HOME").map(PathBuf::from);

    if cfg!(target_os = "windows") {
        let windir = std::env::var_os("WINDIR")
            .map_or_else(|| PathBuf::from(r"C:\Windows"), PathBuf::from);
        dirs.push(windir.join("Fonts"));
    } else if cfg!(target_os = "macos") {
        dirs.push(PathBuf::from("/System/Library/Fonts"));
        dirs.push(PathBuf::from("/Library/Fonts"));
        if let Some(home) = &home {
            dirs.push(home.join("Library/Fonts"));
        }
    } else {
        dirs.push(PathBuf::from("/usr/share/fonts"));
        dirs.push(PathBuf::from("/usr/local/share/fonts"));
        if let Some(home) = &home {
            dirs.push(home.join(".local/share/fonts"));
            dirs.push(home.join(".fonts"));
        }
    }

    dirs
}
