//! Turning a photo's EXIF fields into its one-line watermark caption.
//!
//! ```rust
//! use exif_watermark::caption::build_caption;
//! use exif_watermark::exif::{Metadata, Ratio};
//!
//! let mut metadata = Metadata::new();
//! metadata.insert("Model", "ILCE-7M3 ");
//! metadata.insert("LensModel", "FE 24-70mm F2.8 GM\0\0");
//! metadata.insert("FocalLength", Ratio::new(506, 10));
//! metadata.insert("FNumber", Ratio::new(28, 10));
//! metadata.insert("ExposureTime", Ratio::new(1, 200));
//! metadata.insert("PhotographicSensitivity", 400i64);
//! metadata.insert("Artist", " Jane Doe");
//! metadata.insert("DateTimeOriginal", "2024:05:01 10:30:00");
//!
//! assert_eq!(
//!     build_caption(&metadata).unwrap(),
//!     "ILCE-7M3, FE 24-70mm F2.8 GM, 50mm, F2.8, 1/200sec, ISO400, Photo by Jane Doe @ 2024:05:01 10:30:00"
//! );
//! ```

use std::fmt;

use crate::error::{Error, Result};
use crate::exif::{MetaValue, Metadata, Ratio};

/// Metadata keys the caption is built from.
pub mod keys {
    pub const CAMERA: &str = "Model";
    pub const LENS: &str = "LensModel";
    pub const FOCAL_LENGTH: &str = "FocalLength";
    pub const ISO: &str = "PhotographicSensitivity";
    pub const EXPOSURE_TIME: &str = "ExposureTime";
    pub const F_NUMBER: &str = "FNumber";
    pub const ARTIST: &str = "Artist";
    pub const DATE_TIME: &str = "DateTimeOriginal";

    /// Lookup order; the first absent key is the one reported.
    pub const REQUIRED: [&str; 8] = [
        CAMERA,
        LENS,
        FOCAL_LENGTH,
        ISO,
        EXPOSURE_TIME,
        F_NUMBER,
        ARTIST,
        DATE_TIME,
    ];
}

/// Largest denominator used when a floating-point exposure is shown as a fraction.
const MAX_SHUTTER_DENOMINATOR: i64 = 1_000_000;

/// The formatted pieces of a caption.
///
/// `Display` renders the fixed template
/// `{camera}, {lens}, {focal}mm, F{f_number}, {shutter}sec, ISO{iso}, Photo by {artist} @ {date}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caption {
    pub camera: String,
    pub lens: String,
    pub focal_mm: i64,
    pub f_number: String,
    pub shutter: String,
    pub iso: String,
    pub artist: String,
    pub date: String,
}

impl Caption {
    pub fn from_metadata(metadata: &Metadata) -> Result<Self> {
        let camera = metadata.require(keys::CAMERA)?;
        let lens = metadata.require(keys::LENS)?;
        let focal = metadata.require(keys::FOCAL_LENGTH)?;
        let iso = metadata.require(keys::ISO)?;
        let exposure = metadata.require(keys::EXPOSURE_TIME)?;
        let f_number = metadata.require(keys::F_NUMBER)?;
        let artist = metadata.require(keys::ARTIST)?;
        let date = metadata.require(keys::DATE_TIME)?;

        Ok(Self {
            camera: camera.to_string().trim().to_string(),
            lens: lens.to_string().replace('\0', ""),
            focal_mm: truncate_focal_length(focal)?,
            f_number: f_number.to_string(),
            shutter: format_shutter(exposure)?,
            iso: iso.scalar().to_string(),
            artist: artist.to_string().trim().to_string(),
            date: date.to_string(),
        })
    }
}

impl fmt::Display for Caption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}mm, F{}, {}sec, ISO{}, Photo by {} @ {}",
            self.camera,
            self.lens,
            self.focal_mm,
            self.f_number,
            self.shutter,
            self.iso,
            self.artist,
            self.date
        )
    }
}

/// Build the watermark caption for a photo.
///
/// Fails with [`Error::MissingField`] if any of [`keys::REQUIRED`] is absent;
/// there is no partial or fallback caption.
pub fn build_caption(metadata: &Metadata) -> Result<String> {
    Caption::from_metadata(metadata).map(|caption| caption.to_string())
}

/// Focal length in whole millimetres, fractional part discarded.
fn truncate_focal_length(value: &MetaValue) -> Result<i64> {
    let invalid = || Error::InvalidField {
        field: keys::FOCAL_LENGTH,
        value: value.to_string(),
    };
    match value.scalar() {
        MetaValue::Integer(n) => Ok(*n),
        MetaValue::Rational(r) => r.trunc().ok_or_else(invalid),
        MetaValue::Float(x) if x.is_finite() => Ok(x.trunc() as i64),
        _ => Err(invalid()),
    }
}

/// Exposures under one second as a reduced fraction (`1/200`), longer ones
/// as their decimal value (`2`, `2.5`).
fn format_shutter(value: &MetaValue) -> Result<String> {
    let invalid = || Error::InvalidField {
        field: keys::EXPOSURE_TIME,
        value: value.to_string(),
    };
    match value.scalar() {
        MetaValue::Integer(n) => Ok(n.to_string()),
        MetaValue::Rational(r) if r.is_finite() => {
            let r = r.reduced();
            if r.num < r.den {
                Ok(sub_second(r))
            } else {
                Ok(r.to_string())
            }
        }
        MetaValue::Float(x) if x.is_finite() => {
            if *x < 1.0 {
                Ratio::approximate(*x, MAX_SHUTTER_DENOMINATOR)
                    .map(sub_second)
                    .ok_or_else(invalid)
            } else {
                Ok(x.to_string())
            }
        }
        _ => Err(invalid()),
    }
}

/// A zero exposure has no fraction form and prints as `0`.
fn sub_second(r: Ratio) -> String {
    if r.num == 0 {
        "0".to_string()
    } else {
        r.to_fraction_string()
    }
}
