//! EXIF metadata reading.
//!
//! - [`read_metadata`]: decode the primary-image EXIF fields of a file into a [`Metadata`] map
//! - [`Metadata`] / [`MetaValue`]: the decoded fields, keyed by canonical tag name
//! - [`Ratio`]: exact EXIF rationals (exposure time, focal length, aperture)

mod metadata;
mod ratio;
mod reader;

pub use metadata::{MetaValue, Metadata};
pub use ratio::Ratio;
pub use reader::{has_exif_container, read_metadata};
