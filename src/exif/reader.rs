use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use exif::{In, Value};
use image::{ImageFormat, ImageReader};

use super::metadata::{MetaValue, Metadata};
use super::ratio::Ratio;
use crate::error::{Error, Result};

/// Whether an image format can carry an EXIF block that the reader understands.
pub fn has_exif_container(format: ImageFormat) -> bool {
    matches!(
        format,
        ImageFormat::Jpeg | ImageFormat::Tiff | ImageFormat::Png | ImageFormat::WebP
    )
}

/// Read the primary-image EXIF fields of an image file.
///
/// The file must be a recognizable image; anything else is an
/// [`Error::Decode`]. Formats without an EXIF container, and files of a
/// capable format that simply carry no EXIF block, yield an empty
/// [`Metadata`]. A present but corrupt EXIF block is an [`Error::Exif`].
pub fn read_metadata(path: &Path) -> Result<Metadata> {
    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| Error::io(path, e))?;
    let format = reader.format();
    let (width, height) = reader.into_dimensions().map_err(|source| Error::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("{}: {format:?} {width}x{height}", path.display());

    if !format.is_some_and(has_exif_container) {
        log::debug!("{} has no EXIF container", path.display());
        return Ok(Metadata::new());
    }

    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let exif = match exif::Reader::new().read_from_container(&mut BufReader::new(file)) {
        Ok(exif) => exif,
        Err(exif::Error::NotFound(_)) => {
            log::debug!("No EXIF data found in {}", path.display());
            return Ok(Metadata::new());
        }
        Err(source) => {
            return Err(Error::Exif {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let metadata: Metadata = exif
        .fields()
        .filter(|field| field.ifd_num == In::PRIMARY)
        .map(|field| (tag_name(field.tag), convert_value(&field.value)))
        .collect();

    log::debug!("Read {} EXIF field(s) from {}", metadata.len(), path.display());
    Ok(metadata)
}

/// Canonical name of a tag from the standard table, or its number when the
/// table does not know it.
fn tag_name(tag: exif::Tag) -> String {
    if tag.description().is_some() {
        tag.to_string()
    } else {
        tag.number().to_string()
    }
}

fn convert_value(value: &Value) -> MetaValue {
    match value {
        // Components are split on NUL by the parser; keep the separators so
        // padded strings reach the caption the way they were stored.
        Value::Ascii(parts) => MetaValue::Text(
            parts
                .iter()
                .map(|p| String::from_utf8_lossy(p))
                .collect::<Vec<_>>()
                .join("\0"),
        ),
        Value::Byte(v) => integers(v.iter().map(|&n| i64::from(n))),
        Value::Short(v) => integers(v.iter().map(|&n| i64::from(n))),
        Value::Long(v) => integers(v.iter().map(|&n| i64::from(n))),
        Value::SByte(v) => integers(v.iter().map(|&n| i64::from(n))),
        Value::SShort(v) => integers(v.iter().map(|&n| i64::from(n))),
        Value::SLong(v) => integers(v.iter().map(|&n| i64::from(n))),
        Value::Rational(v) => MetaValue::collapse(
            v.iter()
                .map(|r| MetaValue::Rational(Ratio::new(r.num.into(), r.denom.into()))),
        ),
        Value::SRational(v) => MetaValue::collapse(
            v.iter()
                .map(|r| MetaValue::Rational(Ratio::new(r.num.into(), r.denom.into()))),
        ),
        Value::Float(v) => MetaValue::collapse(v.iter().map(|&x| MetaValue::Float(x.into()))),
        Value::Double(v) => MetaValue::collapse(v.iter().map(|&x| MetaValue::Float(x))),
        Value::Undefined(bytes, _) => MetaValue::Bytes(bytes.clone()),
        Value::Unknown(..) => MetaValue::Bytes(Vec::new()),
    }
}

fn integers(values: impl Iterator<Item = i64>) -> MetaValue {
    MetaValue::collapse(values.map(MetaValue::Integer))
}
