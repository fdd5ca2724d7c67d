use std::path::PathBuf;

/// Errors produced while captioning and watermarking a photo.
///
/// None of these are recovered from inside the library: the batch driver
/// stops at the first one and hands it back to the caller.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A metadata field the caption needs is absent.
    #[error("missing metadata field: {0}")]
    MissingField(&'static str),

    /// A metadata field is present but its value cannot be displayed.
    #[error("metadata field {field} has an unusable value: {value}")]
    InvalidField { field: &'static str, value: String },

    /// The file is not a recognizable or decodable image.
    #[error("failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The image carries an EXIF block that could not be parsed.
    #[error("failed to parse EXIF in {path}: {source}")]
    Exif {
        path: PathBuf,
        #[source]
        source: exif::Error,
    },

    /// The watermark font could not be found on disk.
    #[error("watermark font not found: {0}")]
    FontNotFound(String),

    /// The watermark font file exists but is not a usable font.
    #[error("failed to load watermark font {path}: {reason}")]
    FontLoad { path: PathBuf, reason: String },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The watermarked image could not be encoded.
    #[error("failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
