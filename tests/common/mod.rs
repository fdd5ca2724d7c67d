//! Test fixtures: JPEGs carrying a hand-assembled EXIF block.
#![allow(dead_code)]

use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};
use img_parts::jpeg::Jpeg;
use img_parts::{Bytes, ImageEXIF};
use std::fs;
use std::path::{Path, PathBuf};

const TAG_MODEL: u16 = 0x0110;
const TAG_ARTIST: u16 = 0x013B;
const TAG_EXIF_IFD_POINTER: u16 = 0x8769;
const TAG_EXPOSURE_TIME: u16 = 0x829A;
const TAG_F_NUMBER: u16 = 0x829D;
const TAG_ISO: u16 = 0x8827;
const TAG_DATE_TIME_ORIGINAL: u16 = 0x9003;
const TAG_FOCAL_LENGTH: u16 = 0x920A;
const TAG_LENS_MODEL: u16 = 0xA434;

pub const BASE_COLOR: Rgb<u8> = Rgb([30, 30, 30]);

pub fn fixture_font() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/DejaVuSans.ttf")
}

/// Capture settings written into a fixture. `None` leaves the tag out.
#[derive(Debug, Clone)]
pub struct PhotoTags {
    pub model: Option<String>,
    pub lens: Option<String>,
    pub focal_length: Option<(u32, u32)>,
    pub iso: Option<u16>,
    pub exposure_time: Option<(u32, u32)>,
    pub f_number: Option<(u32, u32)>,
    pub artist: Option<String>,
    pub date_time: Option<String>,
}

impl Default for PhotoTags {
    fn default() -> Self {
        Self {
            model: Some("ILCE-7M3".to_string()),
            lens: Some("FE 24-70mm F2.8 GM".to_string()),
            focal_length: Some((506, 10)),
            iso: Some(400),
            exposure_time: Some((1, 200)),
            f_number: Some((28, 10)),
            artist: Some("Jane Doe ".to_string()),
            date_time: Some("2024:05:01 10:30:00".to_string()),
        }
    }
}

/// Caption produced from [`PhotoTags::default`].
pub const DEFAULT_CAPTION: &str =
    "ILCE-7M3, FE 24-70mm F2.8 GM, 50mm, F2.8, 1/200sec, ISO400, Photo by Jane Doe @ 2024:05:01 10:30:00";

enum Value {
    Ascii(Vec<u8>),
    Short(u16),
    Long(u32),
    Rational(u32, u32),
}

struct Entry {
    tag: u16,
    value: Value,
}

impl Entry {
    fn ascii(tag: u16, s: &str) -> Self {
        let mut bytes = s.as_bytes().to_vec();
        bytes.push(0);
        Self {
            tag,
            value: Value::Ascii(bytes),
        }
    }

    fn kind(&self) -> u16 {
        match self.value {
            Value::Ascii(_) => 2,
            Value::Short(_) => 3,
            Value::Long(_) => 4,
            Value::Rational(..) => 5,
        }
    }

    fn count(&self) -> u32 {
        match &self.value {
            Value::Ascii(bytes) => bytes.len() as u32,
            _ => 1,
        }
    }

    fn payload(&self) -> Vec<u8> {
        match &self.value {
            Value::Ascii(bytes) => bytes.clone(),
            Value::Short(n) => n.to_le_bytes().to_vec(),
            Value::Long(n) => n.to_le_bytes().to_vec(),
            Value::Rational(num, den) => {
                let mut bytes = num.to_le_bytes().to_vec();
                bytes.extend_from_slice(&den.to_le_bytes());
                bytes
            }
        }
    }

    fn overflow_len(&self) -> usize {
        let len = self.payload().len();
        if len > 4 { len + len % 2 } else { 0 }
    }
}

fn ifd_len(entries: &[Entry]) -> usize {
    2 + entries.len() * 12 + 4 + entries.iter().map(Entry::overflow_len).sum::<usize>()
}

/// Append one IFD plus its out-of-line values. Offsets are relative to the
/// start of `out`, which must begin with the TIFF header.
fn write_ifd(out: &mut Vec<u8>, entries: &[Entry]) {
    let data_start = out.len() + 2 + entries.len() * 12 + 4;
    let mut data = Vec::new();

    out.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    for entry in entries {
        out.extend_from_slice(&entry.tag.to_le_bytes());
        out.extend_from_slice(&entry.kind().to_le_bytes());
        out.extend_from_slice(&entry.count().to_le_bytes());

        let payload = entry.payload();
        if payload.len() <= 4 {
            let mut inline = payload;
            inline.resize(4, 0);
            out.extend_from_slice(&inline);
        } else {
            out.extend_from_slice(&((data_start + data.len()) as u32).to_le_bytes());
            data.extend_from_slice(&payload);
            if payload.len() % 2 == 1 {
                data.push(0);
            }
        }
    }
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&data);
}

impl PhotoTags {
    /// Little-endian TIFF structure holding IFD0 and the Exif sub-IFD.
    pub fn tiff_block(&self) -> Vec<u8> {
        let mut ifd0 = Vec::new();
        if let Some(model) = &self.model {
            ifd0.push(Entry::ascii(TAG_MODEL, model));
        }
        if let Some(artist) = &self.artist {
            ifd0.push(Entry::ascii(TAG_ARTIST, artist));
        }

        let mut exif_ifd = Vec::new();
        if let Some((num, den)) = self.exposure_time {
            exif_ifd.push(Entry {
                tag: TAG_EXPOSURE_TIME,
                value: Value::Rational(num, den),
            });
        }
        if let Some((num, den)) = self.f_number {
            exif_ifd.push(Entry {
                tag: TAG_F_NUMBER,
                value: Value::Rational(num, den),
            });
        }
        if let Some(iso) = self.iso {
            exif_ifd.push(Entry {
                tag: TAG_ISO,
                value: Value::Short(iso),
            });
        }
        if let Some(date) = &self.date_time {
            exif_ifd.push(Entry::ascii(TAG_DATE_TIME_ORIGINAL, date));
        }
        if let Some((num, den)) = self.focal_length {
            exif_ifd.push(Entry {
                tag: TAG_FOCAL_LENGTH,
                value: Value::Rational(num, den),
            });
        }
        if let Some(lens) = &self.lens {
            exif_ifd.push(Entry::ascii(TAG_LENS_MODEL, lens));
        }

        if !exif_ifd.is_empty() {
            // Placeholder offset; its size is what matters for ifd_len.
            ifd0.push(Entry {
                tag: TAG_EXIF_IFD_POINTER,
                value: Value::Long(0),
            });
            let exif_offset = 8 + ifd_len(&ifd0);
            if let Some(pointer) = ifd0.last_mut() {
                pointer.value = Value::Long(exif_offset as u32);
            }
        }

        let mut out = b"II".to_vec();
        out.extend_from_slice(&42u16.to_le_bytes());
        out.extend_from_slice(&8u32.to_le_bytes());
        write_ifd(&mut out, &ifd0);
        if !exif_ifd.is_empty() {
            write_ifd(&mut out, &exif_ifd);
        }
        out
    }
}

/// Encode a flat-colored JPEG of the given size without metadata.
pub fn plain_jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = RgbImage::from_pixel(width, height, BASE_COLOR);
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, 95)
        .encode_image(&image)
        .unwrap();
    bytes
}

/// Write a JPEG at `path` carrying `tags` in its APP1 EXIF segment.
pub fn write_tagged_jpeg(path: &Path, width: u32, height: u32, tags: &PhotoTags) {
    let mut jpeg = Jpeg::from_bytes(Bytes::from(plain_jpeg_bytes(width, height))).unwrap();
    jpeg.set_exif(Some(Bytes::from(tags.tiff_block())));
    fs::write(path, jpeg.encoder().bytes()).unwrap();
}
