//! # exif-watermark
//!
//! Caption photos with their own capture settings. Each JPEG's EXIF block is
//! read, summarized as one line (camera, lens, focal length, aperture,
//! shutter speed, ISO, artist, timestamp), and that line is burned into a
//! copy of the photo as a faint white watermark in the lower-left corner.
//!
//! ## Quick Start
//!
//! The pipeline module runs the whole read → caption → watermark → write flow
//! over a directory:
//!
//! ```rust,no_run
//! use exif_watermark::config::Config;
//! use exif_watermark::pipeline::{DirectorySource, run_batch};
//!
//! fn main() -> anyhow::Result<()> {
//!     // Fixed settings: `*.jpg` in the working directory, copies in `output/`
//!     let config = Config::default();
//!     let source = DirectorySource::from_config(&config);
//!
//!     // Captions are echoed to stdout as each photo is processed
//!     let report = run_batch(&source, &config, &mut std::io::stdout())?;
//!     for image in &report.processed {
//!         println!("{} -> {}", image.input.display(), image.output.display());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Lower-Level Usage
//!
//! ```rust,no_run
//! use exif_watermark::caption::build_caption;
//! use exif_watermark::exif::read_metadata;
//! use exif_watermark::pipeline::save_jpeg;
//! use exif_watermark::watermark::{WatermarkFont, WatermarkStyle, apply_watermark};
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let path = Path::new("photo1.jpg");
//!
//!     // 1. Read EXIF fields
//!     let metadata = read_metadata(path)?;
//!
//!     // 2. Format the caption (fails if a field is missing)
//!     let caption = build_caption(&metadata)?;
//!
//!     // 3. Burn it in
//!     let font = WatermarkFont::load(Path::new("DejaVuSans.ttf"))?;
//!     let photo = image::open(path)?;
//!     let marked = apply_watermark(&photo, &caption, &font, &WatermarkStyle::default());
//!
//!     // 4. Write the copy
//!     save_jpeg(&marked, Path::new("s-photo1.jpg"), 80)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`exif`]: EXIF decoding into a name → value map
//! - [`caption`]: caption formatting rules
//! - [`watermark`]: font loading, text overlay and compositing
//! - [`pipeline`]: input discovery and the batch driver
//! - [`config`]: the fixed settings of a run
//! - [`error`]: error type shared by all of the above

pub mod caption;
pub mod config;
pub mod error;
pub mod exif;
pub mod pipeline;
pub mod watermark;

pub use error::{Error, Result};
