use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{ImageReader, RgbImage};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::caption;
use crate::config::Config;
use crate::error::Error;
use crate::exif;
use crate::watermark::{self, WatermarkFont, WatermarkStyle};

/// Supplies the list of photos a batch run works through, in order.
///
/// [`DirectorySource`] is what the binary uses; a plain `Vec<PathBuf>` works
/// too, which keeps the driver testable without touching the working
/// directory.
pub trait ImageSource {
    fn images(&self) -> crate::Result<Vec<PathBuf>>;
}

impl ImageSource for Vec<PathBuf> {
    fn images(&self) -> crate::Result<Vec<PathBuf>> {
        Ok(self.clone())
    }
}

/// Files directly inside one directory whose extension matches exactly
/// (case-sensitive), like the shell glob `*.jpg`. Subdirectories and hidden
/// files are not considered. Results are sorted by file name.
///
/// # Example
///
/// ```rust,no_run
/// use exif_watermark::pipeline::{DirectorySource, ImageSource};
///
/// let images = DirectorySource::new(".", "jpg").images()?;
/// println!("Found {} images", images.len());
/// # Ok::<(), exif_watermark::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
    extension: String,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.input_dir, &config.input_extension)
    }

    fn matches(&self, path: &Path) -> bool {
        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with('.'));
        !hidden && path.extension().and_then(|e| e.to_str()) == Some(self.extension.as_str())
    }
}

impl ImageSource for DirectorySource {
    fn images(&self) -> crate::Result<Vec<PathBuf>> {
        let mut images = Vec::new();

        for entry in WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| Error::io(&self.dir, e.into()))?;
            let path = entry.path();
            if entry.file_type().is_file() && self.matches(path) {
                images.push(path.to_path_buf());
            } else {
                log::debug!("Skipping {}", path.display());
            }
        }

        Ok(images)
    }
}

/// One photo that made it through the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedImage {
    pub input: PathBuf,
    pub output: PathBuf,
    pub caption: String,
}

/// Everything a batch run wrote, in processing order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub processed: Vec<ProcessedImage>,
}

impl BatchReport {
    pub fn len(&self) -> usize {
        self.processed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processed.is_empty()
    }
}

/// Where the watermarked copy of `input` is written:
/// `{output_dir}/{output_prefix}{file name}`.
pub fn output_path(input: &Path, config: &Config) -> crate::Result<PathBuf> {
    let name = input.file_name().ok_or_else(|| {
        Error::io(
            input,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
        )
    })?;
    let mut file_name = OsString::from(&config.output_prefix);
    file_name.push(name);
    Ok(config.output_dir.join(file_name))
}

/// Encode `image` as a baseline JPEG at `quality` (1–100).
pub fn save_jpeg(image: &RgbImage, path: &Path, quality: u8) -> crate::Result<()> {
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let mut writer = BufWriter::new(file);
    JpegEncoder::new_with_quality(&mut writer, quality)
        .encode_image(image)
        .map_err(|source| Error::Encode {
            path: path.to_path_buf(),
            source,
        })?;
    writer.flush().map_err(|e| Error::io(path, e))
}

/// Runs photos through read → caption → watermark → write.
///
/// The font is loaded the first time a photo reaches the watermark step and
/// reused afterwards.
#[derive(Debug)]
pub struct Watermarker {
    config: Config,
    style: WatermarkStyle,
    font: Option<WatermarkFont>,
}

impl Watermarker {
    pub fn new(config: Config) -> Self {
        let style = WatermarkStyle::from(&config);
        Self {
            config,
            style,
            font: None,
        }
    }

    /// Use an already loaded font instead of looking up `config.font`.
    pub fn with_font(mut self, font: WatermarkFont) -> Self {
        self.font = Some(font);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn font(&mut self) -> crate::Result<&WatermarkFont> {
        let font = match self.font.take() {
            Some(font) => font,
            None => WatermarkFont::load(&self.config.font)?,
        };
        Ok(self.font.insert(font))
    }

    /// Process one photo. The caption is written to `console` before the
    /// watermark is drawn.
    pub fn process_image(
        &mut self,
        path: &Path,
        console: &mut dyn Write,
    ) -> crate::Result<ProcessedImage> {
        let metadata = exif::read_metadata(path)?;
        let caption = caption::build_caption(&metadata)?;
        writeln!(console, "{caption}").map_err(|e| Error::io("<console>", e))?;

        let image = ImageReader::open(path)
            .and_then(|r| r.with_guessed_format())
            .map_err(|e| Error::io(path, e))?
            .decode()
            .map_err(|source| Error::Decode {
                path: path.to_path_buf(),
                source,
            })?;
        log::debug!("Decoded {} ({}x{})", path.display(), image.width(), image.height());

        let style = self.style;
        let font = self.font()?;
        let marked = watermark::apply_watermark(&image, &caption, font, &style);
        drop(image);

        let output = output_path(path, &self.config)?;
        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| Error::io(&self.config.output_dir, e))?;
        save_jpeg(&marked, &output, self.config.jpeg_quality)?;
        log::debug!("Wrote {}", output.display());

        Ok(ProcessedImage {
            input: path.to_path_buf(),
            output,
            caption,
        })
    }
}

/// Watermark every photo `source` lists, in order.
///
/// Stops at the first failure: later photos are not attempted, and copies
/// already written stay on disk. The returned error carries the failing path
/// as context; the underlying [`Error`] can be recovered with
/// `err.downcast_ref::<exif_watermark::Error>()`.
///
/// # Example
///
/// ```rust,no_run
/// use exif_watermark::config::Config;
/// use exif_watermark::pipeline::{DirectorySource, run_batch};
///
/// # fn main() -> anyhow::Result<()> {
/// let config = Config::for_dir("./photos");
/// let source = DirectorySource::from_config(&config);
/// let report = run_batch(&source, &config, &mut std::io::stdout())?;
/// println!("Wrote {} images", report.len());
/// # Ok(())
/// # }
/// ```
pub fn run_batch(
    source: &dyn ImageSource,
    config: &Config,
    console: &mut dyn Write,
) -> Result<BatchReport> {
    run_batch_with(source, Watermarker::new(config.clone()), console)
}

/// [`run_batch`] with a caller-built [`Watermarker`].
pub fn run_batch_with(
    source: &dyn ImageSource,
    mut watermarker: Watermarker,
    console: &mut dyn Write,
) -> Result<BatchReport> {
    let images = source.images().context("Failed to list input images")?;
    log::info!("Found {} image(s) to process", images.len());

    let mut report = BatchReport::default();
    let total = images.len();

    for (i, path) in images.iter().enumerate() {
        log::info!("[{}/{}] Processing: {}", i + 1, total, path.display());

        let processed = watermarker
            .process_image(path, console)
            .with_context(|| format!("Failed to process {}", path.display()))?;
        log::info!("  Wrote: {}", processed.output.display());

        report.processed.push(processed);
    }

    Ok(report)
}
