use anyhow::Result;
use clap::Parser;

use exif_watermark::config::Config;
use exif_watermark::pipeline::{self, DirectorySource};

/// Takes no inputs: every `*.jpg` in the working directory is captioned and
/// a watermarked copy written to `output/s-<name>`.
#[derive(Parser, Debug)]
#[command(
    name = "exif-watermark",
    version,
    about = "Burn each photo's EXIF capture settings into a watermarked copy"
)]
struct Cli {
    /// Verbose log output on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    let config = Config::default();
    let source = DirectorySource::from_config(&config);

    let stdout = std::io::stdout();
    let mut console = stdout.lock();
    let report = pipeline::run_batch(&source, &config, &mut console)?;

    log::info!(
        "Done: {} image(s) written to {}",
        report.len(),
        config.output_dir.display()
    );

    Ok(())
}
