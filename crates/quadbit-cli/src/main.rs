//! quadbit CLI - command-line interface for quadrant region segmentation.

use clap::{Args, Parser, Subcommand, ValueEnum};
use quadbit_core::Pix;
use quadbit_pipeline::{
    ArtifactStore, LiveRunner, Pipeline, PipelineConfig, PipelineReport, ServiceConfig,
};
use std::path::{Path, PathBuf};
use std::time::Duration;

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "quadbit")]
#[command(about = "Binarize images and detect foreground regions per quadrant")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline and write artifacts plus a JSON report.
    Process(ProcessArgs),

    /// Split an image into one grayscale PNG per band (all TIFF samples).
    Bands(BandsArgs),

    /// Re-run quadrant segmentation repeatedly, one JSON line per frame.
    Live(LiveArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PresetArg {
    Classic,
    Multiband,
}

impl PresetArg {
    fn config(self) -> PipelineConfig {
        match self {
            PresetArg::Classic => PipelineConfig::classic(),
            PresetArg::Multiband => PipelineConfig::multiband(),
        }
    }
}

/// Flags shared by every command that runs the segmentation.
#[derive(Debug, Clone, Args)]
struct SegmentArgs {
    /// Start from a built-in preset instead of the config file's pipeline.
    #[arg(long, value_enum)]
    preset: Option<PresetArg>,

    /// Binarization threshold (0-255); foreground is value >= threshold.
    #[arg(long)]
    threshold: Option<u32>,

    /// Let quadrant boxes overlap by the margin.
    #[arg(long)]
    overlap: bool,

    /// Overlap margin in pixels.
    #[arg(long)]
    margin: Option<i32>,
}

impl SegmentArgs {
    fn apply(&self, mut config: PipelineConfig) -> PipelineConfig {
        if let Some(preset) = self.preset {
            config = preset.config();
        }
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if self.overlap {
            config.overlap = true;
        }
        if let Some(margin) = self.margin {
            config.margin = margin;
        }
        config
    }
}

#[derive(Debug, Clone, Args)]
struct ProcessArgs {
    /// Path to the input image.
    #[arg(long)]
    image: PathBuf,

    /// Directory for the PNG artifacts (default: the config's output_dir).
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Service configuration (JSON).
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    segment: SegmentArgs,

    /// Write the JSON report here instead of printing it.
    #[arg(long)]
    json: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
struct BandsArgs {
    /// Path to the input image.
    #[arg(long)]
    image: PathBuf,

    /// Directory for the band PNGs.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Debug, Clone, Args)]
struct LiveArgs {
    /// Path to the input image.
    #[arg(long)]
    image: PathBuf,

    /// Service configuration (JSON).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of frames to publish.
    #[arg(long)]
    frames: Option<u32>,

    /// Delay before each frame in milliseconds.
    #[arg(long)]
    delay_ms: Option<u64>,

    #[command(flatten)]
    segment: SegmentArgs,
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process(args) => run_process(&args),
        Commands::Bands(args) => run_bands(&args),
        Commands::Live(args) => run_live(&args),
    }
}

fn load_service_config(path: Option<&Path>) -> CliResult<ServiceConfig> {
    match path {
        Some(path) => {
            tracing::info!("Loading config: {}", path.display());
            Ok(ServiceConfig::from_json_file(path)?)
        }
        None => Ok(ServiceConfig::default()),
    }
}

fn load_image(path: &Path) -> CliResult<Pix> {
    tracing::info!("Loading image: {}", path.display());
    quadbit_io::read_image(path).map_err(|e| -> CliError {
        format!("Failed to open image {}: {}", path.display(), e).into()
    })
}

fn image_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string())
}

// ── process ───────────────────────────────────────────────────────────

fn run_process(args: &ProcessArgs) -> CliResult<()> {
    let service = load_service_config(args.config.as_deref())?;
    let config = args.segment.apply(service.pipeline.clone());
    let pipeline = Pipeline::new(config)?;

    let image = load_image(&args.image)?;
    tracing::info!("Image size: {}x{}", image.width(), image.height());
    let output = pipeline.run(&image)?;

    let out_dir = args.out_dir.clone().unwrap_or(service.output_dir);
    let store = ArtifactStore::new(out_dir);
    let artifacts = store.save(&image_stem(&args.image), &output)?;

    let report = PipelineReport::new(pipeline.config(), &output).with_artifacts(artifacts);
    match &args.json {
        Some(path) => {
            report.write_json(path)?;
            tracing::info!("Report written to {}", path.display());
        }
        None => println!("{}", report.to_json_pretty()?),
    }
    Ok(())
}

// ── bands ─────────────────────────────────────────────────────────────

fn run_bands(args: &BandsArgs) -> CliResult<()> {
    tracing::info!("Loading bands: {}", args.image.display());
    let bands = quadbit_io::read_bands(&args.image).map_err(|e| -> CliError {
        format!("Failed to open image {}: {}", args.image.display(), e).into()
    })?;
    tracing::info!("{} band(s) of {}x{}", bands.len(), bands.width(), bands.height());
    let store = ArtifactStore::new(&args.out_dir);
    let paths = store.save_bands(&image_stem(&args.image), &bands)?;
    for path in paths {
        println!("{}", path.display());
    }
    Ok(())
}

// ── live ──────────────────────────────────────────────────────────────

fn run_live(args: &LiveArgs) -> CliResult<()> {
    let service = load_service_config(args.config.as_deref())?;
    let config = args.segment.apply(service.pipeline.clone());
    let frames = args.frames.unwrap_or(service.frames);
    let delay = args
        .delay_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| service.delay());

    let image = load_image(&args.image)?;
    let runner = LiveRunner::spawn(image, config, frames, delay)?;
    for frame in runner.iter() {
        println!("{}", serde_json::to_string(&frame)?);
    }
    let published = runner.join()?;
    tracing::info!("Published {} of {} frames", published, frames);
    Ok(())
}
