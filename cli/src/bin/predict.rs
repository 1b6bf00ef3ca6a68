use clap::Parser;
use cli::PredictConfig;
use color_eyre::eyre::Result;
use detector::{Device, DevicePreference, MaskRcnnDetector};
use mask::AreaConvention;
use predict::{PredictionPipeline, Report, ReportFormat, ResultOrder};
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{self, EnvFilter};

/// Detect objects with a Mask R-CNN model, outline them and report their
/// pixel areas.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Exported model weights (.onnx)
    model_path: PathBuf,
    /// Image to analyse
    image_path: PathBuf,
    /// Where to write the annotated image
    output_path: PathBuf,

    /// TOML or JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Minimum detection score (inclusive), in [0, 1]
    #[arg(long, value_parser = parse_probability)]
    threshold: Option<f32>,
    /// Drop contours smaller than this many pixels
    #[arg(long)]
    min_area: Option<f32>,
    /// Report order: native or score-descending
    #[arg(long)]
    order: Option<ResultOrder>,
    /// Compute device: auto, cpu or cuda
    #[arg(long)]
    device: Option<DevicePreference>,
    /// Area convention: pixel-edges or pixel-centers
    #[arg(long)]
    area: Option<AreaConvention>,
    /// Report format: text or json
    #[arg(long, default_value_t = ReportFormat::Text)]
    format: ReportFormat,
}

fn parse_probability(value: &str) -> Result<f32, String> {
    let parsed: f32 = value.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&parsed) {
        Ok(parsed)
    } else {
        Err(format!("{value} is not in [0, 1]"))
    }
}

impl Args {
    /// File configuration (or defaults) with command-line overrides applied
    fn config(&self) -> Result<PredictConfig> {
        let mut config = match &self.config {
            Some(path) => PredictConfig::from_file(path)?,
            None => PredictConfig::default(),
        };

        if let Some(threshold) = self.threshold {
            config.pipeline.threshold = threshold;
        }
        if let Some(min_area) = self.min_area {
            config.pipeline.min_area = Some(min_area);
        }
        if let Some(order) = self.order {
            config.pipeline.order = order;
        }
        if let Some(area) = self.area {
            config.pipeline.area = area;
        }
        if let Some(device) = self.device {
            config.device = device;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = args.config()?;
    info!("Configuration: {:?}", config);

    let pipeline = PredictionPipeline::from_config(&config.pipeline)?;
    let device = Device::resolve(config.device);
    let mut model = MaskRcnnDetector::load(&args.model_path, config.model, device)?;

    let prediction = pipeline.run(&mut model, &args.image_path, Some(&args.output_path))?;
    if let Some(err) = &prediction.unreadable {
        eprintln!("{err}");
    }

    Report::new(&prediction.results, args.format).write_to(io::stdout().lock())?;

    info!("✅ {} objects reported", prediction.results.len());
    Ok(())
}
