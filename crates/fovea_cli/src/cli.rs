use clap::{Parser, ValueEnum};
use fovea_renderer::{DEFAULT_BUCKET_SIZE, DEFAULT_MAX_DEPTH};
use log::LevelFilter;
use std::path::PathBuf;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "fovea")]
#[command(about = "Foveated Whitted-style ray tracer", version)]
pub struct Args {
    /// Scene file (JSON)
    #[arg(long)]
    pub scene: PathBuf,

    /// Output image path; the format follows the extension
    #[arg(long, short)]
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(long, default_value_t = 800, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 600, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Rays per pixel at the focus point
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(1..))]
    pub rays: u32,

    /// Focus X in pixels (defaults to the image center)
    #[arg(long, allow_hyphen_values = true)]
    pub fovea_x: Option<f64>,

    /// Focus Y in pixels (defaults to the image center)
    #[arg(long, allow_hyphen_values = true)]
    pub fovea_y: Option<f64>,

    /// Reflection recursion limit
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: u32,

    /// Seed for reproducible jitter (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Render on a single thread
    #[arg(long)]
    pub serial: bool,

    /// Bucket edge length for the parallel renderer
    #[arg(long, default_value_t = DEFAULT_BUCKET_SIZE, value_parser = clap::value_parser!(u32).range(1..))]
    pub bucket_size: u32,

    /// Logging level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

impl Args {
    /// Focus point, with missing coordinates at the image center.
    pub fn focus(&self) -> (f64, f64) {
        (
            self.fovea_x.unwrap_or(self.width as f64 / 2.0),
            self.fovea_y.unwrap_or(self.height as f64 / 2.0),
        )
    }
}
