use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use glint_renderer::Sampler;
use log::LevelFilter;

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

/// Sub-pixel sampling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SamplerArg {
    Uniform,
    Jittered,
}

impl From<SamplerArg> for Sampler {
    fn from(sampler: SamplerArg) -> Self {
        match sampler {
            SamplerArg::Uniform => Sampler::Uniform,
            SamplerArg::Jittered => Sampler::Jittered,
        }
    }
}

/// Command line arguments.
///
/// Render options left unset fall back to the scene file's `render`
/// section, then to built-in defaults.
#[derive(Debug, Parser)]
#[command(name = "glint")]
#[command(about = "A Whitted-style ray tracer", version)]
pub struct Args {
    /// Scene description (JSON); renders the built-in showcase if omitted
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Output image path (.png or .ppm)
    #[arg(short, long, default_value = "render.png")]
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: Option<u32>,

    /// Samples per pixel
    #[arg(long, short = 's', value_parser = clap::value_parser!(u32).range(1..))]
    pub samples: Option<u32>,

    /// Maximum ray depth (1 = no reflections)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_depth: Option<u32>,

    /// Sub-pixel sample placement
    #[arg(long, value_enum, default_value_t = SamplerArg::Jittered)]
    pub sampler: SamplerArg,

    /// Seed for sample jitter and area light placement
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Bucket edge length in pixels
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub bucket_size: Option<u32>,

    /// Worker threads; 0 or unset uses one per core
    #[arg(long)]
    pub threads: Option<usize>,

    /// Logging level; overrides RUST_LOG
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["glint"]).unwrap();
        assert!(args.scene.is_none());
        assert_eq!(args.output, PathBuf::from("render.png"));
        assert_eq!(args.sampler, SamplerArg::Jittered);
        assert_eq!(args.seed, 0);
        assert!(args.width.is_none());
        assert!(args.log_level.is_none());
    }

    #[test]
    fn test_full_command_line() {
        let args = Args::try_parse_from([
            "glint",
            "--scene",
            "scenes/showcase.json",
            "--output",
            "out.ppm",
            "--width",
            "320",
            "--height",
            "240",
            "--samples",
            "9",
            "--max-depth",
            "3",
            "--sampler",
            "uniform",
            "--seed",
            "42",
            "--bucket-size",
            "16",
            "--threads",
            "2",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(args.scene, Some(PathBuf::from("scenes/showcase.json")));
        assert_eq!(args.width, Some(320));
        assert_eq!(args.height, Some(240));
        assert_eq!(args.samples, Some(9));
        assert_eq!(args.max_depth, Some(3));
        assert_eq!(Sampler::from(args.sampler), Sampler::Uniform);
        assert_eq!(args.seed, 42);
        assert_eq!(args.bucket_size, Some(16));
        assert_eq!(args.threads, Some(2));
        assert_eq!(args.log_level.map(LevelFilter::from), Some(LevelFilter::Debug));
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        assert!(Args::try_parse_from(["glint", "--width", "0"]).is_err());
        assert!(Args::try_parse_from(["glint", "--samples", "0"]).is_err());
        assert!(Args::try_parse_from(["glint", "--sampler", "random"]).is_err());
    }
}
