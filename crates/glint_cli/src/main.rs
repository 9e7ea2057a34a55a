mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use glint_renderer::{render, RenderConfig};
use glint_scene::{load_scene, parse_scene, LoadedScene, RenderSettings, SHOWCASE};

use crate::cli::Args;

/// Merge command line flags over the scene's render settings.
fn render_config(args: &Args, settings: &RenderSettings) -> RenderConfig {
    let defaults = RenderConfig::default();
    RenderConfig {
        width: args.width.or(settings.width).unwrap_or(defaults.width),
        height: args.height.or(settings.height).unwrap_or(defaults.height),
        samples_per_pixel: args
            .samples
            .or(settings.samples_per_pixel)
            .unwrap_or(defaults.samples_per_pixel),
        max_depth: args.max_depth.or(settings.max_depth).unwrap_or(defaults.max_depth),
        sampler: args.sampler.into(),
        seed: args.seed,
        bucket_size: args.bucket_size.unwrap_or(defaults.bucket_size),
    }
}

fn load(args: &Args) -> Result<LoadedScene> {
    match &args.scene {
        Some(path) => load_scene(path, args.seed)
            .with_context(|| format!("Failed to load scene {}", path.display())),
        None => {
            log::info!("No scene given, rendering the built-in showcase");
            parse_scene(SHOWCASE, args.seed).context("Failed to parse built-in showcase scene")
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    if let Some(level) = args.log_level {
        logger.filter_level(level.into());
    }
    logger.init();

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure worker threads")?;
    }
    log::info!("Using {} worker threads", rayon::current_num_threads());

    let loaded = load(&args)?;
    let config = render_config(&args, &loaded.render);
    let camera = loaded.camera.build(config.aspect_ratio());

    let image = render(&camera, &loaded.scene, &config);
    image
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    Ok(())
}
