//! Interactive orbit/trackball demo.
//!
//! - Left drag: rotate the model (trackball)
//! - Scroll: zoom the camera
//! - W/A/S/D: orbit the camera, I/J/K/L: pan it
//! - Arrows, PageUp/PageDown: move the light
//! - R/E/Q/T: toon, outline, bloom, invisible
//! - X: reset the model, Escape: quit

use std::path::PathBuf;

use clap::Parser;
use sphereview::DemoConfig;

#[derive(Parser, Debug)]
#[command(name = "sphereview")]
#[command(about = "Orbit camera, orbiting light and trackball model rotation")]
struct Args {
    /// TOML config file; missing values take their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Window width in pixels (overrides the config file)
    #[arg(long)]
    width: Option<u32>,

    /// Window height in pixels (overrides the config file)
    #[arg(long)]
    height: Option<u32>,

    /// Trackball radius in pixels (defaults to the window height)
    #[arg(long)]
    trackball_radius: Option<f32>,

    /// Write the effective config to this path and exit
    #[arg(long)]
    write_default_config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => DemoConfig::load(path)?,
        None => DemoConfig::default(),
    };
    if let Some(width) = args.width {
        config.window.width = width;
    }
    if let Some(height) = args.height {
        config.window.height = height;
    }
    if let Some(radius) = args.trackball_radius {
        config = config.trackball_radius(radius);
    }
    config.validate()?;

    if let Some(path) = args.write_default_config {
        config.save(&path)?;
        return Ok(());
    }

    sphereview::run(config)?;
    Ok(())
}
