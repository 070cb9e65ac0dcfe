// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

use crate::config::SceneConfig;

#[derive(Parser, Debug, Clone)]
#[command(name = "orbit-particles")]
#[command(about = "Orbiting particle scene rendered through an offscreen pass", long_about = None)]
pub struct Cli {
    /// JSON scene config; flags below override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Seed for particle placement (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of particles
    #[arg(long)]
    pub particles: Option<u32>,

    /// Initial window width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Initial window height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Clear the offscreen texture every frame (disables motion trails)
    #[arg(long = "clear-offscreen", default_value = "false")]
    pub clear_offscreen: bool,
}

impl Cli {
    /// Resolve the scene config: defaults, then file, then flags
    pub fn scene_config(&self) -> anyhow::Result<SceneConfig> {
        let mut config = match &self.config {
            Some(path) => SceneConfig::load(path)?,
            None => SceneConfig::default(),
        };

        if let Some(particles) = self.particles {
            config.particle_count = particles;
        }
        if let Some(width) = self.width {
            config.window_width = width;
        }
        if let Some(height) = self.height {
            config.window_height = height;
        }
        if self.clear_offscreen {
            config.clear_offscreen = true;
        }

        config.validate()?;
        Ok(config)
    }
}
