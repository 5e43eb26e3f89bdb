use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use vignette_core::config::SceneConfig;
use vignette_core::{DisplayedImage, NullNode};

use crate::summary::print_scene_plan;

#[derive(Args)]
pub struct PlanArgs {
    /// Scene file (TOML)
    pub scene: PathBuf,
}

pub fn run(args: &PlanArgs) -> Result<()> {
    let config = SceneConfig::load(&args.scene)?;

    let images = config
        .images
        .iter()
        .map(|entry| {
            DisplayedImage::with_options(&entry.source, entry.options(), NullNode)
                .with_context(|| format!("Failed to load {}", entry.source.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    print_scene_plan(&config, &images);
    Ok(())
}
