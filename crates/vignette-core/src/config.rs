use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{DEFAULT_SCENE_HEIGHT, DEFAULT_SCENE_WIDTH};
use crate::displayed::ImageOptions;
use crate::error::{Result, VignetteError};

/// A scene described in TOML: canvas size plus the images placed on it, in
/// paint order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default)]
    pub images: Vec<ImageConfig>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: default_width(),
            height: default_height(),
            images: Vec::new(),
        }
    }
}

fn default_title() -> String {
    "Vignette".to_string()
}

fn default_width() -> f64 {
    DEFAULT_SCENE_WIDTH
}

fn default_height() -> f64 {
    DEFAULT_SCENE_HEIGHT
}

/// One `[[images]]` entry: a source path plus the construction options,
/// written inline next to it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageConfig {
    pub source: PathBuf,
    #[serde(flatten)]
    pub options: ImageOptions,
}

impl ImageConfig {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self::with_options(source, ImageOptions::default())
    }

    pub fn with_options(source: impl Into<PathBuf>, options: ImageOptions) -> Self {
        Self {
            source: source.into(),
            options,
        }
    }

    pub fn options(&self) -> &ImageOptions {
        &self.options
    }
}

impl SceneConfig {
    /// Read a scene file. Relative image paths are resolved against the
    /// directory containing the file.
    pub fn load(path: &Path) -> Result<Self> {
        let text =
            std::fs::read_to_string(path).map_err(|e| VignetteError::not_found(path, e))?;
        let mut config = Self::from_toml_str(&text)?;
        if let Some(dir) = path.parent() {
            config.resolve_relative_to(dir);
        }
        debug!(path = %path.display(), images = config.images.len(), "Scene config loaded");
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| VignetteError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| VignetteError::Config(e.to_string()))
    }

    /// Prefix every relative image path with `dir`.
    pub fn resolve_relative_to(&mut self, dir: &Path) {
        for image in &mut self.images {
            if image.source.is_relative() {
                image.source = dir.join(&image.source);
            }
        }
    }

    /// Sample scene showing each option, used by `vignette config`.
    pub fn example() -> Self {
        Self {
            title: "Example".to_string(),
            images: vec![
                ImageConfig::new("background.png"),
                ImageConfig::with_options(
                    "logo.png",
                    ImageOptions::default()
                        .at(10.0, 20.0)
                        .with_scale(2.0)
                        .with_angle(90.0),
                ),
                ImageConfig::with_options(
                    "caption.png",
                    ImageOptions::default()
                        .at(400.0, 300.0)
                        .with_scale(0.5)
                        .show_after(1.5)
                        .hide_after(3.0),
                ),
            ],
            ..Self::default()
        }
    }
}
