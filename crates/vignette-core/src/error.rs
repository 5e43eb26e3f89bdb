use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VignetteError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Resource not found: {}: {source}", .path.display())]
    ResourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Image format error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Scene config error: {0}")]
    Config(String),

    #[error("No image with id {0} in scene")]
    UnknownImage(usize),
}

impl VignetteError {
    pub(crate) fn not_found(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ResourceNotFound {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, VignetteError>;
