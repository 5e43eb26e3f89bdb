use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use image::{ColorType, ImageReader, RgbaImage};
use tracing::debug;

use crate::error::{Result, VignetteError};

/// A decoded image file, owned by whoever displays it.
///
/// Pixels are always held as RGBA8 regardless of the on-disk format, so
/// render nodes can upload them without caring where they came from.
#[derive(Clone)]
pub struct ImageSource {
    path: PathBuf,
    pixels: RgbaImage,
    color: ColorType,
}

impl std::fmt::Debug for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageSource")
            .field("path", &self.path)
            .field("width", &self.pixels.width())
            .field("height", &self.pixels.height())
            .field("color", &self.color)
            .finish()
    }
}

impl ImageSource {
    /// Open and decode the image at `path`.
    ///
    /// Any failure to open or read the file is reported as
    /// `ResourceNotFound`; bytes the decoder rejects become `Decode`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| VignetteError::not_found(path, e))?;
        let reader = ImageReader::new(BufReader::new(file))
            .with_guessed_format()
            .map_err(|e| VignetteError::not_found(path, e))?;
        let decoded = reader.decode()?;
        let color = decoded.color();
        let pixels = decoded.to_rgba8();

        debug!(
            path = %path.display(),
            width = pixels.width(),
            height = pixels.height(),
            "Loaded image source"
        );

        Ok(Self {
            path: path.to_path_buf(),
            pixels,
            color,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Color layout of the file before conversion to RGBA8.
    pub fn color_type(&self) -> ColorType {
        self.color
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}
