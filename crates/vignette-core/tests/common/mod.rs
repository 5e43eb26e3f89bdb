#![allow(dead_code)]

use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};

/// Write a solid-color PNG of the given size and return its path.
pub fn write_test_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let img = RgbaImage::from_pixel(width, height, Rgba([200, 40, 40, 255]));
    let path = dir.join(name);
    img.save(&path).expect("write test PNG");
    path
}

/// Write bytes that no decoder accepts, under an image-looking name.
pub fn write_garbage(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"definitely not an image").expect("write garbage file");
    path
}
