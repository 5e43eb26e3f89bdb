use vignette_core::source::ImageSource;

/// Convert a decoded RGBA8 source to an egui ColorImage.
pub fn source_to_color_image(source: &ImageSource) -> egui::ColorImage {
    let pixels = source.pixels();
    let size = [pixels.width() as usize, pixels.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_raw())
}
