use vignette_core::source::ImageSource;
use vignette_core::RenderNode;

use crate::convert::source_to_color_image;

/// Render node backed by an egui texture.
///
/// Property changes are only stored here; the viewport reads them back
/// when it paints the next frame.
pub struct EguiNode {
    ctx: egui::Context,
    id: usize,
    pub texture: Option<egui::TextureHandle>,
    pub source_size: [f64; 2],
    pub position: [f64; 2],
    pub size: [f64; 2],
    pub preserve_ratio: bool,
    pub rotation: f64,
    pub visible: bool,
}

impl EguiNode {
    pub fn new(ctx: egui::Context, id: usize) -> Self {
        Self {
            ctx,
            id,
            texture: None,
            source_size: [0.0, 0.0],
            position: [0.0, 0.0],
            size: [0.0, 0.0],
            preserve_ratio: true,
            rotation: 0.0,
            visible: true,
        }
    }
}

impl RenderNode for EguiNode {
    fn set_image(&mut self, source: &ImageSource) {
        let image = source_to_color_image(source);
        self.texture = Some(self.ctx.load_texture(
            format!("vignette-image-{}", self.id),
            image,
            egui::TextureOptions::LINEAR,
        ));
        self.source_size = [f64::from(source.width()), f64::from(source.height())];
        self.ctx.request_repaint();
    }

    fn set_position(&mut self, x: f64, y: f64) {
        self.position = [x, y];
        self.ctx.request_repaint();
    }

    fn set_size(&mut self, width: f64, height: f64) {
        self.size = [width, height];
        self.ctx.request_repaint();
    }

    fn set_preserve_ratio(&mut self, preserve: bool) {
        self.preserve_ratio = preserve;
        self.ctx.request_repaint();
    }

    fn set_rotation(&mut self, degrees: f64) {
        self.rotation = degrees;
        self.ctx.request_repaint();
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.ctx.request_repaint();
    }
}
