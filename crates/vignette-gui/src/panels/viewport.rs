use vignette_core::layout::fit_within;

use crate::app::VignetteApp;
use crate::node::EguiNode;

pub fn show(ctx: &egui::Context, app: &mut VignetteApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        paint_background(ui, rect);

        let Some(scene) = app.scene.as_ref() else {
            show_placeholder(ui);
            return;
        };

        let canvas = fit_canvas(rect, scene.width() as f32, scene.height() as f32);
        ui.painter()
            .rect_filled(canvas, 0.0, egui::Color32::from_gray(45));
        let zoom = if scene.width() > 0.0 {
            canvas.width() / scene.width() as f32
        } else {
            1.0
        };

        // Images outside the canvas are clipped, like a scene viewport.
        let painter = ui.painter_at(canvas);
        for (id, image) in scene.images().iter().enumerate() {
            draw_node(&painter, image.node(), canvas.min, zoom, app.selected == Some(id));
        }

        draw_viewing_label(ui, rect, scene.title());
    });
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
}

/// Largest rect with the scene's proportions centered in `rect`.
fn fit_canvas(rect: egui::Rect, width: f32, height: f32) -> egui::Rect {
    if width <= 0.0 || height <= 0.0 {
        return rect;
    }
    let zoom = (rect.width() / width).min(rect.height() / height);
    egui::Rect::from_center_size(rect.center(), egui::vec2(width, height) * zoom)
}

fn draw_node(painter: &egui::Painter, node: &EguiNode, origin: egui::Pos2, zoom: f32, selected: bool) {
    if !node.visible {
        return;
    }
    let Some(texture) = node.texture.as_ref() else {
        return;
    };

    let [w, h] = fit_within(node.source_size, node.size, node.preserve_ratio);
    let min = origin + egui::vec2(node.position[0] as f32, node.position[1] as f32) * zoom;
    let img_rect = egui::Rect::from_min_size(min, egui::vec2(w as f32, h as f32) * zoom);
    let center = img_rect.center();
    // Screen y points down, so a positive angle turns clockwise.
    let rot = egui::emath::Rot2::from_angle((node.rotation as f32).to_radians());

    let mut mesh = egui::Mesh::with_texture(texture.id());
    mesh.add_rect_with_uv(
        img_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
    mesh.rotate(rot, center);
    painter.add(egui::Shape::mesh(mesh));

    if selected {
        let corners = [
            img_rect.left_top(),
            img_rect.right_top(),
            img_rect.right_bottom(),
            img_rect.left_bottom(),
        ]
        .map(|p| center + rot * (p - center));
        painter.add(egui::Shape::closed_line(
            corners.to_vec(),
            egui::Stroke::new(1.5, egui::Color32::YELLOW),
        ));
    }
}

fn draw_viewing_label(ui: &egui::Ui, rect: egui::Rect, label: &str) {
    if label.is_empty() {
        return;
    }
    let label_pos = rect.left_top() + egui::vec2(8.0, 8.0);
    ui.painter().text(
        label_pos,
        egui::Align2::LEFT_TOP,
        label,
        egui::FontId::proportional(14.0),
        egui::Color32::from_white_alpha(200),
    );
}

fn show_placeholder(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.label(
            egui::RichText::new("Open a scene or image to begin")
                .size(18.0)
                .color(egui::Color32::from_gray(100)),
        );
    });
}
