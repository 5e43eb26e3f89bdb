use vignette_core::DisplayedImage;

use crate::app::VignetteApp;
use crate::node::EguiNode;
use crate::panels::section_header;

const LEFT_PANEL_WIDTH: f32 = 260.0;

pub fn show(ctx: &egui::Context, app: &mut VignetteApp) {
    egui::SidePanel::left("controls")
        .default_width(LEFT_PANEL_WIDTH)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_min_width(LEFT_PANEL_WIDTH - 20.0);

                images_section(ui, app);
                ui.separator();
                selected_section(ui, app);
            });
        });
}

fn images_section(ui: &mut egui::Ui, app: &mut VignetteApp) {
    let Some(scene) = app.scene.as_ref() else {
        section_header(ui, "Images", None);
        ui.label("Open a scene or image file.");
        return;
    };
    section_header(ui, "Images", Some(&format!("{}", scene.len())));
    ui.add_space(4.0);

    let mut clicked = None;
    for (id, image) in scene.images().iter().enumerate() {
        let name = image
            .source()
            .path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let marker = if image.is_visible() { "\u{25CF}" } else { "\u{25CB}" };
        let selected = app.selected == Some(id);
        if ui
            .selectable_label(selected, format!("{marker} #{id} {name}"))
            .clicked()
        {
            clicked = Some(id);
        }
    }
    if let Some(id) = clicked {
        app.selected = Some(id);
        app.source_edit = scene
            .get(id)
            .map(|i| i.source().path().display().to_string())
            .unwrap_or_default();
    }
}

fn selected_section(ui: &mut egui::Ui, app: &mut VignetteApp) {
    let Some(id) = app.selected else {
        return;
    };
    let Some(image) = app.scene.as_mut().and_then(|s| s.get_mut(id).ok()) else {
        return;
    };

    section_header(ui, &format!("Image #{id}"), None);
    ui.add_space(4.0);
    ui.small(format!(
        "Source {}x{}",
        image.source_width(),
        image.source_height()
    ));

    transform_controls(ui, image);
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        if ui.button("Show").clicked() {
            image.show();
        }
        if ui.button("Hide").clicked() {
            image.hide();
        }
    });

    ui.add_space(4.0);
    ui.label("Source path");
    ui.text_edit_singleline(&mut app.source_edit);
    let mut message = None;
    if ui.button("Change source").clicked() {
        message = Some(match image.change_source(app.source_edit.trim()) {
            Ok(()) => format!("#{id} source changed to {}", app.source_edit.trim()),
            Err(e) => format!("ERROR: {e}"),
        });
    }

    let mut cancelled = false;
    if ui.button("Cancel schedule").clicked() {
        cancelled = true;
    }

    if let Some(message) = message {
        app.add_log(message);
    }
    if cancelled {
        if let Some(scene) = app.scene.as_mut() {
            match scene.cancel_schedule(id) {
                Ok(true) => app.add_log(format!("#{id} schedule cancelled")),
                Ok(false) => app.add_log(format!("#{id} has no schedule")),
                Err(e) => app.add_log(format!("ERROR: {e}")),
            }
        }
    }
}

fn transform_controls(ui: &mut egui::Ui, image: &mut DisplayedImage<EguiNode>) {
    egui::Grid::new("transform_grid")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            let mut x = image.x();
            ui.label("X");
            if ui.add(egui::DragValue::new(&mut x).speed(1.0)).changed() {
                image.change_x(x);
            }
            ui.end_row();

            let mut y = image.y();
            ui.label("Y");
            if ui.add(egui::DragValue::new(&mut y).speed(1.0)).changed() {
                image.change_y(y);
            }
            ui.end_row();

            let mut scale = image.scale();
            ui.label("Scale");
            if ui
                .add(egui::DragValue::new(&mut scale).speed(0.01).range(0.0..=20.0))
                .changed()
            {
                image.change_scale(scale);
            }
            ui.end_row();

            let mut width = image.view_width();
            ui.label("Width");
            if ui.add(egui::DragValue::new(&mut width).speed(1.0)).changed() {
                image.change_width(width);
            }
            ui.end_row();

            let mut height = image.view_height();
            ui.label("Height");
            if ui.add(egui::DragValue::new(&mut height).speed(1.0)).changed() {
                image.change_height(height);
            }
            ui.end_row();

            let mut angle = image.angle();
            ui.label("Angle");
            if ui
                .add(egui::DragValue::new(&mut angle).speed(1.0).suffix("\u{00B0}"))
                .changed()
            {
                image.change_angle(angle);
            }
            ui.end_row();

            let mut preserve = image.preserve_ratio();
            ui.label("Ratio");
            ui.add_enabled(false, egui::Checkbox::new(&mut preserve, "preserved"));
            ui.end_row();
        });
}
