use crate::app::VignetteApp;

pub fn show(ctx: &egui::Context, app: &mut VignetteApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Log area — fixed height for 4 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.log.is_empty() {
                    // Reserve space for 4 empty lines to prevent layout jump.
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.log {
                        ui.label(msg);
                    }
                }
            });

        ui.horizontal(|ui| {
            match app.scene.as_ref() {
                Some(scene) => {
                    ui.label(format!("{}x{}", scene.width(), scene.height()));
                    ui.separator();
                    let visible = scene.images().iter().filter(|i| i.is_visible()).count();
                    ui.label(format!("{visible}/{} visible", scene.len()));
                    ui.separator();
                    if scene.is_settled() {
                        ui.label("Timeline settled");
                    } else {
                        ui.label("Timeline running");
                    }
                    if let Some(started) = app.started {
                        ui.separator();
                        ui.label(format!("{:.1}s", started.elapsed().as_secs_f32()));
                    }
                }
                None => {
                    ui.label("No scene");
                }
            }
        });

        ui.add_space(2.0);
    });
}
