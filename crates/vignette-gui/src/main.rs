mod app;
mod convert;
mod node;
mod panels;

use std::path::PathBuf;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let initial = std::env::args_os().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("Vignette"),
        ..Default::default()
    };

    eframe::run_native(
        "Vignette",
        options,
        Box::new(|cc| Ok(Box::new(app::VignetteApp::new(&cc.egui_ctx, initial)))),
    )
}
