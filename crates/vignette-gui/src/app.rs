use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::{Context as _, Result};
use vignette_core::config::{ImageConfig, SceneConfig};
use vignette_core::source::ImageSource;
use vignette_core::Scene;

use crate::node::EguiNode;
use crate::panels;

const MAX_LOG_LINES: usize = 200;

/// Repaint interval while a visibility schedule is still running.
const TIMELINE_REPAINT: Duration = Duration::from_millis(16);

pub struct VignetteApp {
    /// Paths chosen in file dialogs, which run off the UI thread.
    pub picked_tx: mpsc::Sender<PathBuf>,
    picked_rx: mpsc::Receiver<PathBuf>,
    pub scene: Option<Scene<EguiNode>>,
    pub scene_path: Option<PathBuf>,
    pub started: Option<Instant>,
    pub selected: Option<usize>,
    /// Path typed into the "Change source" field for the selected image.
    pub source_edit: String,
    pub log: Vec<String>,
    pub show_about: bool,
}

impl VignetteApp {
    pub fn new(ctx: &egui::Context, initial: Option<PathBuf>) -> Self {
        let (picked_tx, picked_rx) = mpsc::channel();
        let mut app = Self {
            picked_tx,
            picked_rx,
            scene: None,
            scene_path: None,
            started: None,
            selected: None,
            source_edit: String::new(),
            log: Vec::new(),
            show_about: false,
        };
        if let Some(path) = initial {
            app.open(ctx, &path);
        }
        app
    }

    /// Load a scene file, or a single image as a one-image scene.
    pub fn open(&mut self, ctx: &egui::Context, path: &Path) {
        match load_scene(ctx, path) {
            Ok(scene) => {
                self.add_log(format!(
                    "Opened: {} ({} images, {}x{})",
                    path.display(),
                    scene.len(),
                    scene.width(),
                    scene.height()
                ));
                self.scene = Some(scene);
                self.scene_path = Some(path.to_path_buf());
                self.started = Some(Instant::now());
                self.selected = None;
            }
            Err(e) => {
                tracing::error!("Failed to open {}: {e:#}", path.display());
                self.add_log(format!("ERROR: {e:#}"));
            }
        }
    }

    /// Reopen the current scene from disk, restarting its timeline.
    pub fn reload(&mut self, ctx: &egui::Context) {
        if let Some(path) = self.scene_path.clone() {
            self.open(ctx, &path);
        }
    }

    pub fn add_log(&mut self, message: String) {
        self.log.push(message);
        if self.log.len() > MAX_LOG_LINES {
            let excess = self.log.len() - MAX_LOG_LINES;
            self.log.drain(..excess);
        }
    }

    /// Apply visibility changes fired since the last frame.
    fn poll_timeline(&mut self, ctx: &egui::Context) {
        let Some(scene) = self.scene.as_mut() else {
            return;
        };
        let applied = scene.tick();
        let settled = scene.is_settled();
        if applied > 0 {
            let elapsed = self.started.map_or(0.0, |t| t.elapsed().as_secs_f64());
            self.add_log(format!("{applied} visibility change(s) at {elapsed:.3}s"));
        }
        if !settled {
            ctx.request_repaint_after(TIMELINE_REPAINT);
        }
    }
}

fn load_scene(ctx: &egui::Context, path: &Path) -> Result<Scene<EguiNode>> {
    let is_scene = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("toml"));

    let config = if is_scene {
        SceneConfig::load(path)?
    } else {
        let source = ImageSource::load(path)?;
        SceneConfig {
            title: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            width: f64::from(source.width()),
            height: f64::from(source.height()),
            images: vec![ImageConfig::new(path)],
        }
    };

    let mut next_id = 0;
    Scene::from_config(&config, |_| {
        let node = EguiNode::new(ctx.clone(), next_id);
        next_id += 1;
        node
    })
    .with_context(|| format!("Failed to build scene from {}", path.display()))
}

impl eframe::App for VignetteApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        while let Ok(path) = self.picked_rx.try_recv() {
            self.open(ctx, &path);
        }
        self.poll_timeline(ctx);

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::controls::show(ctx, self);
        panels::viewport::show(ctx, self);

        if self.show_about {
            egui::Window::new("About Vignette")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Vignette");
                        ui.label("Timed image scenes");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }
}
