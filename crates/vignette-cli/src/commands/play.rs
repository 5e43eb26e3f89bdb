use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use vignette_core::config::SceneConfig;
use vignette_core::source::ImageSource;
use vignette_core::{NodeCommand, RenderNode, Scene};

/// How long a single wait for the next timer event may block before the
/// spinner is refreshed.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Args)]
pub struct PlayArgs {
    /// Scene file (TOML)
    pub scene: PathBuf,

    /// Log every render-node call, not just visibility transitions
    #[arg(long)]
    pub nodes: bool,

    /// Give up after this many seconds
    #[arg(long)]
    pub timeout: Option<f64>,
}

/// Headless node that reports what a real renderer would be told.
struct LogNode {
    id: usize,
    enabled: bool,
}

impl LogNode {
    fn record(&self, cmd: NodeCommand) {
        if self.enabled {
            info!(image = self.id, "{cmd}");
        }
    }
}

impl RenderNode for LogNode {
    fn set_image(&mut self, source: &ImageSource) {
        self.record(NodeCommand::SetImage {
            path: source.path().to_path_buf(),
            width: source.width(),
            height: source.height(),
        });
    }

    fn set_position(&mut self, x: f64, y: f64) {
        self.record(NodeCommand::SetPosition { x, y });
    }

    fn set_size(&mut self, width: f64, height: f64) {
        self.record(NodeCommand::SetSize { width, height });
    }

    fn set_preserve_ratio(&mut self, preserve: bool) {
        self.record(NodeCommand::SetPreserveRatio(preserve));
    }

    fn set_rotation(&mut self, degrees: f64) {
        self.record(NodeCommand::SetRotation(degrees));
    }

    fn set_visible(&mut self, visible: bool) {
        self.record(NodeCommand::SetVisible(visible));
    }
}

pub fn run(args: &PlayArgs) -> Result<()> {
    let config = SceneConfig::load(&args.scene)?;

    let mut next_id = 0;
    let mut scene = Scene::from_config(&config, |_| {
        let node = LogNode {
            id: next_id,
            enabled: args.nodes,
        };
        next_id += 1;
        node
    })?;
    let start = Instant::now();
    let deadline = args.timeout.and_then(|secs| deadline_after(start, secs));

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner} {msg} [{elapsed}]")?);
    pb.set_message(format!("Playing {} ({} images)", scene.title(), scene.len()));

    let mut visible: Vec<bool> = scene.images().iter().map(|i| i.is_visible()).collect();
    print_state(&pb, start, &visible, None);

    loop {
        let applied = if scene.is_settled() {
            scene.tick()
        } else {
            scene.wait_tick(POLL_INTERVAL)
        };
        pb.tick();

        if applied > 0 {
            let now: Vec<bool> = scene.images().iter().map(|i| i.is_visible()).collect();
            print_state(&pb, start, &now, Some(visible.as_slice()));
            visible = now;
        }

        if scene.is_settled() && applied == 0 {
            break;
        }
        if deadline.is_some_and(|d| Instant::now() >= d) {
            pb.finish_and_clear();
            bail!("Scene still running after {:.1}s", start.elapsed().as_secs_f64());
        }
    }

    pb.finish_with_message(format!(
        "Scene settled after {:.3}s",
        start.elapsed().as_secs_f64()
    ));
    Ok(())
}

/// Deadline `secs` after `start`. Negative and NaN count as zero. `None` when
/// the timeout is too large to represent, which means no deadline.
fn deadline_after(start: Instant, secs: f64) -> Option<Instant> {
    let timeout = Duration::try_from_secs_f64(secs.max(0.0)).ok()?;
    start.checked_add(timeout)
}

/// Print one line per image whose visibility differs from `previous`, or
/// every image when there is no previous state.
fn print_state(pb: &ProgressBar, start: Instant, now: &[bool], previous: Option<&[bool]>) {
    let lines = transition_lines(start.elapsed().as_secs_f64(), now, previous);
    for line in lines {
        // A hidden bar (output not a terminal) swallows `println`.
        if pb.is_hidden() {
            println!("{line}");
        } else {
            pb.println(line);
        }
    }
}

fn transition_lines(t: f64, now: &[bool], previous: Option<&[bool]>) -> Vec<String> {
    now.iter()
        .enumerate()
        .filter(|&(id, vis)| !previous.is_some_and(|prev| prev.get(id) == Some(vis)))
        .map(|(id, &vis)| {
            let state = if vis { "visible" } else { "hidden" };
            format!("{t:>8.3}s  #{id:<3} {state}")
        })
        .collect()
}
