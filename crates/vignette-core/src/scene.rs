use std::time::Duration;

use tracing::{info, warn};

use crate::config::{ImageConfig, SceneConfig};
use crate::displayed::DisplayedImage;
use crate::error::{Result, VignetteError};
use crate::node::RenderNode;
use crate::timer::{TimerEvent, TimerHandle, TimerService};

/// Images in paint order, plus the timer that drives their delayed
/// visibility.
///
/// The scene is owned by one thread. Fired visibility changes queue up in
/// the timer and are applied only when that thread calls [`tick`](Self::tick)
/// or [`wait_tick`](Self::wait_tick).
pub struct Scene<N: RenderNode> {
    title: String,
    width: f64,
    height: f64,
    images: Vec<DisplayedImage<N>>,
    handles: Vec<Option<TimerHandle>>,
    timer: TimerService,
}

impl<N: RenderNode> Scene<N> {
    pub fn new(title: impl Into<String>, width: f64, height: f64) -> Result<Self> {
        Ok(Self {
            title: title.into(),
            width,
            height,
            images: Vec::new(),
            handles: Vec::new(),
            timer: TimerService::spawn()?,
        })
    }

    /// Load every image of `config`. `make_node` supplies the render node for
    /// each entry. Fails on the first image that cannot be loaded.
    pub fn from_config<F>(config: &SceneConfig, mut make_node: F) -> Result<Self>
    where
        F: FnMut(&ImageConfig) -> N,
    {
        let mut scene = Self::new(config.title.clone(), config.width, config.height)?;
        for entry in &config.images {
            let image = DisplayedImage::with_options(&entry.source, entry.options(), make_node(entry))?;
            scene.add(image);
        }
        Ok(scene)
    }

    /// Append `image` on top and start its visibility schedule, if any.
    /// Returns the id used by `get`, `get_mut` and `cancel_schedule`.
    pub fn add(&mut self, mut image: DisplayedImage<N>) -> usize {
        let id = self.images.len();
        let handle = image.take_schedule().map(|schedule| {
            info!(
                image = id,
                path = %image.source().path().display(),
                changes = schedule.changes().len(),
                "Visibility schedule started"
            );
            self.timer.submit(id, &schedule)
        });
        self.images.push(image);
        self.handles.push(handle);
        id
    }

    /// Apply every visibility change that has fired so far. Returns how many
    /// were applied.
    pub fn tick(&mut self) -> usize {
        let events = self.timer.drain();
        events.iter().filter(|e| self.apply_event(e)).count()
    }

    /// Like `tick`, but first waits up to `timeout` for a change to fire.
    pub fn wait_tick(&mut self, timeout: Duration) -> usize {
        let Some(first) = self.timer.recv_timeout(timeout) else {
            return 0;
        };
        usize::from(self.apply_event(&first)) + self.tick()
    }

    fn apply_event(&mut self, event: &TimerEvent) -> bool {
        let cancelled = self
            .handles
            .get(event.target)
            .and_then(Option::as_ref)
            .is_some_and(TimerHandle::is_cancelled);
        if cancelled {
            return false;
        }
        let Some(image) = self.images.get_mut(event.target) else {
            warn!(image = event.target, "Timer event for unknown image");
            return false;
        };
        image.apply_visibility(&event.change);
        info!(
            image = event.target,
            visible = event.change.visible,
            "Scheduled visibility applied"
        );
        true
    }

    /// Stop the remaining scheduled changes of image `id`. Returns whether
    /// the image had a schedule.
    pub fn cancel_schedule(&mut self, id: usize) -> Result<bool> {
        let slot = self.handles.get(id).ok_or(VignetteError::UnknownImage(id))?;
        Ok(match slot {
            Some(handle) => {
                handle.cancel();
                true
            }
            None => false,
        })
    }

    /// True when no scheduled change is left to fire. Changes that fired but
    /// have not been applied yet still need a `tick`.
    pub fn is_settled(&self) -> bool {
        self.handles.iter().flatten().all(TimerHandle::is_finished)
    }

    pub fn get(&self, id: usize) -> Result<&DisplayedImage<N>> {
        self.images.get(id).ok_or(VignetteError::UnknownImage(id))
    }

    pub fn get_mut(&mut self, id: usize) -> Result<&mut DisplayedImage<N>> {
        self.images.get_mut(id).ok_or(VignetteError::UnknownImage(id))
    }

    pub fn images(&self) -> &[DisplayedImage<N>] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}
