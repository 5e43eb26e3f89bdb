use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{DEFAULT_ANGLE, DEFAULT_SCALE};
use crate::error::Result;
use crate::layout::fit_within;
use crate::node::{NullNode, RenderNode};
use crate::schedule::{VisibilityChange, VisibilitySchedule};
use crate::source::ImageSource;

/// Optional construction parameters. Anything left unset keeps the image at
/// its original size, unrotated, at the origin and visible immediately.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageOptions {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    /// Clockwise degrees about the image center.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
    /// Seconds before the image is first shown. The image starts hidden.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_show: Option<f64>,
    /// Seconds the image stays visible once shown. Ignored without
    /// `delay_show`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_hide: Option<f64>,
}

impl ImageOptions {
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_angle(mut self, degrees: f64) -> Self {
        self.angle = Some(degrees);
        self
    }

    pub fn show_after(mut self, seconds: f64) -> Self {
        self.delay_show = Some(seconds);
        self
    }

    pub fn hide_after(mut self, seconds: f64) -> Self {
        self.delay_hide = Some(seconds);
        self
    }
}

/// An image placed in a scene: positioned, sized, rotated and shown or
/// hidden, with every change forwarded to its render node as it happens.
///
/// Source dimensions come from the decoded file and only change through
/// [`change_source`](Self::change_source). View dimensions follow the last
/// of `change_scale`, `change_width` and `change_height`.
#[derive(Debug)]
pub struct DisplayedImage<N: RenderNode = NullNode> {
    source: ImageSource,
    source_width: f64,
    source_height: f64,
    view_width: f64,
    view_height: f64,
    x: f64,
    y: f64,
    scale: f64,
    angle: f64,
    preserve_ratio: bool,
    visible: bool,
    schedule: Option<VisibilitySchedule>,
    node: N,
}

impl<N: RenderNode> DisplayedImage<N> {
    /// Load `path` at its original size at the origin.
    pub fn open(path: impl AsRef<Path>, node: N) -> Result<Self> {
        Self::with_options(path, &ImageOptions::default(), node)
    }

    /// Load `path` and apply `options`.
    ///
    /// With a show delay the image starts hidden and carries a
    /// [`VisibilitySchedule`]; the host submits it to its timer (see
    /// [`take_schedule`](Self::take_schedule)). Construction itself never
    /// waits.
    pub fn with_options(path: impl AsRef<Path>, options: &ImageOptions, node: N) -> Result<Self> {
        let source = ImageSource::load(path)?;
        let source_width = f64::from(source.width());
        let source_height = f64::from(source.height());
        let scale = options.scale.unwrap_or(DEFAULT_SCALE);
        let schedule = VisibilitySchedule::from_delays(options.delay_show, options.delay_hide);

        let mut image = Self {
            source,
            source_width,
            source_height,
            view_width: source_width * scale,
            view_height: source_height * scale,
            x: options.x,
            y: options.y,
            scale,
            angle: options.angle.unwrap_or(DEFAULT_ANGLE),
            preserve_ratio: true,
            visible: schedule.is_none(),
            schedule,
            node,
        };
        image.sync_node();

        debug!(
            path = %image.source.path().display(),
            x = image.x,
            y = image.y,
            width = image.view_width,
            height = image.view_height,
            angle = image.angle,
            scheduled = image.schedule.is_some(),
            "Displayed image created"
        );
        Ok(image)
    }

    /// Push the complete current state to the node.
    fn sync_node(&mut self) {
        self.node.set_image(&self.source);
        self.node.set_position(self.x, self.y);
        self.node.set_size(self.view_width, self.view_height);
        self.node.set_preserve_ratio(self.preserve_ratio);
        self.node.set_rotation(self.angle);
        self.node.set_visible(self.visible);
    }

    /// Replace the displayed image with the file at `path`.
    ///
    /// The new file is fully decoded before anything is touched, so on error
    /// the image keeps showing the previous source. Only the source
    /// dimensions change; position, scale, angle and view size stay as they
    /// were even if the new image has different proportions.
    pub fn change_source(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let source = ImageSource::load(path)?;
        self.source_width = f64::from(source.width());
        self.source_height = f64::from(source.height());
        self.source = source;
        self.node.set_image(&self.source);

        debug!(
            path = %self.source.path().display(),
            width = self.source_width,
            height = self.source_height,
            "Image source replaced"
        );
        Ok(())
    }

    pub fn change_x(&mut self, x: f64) {
        self.x = x;
        self.node.set_position(self.x, self.y);
        debug!(x = self.x, y = self.y, "Position changed");
    }

    pub fn change_y(&mut self, y: f64) {
        self.y = y;
        self.node.set_position(self.x, self.y);
        debug!(x = self.x, y = self.y, "Position changed");
    }

    /// Size the view to `scale` times the source and preserve aspect ratio
    /// again.
    pub fn change_scale(&mut self, scale: f64) {
        self.scale = scale;
        self.view_width = self.source_width * scale;
        self.view_height = self.source_height * scale;
        self.preserve_ratio = true;
        self.node.set_size(self.view_width, self.view_height);
        self.node.set_preserve_ratio(true);
        debug!(
            scale,
            width = self.view_width,
            height = self.view_height,
            "Scale changed"
        );
    }

    /// Set the view width alone. Aspect ratio is no longer preserved.
    pub fn change_width(&mut self, width: f64) {
        self.view_width = width;
        self.preserve_ratio = false;
        self.node.set_size(self.view_width, self.view_height);
        self.node.set_preserve_ratio(false);
        debug!(width, height = self.view_height, "Width changed");
    }

    /// Set the view height alone. Aspect ratio is no longer preserved.
    pub fn change_height(&mut self, height: f64) {
        self.view_height = height;
        self.preserve_ratio = false;
        self.node.set_size(self.view_width, self.view_height);
        self.node.set_preserve_ratio(false);
        debug!(width = self.view_width, height, "Height changed");
    }

    /// Set the absolute clockwise rotation. Replaces, never accumulates.
    pub fn change_angle(&mut self, degrees: f64) {
        self.angle = degrees;
        self.node.set_rotation(self.angle);
        debug!(degrees, "Angle changed");
    }

    pub fn show(&mut self) {
        self.set_visible(true);
    }

    pub fn hide(&mut self) {
        self.set_visible(false);
    }

    /// Apply a change fired by the host timer.
    pub fn apply_visibility(&mut self, change: &VisibilityChange) {
        self.set_visible(change.visible);
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.node.set_visible(visible);
        debug!(visible, "Visibility changed");
    }

    pub fn source(&self) -> &ImageSource {
        &self.source
    }

    pub fn source_width(&self) -> f64 {
        self.source_width
    }

    pub fn source_height(&self) -> f64 {
        self.source_height
    }

    pub fn view_width(&self) -> f64 {
        self.view_width
    }

    pub fn view_height(&self) -> f64 {
        self.view_height
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn preserve_ratio(&self) -> bool {
        self.preserve_ratio
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Size the node will actually paint, after aspect-ratio fitting.
    pub fn paint_size(&self) -> [f64; 2] {
        fit_within(
            [self.source_width, self.source_height],
            [self.view_width, self.view_height],
            self.preserve_ratio,
        )
    }

    /// Schedule produced at construction that has not been taken yet.
    pub fn pending_schedule(&self) -> Option<&VisibilitySchedule> {
        self.schedule.as_ref()
    }

    /// Move the construction schedule out for submission to a timer.
    pub fn take_schedule(&mut self) -> Option<VisibilitySchedule> {
        self.schedule.take()
    }

    pub fn node(&self) -> &N {
        &self.node
    }

    pub fn node_mut(&mut self) -> &mut N {
        &mut self.node
    }
}
