use std::path::PathBuf;

use crate::source::ImageSource;

/// The display-side half of a `DisplayedImage`.
///
/// A host (GUI toolkit, game engine, headless recorder) implements this to
/// receive every property change as it happens. Calls are made synchronously
/// from the thread that owns the image. All methods have default no-op
/// implementations so hosts only override what they render.
pub trait RenderNode {
    /// A new decoded image replaces whatever was shown before.
    fn set_image(&mut self, _source: &ImageSource) {}

    /// Top-left anchor in scene coordinates.
    fn set_position(&mut self, _x: f64, _y: f64) {}

    /// Size of the box the image is displayed in.
    fn set_size(&mut self, _width: f64, _height: f64) {}

    /// Whether the image keeps its source proportions inside the size box.
    fn set_preserve_ratio(&mut self, _preserve: bool) {}

    /// Absolute clockwise rotation about the image center, in degrees.
    fn set_rotation(&mut self, _degrees: f64) {}

    fn set_visible(&mut self, _visible: bool) {}
}

impl<N: RenderNode + ?Sized> RenderNode for Box<N> {
    fn set_image(&mut self, source: &ImageSource) {
        (**self).set_image(source)
    }

    fn set_position(&mut self, x: f64, y: f64) {
        (**self).set_position(x, y)
    }

    fn set_size(&mut self, width: f64, height: f64) {
        (**self).set_size(width, height)
    }

    fn set_preserve_ratio(&mut self, preserve: bool) {
        (**self).set_preserve_ratio(preserve)
    }

    fn set_rotation(&mut self, degrees: f64) {
        (**self).set_rotation(degrees)
    }

    fn set_visible(&mut self, visible: bool) {
        (**self).set_visible(visible)
    }
}

/// Node that discards everything. Useful when only the model is needed.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullNode;

impl RenderNode for NullNode {}

/// One call received by a `RecordingNode`.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeCommand {
    SetImage {
        path: PathBuf,
        width: u32,
        height: u32,
    },
    SetPosition {
        x: f64,
        y: f64,
    },
    SetSize {
        width: f64,
        height: f64,
    },
    SetPreserveRatio(bool),
    SetRotation(f64),
    SetVisible(bool),
}

impl std::fmt::Display for NodeCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SetImage {
                path,
                width,
                height,
            } => write!(f, "image {} ({width}x{height})", path.display()),
            Self::SetPosition { x, y } => write!(f, "position ({x}, {y})"),
            Self::SetSize { width, height } => write!(f, "size {width}x{height}"),
            Self::SetPreserveRatio(p) => write!(f, "preserve ratio {p}"),
            Self::SetRotation(deg) => write!(f, "rotation {deg} deg"),
            Self::SetVisible(true) => write!(f, "show"),
            Self::SetVisible(false) => write!(f, "hide"),
        }
    }
}

/// Node that keeps a log of every call, in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingNode {
    commands: Vec<NodeCommand>,
}

impl RecordingNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[NodeCommand] {
        &self.commands
    }

    /// Hand back everything recorded so far and start a fresh log.
    pub fn take_commands(&mut self) -> Vec<NodeCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Visibility as last told to this node, if it was ever told.
    pub fn last_visible(&self) -> Option<bool> {
        self.commands.iter().rev().find_map(|c| match c {
            NodeCommand::SetVisible(v) => Some(*v),
            _ => None,
        })
    }
}

impl RenderNode for RecordingNode {
    fn set_image(&mut self, source: &ImageSource) {
        self.commands.push(NodeCommand::SetImage {
            path: source.path().to_path_buf(),
            width: source.width(),
            height: source.height(),
        });
    }

    fn set_position(&mut self, x: f64, y: f64) {
        self.commands.push(NodeCommand::SetPosition { x, y });
    }

    fn set_size(&mut self, width: f64, height: f64) {
        self.commands.push(NodeCommand::SetSize { width, height });
    }

    fn set_preserve_ratio(&mut self, preserve: bool) {
        self.commands.push(NodeCommand::SetPreserveRatio(preserve));
    }

    fn set_rotation(&mut self, degrees: f64) {
        self.commands.push(NodeCommand::SetRotation(degrees));
    }

    fn set_visible(&mut self, visible: bool) {
        self.commands.push(NodeCommand::SetVisible(visible));
    }
}
