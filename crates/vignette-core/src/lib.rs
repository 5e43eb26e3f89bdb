pub mod config;
pub mod consts;
pub mod displayed;
pub mod error;
pub mod layout;
pub mod node;
pub mod scene;
pub mod schedule;
pub mod source;
pub mod timer;

pub use displayed::{DisplayedImage, ImageOptions};
pub use error::{Result, VignetteError};
pub use node::{NodeCommand, NullNode, RecordingNode, RenderNode};
pub use scene::Scene;
