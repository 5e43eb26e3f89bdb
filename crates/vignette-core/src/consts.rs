/// Scale applied when none is given: the image keeps its intrinsic size.
pub const DEFAULT_SCALE: f64 = 1.0;

/// Rotation applied when none is given, in degrees clockwise.
pub const DEFAULT_ANGLE: f64 = 0.0;

/// Delays are given in seconds and honoured to the millisecond.
pub const MILLIS_PER_SECOND: f64 = 1000.0;

/// Name of the background thread owned by `TimerService`.
pub const TIMER_THREAD_NAME: &str = "vignette-timer";

/// Default scene canvas size in logical points.
pub const DEFAULT_SCENE_WIDTH: f64 = 800.0;

/// Default scene canvas size in logical points.
pub const DEFAULT_SCENE_HEIGHT: f64 = 600.0;
