//! Default sizes and settings
//!
//! Canvas and clock defaults are in pixels / frames. Decoration sizes (ticks,
//! arrowheads, label gaps) are in user units so they scale with the scene.

pub const SCENE_WIDTH: f64 = 640.0;
pub const SCENE_HEIGHT: f64 = 480.0;
pub const USER_WIDTH: f64 = 20.0;
pub const FPS: f64 = 60.0;

pub const AXIS_STEP: f64 = 1.0;
pub const AXIS_EXTENSION: f64 = 0.5;
pub const TICK_HALF: f64 = 0.2;
pub const LABEL_GAP: f64 = 0.5;

pub const ARROWHEAD_LENGTH: f64 = 0.3;
pub const ARROWHEAD_HALF_WIDTH: f64 = 0.2;

pub const PARTICLE_RADIUS: f64 = 0.25;

/// Tolerance, relative to the step, when counting axis ticks.
pub const TICK_EPSILON: f64 = 1e-9;
/// Most steps an axis range may be split into.
pub const MAX_TICK_INTERVALS: f64 = 10_000.0;

pub const STROKE: &str = "black";
pub const FILL: &str = "none";
pub const TEXT_FILL: &str = "black";
pub const STROKE_WIDTH: f64 = 1.0;
pub const FONT_SIZE: f64 = 13.0;
