//! Building blocks for physics-teaching animations.
//!
//! A [`Scene`] maps a user coordinate system (any origin, any scale, y up)
//! onto a pixel canvas (y down) through [`Units`]. Shapes, axes, arrows and
//! groups are built in user units through the scene's factory methods, and
//! objects implementing [`Updatable`] are driven by the scene's frame clock.
//!
//! ```
//! use glam::dvec2;
//! use phy::{Particle, Scene, SceneConfig, AxisSpec, shared};
//!
//! let mut scene = Scene::new(SceneConfig::new().width(20.0))?;
//! scene.make_x_axis(AxisSpec::new(-8.0, 8.0).step(2.0))?.suppress_zero(&mut scene)?;
//!
//! let ball = shared(Particle::new(&mut scene, dvec2(-5.0, 0.0), dvec2(1.0, 0.0), dvec2(0.0, 0.0)));
//! scene.add_to_update(&ball);
//! scene.play();
//! scene.run(60)?;
//!
//! assert!((ball.borrow().position.x + 4.0).abs() < 1e-9);
//! let svg = scene.to_svg()?;
//! assert!(svg.starts_with("<svg"));
//! # Ok::<(), phy::SceneError>(())
//! ```

pub mod anim;
pub mod errors;
pub mod log;
pub mod render;
pub mod scene;
pub mod types;
pub mod units;

pub use anim::{
    Clock, Command, Key, KeyBindings, KeyEvent, KeyOutcome, KeyboardControl, Particle, Scripted,
    UpdateFn, Updatable, shared,
};
pub use errors::{ConfigError, SceneError};
pub use render::RendererKind;
pub use scene::{Arrow, Axis, AxisSpec, Group, NodeId, Orientation, Scene, SceneConfig};
pub use types::{Angle, NumericError};
pub use units::{AxisUnits, Dimensions, Extent, Units};
