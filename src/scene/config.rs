//! Scene construction parameters

use glam::dvec2;

use crate::errors::ConfigError;
use crate::render::{RendererKind, defaults};
use crate::types::{finite, positive};
use crate::units::{Extent, Units};

/// Everything needed to build a [`Scene`](super::Scene).
///
/// `width` and `height` are in user units; at most one of them is used
/// (width wins). With neither set the scene is 20 user units wide.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// Canvas width in pixels
    pub scene_width: f64,
    /// Canvas height in pixels
    pub scene_height: f64,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub origin_x: f64,
    pub origin_y: f64,
    pub fps: f64,
    pub renderer: RendererKind,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            scene_width: defaults::SCENE_WIDTH,
            scene_height: defaults::SCENE_HEIGHT,
            width: None,
            height: None,
            origin_x: 0.0,
            origin_y: 0.0,
            fps: defaults::FPS,
            renderer: RendererKind::default(),
        }
    }
}

impl SceneConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scene_size(mut self, width: f64, height: f64) -> Self {
        self.scene_width = width;
        self.scene_height = height;
        self
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    pub fn origin(mut self, x: f64, y: f64) -> Self {
        self.origin_x = x;
        self.origin_y = y;
        self
    }

    pub fn fps(mut self, fps: f64) -> Self {
        self.fps = fps;
        self
    }

    /// Set the renderer by name, e.g. `"svg"`
    pub fn renderer(mut self, name: &str) -> Result<Self, ConfigError> {
        self.renderer = name.parse()?;
        Ok(self)
    }

    /// The authoritative user-unit dimension
    pub fn extent(&self) -> Extent {
        Extent::resolve(self.width, self.height)
    }

    /// Check every field and build the coordinate system.
    pub fn units(&self) -> Result<Units, ConfigError> {
        positive(self.scene_width).map_err(|source| ConfigError::SceneSize {
            dimension: "width",
            source,
        })?;
        positive(self.scene_height).map_err(|source| ConfigError::SceneSize {
            dimension: "height",
            source,
        })?;

        let extent = self.extent();
        let (dimension, value) = match extent {
            Extent::Width(w) => ("width", w),
            Extent::Height(h) => ("height", h),
        };
        positive(value).map_err(|source| ConfigError::Extent { dimension, source })?;

        finite(self.origin_x)
            .and_then(|_| finite(self.origin_y))
            .map_err(|source| ConfigError::Origin { source })?;

        // Every input was checked above, so this only fails on a derived
        // dimension overflowing.
        Units::new(
            extent,
            self.scene_width,
            self.scene_height,
            dvec2(self.origin_x, self.origin_y),
        )
        .map_err(|source| ConfigError::Extent { dimension, source })
    }

    pub fn checked_fps(&self) -> Result<f64, ConfigError> {
        positive(self.fps).map_err(|source| ConfigError::Fps { source })
    }
}
