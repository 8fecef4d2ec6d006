//! User-unit ↔ pixel conversion.
//!
//! User space is y-up with a caller-chosen scale and origin. Pixel space is
//! the rendering engine's: y-down, relative to the scene root (which the
//! engine places at the centre of the canvas). One user unit has the same
//! pixel length horizontally and vertically.

pub mod legacy;

pub use legacy::{AxisUnits, Dimensions};

use glam::{DVec2, dvec2};

use crate::render::defaults;
use crate::types::{NumericError, finite, positive};

/// Which user-unit dimension is authoritative.
///
/// The other one is derived from the canvas aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Extent {
    /// The canvas is this many user units wide
    Width(f64),
    /// The canvas is this many user units tall
    Height(f64),
}

impl Extent {
    /// Pick the authoritative dimension: width wins, then height, then the
    /// default width.
    pub fn resolve(width: Option<f64>, height: Option<f64>) -> Extent {
        match (width, height) {
            (Some(w), _) => Extent::Width(w),
            (None, Some(h)) => Extent::Height(h),
            (None, None) => Extent::Width(defaults::USER_WIDTH),
        }
    }
}

impl Default for Extent {
    fn default() -> Self {
        Extent::Width(defaults::USER_WIDTH)
    }
}

/// Coordinate system of a scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Units {
    pixel_width: f64,
    pixel_height: f64,
    width: f64,
    height: f64,
    pixels_per_unit: f64,
    origin_x: f64,
    origin_y: f64,
}

impl Units {
    /// Build a coordinate system for a `pixel_width × pixel_height` canvas.
    ///
    /// Sizes must be positive and finite, the origin finite.
    pub fn new(
        extent: Extent,
        pixel_width: f64,
        pixel_height: f64,
        origin: DVec2,
    ) -> Result<Self, NumericError> {
        let pixel_width = positive(pixel_width)?;
        let pixel_height = positive(pixel_height)?;
        let origin_x = finite(origin.x)?;
        let origin_y = finite(origin.y)?;

        let (width, height, pixels_per_unit) = match extent {
            Extent::Width(w) => {
                let w = positive(w)?;
                let ppu = pixel_width / w;
                (w, pixel_height / ppu, ppu)
            }
            Extent::Height(h) => {
                let h = positive(h)?;
                let ppu = pixel_height / h;
                (pixel_width / ppu, h, ppu)
            }
        };

        crate::log::debug!(
            width,
            height,
            pixels_per_unit,
            origin_x,
            origin_y,
            "units resolved"
        );

        Ok(Self {
            pixel_width,
            pixel_height,
            width,
            height,
            pixels_per_unit,
            origin_x,
            origin_y,
        })
    }

    /// Canvas width in pixels
    pub fn pixel_width(&self) -> f64 {
        self.pixel_width
    }

    /// Canvas height in pixels
    pub fn pixel_height(&self) -> f64 {
        self.pixel_height
    }

    /// Canvas width in user units
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Canvas height in user units
    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn pixels_per_unit(&self) -> f64 {
        self.pixels_per_unit
    }

    pub fn origin(&self) -> DVec2 {
        dvec2(self.origin_x, self.origin_y)
    }

    /// User x-position → pixel x-position.
    #[inline]
    pub fn to_pixel_x(&self, u: f64) -> f64 {
        (u + self.origin_x) * self.pixels_per_unit
    }

    /// User y-position → pixel y-position (sign flip for y-down).
    #[inline]
    pub fn to_pixel_y(&self, u: f64) -> f64 {
        -(u + self.origin_y) * self.pixels_per_unit
    }

    /// User length → pixel length. No origin shift: use for sizes only.
    #[inline]
    pub fn to_pixel_abs(&self, u: f64) -> f64 {
        u * self.pixels_per_unit
    }

    /// Pixel length → user length.
    #[inline]
    pub fn to_user_abs(&self, px: f64) -> f64 {
        px / self.pixels_per_unit
    }

    /// Pixel x-position → user x-position.
    #[inline]
    pub fn to_user_x(&self, px: f64) -> f64 {
        self.to_user_abs(px) - self.origin_x
    }

    /// Pixel y-position → user y-position.
    #[inline]
    pub fn to_user_y(&self, px: f64) -> f64 {
        -self.to_user_abs(px) - self.origin_y
    }

    pub fn to_pixel(&self, p: DVec2) -> DVec2 {
        dvec2(self.to_pixel_x(p.x), self.to_pixel_y(p.y))
    }

    pub fn to_user(&self, px: DVec2) -> DVec2 {
        dvec2(self.to_user_x(px.x), self.to_user_y(px.y))
    }

    /// User displacement → pixel displacement (scaled, y flipped, no origin).
    pub fn to_pixel_offset(&self, d: DVec2) -> DVec2 {
        dvec2(self.to_pixel_abs(d.x), -self.to_pixel_abs(d.y))
    }
}
