//! Small numeric primitives shared by the unit layer and the scene graph.
//!
//! - `NumericError` rejects sizes that would poison every later conversion
//! - `Angle` keeps radians and knows how to flip between the y-up user frame
//!   and the y-down pixel frame

use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::ops::{Add, Neg, Sub};

use glam::DVec2;
use miette::Diagnostic;
use thiserror::Error;

/// Error type for invalid numeric values
#[derive(Error, Diagnostic, Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    #[error("value is NaN")]
    #[diagnostic(code(phy::numeric::nan))]
    NaN,
    /// Value is infinite
    #[error("value is infinite")]
    #[diagnostic(code(phy::numeric::infinite))]
    Infinite,
    /// Value is zero when non-zero required
    #[error("value is zero")]
    #[diagnostic(code(phy::numeric::zero))]
    Zero,
    /// Value is negative when positive required
    #[error("value is negative")]
    #[diagnostic(code(phy::numeric::negative))]
    Negative,
    /// Value is positive but too small for the quantity it divides
    #[error("value is too small")]
    #[diagnostic(code(phy::numeric::too_small))]
    TooSmall,
}

/// Validate a strictly positive, finite value (sizes, scales, frame rates).
pub fn positive(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else if val == 0.0 {
        Err(NumericError::Zero)
    } else if val < 0.0 {
        Err(NumericError::Negative)
    } else {
        Ok(val)
    }
}

/// Validate a finite value of any sign (origins, offsets).
pub fn finite(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else {
        Ok(val)
    }
}

/// Angle in radians.
///
/// User-space angles are counter-clockwise (y-up). The rendering engine
/// rotates clockwise on screen (y-down), so a user angle `a` is a pixel
/// rotation of `-a`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Angle(pub f64);

impl Angle {
    pub const ZERO: Angle = Angle(0.0);
    pub const QUARTER: Angle = Angle(FRAC_PI_2);
    pub const HALF: Angle = Angle(PI);

    /// Direction angle of a vector, `atan2(v.y, v.x)`.
    #[inline]
    pub fn of(v: DVec2) -> Angle {
        Angle(v.y.atan2(v.x))
    }

    #[inline]
    pub fn from_degrees(deg: f64) -> Angle {
        Angle(deg.to_radians())
    }

    #[inline]
    pub fn radians(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn degrees(self) -> f64 {
        self.0.to_degrees()
    }

    /// Convert between the user frame and the pixel frame (the map is its own inverse).
    #[inline]
    pub fn flipped(self) -> Angle {
        Angle(-self.0)
    }
}

impl Add for Angle {
    type Output = Angle;
    fn add(self, rhs: Angle) -> Angle {
        Angle(self.0 + rhs.0)
    }
}

impl Sub for Angle {
    type Output = Angle;
    fn sub(self, rhs: Angle) -> Angle {
        Angle(self.0 - rhs.0)
    }
}

impl Neg for Angle {
    type Output = Angle;
    fn neg(self) -> Angle {
        Angle(-self.0)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}rad", self.0)
    }
}
