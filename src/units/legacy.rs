//! Older, narrower converters.
//!
//! `Dimensions` measures positions as a percentage of the canvas.
//! `AxisUnits` measures them in the tick values of a drawn axis. Both
//! produce root-relative pixels, y flipped, like [`Units`](super::Units).

/// Percentage-of-canvas coordinates: `x(100)` is one full canvas width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    width: f64,
    height: f64,
}

impl Dimensions {
    /// `width`/`height` are the canvas size in pixels.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// x-position in percent of the canvas width → pixels.
    pub fn x(&self, percent: f64) -> f64 {
        percent * self.width / 100.0
    }

    /// y-position in percent of the canvas height → pixels (positive is up).
    pub fn y(&self, percent: f64) -> f64 {
        -percent * self.height / 100.0
    }

    /// Pixels → percent of width. Inverse of [`x`](Self::x).
    pub fn inv_x(&self, px: f64) -> f64 {
        px * 100.0 / self.width
    }

    /// Pixels → percent of height. Inverts the magnitude of [`y`](Self::y);
    /// the sign is not flipped back.
    pub fn inv_y(&self, px: f64) -> f64 {
        px * 100.0 / self.height
    }
}

/// Coordinates measured in the tick values of an axis.
///
/// An axis labelled `start..=finish` drawn `length` pixels long places value
/// `v` at `(v - center) * spacing` along itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisUnits {
    spacing: f64,
    center: f64,
}

impl AxisUnits {
    pub fn new(start: f64, finish: f64, length: f64) -> Self {
        Self {
            spacing: length / (finish - start),
            center: (start + finish) / 2.0,
        }
    }

    /// Pixels per axis unit
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Axis value drawn at the middle of the axis
    pub fn center(&self) -> f64 {
        self.center
    }

    /// Axis value → pixel x-position along a horizontal axis.
    pub fn x(&self, v: f64) -> f64 {
        (v - self.center) * self.spacing
    }

    /// Axis value → pixel y-position along a vertical axis (positive is up).
    pub fn y(&self, v: f64) -> f64 {
        -(v - self.center) * self.spacing
    }

    /// Axis-unit length → pixel length.
    pub fn abs(&self, d: f64) -> f64 {
        d * self.spacing
    }

    pub fn inv_x(&self, px: f64) -> f64 {
        px / self.spacing + self.center
    }

    pub fn inv_y(&self, px: f64) -> f64 {
        -px / self.spacing + self.center
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_percentages() {
        let d = Dimensions::new(800.0, 600.0);
        assert_eq!(d.x(50.0), 400.0);
        assert_eq!(d.x(-25.0), -200.0);
        assert_eq!(d.y(10.0), -60.0);
        assert_eq!(d.inv_x(d.x(37.0)), 37.0);
        assert_eq!(d.inv_y(60.0), 10.0);
    }

    #[test]
    fn axis_units_center_on_midpoint() {
        // -8..8 drawn 640px long: 40px per unit, 0 in the middle
        let a = AxisUnits::new(-8.0, 8.0, 640.0);
        assert_eq!(a.spacing(), 40.0);
        assert_eq!(a.center(), 0.0);
        assert_eq!(a.x(2.0), 80.0);
        assert_eq!(a.y(2.0), -80.0);
        assert_eq!(a.abs(0.5), 20.0);
    }

    #[test]
    fn axis_units_off_center_range() {
        let a = AxisUnits::new(0.0, 10.0, 100.0);
        assert_eq!(a.center(), 5.0);
        assert_eq!(a.x(0.0), -50.0);
        assert_eq!(a.inv_x(a.x(7.0)), 7.0);
        assert_eq!(a.inv_y(a.y(3.0)), 3.0);
    }
}
