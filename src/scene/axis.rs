//! Labelled axes
//!
//! An axis is a group holding one long line, an outward arrowhead at the
//! finish end, and a tick plus a numeric label for every step. The range
//! midpoint is drawn at the group origin, which starts at the scene root.
//!
//! Geometry is laid out in the group's local frame with the axis running
//! along local +x. A y-axis is the same layout with the group turned a
//! quarter turn counter-clockwise; its labels are turned back so they read
//! upright, and sit on the mirrored side so they end up left of the line.

use glam::{DVec2, dvec2};

use super::arrow::chevron;
use super::factory::pixel_line;
use super::node::{Node, TextShape};
use super::{Group, NodeId, Scene};
use crate::errors::SceneError;
use crate::render::defaults;
use crate::render::svg::fmt_num;
use crate::types::{Angle, NumericError, finite, positive};
use crate::units::AxisUnits;

/// Which way the axis runs on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Sign applied to perpendicular offsets in the local frame
    fn perp_sign(self) -> f64 {
        match self {
            Orientation::Horizontal => 1.0,
            Orientation::Vertical => -1.0,
        }
    }
}

/// Parameters of an axis, in user units.
///
/// `ppos` is the position across the axis: the y of an x-axis, the x of a
/// y-axis. `length` defaults to `finish - start`, one user unit per step
/// of 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisSpec {
    pub start: f64,
    pub finish: f64,
    pub step: f64,
    pub ppos: f64,
    pub length: Option<f64>,
    pub extension: f64,
}

impl AxisSpec {
    pub fn new(start: f64, finish: f64) -> Self {
        Self {
            start,
            finish,
            step: defaults::AXIS_STEP,
            ppos: 0.0,
            length: None,
            extension: defaults::AXIS_EXTENSION,
        }
    }

    pub fn step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub fn ppos(mut self, ppos: f64) -> Self {
        self.ppos = ppos;
        self
    }

    pub fn length(mut self, length: f64) -> Self {
        self.length = Some(length);
        self
    }

    pub fn extension(mut self, extension: f64) -> Self {
        self.extension = extension;
        self
    }

    /// Drawn length between the first and last tick positions
    pub fn drawn_length(&self) -> f64 {
        self.length.unwrap_or(self.finish - self.start)
    }

    /// User units per axis unit
    pub fn spacing(&self) -> f64 {
        self.drawn_length() / (self.finish - self.start)
    }

    /// Axis value drawn at the group origin
    pub fn center(&self) -> f64 {
        (self.start + self.finish) / 2.0
    }

    fn validate(&self) -> Result<(), SceneError> {
        let fields = [
            ("start", finite(self.start)),
            ("finish", finite(self.finish)),
            ("range", positive(self.finish - self.start)),
            ("step", positive(self.step)),
            ("length", positive(self.drawn_length())),
            ("ppos", finite(self.ppos)),
            ("extension", finite(self.extension)),
        ];
        for (field, checked) in fields {
            checked.map_err(|source| SceneError::Axis { field, source })?;
        }
        if (self.finish - self.start) / self.step > defaults::MAX_TICK_INTERVALS {
            return Err(SceneError::Axis {
                field: "step",
                source: NumericError::TooSmall,
            });
        }
        Ok(())
    }

    /// Tick values `start + i * step`, up to and including `finish` when it
    /// is reached within a small tolerance. Empty when the range does not
    /// split into at most `MAX_TICK_INTERVALS` steps.
    pub fn tick_values(&self) -> Vec<f64> {
        let count = ((self.finish - self.start) / self.step + defaults::TICK_EPSILON).floor();
        if !count.is_finite() || count < 0.0 || count > defaults::MAX_TICK_INTERVALS {
            return Vec::new();
        }
        (0..=count as usize)
            .map(|i| self.start + i as f64 * self.step)
            .collect()
    }

    fn is_zero(&self, value: f64) -> bool {
        value.abs() <= defaults::TICK_EPSILON * self.step
    }
}

/// The tick and label drawn at value 0
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZeroPair {
    pub tick: NodeId,
    pub label: NodeId,
}

/// A built axis
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    group: Group,
    orientation: Orientation,
    spec: AxisSpec,
    line: NodeId,
    arrowhead: NodeId,
    ticks: Vec<(f64, NodeId, NodeId)>,
    zero: Option<ZeroPair>,
    suppressed: bool,
}

/// Local pixel position of the user-unit point `along` the axis and `perp`
/// across it.
fn local(scene: &Scene, along: f64, perp: f64) -> DVec2 {
    let units = scene.units();
    dvec2(units.to_pixel_abs(along), -units.to_pixel_abs(perp))
}

impl Axis {
    fn build(scene: &mut Scene, spec: AxisSpec, orientation: Orientation) -> Result<Self, SceneError> {
        spec.validate()?;

        let group = scene.make_group();
        let sign = orientation.perp_sign();
        let perp = sign * spec.ppos;
        let label_perp = perp - sign * defaults::LABEL_GAP;
        let spacing = spec.spacing();
        let center = spec.center();
        let reach = spec.drawn_length() / 2.0 + spec.extension;

        let line_node = pixel_line(local(scene, -reach, perp), local(scene, reach, perp));
        let line = scene.push_child(group.id(), line_node);

        let tip = local(scene, reach, perp);
        let arrowhead = chevron(
            scene,
            group.id(),
            tip,
            Angle::ZERO,
            defaults::ARROWHEAD_LENGTH,
            defaults::ARROWHEAD_HALF_WIDTH,
        );

        let mut ticks = Vec::new();
        let mut zero = None;
        for value in spec.tick_values() {
            let along = (value - center) * spacing;
            let tick_node = pixel_line(
                local(scene, along, perp - defaults::TICK_HALF),
                local(scene, along, perp + defaults::TICK_HALF),
            );
            let tick = scene.push_child(group.id(), tick_node);

            let text = if spec.is_zero(value) { "0".to_string() } else { fmt_num(value) };
            let mut label_node = Node::new(TextShape::new(text).into(), local(scene, along, label_perp));
            if orientation == Orientation::Vertical {
                // undo the group's quarter turn
                label_node.rotation = Angle::QUARTER;
            }
            let label = scene.push_child(group.id(), label_node);

            if spec.is_zero(value) {
                zero = Some(ZeroPair { tick, label });
            }
            ticks.push((value, tick, label));
        }

        if orientation == Orientation::Vertical {
            scene.set_rotation(group.id(), Angle::QUARTER)?;
        }

        crate::log::debug!(
            ?orientation,
            start = spec.start,
            finish = spec.finish,
            step = spec.step,
            ticks = ticks.len(),
            has_zero = zero.is_some(),
            "axis built"
        );

        Ok(Self {
            group,
            orientation,
            spec,
            line,
            arrowhead,
            ticks,
            zero,
            suppressed: false,
        })
    }

    pub fn group(&self) -> Group {
        self.group
    }

    pub fn id(&self) -> NodeId {
        self.group.id()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn spec(&self) -> &AxisSpec {
        &self.spec
    }

    /// The main line
    pub fn line(&self) -> NodeId {
        self.line
    }

    pub fn arrowhead(&self) -> NodeId {
        self.arrowhead
    }

    /// `(value, tick, label)` for every tick, in increasing value
    pub fn ticks(&self) -> &[(f64, NodeId, NodeId)] {
        &self.ticks
    }

    /// The zero tick and label, if the range spans zero. Still reported
    /// while suppressed.
    pub fn zero(&self) -> Option<ZeroPair> {
        self.zero
    }

    pub fn is_zero_suppressed(&self) -> bool {
        self.suppressed
    }

    /// User units per axis unit
    pub fn spacing(&self) -> f64 {
        self.spec.spacing()
    }

    /// Converter from axis values to pixels along this axis, relative to the
    /// axis origin
    pub fn axis_units(&self, scene: &Scene) -> AxisUnits {
        let length = scene.units().to_pixel_abs(self.spec.drawn_length());
        AxisUnits::new(self.spec.start, self.spec.finish, length)
    }

    /// Detach the zero tick and label. No-op without a zero pair or when
    /// already suppressed. The axis only counts as suppressed if at least one
    /// of the pair was still a child of it. Returns the axis for chaining.
    pub fn suppress_zero(&mut self, scene: &mut Scene) -> Result<&mut Self, SceneError> {
        let Some(zero) = self.zero else {
            return Ok(self);
        };
        if self.suppressed {
            crate::log::debug!(axis = %self.id(), "zero already suppressed");
            return Ok(self);
        }
        let tick_removed = self.group.remove(scene, zero.tick)?;
        let label_removed = self.group.remove(scene, zero.label)?;
        self.suppressed = tick_removed || label_removed;
        if !self.suppressed {
            crate::log::warn!(axis = %self.id(), "zero pair no longer belongs to the axis");
        }
        Ok(self)
    }

    /// Reattach a suppressed zero pair. No-op otherwise.
    pub fn restore_zero(&mut self, scene: &mut Scene) -> Result<&mut Self, SceneError> {
        let Some(zero) = self.zero else {
            return Ok(self);
        };
        if !self.suppressed {
            return Ok(self);
        }
        self.group.add(scene, zero.tick)?;
        self.group.add(scene, zero.label)?;
        self.suppressed = false;
        Ok(self)
    }

    pub fn xshift(&self, scene: &mut Scene, dx: f64) -> Result<(), SceneError> {
        self.group.xshift(scene, dx)
    }

    pub fn yshift(&self, scene: &mut Scene, dy: f64) -> Result<(), SceneError> {
        self.group.yshift(scene, dy)
    }

    pub fn shift(&self, scene: &mut Scene, dx: f64, dy: f64) -> Result<(), SceneError> {
        self.group.shift(scene, dx, dy)
    }
}

impl Scene {
    /// Horizontal axis labelled `spec.start..=spec.finish`
    pub fn make_x_axis(&mut self, spec: AxisSpec) -> Result<Axis, SceneError> {
        Axis::build(self, spec, Orientation::Horizontal)
    }

    /// Vertical axis labelled `spec.start..=spec.finish`, increasing upward
    pub fn make_y_axis(&mut self, spec: AxisSpec) -> Result<Axis, SceneError> {
        Axis::build(self, spec, Orientation::Vertical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{NodeKind, SceneConfig};

    fn scene() -> Scene {
        Scene::new(SceneConfig::new().width(20.0)).unwrap()
    }

    fn close(a: DVec2, b: DVec2) -> bool {
        (a - b).length() < 1e-9
    }

    fn label(scene: &Scene, id: NodeId) -> String {
        match scene.kind(id).unwrap() {
            NodeKind::Text(t) => t.value.clone(),
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn range_through_zero_has_zero_pair() {
        let mut s = scene();
        let axis = s.make_x_axis(AxisSpec::new(-5.0, 5.0)).unwrap();
        assert_eq!(axis.ticks().len(), 11);
        let zero = axis.zero().unwrap();
        assert_eq!(label(&s, zero.label), "0");
        assert!(close(s.user_position(zero.tick).unwrap(), dvec2(0.0, 0.0)));
    }

    #[test]
    fn positive_range_has_no_zero_pair() {
        let mut s = scene();
        let mut axis = s.make_x_axis(AxisSpec::new(1.0, 5.0)).unwrap();
        assert!(axis.zero().is_none());
        let before = s.children(axis.id()).unwrap().len();
        axis.suppress_zero(&mut s).unwrap();
        assert_eq!(s.children(axis.id()).unwrap().len(), before);
    }

    #[test]
    fn suppress_zero_twice_is_a_noop() {
        let mut s = scene();
        let mut axis = s.make_x_axis(AxisSpec::new(-5.0, 5.0)).unwrap();
        let zero = axis.zero().unwrap();
        let before = s.children(axis.id()).unwrap().len();

        axis.suppress_zero(&mut s).unwrap();
        assert!(!s.is_attached(zero.tick));
        assert!(!s.is_attached(zero.label));
        assert_eq!(s.children(axis.id()).unwrap().len(), before - 2);

        axis.suppress_zero(&mut s).unwrap();
        assert!(!s.is_attached(zero.tick));
        assert_eq!(s.children(axis.id()).unwrap().len(), before - 2);
        assert!(axis.is_zero_suppressed());
    }

    #[test]
    fn restore_zero_reattaches() {
        let mut s = scene();
        let mut axis = s.make_x_axis(AxisSpec::new(-2.0, 2.0)).unwrap();
        let zero = axis.zero().unwrap();
        axis.restore_zero(&mut s).unwrap();
        assert!(s.is_attached(zero.tick));

        axis.suppress_zero(&mut s).unwrap();
        axis.restore_zero(&mut s).unwrap();
        axis.restore_zero(&mut s).unwrap();
        assert!(s.is_attached(zero.tick));
        assert!(s.is_attached(zero.label));
        assert_eq!(
            s.children(axis.id()).unwrap().iter().filter(|&&c| c == zero.tick).count(),
            1
        );
    }

    #[test]
    fn final_tick_survives_fractional_steps() {
        let spec = AxisSpec::new(0.0, 1.0).step(0.1);
        let ticks = spec.tick_values();
        assert_eq!(ticks.len(), 11);
        assert!((ticks[10] - 1.0).abs() < 1e-12);

        let spec = AxisSpec::new(0.0, 1.0).step(0.3);
        assert_eq!(spec.tick_values().len(), 4);
    }

    #[test]
    fn labels_are_formatted_compactly() {
        let mut s = scene();
        let axis = s.make_x_axis(AxisSpec::new(0.0, 1.0).step(0.3)).unwrap();
        let labels: Vec<_> = axis.ticks().iter().map(|&(_, _, l)| label(&s, l)).collect();
        assert_eq!(labels, ["0", "0.3", "0.6", "0.9"]);
    }

    #[test]
    fn range_midpoint_is_drawn_at_origin() {
        let mut s = scene();
        let axis = s.make_x_axis(AxisSpec::new(0.0, 10.0).length(5.0).ppos(-2.0)).unwrap();
        assert_eq!(axis.spacing(), 0.5);
        let (_, tick, _) = axis.ticks()[10];
        assert!(close(s.user_position(tick).unwrap(), dvec2(2.5, -2.0)));
        let (_, first, _) = axis.ticks()[0];
        assert!(close(s.user_position(first).unwrap(), dvec2(-2.5, -2.0)));
    }

    #[test]
    fn x_axis_labels_sit_below() {
        let mut s = scene();
        let axis = s.make_x_axis(AxisSpec::new(-3.0, 3.0)).unwrap();
        let (_, _, label) = axis.ticks()[0];
        let pos = s.user_position(label).unwrap();
        assert!(close(pos, dvec2(-3.0, -defaults::LABEL_GAP)));
    }

    #[test]
    fn y_axis_is_turned_with_upright_labels_on_the_left() {
        let mut s = scene();
        let axis = s.make_y_axis(AxisSpec::new(-4.0, 4.0).ppos(1.0)).unwrap();
        assert_eq!(s.rotation(axis.id()).unwrap(), Angle::QUARTER);

        let (value, tick, label) = axis.ticks()[7];
        assert_eq!(value, 3.0);
        assert!(close(s.user_position(tick).unwrap(), dvec2(1.0, 3.0)));

        let label_pos = s.user_position(label).unwrap();
        assert!(close(label_pos, dvec2(1.0 - defaults::LABEL_GAP, 3.0)));

        // upright: the label's world frame is unrotated
        let world = s.world_transform(label).unwrap();
        assert!((world.matrix2.x_axis - DVec2::X).length() < 1e-12);
    }

    #[test]
    fn y_axis_arrowhead_points_up() {
        let mut s = scene();
        let axis = s.make_y_axis(AxisSpec::new(-4.0, 4.0)).unwrap();
        let tip = s.user_position(axis.arrowhead()).unwrap();
        assert!(close(tip, dvec2(0.0, 4.0 + defaults::AXIS_EXTENSION)));
    }

    #[test]
    fn shifts_move_the_whole_axis() {
        let mut s = scene();
        let axis = s.make_y_axis(AxisSpec::new(-1.0, 1.0)).unwrap();
        axis.shift(&mut s, 2.0, 1.0).unwrap();
        let zero = axis.zero().unwrap();
        assert!(close(s.user_position(zero.tick).unwrap(), dvec2(2.0, 1.0)));
    }

    #[test]
    fn axis_units_measure_along_the_axis() {
        let mut s = scene();
        let axis = s.make_x_axis(AxisSpec::new(0.0, 10.0)).unwrap();
        let au = axis.axis_units(&s);
        assert_eq!(au.spacing(), 32.0);
        assert_eq!(au.x(5.0), 0.0);
        assert_eq!(au.x(10.0), 160.0);
    }

    #[test]
    fn invalid_specs_are_rejected() {
        let mut s = scene();
        assert_eq!(
            s.make_x_axis(AxisSpec::new(5.0, 5.0)).unwrap_err(),
            SceneError::Axis { field: "range", source: NumericError::Zero }
        );
        assert_eq!(
            s.make_x_axis(AxisSpec::new(0.0, 5.0).step(-1.0)).unwrap_err(),
            SceneError::Axis { field: "step", source: NumericError::Negative }
        );
    }

    #[test]
    fn step_too_fine_for_the_range_is_rejected() {
        let mut s = scene();
        let before = s.len();
        for step in [1e-300, 1e-5] {
            assert_eq!(
                s.make_x_axis(AxisSpec::new(0.0, 1.0).step(step)).unwrap_err(),
                SceneError::Axis { field: "step", source: NumericError::TooSmall }
            );
        }
        assert_eq!(s.len(), before);
        assert!(AxisSpec::new(0.0, 1.0).step(1e-300).tick_values().is_empty());
    }

    #[test]
    fn step_at_the_tick_limit_is_accepted() {
        let mut s = scene();
        let axis = s.make_x_axis(AxisSpec::new(0.0, 10_000.0)).unwrap();
        assert_eq!(axis.ticks().len(), 10_001);
    }

    #[test]
    fn suppress_zero_ignores_a_reparented_pair() {
        let mut s = scene();
        let mut axis = s.make_x_axis(AxisSpec::new(-2.0, 2.0)).unwrap();
        let zero = axis.zero().unwrap();
        let elsewhere = s.make_group();
        elsewhere.add(&mut s, zero.tick).unwrap();
        elsewhere.add(&mut s, zero.label).unwrap();

        axis.suppress_zero(&mut s).unwrap();
        assert!(!axis.is_zero_suppressed());
        assert_eq!(s.children(elsewhere.id()).unwrap(), [zero.tick, zero.label]);

        axis.restore_zero(&mut s).unwrap();
        assert_eq!(s.children(elsewhere.id()).unwrap(), [zero.tick, zero.label]);
    }
}
