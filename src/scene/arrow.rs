//! Arrows: a tail point plus a component vector
//!
//! An arrow owns a shaft (line node) and a head (chevron group). The head is
//! always `tail + comp`; every update recomputes whichever of the three is
//! derived and moves the child nodes to match.

use glam::{DVec2, dvec2};

use super::node::{GroupShape, LineShape, Node};
use super::{Group, NodeId, Scene};
use crate::errors::SceneError;
use crate::render::defaults;
use crate::types::Angle;

/// Build a chevron whose tip sits at parent-frame pixel position `tip`,
/// pointing along the user-frame `direction`.
///
/// The barbs point along local +x from the chevron group's origin; `length`
/// and `half_width` are user units.
pub(crate) fn chevron(
    scene: &mut Scene,
    parent: NodeId,
    tip: DVec2,
    direction: Angle,
    length: f64,
    half_width: f64,
) -> NodeId {
    let units = *scene.units();
    let back = -units.to_pixel_abs(length);
    let side = units.to_pixel_abs(half_width);

    let mut group = Node::new(GroupShape.into(), tip);
    group.rotation = direction.flipped();
    let head = scene.push_child(parent, group);
    for barb in [dvec2(back, side), dvec2(back, -side)] {
        scene.push_child(head, Node::new(LineShape::new(barb, DVec2::ZERO).into(), DVec2::ZERO));
    }
    head
}

/// A vector drawn from `tail` along `comp`
#[derive(Debug, Clone, PartialEq)]
pub struct Arrow {
    group: Group,
    shaft: NodeId,
    head: NodeId,
    tail: DVec2,
    comp: DVec2,
}

impl Arrow {
    /// Build the arrow under the scene root.
    pub fn new(scene: &mut Scene, tail: DVec2, comp: DVec2) -> Self {
        let group = scene.make_group();
        let head_pos = tail + comp;

        let shaft_node = scene.line_node(tail, head_pos);
        let shaft = scene.push_child(group.id(), shaft_node);
        let tip = scene.units().to_pixel(head_pos);
        let head = chevron(
            scene,
            group.id(),
            tip,
            Angle::of(comp),
            defaults::ARROWHEAD_LENGTH,
            defaults::ARROWHEAD_HALF_WIDTH,
        );

        crate::log::debug!(?tail, ?comp, "arrow created");
        Self { group, shaft, head, tail, comp }
    }

    pub fn group(&self) -> Group {
        self.group
    }

    pub fn id(&self) -> NodeId {
        self.group.id()
    }

    /// The shaft line node
    pub fn shaft(&self) -> NodeId {
        self.shaft
    }

    /// The arrowhead (chevron group) node
    pub fn arrowhead(&self) -> NodeId {
        self.head
    }

    pub fn tail(&self) -> DVec2 {
        self.tail
    }

    pub fn comp(&self) -> DVec2 {
        self.comp
    }

    pub fn head(&self) -> DVec2 {
        self.tail + self.comp
    }

    /// Direction of `comp`, counter-clockwise from +x in user space
    pub fn angle(&self) -> Angle {
        Angle::of(self.comp)
    }

    /// Move the head to `(x, y)`; the tail stays put.
    pub fn update_head(&mut self, scene: &mut Scene, x: f64, y: f64) -> Result<(), SceneError> {
        self.comp = dvec2(x, y) - self.tail;
        self.sync(scene)
    }

    /// Move the tail to `(x, y)` keeping `comp`; the head follows.
    pub fn update_tail(&mut self, scene: &mut Scene, x: f64, y: f64) -> Result<(), SceneError> {
        self.tail = dvec2(x, y);
        self.sync(scene)
    }

    /// Replace `comp` keeping the tail; the head follows.
    pub fn update_comp(&mut self, scene: &mut Scene, dx: f64, dy: f64) -> Result<(), SceneError> {
        self.comp = dvec2(dx, dy);
        self.sync(scene)
    }

    /// Translate the whole arrow by `(dx, dy)` user units.
    pub fn shift(&mut self, scene: &mut Scene, dx: f64, dy: f64) -> Result<(), SceneError> {
        let tail = self.tail + dvec2(dx, dy);
        self.update_tail(scene, tail.x, tail.y)
    }

    /// Stroke colour of shaft and head
    pub fn set_color(&self, scene: &mut Scene, color: &str) -> Result<(), SceneError> {
        scene.set_stroke(self.shaft, color)?;
        let barbs = scene.children(self.head)?.to_vec();
        for barb in barbs {
            scene.set_stroke(barb, color)?;
        }
        Ok(())
    }

    fn sync(&self, scene: &mut Scene) -> Result<(), SceneError> {
        let head = self.head();
        scene.set_tail(self.shaft, self.tail.x, self.tail.y)?;
        scene.set_head(self.shaft, head.x, head.y)?;
        scene.position(self.head, head.x, head.y)?;
        scene.set_rotation(self.head, self.angle())
    }
}
