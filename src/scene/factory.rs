//! Shape factory
//!
//! Every constructor takes user units, converts through the scene's
//! [`Units`](crate::units::Units), and attaches the new node to the root.

use glam::{DVec2, dvec2};

use super::node::{CircleShape, GroupShape, LineShape, Node, NodeKind, Primitive, RectShape, TextShape};
use super::{Arrow, Group, NodeId, Scene};
use crate::errors::SceneError;

/// Line node between two pixel positions, translated to their midpoint
pub(crate) fn pixel_line(tail: DVec2, head: DVec2) -> Node {
    let mid = (tail + head) / 2.0;
    Node::new(LineShape::new(tail - mid, head - mid).into(), mid)
}

impl Scene {
    /// Attach a freshly built node to the root
    fn attach(&mut self, kind: NodeKind, translation: DVec2) -> NodeId {
        let root = self.root();
        self.push_child(root, Node::new(kind, translation))
    }

    /// Rectangle centred on `(x, y)`
    pub fn make_rectangle(&mut self, x: f64, y: f64, width: f64, height: f64) -> NodeId {
        let units = *self.units();
        let shape = RectShape {
            width: units.to_pixel_abs(width),
            height: units.to_pixel_abs(height),
        };
        self.attach(shape.into(), units.to_pixel(dvec2(x, y)))
    }

    /// Circle centred on `(x, y)`
    pub fn make_circle(&mut self, x: f64, y: f64, radius: f64) -> NodeId {
        let units = *self.units();
        let shape = CircleShape { radius: units.to_pixel_abs(radius) };
        self.attach(shape.into(), units.to_pixel(dvec2(x, y)))
    }

    /// Text centred on `(x, y)`
    pub fn make_text(&mut self, value: impl Into<String>, x: f64, y: f64) -> NodeId {
        let units = *self.units();
        self.attach(TextShape::new(value).into(), units.to_pixel(dvec2(x, y)))
    }

    /// Line from `(x1, y1)` (tail) to `(x2, y2)` (head).
    ///
    /// The node sits at the midpoint; its endpoints are stored relative to it.
    pub fn make_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> NodeId {
        let node = self.line_node(dvec2(x1, y1), dvec2(x2, y2));
        let root = self.root();
        self.push_child(root, node)
    }

    /// Detached line node between two user positions, translated to the
    /// pixel midpoint
    pub(crate) fn line_node(&self, tail: DVec2, head: DVec2) -> Node {
        let units = self.units();
        pixel_line(units.to_pixel(tail), units.to_pixel(head))
    }

    /// Horizontal line of length `width` centred on `(x, y)`
    pub fn make_hline(&mut self, x: f64, y: f64, width: f64) -> NodeId {
        let half = width / 2.0;
        self.make_line(x - half, y, x + half, y)
    }

    /// Vertical line of length `height` centred on `(x, y)`
    pub fn make_vline(&mut self, x: f64, y: f64, height: f64) -> NodeId {
        let half = height / 2.0;
        self.make_line(x, y - half, x, y + half)
    }

    /// Empty group at the root origin
    pub fn make_group(&mut self) -> Group {
        Group::from_id(self.attach(GroupShape.into(), DVec2::ZERO))
    }

    /// Arrow from `tail` along `comp`
    pub fn make_arrow(&mut self, tail: DVec2, comp: DVec2) -> Arrow {
        Arrow::new(self, tail, comp)
    }

    /// Move a node so its origin sits at user position `(x, y)` within its
    /// parent's frame.
    pub fn position(&mut self, id: NodeId, x: f64, y: f64) -> Result<(), SceneError> {
        let px = self.units().to_pixel(dvec2(x, y));
        self.node_mut(id)?.translation = px;
        Ok(())
    }

    /// Move a line's head to user position `(x, y)` without moving the node.
    pub fn set_head(&mut self, id: NodeId, x: f64, y: f64) -> Result<(), SceneError> {
        let px = self.units().to_pixel(dvec2(x, y));
        let node = self.node_mut(id)?;
        let translation = node.translation;
        match &mut node.kind {
            NodeKind::Line(line) => {
                line.head = px - translation;
                Ok(())
            }
            other => Err(SceneError::NotALine { id, kind: other.kind_name() }),
        }
    }

    /// Move a line's tail to user position `(x, y)` without moving the node.
    pub fn set_tail(&mut self, id: NodeId, x: f64, y: f64) -> Result<(), SceneError> {
        let px = self.units().to_pixel(dvec2(x, y));
        let node = self.node_mut(id)?;
        let translation = node.translation;
        match &mut node.kind {
            NodeKind::Line(line) => {
                line.tail = px - translation;
                Ok(())
            }
            other => Err(SceneError::NotALine { id, kind: other.kind_name() }),
        }
    }

    /// User positions of a line's tail and head, relative to its parent
    pub fn line_endpoints(&self, id: NodeId) -> Result<(DVec2, DVec2), SceneError> {
        let node = self.node_ref(id)?;
        let line = node
            .kind
            .as_line()
            .ok_or(SceneError::NotALine { id, kind: node.kind.kind_name() })?;
        let units = self.units();
        Ok((
            units.to_user(node.translation + line.tail),
            units.to_user(node.translation + line.head),
        ))
    }
}
