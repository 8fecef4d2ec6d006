//! The scene context
//!
//! A [`Scene`] owns everything one animation needs: the coordinate system,
//! the node arena, the clock, the updatable registry and the command
//! channel. Every factory and builder call goes through it.
//!
//! - `config`: `SceneConfig` and its validation
//! - `node`: the node arena entries and primitives
//! - `factory`: `make_*` constructors and positioning
//! - `group`, `axis`, `arrow`: composite handles

pub mod arrow;
pub mod axis;
pub mod config;
pub mod factory;
pub mod group;
pub mod node;

pub use arrow::Arrow;
pub use axis::{Axis, AxisSpec, Orientation, ZeroPair};
pub use config::SceneConfig;
pub use group::Group;
pub use node::{
    CircleShape, GroupShape, LineShape, Node, NodeId, NodeKind, Primitive, RectShape, Style,
    TextShape,
};

use std::sync::mpsc::{Receiver, Sender, channel};

use glam::{DAffine2, DVec2, dvec2};

use crate::anim::{Clock, Command, Registry};
use crate::errors::SceneError;
use crate::render::{RendererKind, svg};
use crate::types::Angle;
use crate::units::Units;

/// One scene: coordinate system, scene graph and animation state
pub struct Scene {
    units: Units,
    renderer: RendererKind,
    nodes: Vec<Node>,
    root: NodeId,
    pub(crate) clock: Clock,
    pub(crate) registry: Registry,
    commands_tx: Sender<Command>,
    commands_rx: Receiver<Command>,
}

impl Scene {
    /// Validate the configuration and build an empty scene.
    pub fn new(config: SceneConfig) -> Result<Self, SceneError> {
        let units = config.units()?;
        let fps = config.checked_fps()?;
        let (commands_tx, commands_rx) = channel();

        crate::log::debug!(
            scene_width = units.pixel_width(),
            scene_height = units.pixel_height(),
            fps,
            renderer = %config.renderer,
            "scene created"
        );

        Ok(Self {
            units,
            renderer: config.renderer,
            nodes: vec![Node::new(GroupShape.into(), DVec2::ZERO)],
            root: NodeId(0),
            clock: Clock::new(fps),
            registry: Registry::default(),
            commands_tx,
            commands_rx,
        })
    }

    pub fn units(&self) -> &Units {
        &self.units
    }

    pub fn renderer(&self) -> RendererKind {
        self.renderer
    }

    /// The root group every new node is attached to
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Canvas-pixel position of the root (the canvas centre)
    pub fn root_offset(&self) -> DVec2 {
        dvec2(self.units.pixel_width() / 2.0, self.units.pixel_height() / 2.0)
    }

    /// Number of nodes created through this scene, attached or not. The
    /// root group is not counted.
    pub fn len(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// `true` until the first node is created
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub(crate) fn node_ref(&self, id: NodeId) -> Result<&Node, SceneError> {
        self.nodes.get(id.0).ok_or(SceneError::UnknownNode(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, SceneError> {
        self.nodes.get_mut(id.0).ok_or(SceneError::UnknownNode(id))
    }

    pub fn kind(&self, id: NodeId) -> Result<&NodeKind, SceneError> {
        Ok(&self.node_ref(id)?.kind)
    }

    pub fn children(&self, id: NodeId) -> Result<&[NodeId], SceneError> {
        Ok(self.node_ref(id)?.children())
    }

    /// Push a node under `parent`, which must be a group of this scene
    pub(crate) fn push_child(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = Some(parent);
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Insert a new node under `parent`, checking that it is a group
    pub fn insert(&mut self, parent: NodeId, node: Node) -> Result<NodeId, SceneError> {
        self.expect_group(parent)?;
        Ok(self.push_child(parent, node))
    }

    fn expect_group(&self, id: NodeId) -> Result<(), SceneError> {
        let kind = &self.node_ref(id)?.kind;
        if kind.is_group() {
            Ok(())
        } else {
            Err(SceneError::NotAGroup { id, kind: kind.kind_name() })
        }
    }

    /// Whether `ancestor` is `id` or one of its parents
    fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.nodes.get(current.0).and_then(|n| n.parent);
        }
        false
    }

    /// Whether the node is reachable from the root (and so gets drawn)
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.is_ancestor(self.root, id)
    }

    /// Move `child` under `parent`, detaching it from its current parent.
    /// Adding a node to the parent it already has is a no-op.
    pub fn add(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        self.expect_group(parent)?;
        let current = self.node_ref(child)?.parent;
        if current == Some(parent) {
            return Ok(());
        }
        if self.is_ancestor(child, parent) {
            return Err(SceneError::Cycle { parent, child });
        }
        if let Some(old) = current {
            self.nodes[old.0].children.retain(|&c| c != child);
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        Ok(())
    }

    /// Detach `child` from `parent`. Returns `false` (and changes nothing)
    /// if `child` is not currently a child of `parent`.
    pub fn remove(&mut self, parent: NodeId, child: NodeId) -> Result<bool, SceneError> {
        self.node_ref(parent)?;
        if self.node_ref(child)?.parent != Some(parent) {
            return Ok(false);
        }
        self.nodes[parent.0].children.retain(|&c| c != child);
        self.nodes[child.0].parent = None;
        Ok(true)
    }

    /// Transform from the node's local frame to the root-relative pixel frame
    pub fn world_transform(&self, id: NodeId) -> Result<DAffine2, SceneError> {
        let mut transform = DAffine2::IDENTITY;
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == self.root {
                break;
            }
            let node = self.node_ref(current)?;
            transform = node.local_transform() * transform;
            cursor = node.parent;
        }
        Ok(transform)
    }

    /// Root-relative pixel position of the node's origin
    pub fn world_translation(&self, id: NodeId) -> Result<DVec2, SceneError> {
        Ok(self.world_transform(id)?.translation)
    }

    /// User-unit position of the node's origin
    pub fn user_position(&self, id: NodeId) -> Result<DVec2, SceneError> {
        Ok(self.units.to_user(self.world_translation(id)?))
    }

    /// Set the node rotation from a user-frame (counter-clockwise) angle
    pub fn set_rotation(&mut self, id: NodeId, angle: Angle) -> Result<(), SceneError> {
        self.node_mut(id)?.rotation = angle.flipped();
        Ok(())
    }

    /// User-frame (counter-clockwise) rotation of the node
    pub fn rotation(&self, id: NodeId) -> Result<Angle, SceneError> {
        Ok(self.node_ref(id)?.rotation.flipped())
    }

    pub fn set_stroke(&mut self, id: NodeId, color: &str) -> Result<(), SceneError> {
        self.node_mut(id)?.style.stroke = color.to_string();
        Ok(())
    }

    pub fn set_fill(&mut self, id: NodeId, color: &str) -> Result<(), SceneError> {
        self.node_mut(id)?.style.fill = color.to_string();
        Ok(())
    }

    /// Stroke width in pixels
    pub fn set_line_width(&mut self, id: NodeId, width: f64) -> Result<(), SceneError> {
        self.node_mut(id)?.style.line_width = width;
        Ok(())
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> Result<(), SceneError> {
        self.node_mut(id)?.style.visible = visible;
        Ok(())
    }

    /// Font size in pixels. No-op for anything but text.
    pub fn set_font_size(&mut self, id: NodeId, size: f64) -> Result<(), SceneError> {
        if let NodeKind::Text(text) = &mut self.node_mut(id)?.kind {
            text.font_size = size;
        }
        Ok(())
    }

    /// Render the scene to an SVG document
    pub fn to_svg(&self) -> Result<String, SceneError> {
        match self.renderer {
            RendererKind::Svg => svg::render(self),
        }
    }

    /// Sender for feeding commands to this scene from input handlers
    pub fn command_sender(&self) -> Sender<Command> {
        self.commands_tx.clone()
    }

    pub(crate) fn pending_commands(&self) -> Vec<Command> {
        self.commands_rx.try_iter().collect()
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("units", &self.units)
            .field("renderer", &self.renderer)
            .field("nodes", &self.nodes.len())
            .field("clock", &self.clock)
            .field("updatables", &self.registry.len())
            .finish()
    }
}
