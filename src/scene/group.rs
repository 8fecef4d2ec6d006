//! Groups: containers with relative, user-unit shifts

use glam::DVec2;

use super::{NodeId, Primitive, Scene};
use crate::errors::SceneError;

/// Handle on a group node.
///
/// The handle is a plain id; all reads and writes go through the scene,
/// whose `Units` converts the shift amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Group {
    id: NodeId,
}

impl Group {
    pub(crate) fn from_id(id: NodeId) -> Self {
        Self { id }
    }

    /// Wrap an existing node, checking that it is a group.
    pub fn try_from_node(scene: &Scene, id: NodeId) -> Result<Self, SceneError> {
        let kind = scene.kind(id)?;
        if kind.is_group() {
            Ok(Self { id })
        } else {
            Err(SceneError::NotAGroup { id, kind: kind.kind_name() })
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Move `dx` user units to the right (relative).
    pub fn xshift(&self, scene: &mut Scene, dx: f64) -> Result<(), SceneError> {
        let px = scene.units().to_pixel_abs(dx);
        scene.node_mut(self.id)?.translation.x += px;
        Ok(())
    }

    /// Move `dy` user units up (relative).
    pub fn yshift(&self, scene: &mut Scene, dy: f64) -> Result<(), SceneError> {
        let px = scene.units().to_pixel_abs(dy);
        scene.node_mut(self.id)?.translation.y -= px;
        Ok(())
    }

    /// `xshift(dx)` then `yshift(dy)`
    pub fn shift(&self, scene: &mut Scene, dx: f64, dy: f64) -> Result<(), SceneError> {
        self.xshift(scene, dx)?;
        self.yshift(scene, dy)
    }

    /// Absolute user position of the group origin within its parent
    pub fn position(&self, scene: &mut Scene, x: f64, y: f64) -> Result<(), SceneError> {
        scene.position(self.id, x, y)
    }

    /// User position of the group origin
    pub fn origin(&self, scene: &Scene) -> Result<DVec2, SceneError> {
        scene.user_position(self.id)
    }

    /// Attach `child` to this group (detaching it from wherever it was)
    pub fn add(&self, scene: &mut Scene, child: NodeId) -> Result<(), SceneError> {
        scene.add(self.id, child)
    }

    /// Detach `child`; `false` if it was not a child of this group
    pub fn remove(&self, scene: &mut Scene, child: NodeId) -> Result<bool, SceneError> {
        scene.remove(self.id, child)
    }
}
