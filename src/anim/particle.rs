//! Ready-made updatables

use glam::DVec2;

use super::Updatable;
use crate::errors::SceneError;
use crate::render::defaults;
use crate::scene::{NodeId, Scene};

/// A circle moving under constant acceleration.
///
/// Integrates with explicit Euler steps of `dt = t - last_t`, so a reversed
/// clock runs the motion backwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    node: NodeId,
    pub position: DVec2,
    pub velocity: DVec2,
    pub acceleration: DVec2,
    last_t: f64,
}

impl Particle {
    /// New circle node at `position`, starting from the scene's current time
    pub fn new(scene: &mut Scene, position: DVec2, velocity: DVec2, acceleration: DVec2) -> Self {
        let node = scene.make_circle(position.x, position.y, defaults::PARTICLE_RADIUS);
        Self::with_node(scene, node, position, velocity, acceleration)
    }

    /// Drive an existing node, starting from `position`
    pub fn with_node(
        scene: &Scene,
        node: NodeId,
        position: DVec2,
        velocity: DVec2,
        acceleration: DVec2,
    ) -> Self {
        Self {
            node,
            position,
            velocity,
            acceleration,
            last_t: scene.time(),
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn last_t(&self) -> f64 {
        self.last_t
    }
}

impl Updatable for Particle {
    fn update(&mut self, t: f64, scene: &mut Scene) -> Result<(), SceneError> {
        let dt = t - self.last_t;
        self.velocity += self.acceleration * dt;
        self.position += self.velocity * dt;
        self.last_t = t;
        scene.position(self.node, self.position.x, self.position.y)
    }
}

/// A node whose position is a closed-form function of time
pub struct Scripted<F> {
    node: NodeId,
    path: F,
}

impl<F: FnMut(f64) -> DVec2> Scripted<F> {
    pub fn new(node: NodeId, path: F) -> Self {
        Self { node, path }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }
}

impl<F: FnMut(f64) -> DVec2> Updatable for Scripted<F> {
    fn update(&mut self, t: f64, scene: &mut Scene) -> Result<(), SceneError> {
        let p = (self.path)(t);
        scene.position(self.node, p.x, p.y)
    }
}

/// Any closure over time and the scene
pub struct UpdateFn<F>(pub F);

impl<F> Updatable for UpdateFn<F>
where
    F: FnMut(f64, &mut Scene) -> Result<(), SceneError>,
{
    fn update(&mut self, t: f64, scene: &mut Scene) -> Result<(), SceneError> {
        (self.0)(t, scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::shared;
    use crate::scene::SceneConfig;
    use glam::dvec2;

    fn scene() -> Scene {
        Scene::new(SceneConfig::new().width(40.0)).unwrap()
    }

    #[test]
    fn euler_steps_follow_velocity() {
        let mut s = scene();
        let p = shared(Particle::new(&mut s, dvec2(-2.0, 0.0), dvec2(1.0, 0.5), DVec2::ZERO));
        s.add_to_update(&p);
        s.play();
        s.run(60).unwrap();

        let pos = p.borrow().position;
        assert!((pos - dvec2(-1.0, 0.5)).length() < 1e-9);
        let node = p.borrow().node();
        assert!((s.user_position(node).unwrap() - pos).length() < 1e-9);
    }

    #[test]
    fn acceleration_changes_velocity() {
        let mut s = scene();
        let p = shared(Particle::new(&mut s, DVec2::ZERO, DVec2::ZERO, dvec2(0.0, -10.0)));
        s.add_to_update(&p);
        s.play();
        s.run(30).unwrap();
        assert!((p.borrow().velocity.y + 5.0).abs() < 1e-9);
        assert!(p.borrow().position.y < 0.0);
    }

    #[test]
    fn reversed_clock_runs_backwards() {
        let mut s = scene();
        let p = shared(Particle::new(&mut s, DVec2::ZERO, dvec2(2.0, 0.0), DVec2::ZERO));
        s.add_to_update(&p);
        s.play();
        s.run(30).unwrap();
        s.set_time_scale(-1.0);
        s.run(30).unwrap();
        assert!(p.borrow().position.x.abs() < 1e-9);
    }

    #[test]
    fn scripted_follows_its_path() {
        let mut s = scene();
        let dot = s.make_circle(0.0, 0.0, 0.5);
        let script = shared(Scripted::new(dot, |t| dvec2(t, t * t)));
        s.add_to_update(&script);
        s.play();
        s.run(120).unwrap();
        assert_eq!(s.user_position(dot).unwrap(), dvec2(2.0, 4.0));
    }

    #[test]
    fn update_fn_sees_the_scene() {
        let mut s = scene();
        let line = s.make_line(0.0, 0.0, 1.0, 0.0);
        let f = shared(UpdateFn(move |t: f64, scene: &mut Scene| scene.set_head(line, 1.0, t)));
        s.add_to_update(&f);
        s.play();
        s.run(60).unwrap();
        let (_, head) = s.line_endpoints(line).unwrap();
        assert!((head - dvec2(1.0, 1.0)).length() < 1e-9);
    }
}
