//! Frame-driven animation
//!
//! A scene carries a [`Clock`] and a registry of [`Updatable`] objects.
//! Each [`Scene::tick`] applies queued keyboard commands, advances the clock
//! by `time_scale / fps` when playing, and calls every registered object's
//! `update` with the new time, in registration order.

pub mod keys;
pub mod particle;

pub use keys::{Command, Key, KeyBindings, KeyEvent, KeyOutcome, KeyboardControl};
pub use particle::{Particle, Scripted, UpdateFn};

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::errors::SceneError;
use crate::scene::Scene;

/// Something that moves with the clock
pub trait Updatable {
    /// Bring the object to time `t` (scene seconds).
    fn update(&mut self, t: f64, scene: &mut Scene) -> Result<(), SceneError>;
}

/// Shared handle type the registry holds
pub type SharedUpdatable = Rc<RefCell<dyn Updatable>>;

/// Wrap a value for registration with [`Scene::add_to_update`].
pub fn shared<T>(value: T) -> Rc<RefCell<T>> {
    Rc::new(RefCell::new(value))
}

// ============================================================================
// Clock
// ============================================================================

/// Scene time.
///
/// Time is kept as an anchor plus a count of steps taken at the current
/// time scale, so a whole second of ticks lands on an exact value. Changing
/// the time scale re-anchors.
#[derive(Clone, PartialEq)]
pub struct Clock {
    fps: f64,
    time_scale: f64,
    playing: bool,
    anchor: f64,
    steps: u64,
    frame: u64,
}

impl Clock {
    /// Paused at time 0 with a time scale of 1
    pub fn new(fps: f64) -> Self {
        Self {
            fps,
            time_scale: 1.0,
            playing: false,
            anchor: 0.0,
            steps: 0,
            frame: 0,
        }
    }

    pub fn time(&self) -> f64 {
        self.anchor + self.steps as f64 * self.time_scale / self.fps
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Ticks seen, playing or not
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn set_time_scale(&mut self, time_scale: f64) {
        self.anchor = self.time();
        self.steps = 0;
        self.time_scale = time_scale;
    }

    /// Jump to time `t` without touching the time scale or play state
    pub fn set_time(&mut self, t: f64) {
        self.anchor = t;
        self.steps = 0;
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    /// One frame: advance time if playing, count the frame either way.
    /// Returns whether time moved.
    pub fn advance(&mut self) -> bool {
        self.frame += 1;
        if self.playing {
            self.steps += 1;
        }
        self.playing
    }
}

impl fmt::Debug for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clock")
            .field("time", &self.time())
            .field("fps", &self.fps)
            .field("time_scale", &self.time_scale)
            .field("playing", &self.playing)
            .field("frame", &self.frame)
            .finish()
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Updatables in registration order, each at most once
#[derive(Default)]
pub struct Registry {
    items: Vec<SharedUpdatable>,
}

fn same_object(a: &SharedUpdatable, b: &SharedUpdatable) -> bool {
    // compare data pointers only; vtable pointers may differ per codegen unit
    std::ptr::eq(Rc::as_ptr(a) as *const (), Rc::as_ptr(b) as *const ())
}

impl Registry {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, item: &SharedUpdatable) -> bool {
        self.items.iter().any(|existing| same_object(existing, item))
    }

    /// Append `item` unless it is already registered
    pub fn add(&mut self, item: SharedUpdatable) -> bool {
        if self.contains(&item) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Unregister `item`; `false` if it was not registered
    pub fn remove(&mut self, item: &SharedUpdatable) -> bool {
        let before = self.items.len();
        self.items.retain(|existing| !same_object(existing, item));
        self.items.len() != before
    }

    /// Handles to iterate while the scene is borrowed mutably
    fn snapshot(&self) -> Vec<SharedUpdatable> {
        self.items.clone()
    }
}

// ============================================================================
// Scene driver
// ============================================================================

impl Scene {
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Current scene time in seconds
    pub fn time(&self) -> f64 {
        self.clock.time()
    }

    pub fn fps(&self) -> f64 {
        self.clock.fps()
    }

    pub fn time_scale(&self) -> f64 {
        self.clock.time_scale()
    }

    pub fn set_time_scale(&mut self, time_scale: f64) {
        crate::log::debug!(from = self.clock.time_scale(), to = time_scale, "time scale changed");
        self.clock.set_time_scale(time_scale);
    }

    pub fn set_time(&mut self, t: f64) {
        self.clock.set_time(t);
    }

    pub fn is_playing(&self) -> bool {
        self.clock.is_playing()
    }

    pub fn frame(&self) -> u64 {
        self.clock.frame()
    }

    pub fn play(&mut self) {
        crate::log::debug!(time = self.time(), "play");
        self.clock.set_playing(true);
    }

    pub fn pause(&mut self) {
        crate::log::debug!(time = self.time(), "pause");
        self.clock.set_playing(false);
    }

    pub fn toggle(&mut self) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    pub fn apply_command(&mut self, command: Command) {
        match command {
            Command::Play => self.play(),
            Command::Pause => self.pause(),
            Command::TogglePlay => self.toggle(),
            Command::ScaleSpeed(factor) => self.set_time_scale(self.time_scale() * factor),
            Command::Reverse => self.set_time_scale(-self.time_scale()),
        }
    }

    /// Register `item` for per-frame updates. Returns `false` (and changes
    /// nothing) if this same object is already registered.
    pub fn add_to_update<T: Updatable + 'static>(&mut self, item: &Rc<RefCell<T>>) -> bool {
        let item: SharedUpdatable = item.clone();
        self.add_shared(item)
    }

    /// [`add_to_update`](Self::add_to_update) for an already type-erased handle
    pub fn add_shared(&mut self, item: SharedUpdatable) -> bool {
        let added = self.registry.add(item);
        if added {
            crate::log::debug!(count = self.registry.len(), "updatable registered");
        } else {
            crate::log::debug!("updatable already registered; ignored");
        }
        added
    }

    pub fn remove_from_update<T: Updatable + 'static>(&mut self, item: &Rc<RefCell<T>>) -> bool {
        let item: SharedUpdatable = item.clone();
        self.registry.remove(&item)
    }

    pub fn updatable_count(&self) -> usize {
        self.registry.len()
    }

    /// Start handling keyboard time control for this scene
    pub fn setup_animation(&self) -> KeyboardControl {
        crate::log::debug!("keyboard control attached");
        KeyboardControl::new(self.command_sender())
    }

    /// [`setup_animation`](Self::setup_animation) with custom bindings
    pub fn setup_animation_with(&self, bindings: KeyBindings) -> KeyboardControl {
        KeyboardControl::with_bindings(self.command_sender(), bindings)
    }

    /// One frame.
    ///
    /// Queued commands are applied first, so the last key pressed before
    /// the tick wins. An updatable returning an error stops the tick; the
    /// remaining updatables are not called.
    pub fn tick(&mut self) -> Result<(), SceneError> {
        for command in self.pending_commands() {
            self.apply_command(command);
        }
        if !self.clock.advance() {
            return Ok(());
        }

        let t = self.time();
        for item in self.registry.snapshot() {
            item.borrow_mut().update(t, self)?;
        }
        Ok(())
    }

    /// Drive `frames` ticks
    pub fn run(&mut self, frames: u64) -> Result<(), SceneError> {
        for _ in 0..frames {
            self.tick()?;
        }
        Ok(())
    }
}
