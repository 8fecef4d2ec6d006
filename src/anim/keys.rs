//! Keyboard time control
//!
//! Key presses are mapped to [`Command`]s and pushed onto the scene's
//! command channel; the scene applies them at the start of its next tick.

use std::collections::HashMap;
use std::fmt;
use std::sync::mpsc::Sender;

/// A discrete change to the animation clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Play,
    Pause,
    TogglePlay,
    /// Multiply the time scale by the factor
    ScaleSpeed(f64),
    /// Flip the sign of the time scale
    Reverse,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Play => write!(f, "play"),
            Command::Pause => write!(f, "pause"),
            Command::TogglePlay => write!(f, "toggle play"),
            Command::ScaleSpeed(factor) => write!(f, "scale speed by {factor}"),
            Command::Reverse => write!(f, "reverse"),
        }
    }
}

/// A key, independent of modifiers
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    Char(char),
    /// Anything else, by name (`"Escape"`, `"ArrowLeft"`, ...)
    Named(String),
}

impl Key {
    /// Parse a key name as hosts report it: `" "` or `"Space"` for the
    /// space bar, a single character, or any other name.
    pub fn parse(name: &str) -> Key {
        if name == " " || name.eq_ignore_ascii_case("space") {
            return Key::Space;
        }
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Key::Char(c),
            _ => Key::Named(name.to_string()),
        }
    }
}

/// One key press with its modifier state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl KeyEvent {
    /// A press with no modifiers held
    pub fn plain(key: Key) -> Self {
        Self { key, ctrl: false, alt: false, shift: false }
    }

    pub fn named(name: &str) -> Self {
        Self::plain(Key::parse(name))
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn has_modifiers(&self) -> bool {
        self.ctrl || self.alt || self.shift
    }
}

/// Key → command table
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBindings {
    map: HashMap<Key, Command>,
}

impl Default for KeyBindings {
    /// Space toggles, `f` doubles the speed, `s` halves it, `r` reverses.
    fn default() -> Self {
        let mut bindings = Self::empty();
        bindings.bind(Key::Space, Command::TogglePlay);
        bindings.bind(Key::Char('f'), Command::ScaleSpeed(2.0));
        bindings.bind(Key::Char('s'), Command::ScaleSpeed(0.5));
        bindings.bind(Key::Char('r'), Command::Reverse);
        bindings
    }
}

impl KeyBindings {
    pub fn empty() -> Self {
        Self { map: HashMap::new() }
    }

    /// Bind `key`, returning what it was bound to before
    pub fn bind(&mut self, key: Key, command: Command) -> Option<Command> {
        self.map.insert(key, command)
    }

    pub fn unbind(&mut self, key: &Key) -> Option<Command> {
        self.map.remove(key)
    }

    pub fn lookup(&self, key: &Key) -> Option<Command> {
        self.map.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// What the handler did with a key press
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyOutcome {
    /// Mapped and queued for the scene
    Consumed(Command),
    /// Not ours; the host should handle it
    PassThrough,
}

/// Keyboard handler bound to one scene's command channel
#[derive(Debug, Clone)]
pub struct KeyboardControl {
    bindings: KeyBindings,
    tx: Sender<Command>,
}

impl KeyboardControl {
    pub fn new(tx: Sender<Command>) -> Self {
        Self::with_bindings(tx, KeyBindings::default())
    }

    pub fn with_bindings(tx: Sender<Command>, bindings: KeyBindings) -> Self {
        Self { bindings, tx }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut KeyBindings {
        &mut self.bindings
    }

    /// Map a key press to a command and queue it.
    ///
    /// Presses with ctrl, alt or shift held are never consumed, so host
    /// shortcuts keep working.
    pub fn handle(&self, event: &KeyEvent) -> KeyOutcome {
        if event.has_modifiers() {
            return KeyOutcome::PassThrough;
        }
        let Some(command) = self.bindings.lookup(&event.key) else {
            return KeyOutcome::PassThrough;
        };
        match self.tx.send(command) {
            Ok(()) => {
                crate::log::trace!(%command, "key queued");
                KeyOutcome::Consumed(command)
            }
            Err(_) => {
                crate::log::warn!(%command, "scene dropped; key ignored");
                KeyOutcome::PassThrough
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::channel;

    #[test]
    fn parse_key_names() {
        assert_eq!(Key::parse(" "), Key::Space);
        assert_eq!(Key::parse("Space"), Key::Space);
        assert_eq!(Key::parse("f"), Key::Char('f'));
        assert_eq!(Key::parse("Escape"), Key::Named("Escape".into()));
    }

    #[test]
    fn default_bindings() {
        let b = KeyBindings::default();
        assert_eq!(b.len(), 4);
        assert_eq!(b.lookup(&Key::Space), Some(Command::TogglePlay));
        assert_eq!(b.lookup(&Key::Char('f')), Some(Command::ScaleSpeed(2.0)));
        assert_eq!(b.lookup(&Key::Char('s')), Some(Command::ScaleSpeed(0.5)));
        assert_eq!(b.lookup(&Key::Char('r')), Some(Command::Reverse));
        assert_eq!(b.lookup(&Key::Char('x')), None);
    }

    #[test]
    fn handled_keys_are_queued_in_order() {
        let (tx, rx) = channel();
        let control = KeyboardControl::new(tx);
        assert_eq!(
            control.handle(&KeyEvent::named(" ")),
            KeyOutcome::Consumed(Command::TogglePlay)
        );
        control.handle(&KeyEvent::named("r"));
        let queued: Vec<_> = rx.try_iter().collect();
        assert_eq!(queued, [Command::TogglePlay, Command::Reverse]);
    }

    #[test]
    fn modified_and_unknown_keys_pass_through() {
        let (tx, rx) = channel();
        let control = KeyboardControl::new(tx);
        assert_eq!(control.handle(&KeyEvent::named("f").with_ctrl()), KeyOutcome::PassThrough);
        assert_eq!(control.handle(&KeyEvent::named("s").with_alt()), KeyOutcome::PassThrough);
        assert_eq!(control.handle(&KeyEvent::named("r").with_shift()), KeyOutcome::PassThrough);
        assert_eq!(control.handle(&KeyEvent::named("q")), KeyOutcome::PassThrough);
        assert_eq!(rx.try_iter().count(), 0);
    }

    #[test]
    fn rebinding() {
        let (tx, rx) = channel();
        let mut control = KeyboardControl::new(tx);
        assert_eq!(
            control.bindings_mut().bind(Key::Char('p'), Command::Pause),
            None
        );
        control.bindings_mut().unbind(&Key::Space);
        assert_eq!(control.handle(&KeyEvent::named(" ")), KeyOutcome::PassThrough);
        assert_eq!(control.handle(&KeyEvent::named("p")), KeyOutcome::Consumed(Command::Pause));
        assert_eq!(rx.try_recv(), Ok(Command::Pause));
    }

    #[test]
    fn dropped_scene_passes_through() {
        let (tx, rx) = channel();
        drop(rx);
        let control = KeyboardControl::new(tx);
        assert_eq!(control.handle(&KeyEvent::named("f")), KeyOutcome::PassThrough);
    }
}
