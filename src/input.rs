//! Keyboard input shared between a listener thread and the frame loop
//!
//! The listener records presses and releases; the frame loop only takes
//! snapshot reads. Each shared structure has its own lock and no lock is
//! held across calls, so the frame loop never waits on the listener for
//! longer than one map or queue operation.

use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

/// A key the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    Space,
    Escape,
    /// Letter keys, always lowercase
    Char(char),
}

impl Key {
    pub const PAD_UP: Key = Key::Char('q');
    pub const PAD_DOWN: Key = Key::Char('a');
    pub const PAUSE: Key = Key::Space;
    pub const FULLSCREEN: Key = Key::Char('f');
    pub const RESTART: Key = Key::Char('r');

    pub fn char(c: char) -> Self {
        if c == ' ' {
            Key::Space
        } else {
            Key::Char(c.to_ascii_lowercase())
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Space => f.write_str("SPACE"),
            Key::Escape => f.write_str("ESC"),
            Key::Char(c) => write!(f, "{}", c.to_ascii_uppercase()),
        }
    }
}

/// What the scene reads from the keyboard each frame
pub trait InputSource {
    /// Next released key, oldest first
    fn pop_released(&self) -> Option<Key>;
    /// Whether `key` is held right now
    fn is_held(&self, key: Key) -> bool;
}

/// Cloneable handle to the shared keyboard state
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: Arc<Mutex<HashSet<Key>>>,
    released: Arc<Mutex<VecDeque<Key>>>,
}

/// A poisoned lock only means a listener panicked mid-insert; the set and
/// queue are still structurally valid.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key going down. Repeats of a held key are ignored.
    pub fn press(&self, key: Key) {
        lock(&self.held).insert(key);
    }

    /// Record a key going up. Only keys seen going down produce an event.
    pub fn release(&self, key: Key) {
        let was_held = lock(&self.held).remove(&key);
        if was_held {
            lock(&self.released).push_back(key);
        }
    }

    /// Press and release in one go
    pub fn tap(&self, key: Key) {
        self.press(key);
        self.release(key);
    }

    /// Snapshot of the held keys
    pub fn held_keys(&self) -> Vec<Key> {
        lock(&self.held).iter().copied().collect()
    }

    pub fn pending_releases(&self) -> usize {
        lock(&self.released).len()
    }
}

impl InputSource for KeyboardState {
    fn pop_released(&self) -> Option<Key> {
        lock(&self.released).pop_front()
    }

    fn is_held(&self, key: Key) -> bool {
        lock(&self.held).contains(&key)
    }
}
