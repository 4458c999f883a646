//! Input state and the events scenes receive.
//!
//! The platform layer translates window events into two things:
//!
//! - **`InputState`**: level-triggered state (held keys, pointer position),
//!   queried by the loop and by widgets for hover.
//! - **`GameEvent`**: edge-triggered events queued for the frame and handed to
//!   `SceneManager::dispatch_event`. Timer expiries use the same queue, so a
//!   transition drops them like any other input.

use std::collections::HashSet;

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,
    F3,
    Digit1,
    Digit2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseBtn {
    Left,
    Right,
    Middle,
}

/// Identifier for a scheduled timer, see [`crate::timer::Timers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u32);

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    KeyPressed(Key),
    KeyReleased(Key),
    PointerMoved(Vec2),
    PointerPressed { button: MouseBtn, position: Vec2 },
    PointerReleased { button: MouseBtn, position: Vec2 },
    Timer(TimerId),
}

pub struct InputState {
    held: HashSet<Key>,
    mouse_held: HashSet<MouseBtn>,
    pub mouse_position: Vec2,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
            mouse_held: HashSet::new(),
            mouse_position: Vec2::ZERO,
        }
    }

    /// Record a key press. Returns the event to queue, or `None` for OS key
    /// repeat of a key that is already down.
    pub fn key_down(&mut self, key: Key) -> Option<GameEvent> {
        self.held
            .insert(key)
            .then_some(GameEvent::KeyPressed(key))
    }

    pub fn key_up(&mut self, key: Key) -> Option<GameEvent> {
        self.held
            .remove(&key)
            .then_some(GameEvent::KeyReleased(key))
    }

    pub fn mouse_down(&mut self, button: MouseBtn) -> Option<GameEvent> {
        self.mouse_held.insert(button).then_some(GameEvent::PointerPressed {
            button,
            position: self.mouse_position,
        })
    }

    pub fn mouse_up(&mut self, button: MouseBtn) -> Option<GameEvent> {
        self.mouse_held
            .remove(&button)
            .then_some(GameEvent::PointerReleased {
                button,
                position: self.mouse_position,
            })
    }

    pub fn mouse_moved(&mut self, position: Vec2) -> GameEvent {
        self.mouse_position = position;
        GameEvent::PointerMoved(position)
    }

    /// Forget every held key and button. Called when the window loses focus:
    /// releases that happen elsewhere (a modal file dialog, another app) never
    /// reach us, and a stale entry would swallow the next real press as repeat.
    pub fn release_all(&mut self) {
        if !self.held.is_empty() || !self.mouse_held.is_empty() {
            log::debug!(
                "Focus lost, releasing {} key(s) and {} button(s)",
                self.held.len(),
                self.mouse_held.len()
            );
        }
        self.held.clear();
        self.mouse_held.clear();
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn is_mouse_held(&self, button: MouseBtn) -> bool {
        self.mouse_held.contains(&button)
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
