//! Per-tick input snapshot consumed by the dispatcher.
//!
//! The host samples its windowing backend once per frame and hands the
//! result to [`crate::InputDispatcher`]. Nothing here is persisted across
//! ticks; edge detection (press/release) is derived by the elements
//! themselves from consecutive snapshots.

use selene_core::Vec2;

/// A keyboard event delivered to the focused element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// A printable character.
    Char(char),
    /// Backspace: delete before the cursor.
    Backspace,
    /// Delete: remove at the cursor.
    Delete,
    /// Move the cursor left.
    Left,
    /// Move the cursor right.
    Right,
    /// Jump to the start of the buffer.
    Home,
    /// Jump to the end of the buffer.
    End,
    /// Submit the current buffer.
    Enter,
    /// Escape key.
    Escape,
    /// Tab key.
    Tab,
}

/// Transient input snapshot for one frame.
#[derive(Debug, Clone)]
pub struct FrameInput {
    /// Pointer position in viewport coordinates.
    pub pointer: Vec2,
    /// Primary button held this frame.
    pub pressed: bool,
    /// Vertical wheel delta this frame (positive = scroll up).
    pub wheel: f32,
    /// Key events delivered this frame, in arrival order.
    pub keys: Vec<KeyEvent>,
    /// Seconds since the previous frame.
    pub dt: f32,
}

impl FrameInput {
    /// Creates an idle snapshot: pointer at the origin, nothing pressed.
    #[must_use]
    pub fn new(dt: f32) -> Self {
        Self {
            pointer: Vec2::ZERO,
            pressed: false,
            wheel: 0.0,
            keys: Vec::new(),
            dt,
        }
    }

    /// Sets the pointer sample.
    #[must_use]
    pub fn with_pointer(mut self, pointer: impl Into<Vec2>, pressed: bool) -> Self {
        self.pointer = pointer.into();
        self.pressed = pressed;
        self
    }

    /// Sets the wheel delta.
    #[must_use]
    pub fn with_wheel(mut self, delta: f32) -> Self {
        self.wheel = delta;
        self
    }

    /// Appends a key event.
    #[must_use]
    pub fn with_key(mut self, key: KeyEvent) -> Self {
        self.keys.push(key);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_accumulates_keys() {
        let input = FrameInput::new(0.016)
            .with_pointer((10.0, 20.0), true)
            .with_key(KeyEvent::Char('a'))
            .with_key(KeyEvent::Enter);

        assert_eq!(input.pointer, Vec2::new(10.0, 20.0));
        assert!(input.pressed);
        assert_eq!(input.keys, vec![KeyEvent::Char('a'), KeyEvent::Enter]);
    }
}
