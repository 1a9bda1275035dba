//! # Free-Text Drag
//!
//! Positions a floating text block. A primary-button press opens a
//! [`DragSession`]; moves offset the block by the pointer delta since the
//! press; release closes the session. Arrow keys nudge by 1, or 10 with
//! Shift, whether or not a drag is in progress.
//!
//! The session is the only thing holding "global listeners". It is closed
//! through exactly one path ([`DragSession::release`]), reached from
//! pointer-up, from an external reposition, or from disposal.

use serde::{Deserialize, Serialize};

use super::{Key, KeyInput};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Which pointer button was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerInput {
    pub x: f64,
    pub y: f64,
    pub button: PointerButton,
}

impl PointerInput {
    pub fn primary(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            button: PointerButton::Primary,
        }
    }
}

/// One press-move-release gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    start_pointer: Position,
    start_position: Position,
    released: bool,
}

impl DragSession {
    fn begin(pointer: Position, position: Position) -> Self {
        Self {
            start_pointer: pointer,
            start_position: position,
            released: false,
        }
    }

    /// Block position for the pointer at `(x, y)`.
    pub fn position_at(&self, x: f64, y: f64) -> Position {
        Position {
            x: self.start_position.x + (x - self.start_pointer.x),
            y: self.start_position.y + (y - self.start_pointer.y),
        }
    }

    /// Detach. Returns true only the first time.
    pub fn release(&mut self) -> bool {
        !std::mem::replace(&mut self.released, true)
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}

/// Drag state for one free-text block.
#[derive(Debug, Clone, PartialEq)]
pub struct FreeTextDrag {
    position: Position,
    /// Last externally supplied position.
    synced: Position,
    session: Option<DragSession>,
    releases: usize,
}

impl FreeTextDrag {
    pub fn new(initial: Position) -> Self {
        Self {
            position: initial,
            synced: initial,
            session: None,
            releases: 0,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// How many sessions have been released. Every began session is
    /// released exactly once.
    pub fn releases(&self) -> usize {
        self.releases
    }

    /// Returns whether a session started.
    pub fn pointer_down(&mut self, input: PointerInput) -> bool {
        if input.button != PointerButton::Primary {
            return false;
        }
        self.end_session();
        self.session = Some(DragSession::begin(
            Position::new(input.x, input.y),
            self.position,
        ));
        true
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if let Some(session) = &self.session {
            self.position = session.position_at(x, y);
        }
    }

    pub fn pointer_up(&mut self) {
        self.end_session();
    }

    /// Arrow-key nudge. Returns whether the key was consumed.
    pub fn on_key(&mut self, input: KeyInput) -> bool {
        let (dx, dy) = match input.key {
            Key::ArrowLeft => (-1.0, 0.0),
            Key::ArrowRight => (1.0, 0.0),
            Key::ArrowUp => (0.0, -1.0),
            Key::ArrowDown => (0.0, 1.0),
            _ => return false,
        };
        let step = if input.shift { 10.0 } else { 1.0 };
        self.position.x += dx * step;
        self.position.y += dy * step;
        true
    }

    /// The block's `x`/`y` props changed. An external reposition wins over
    /// local state, including a drag in progress. Unchanged props are a
    /// no-op so re-renders don't undo local moves.
    pub fn sync_props(&mut self, x: f64, y: f64) {
        let next = Position::new(x, y);
        if next == self.synced {
            return;
        }
        self.synced = next;
        self.end_session();
        self.position = next;
    }

    pub fn dispose(&mut self) {
        self.end_session();
    }

    fn end_session(&mut self) {
        if let Some(mut session) = self.session.take() {
            if session.release() {
                self.releases += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_follows_pointer_delta() {
        let mut d = FreeTextDrag::new(Position::new(10.0, 20.0));
        assert!(d.pointer_down(PointerInput::primary(100.0, 100.0)));
        d.pointer_move(130.0, 90.0);
        assert_eq!(d.position(), Position::new(40.0, 10.0));
        d.pointer_up();
        assert!(!d.is_dragging());
        d.pointer_move(500.0, 500.0);
        assert_eq!(d.position(), Position::new(40.0, 10.0));
        assert_eq!(d.releases(), 1);
    }

    #[test]
    fn test_secondary_button_ignored() {
        let mut d = FreeTextDrag::new(Position::default());
        let right = PointerInput {
            x: 0.0,
            y: 0.0,
            button: PointerButton::Secondary,
        };
        assert!(!d.pointer_down(right));
        assert!(!d.is_dragging());
    }

    #[test]
    fn test_keyboard_nudge() {
        let mut d = FreeTextDrag::new(Position::default());
        d.on_key(KeyInput::new(Key::ArrowRight));
        d.on_key(KeyInput::shifted(Key::ArrowDown));
        d.on_key(KeyInput::shifted(Key::ArrowLeft));
        assert_eq!(d.position(), Position::new(-9.0, 10.0));
        assert!(!d.on_key(KeyInput::new(Key::Enter)));
    }

    #[test]
    fn test_external_sync_overrides_drag() {
        let mut d = FreeTextDrag::new(Position::new(0.0, 0.0));
        d.pointer_down(PointerInput::primary(0.0, 0.0));
        d.pointer_move(5.0, 5.0);
        d.sync_props(0.0, 0.0);
        // Same props as before: local state kept.
        assert!(d.is_dragging());
        d.sync_props(50.0, 60.0);
        assert!(!d.is_dragging());
        assert_eq!(d.position(), Position::new(50.0, 60.0));
        assert_eq!(d.releases(), 1);
    }

    #[test]
    fn test_release_exactly_once() {
        let mut d = FreeTextDrag::new(Position::default());
        d.pointer_down(PointerInput::primary(0.0, 0.0));
        d.pointer_down(PointerInput::primary(1.0, 1.0));
        d.pointer_up();
        d.pointer_up();
        d.dispose();
        assert_eq!(d.releases(), 2);

        let mut s = DragSession::begin(Position::default(), Position::default());
        assert!(s.release());
        assert!(!s.release());
        assert!(s.is_released());
    }
}
