//! Editor control seam

use std::sync::{Mutex, MutexGuard};

use crate::models::position::Position;

/// The host editor's cursor and viewport
pub trait EditorControl: Send + Sync {
    fn active_cursor(&self) -> Position;

    /// Place the cursor, collapsing any selection
    fn set_selection(&self, position: Position);

    fn reveal_position(&self, position: Position);
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct EditorState {
    cursor: Position,
    revealed: Option<Position>,
}

/// In-memory editor used by the command line and by tests
#[derive(Debug, Default)]
pub struct SessionEditor {
    state: Mutex<EditorState>,
}

impl SessionEditor {
    pub fn new(cursor: Position) -> Self {
        Self {
            state: Mutex::new(EditorState {
                cursor,
                revealed: None,
            }),
        }
    }

    /// Last position scrolled into view
    pub fn revealed(&self) -> Option<Position> {
        self.lock().revealed
    }

    fn lock(&self) -> MutexGuard<'_, EditorState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl EditorControl for SessionEditor {
    fn active_cursor(&self) -> Position {
        self.lock().cursor
    }

    fn set_selection(&self, position: Position) {
        self.lock().cursor = position;
    }

    fn reveal_position(&self, position: Position) {
        self.lock().revealed = Some(position);
    }
}
