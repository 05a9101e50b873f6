//! Undo/redo history of puzzle states.

/// Snapshots of the states preceding each accepted move.
///
/// The top of the undo stack is always the state immediately before the
/// current one. Redo holds states that were undone and is cleared by any new
/// move.
#[derive(Debug, Clone)]
pub struct History<S> {
    undo_stack: Vec<S>,
    redo_stack: Vec<S>,
}

impl<S> Default for History<S> {
    fn default() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }
}

impl<S> History<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the state a move was made from
    pub fn push(&mut self, previous: S) {
        self.undo_stack.push(previous);
        self.redo_stack.clear();
    }

    /// Step back: returns the previous state and remembers `current` for redo.
    /// Returns `None` (and keeps `current` untouched) if there is nothing to
    /// undo.
    pub fn undo(&mut self, current: S) -> Option<S> {
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    /// Re-apply the last undone move
    pub fn redo(&mut self, current: S) -> Option<S> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(next)
    }

    /// Return to the first recorded state and forget everything. Returns
    /// `None` if no move was ever recorded.
    pub fn reset(&mut self) -> Option<S> {
        self.redo_stack.clear();
        if self.undo_stack.is_empty() {
            return None;
        }
        let first = self.undo_stack.swap_remove(0);
        self.undo_stack.clear();
        Some(first)
    }

    /// Number of moves that can be undone
    pub fn len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undo_stack.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Oldest recorded state, the puzzle's start once a move was made
    pub fn first(&self) -> Option<&S> {
        self.undo_stack.first()
    }
}
