//! Bounded snapshot undo history.
//!
//! The history is a vector of full document snapshots with a cursor into
//! it. Saving truncates any redo tail, appends, and evicts the oldest
//! snapshot once the depth limit is reached. The vector always holds at
//! least one snapshot (the baseline), so undo at the floor is a no-op
//! rather than an empty document.

use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementId};

/// Default number of retained snapshots.
pub const DEFAULT_HISTORY_DEPTH: usize = 50;

/// A full copy of the undoable document state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub elements: Vec<Element>,
    pub element_counter: u64,
    pub selected_id: Option<ElementId>,
}

#[derive(Debug, Clone)]
pub struct History {
    states: Vec<Snapshot>,
    cursor: usize,
    max_depth: usize,
}

impl History {
    /// A history seeded with a baseline snapshot at the default depth.
    pub fn new(baseline: Snapshot) -> Self {
        Self::with_depth(baseline, DEFAULT_HISTORY_DEPTH)
    }

    pub fn with_depth(baseline: Snapshot, max_depth: usize) -> Self {
        Self {
            states: vec![baseline],
            cursor: 0,
            max_depth: max_depth.max(1),
        }
    }

    /// Record a new state after a mutation. Any states ahead of the
    /// cursor (a redo tail from prior undos) are discarded first.
    pub fn save(&mut self, snapshot: Snapshot) {
        self.states.truncate(self.cursor + 1);
        self.states.push(snapshot);
        if self.states.len() > self.max_depth {
            self.states.remove(0);
        } else {
            self.cursor += 1;
        }
    }

    /// Step back one state. None if already at the oldest snapshot.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.states[self.cursor])
    }

    /// Step forward one state. None if there is nothing to redo.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if self.cursor + 1 >= self.states.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.states[self.cursor])
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.states.len()
    }

    /// Drop everything and restart from a fresh baseline. Used when the
    /// active page changes; edits never undo across pages.
    pub fn reset(&mut self, baseline: Snapshot) {
        self.states.clear();
        self.states.push(baseline);
        self.cursor = 0;
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always false: the baseline snapshot is never evicted.
    pub fn is_empty(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(counter: u64) -> Snapshot {
        Snapshot {
            elements: Vec::new(),
            element_counter: counter,
            selected_id: None,
        }
    }

    #[test]
    fn test_undo_at_baseline_is_noop() {
        let mut history = History::new(snap(0));
        assert!(history.undo().is_none());
        assert!(!history.can_undo());
    }

    #[test]
    fn test_undo_redo_walk() {
        let mut history = History::new(snap(0));
        history.save(snap(1));
        history.save(snap(2));

        assert_eq!(history.undo().unwrap().element_counter, 1);
        assert_eq!(history.undo().unwrap().element_counter, 0);
        assert!(history.undo().is_none());

        assert_eq!(history.redo().unwrap().element_counter, 1);
        assert_eq!(history.redo().unwrap().element_counter, 2);
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_save_discards_redo_tail() {
        let mut history = History::new(snap(0));
        history.save(snap(1));
        history.save(snap(2));
        history.undo();
        history.undo();

        history.save(snap(9));
        assert!(!history.can_redo());
        assert_eq!(history.undo().unwrap().element_counter, 0);
        assert_eq!(history.redo().unwrap().element_counter, 9);
    }

    #[test]
    fn test_depth_evicts_oldest() {
        let mut history = History::with_depth(snap(0), 3);
        history.save(snap(1));
        history.save(snap(2));
        history.save(snap(3)); // evicts snap(0)

        assert_eq!(history.len(), 3);
        assert_eq!(history.undo().unwrap().element_counter, 2);
        assert_eq!(history.undo().unwrap().element_counter, 1);
        // snap(0) is gone.
        assert!(history.undo().is_none());
    }

    #[test]
    fn test_reset_clears_both_directions() {
        let mut history = History::new(snap(0));
        history.save(snap(1));
        history.undo();
        history.reset(snap(7));
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.len(), 1);
    }
}
