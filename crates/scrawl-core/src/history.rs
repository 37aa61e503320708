//! Undo/redo history of scene snapshots.
//!
//! History is a list of snapshots plus a cursor. [`SnapshotStore::commit`]
//! derives a new snapshot from the one under the cursor and appends it,
//! dropping any redo branch first. [`SnapshotStore::replace`] rewrites the
//! entry under the cursor in place, which is how a gesture streams its
//! intermediate frames into a single undo step.

use crate::config::{EditorConfig, MAX_HISTORY_ENTRIES};
use crate::elements::{Element, ElementId};
use crate::error::{EditorError, EditorResult};
use crate::snapshot::Snapshot;

/// How a commit derives the next snapshot from the current one.
#[derive(Debug, Clone)]
pub enum CommitOp {
    /// Copy the current snapshot unchanged (opens an entry for a gesture).
    Clone,
    /// Append elements on top; incoming ids are ignored and fresh ones minted.
    AddElements(Vec<Element>),
    /// Drop the named elements.
    RemoveElements(Vec<ElementId>),
    /// Drop everything.
    RemoveAll,
    /// Replace the element sharing this element's id.
    ModifyElement(Element),
}

/// Owns the undo/redo history.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    entries: Vec<Snapshot>,
    /// Index of the live entry; always `< entries.len()`.
    cursor: usize,
    /// Next id handed out. Only grows, so ids are never reused even after undo.
    next_id: u64,
    max_entries: usize,
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore {
    /// Create a store holding a single empty snapshot.
    pub fn new() -> Self {
        Self::with_capacity_limit(MAX_HISTORY_ENTRIES)
    }

    /// Create a store that keeps at most `max_entries` snapshots.
    pub fn with_capacity_limit(max_entries: usize) -> Self {
        Self {
            entries: vec![Snapshot::default()],
            cursor: 0,
            next_id: 1,
            max_entries: max_entries.max(1),
        }
    }

    /// Create a store capped at the configured number of entries.
    pub fn from_config(config: &EditorConfig) -> Self {
        Self::with_capacity_limit(config.max_history_entries)
    }

    /// The snapshot under the cursor.
    pub fn current(&self) -> &Snapshot {
        &self.entries[self.cursor]
    }

    /// Number of history entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// History always holds at least one entry.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Index of the live entry.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether an older entry exists.
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Whether a newer entry exists.
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Append a new entry derived from the current snapshot.
    ///
    /// Returns the ids minted for [`CommitOp::AddElements`], empty otherwise.
    /// A stale id in `RemoveElements` or `ModifyElement` fails without
    /// touching history.
    pub fn commit(&mut self, op: CommitOp) -> EditorResult<Vec<ElementId>> {
        let mut next = self.current().clone();
        let mut minted = Vec::new();

        match op {
            CommitOp::Clone => {}
            CommitOp::AddElements(elements) => {
                for element in elements {
                    let id = self.mint_id();
                    next.push(element.with_id(id));
                    minted.push(id);
                }
            }
            CommitOp::RemoveElements(ids) => {
                if let Some(missing) = ids.iter().find(|id| !next.contains(**id)) {
                    return Err(EditorError::StaleElement(*missing));
                }
                next.retain(|e| !ids.contains(&e.id()));
            }
            CommitOp::RemoveAll => next.clear(),
            CommitOp::ModifyElement(element) => {
                let id = element.id();
                if !next.set(element) {
                    return Err(EditorError::StaleElement(id));
                }
            }
        }

        self.push_entry(next);
        log::debug!(
            "history commit: {} entries, cursor {}",
            self.entries.len(),
            self.cursor
        );
        Ok(minted)
    }

    /// Overwrite the entry under the cursor. Never grows history.
    pub fn replace(&mut self, snapshot: Snapshot) {
        log::trace!("history replace at cursor {}", self.cursor);
        self.entries[self.cursor] = snapshot;
    }

    /// Overwrite a single element of the entry under the cursor.
    pub fn replace_element(&mut self, element: Element) -> EditorResult<()> {
        let id = element.id();
        if self.entries[self.cursor].set(element) {
            log::trace!("history replace {} at cursor {}", id, self.cursor);
            Ok(())
        } else {
            Err(EditorError::StaleElement(id))
        }
    }

    /// Step back one entry. Returns false at the oldest entry.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.cursor -= 1;
        log::debug!("undo: cursor {}", self.cursor);
        true
    }

    /// Step forward one entry. Returns false at the newest entry.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.cursor += 1;
        log::debug!("redo: cursor {}", self.cursor);
        true
    }

    fn mint_id(&mut self) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        id
    }

    fn push_entry(&mut self, snapshot: Snapshot) {
        // Drop the redo branch
        self.entries.truncate(self.cursor + 1);
        self.entries.push(snapshot);

        if self.entries.len() > self.max_entries {
            let excess = self.entries.len() - self.max_entries;
            self.entries.drain(..excess);
        }
        self.cursor = self.entries.len() - 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Linear, Rectangle};
    use kurbo::Point;

    fn rect(x: f64) -> Element {
        Element::Rectangle(Rectangle::new(
            ElementId(0),
            Point::new(x, x),
            Point::new(x + 10.0, x + 10.0),
        ))
    }

    #[test]
    fn test_new_store_has_one_empty_entry() {
        let store = SnapshotStore::new();
        assert_eq!(store.len(), 1);
        assert_eq!(store.cursor(), 0);
        assert!(store.current().is_empty());
        assert!(!store.can_undo());
        assert!(!store.can_redo());
    }

    #[test]
    fn test_add_elements_mints_unique_ids() {
        let mut store = SnapshotStore::new();
        let ids = store
            .commit(CommitOp::AddElements(vec![rect(0.0), rect(10.0), rect(20.0)]))
            .unwrap();
        assert_eq!(ids.len(), 3);
        assert_ne!(ids[0], ids[1]);
        assert_ne!(ids[1], ids[2]);
        assert_ne!(ids[0], ids[2]);

        let more = store.commit(CommitOp::AddElements(vec![rect(30.0)])).unwrap();
        assert!(!ids.contains(&more[0]));
        assert_eq!(store.current().len(), 4);
    }

    #[test]
    fn test_ids_not_reused_after_undo() {
        let mut store = SnapshotStore::new();
        let first = store.commit(CommitOp::AddElements(vec![rect(0.0)])).unwrap();
        store.undo();
        let second = store.commit(CommitOp::AddElements(vec![rect(0.0)])).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_replace_never_grows_history() {
        let mut store = SnapshotStore::new();
        let ids = store.commit(CommitOp::AddElements(vec![rect(0.0)])).unwrap();
        store.commit(CommitOp::Clone).unwrap();
        let len = store.len();

        for i in 0..20 {
            let moved = rect(i as f64).with_id(ids[0]);
            store.replace_element(moved).unwrap();
            store.replace(store.current().clone());
        }
        assert_eq!(store.len(), len);
        assert_eq!(store.cursor(), len - 1);
    }

    #[test]
    fn test_undo_redo_restores_snapshot() {
        let mut store = SnapshotStore::new();
        store.commit(CommitOp::AddElements(vec![rect(0.0)])).unwrap();
        store.commit(CommitOp::AddElements(vec![rect(50.0)])).unwrap();
        let before = store.current().clone();

        assert!(store.undo());
        assert_eq!(store.current().len(), 1);
        assert!(store.redo());
        assert_eq!(store.current(), &before);
    }

    #[test]
    fn test_undo_redo_at_bounds_are_noops() {
        let mut store = SnapshotStore::new();
        assert!(!store.undo());
        assert!(!store.redo());
        store.commit(CommitOp::Clone).unwrap();
        assert!(!store.redo());
        assert!(store.undo());
        assert!(!store.undo());
        assert_eq!(store.cursor(), 0);
    }

    #[test]
    fn test_commit_truncates_redo_branch() {
        let mut store = SnapshotStore::new();
        store.commit(CommitOp::AddElements(vec![rect(0.0)])).unwrap();
        store.commit(CommitOp::AddElements(vec![rect(10.0)])).unwrap();
        store.commit(CommitOp::AddElements(vec![rect(20.0)])).unwrap();
        store.undo();
        store.undo();
        assert_eq!(store.len(), 4);

        store.commit(CommitOp::RemoveAll).unwrap();
        assert_eq!(store.len(), 3);
        assert!(!store.can_redo());
        assert!(store.current().is_empty());
    }

    #[test]
    fn test_remove_elements() {
        let mut store = SnapshotStore::new();
        let ids = store
            .commit(CommitOp::AddElements(vec![rect(0.0), rect(10.0)]))
            .unwrap();
        store.commit(CommitOp::RemoveElements(vec![ids[0]])).unwrap();
        assert!(!store.current().contains(ids[0]));
        assert!(store.current().contains(ids[1]));
    }

    #[test]
    fn test_stale_remove_leaves_history_untouched() {
        let mut store = SnapshotStore::new();
        store.commit(CommitOp::AddElements(vec![rect(0.0)])).unwrap();
        let len = store.len();
        let result = store.commit(CommitOp::RemoveElements(vec![ElementId(999)]));
        assert!(matches!(result, Err(EditorError::StaleElement(ElementId(999)))));
        assert_eq!(store.len(), len);
    }

    #[test]
    fn test_modify_element() {
        let mut store = SnapshotStore::new();
        let ids = store.commit(CommitOp::AddElements(vec![rect(0.0)])).unwrap();
        let line = Element::Linear(Linear::line(ids[0], Point::ZERO, Point::new(1.0, 1.0)));
        store.commit(CommitOp::ModifyElement(line.clone())).unwrap();
        assert_eq!(store.current().get(ids[0]), Some(&line));

        let stale = store.commit(CommitOp::ModifyElement(line.with_id(ElementId(77))));
        assert!(matches!(stale, Err(EditorError::StaleElement(_))));
    }

    #[test]
    fn test_replace_element_stale() {
        let mut store = SnapshotStore::new();
        let result = store.replace_element(rect(0.0).with_id(ElementId(5)));
        assert!(matches!(result, Err(EditorError::StaleElement(ElementId(5)))));
    }

    #[test]
    fn test_history_cap_drops_oldest() {
        let mut store = SnapshotStore::with_capacity_limit(3);
        for i in 0..5 {
            store.commit(CommitOp::AddElements(vec![rect(i as f64)])).unwrap();
        }
        assert_eq!(store.len(), 3);
        assert_eq!(store.cursor(), 2);
        assert_eq!(store.current().len(), 5);
        assert!(store.undo());
        assert!(store.undo());
        assert!(!store.undo());
        assert_eq!(store.current().len(), 3);
    }
}
