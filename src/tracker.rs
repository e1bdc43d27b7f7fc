use crate::models::{DoseKey, TrackerData, UndoEntry, UNDO_LIMIT};

impl TrackerData {
    /// Flips the taken flag for `key` and returns the value it held before.
    pub fn toggle(&mut self, key: DoseKey) -> bool {
        let previous = self.records.contains(&key);
        self.undo_stack.push(UndoEntry { key, previous });
        if previous {
            self.records.remove(&key);
        } else {
            self.records.insert(key);
        }
        previous
    }

    pub fn is_taken(&self, key: &DoseKey) -> bool {
        self.records.contains(key)
    }

    /// Reverses the most recent toggle. Returns false when there is nothing
    /// to undo; there is no redo.
    pub fn undo(&mut self) -> bool {
        match self.undo_stack.pop() {
            None => false,
            Some(entry) => {
                if entry.previous {
                    self.records.insert(entry.key);
                } else {
                    self.records.remove(&entry.key);
                }
                true
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Snapshot for persistence: the undo stack is truncated to the most
    /// recent UNDO_LIMIT entries, oldest dropped first.
    pub fn export_snapshot(&self) -> TrackerData {
        let mut snapshot = self.clone();
        let len = snapshot.undo_stack.len();
        if len > UNDO_LIMIT {
            snapshot.undo_stack.drain(..len - UNDO_LIMIT);
        }
        snapshot
    }
}
