//! Snapshot comparison.
//!
//! Computes `added = current - previous` and `removed = previous - current`
//! over whole-line equality. Duplicate-count changes are not detectable.

use crate::snapshot::{Slot, Snapshot, SnapshotStore};

/// Objects added to and removed from a bucket between two snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// Present in current, absent in previous (sorted)
    pub added: Vec<String>,
    /// Present in previous, absent in current (sorted)
    pub removed: Vec<String>,
}

impl ChangeSet {
    /// Compare two snapshots.
    #[must_use]
    pub fn between(current: &Snapshot, previous: &Snapshot) -> Self {
        Self {
            added: current.difference(previous),
            removed: previous.difference(current),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.added.len() + self.removed.len()
    }
}

/// Compare the current slot against the previous slot.
///
/// Returns `None` when either file is missing or unreadable, which means
/// "no comparison possible", not "no changes".
#[must_use]
pub fn compare_slots(store: &SnapshotStore) -> Option<ChangeSet> {
    let current = match store.load(Slot::Current) {
        Ok(s) => s,
        Err(e) => {
            tracing::debug!("Cannot compare: {e}");
            return None;
        }
    };
    let previous = match store.load(Slot::Previous) {
        Ok(s) => s,
        Err(e) => {
            tracing::debug!("Cannot compare: {e}");
            return None;
        }
    };

    let changes = ChangeSet::between(&current, &previous);
    tracing::info!(
        "Comparison: {} new files, {} removed files",
        changes.added.len(),
        changes.removed.len()
    );
    Some(changes)
}
