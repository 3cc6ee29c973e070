//! Snapshot slots backed by flat files.
//!
//! A snapshot is the set of distinct lines produced by one bucket listing.
//! Two slots exist: `Current` (the most recent listing) and `Previous` (the
//! baseline). Rotation copies current to a sibling temp file and renames it
//! over previous, so the baseline is always either the old or the new file.

use crate::error::SnapshotError;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Named snapshot slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Current,
    Previous,
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Current => write!(f, "current"),
            Self::Previous => write!(f, "previous"),
        }
    }
}

/// Set of distinct listing lines. Duplicate lines collapse to one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    lines: BTreeSet<String>,
}

impl Snapshot {
    /// Build a snapshot from listing text, one entry per line.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn contains(&self, line: &str) -> bool {
        self.lines.contains(line)
    }

    /// Lines in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Lines present here but not in `other`, sorted.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Vec<String> {
        self.lines.difference(&other.lines).cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for Snapshot {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// The two snapshot files of one monitored bucket.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    current: PathBuf,
    previous: PathBuf,
}

impl SnapshotStore {
    pub fn new(current: impl Into<PathBuf>, previous: impl Into<PathBuf>) -> Self {
        Self {
            current: current.into(),
            previous: previous.into(),
        }
    }

    #[must_use]
    pub fn path(&self, slot: Slot) -> &Path {
        match slot {
            Slot::Current => &self.current,
            Slot::Previous => &self.previous,
        }
    }

    #[must_use]
    pub fn exists(&self, slot: Slot) -> bool {
        self.path(slot).is_file()
    }

    /// Read a slot fully into memory.
    pub fn load(&self, slot: Slot) -> Result<Snapshot, SnapshotError> {
        let path = self.path(slot);
        if !path.is_file() {
            return Err(SnapshotError::Missing(path.to_path_buf()));
        }
        let bytes = std::fs::read(path).map_err(|e| SnapshotError::io(path, e))?;
        Ok(Snapshot::parse(&String::from_utf8_lossy(&bytes)))
    }

    /// Advance the baseline: copy current over previous.
    ///
    /// Fails with [`SnapshotError::Missing`] when no current snapshot exists.
    pub fn rotate(&self) -> Result<(), SnapshotError> {
        if !self.current.is_file() {
            return Err(SnapshotError::Missing(self.current.clone()));
        }

        let staging = staging_path(&self.previous);
        std::fs::copy(&self.current, &staging).map_err(|e| SnapshotError::io(&staging, e))?;
        if let Err(e) = std::fs::rename(&staging, &self.previous) {
            let _ = std::fs::remove_file(&staging);
            return Err(SnapshotError::io(&self.previous, e));
        }

        tracing::debug!(
            "Rotated {} -> {}",
            self.current.display(),
            self.previous.display()
        );
        Ok(())
    }
}

/// Sibling temp path so the final rename stays on one filesystem.
pub(crate) fn staging_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "snapshot".to_string());
    target.with_file_name(format!(".{name}.tmp"))
}
