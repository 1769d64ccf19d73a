//! In-memory manifest store for testing and embedding.

use std::sync::RwLock;

use crate::entry::ManifestEntry;
use crate::error::{ManifestError, ManifestResult};
use crate::traits::ManifestStore;

/// An in-memory implementation of [`ManifestStore`].
///
/// Also counts writes so callers can tell whether an operation touched the
/// store at all.
#[derive(Debug, Default)]
pub struct InMemoryManifestStore {
    entries: RwLock<Vec<ManifestEntry>>,
    writes: RwLock<usize>,
}

impl InMemoryManifestStore {
    /// Create an empty manifest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a manifest pre-populated with `entries`.
    pub fn with_entries(entries: Vec<ManifestEntry>) -> Self {
        Self {
            entries: RwLock::new(entries),
            writes: RwLock::new(0),
        }
    }

    /// Number of `write_all` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.read().map(|w| *w).unwrap_or(0)
    }
}

impl ManifestStore for InMemoryManifestStore {
    fn read_all(&self) -> ManifestResult<Vec<ManifestEntry>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| ManifestError::Unavailable(format!("lock poisoned: {e}")))?;
        Ok(entries.clone())
    }

    fn write_all(&self, entries: &[ManifestEntry]) -> ManifestResult<()> {
        let mut stored = self
            .entries
            .write()
            .map_err(|e| ManifestError::Unavailable(format!("lock poisoned: {e}")))?;
        *stored = entries.to_vec();
        let mut writes = self
            .writes
            .write()
            .map_err(|e| ManifestError::Unavailable(format!("lock poisoned: {e}")))?;
        *writes += 1;
        Ok(())
    }
}
