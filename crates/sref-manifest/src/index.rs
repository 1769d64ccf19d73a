//! Load/save layer over a [`ManifestStore`].

use std::fmt;
use std::sync::Arc;

use crate::entry::ManifestEntry;
use crate::error::ManifestResult;
use crate::traits::ManifestStore;

/// The in-memory view of the build manifest.
///
/// Nothing is kept between calls: [`Self::load`] re-reads the backing store
/// every time and [`Self::save`] overwrites it whole.
#[derive(Clone)]
pub struct ManifestIndex {
    store: Arc<dyn ManifestStore>,
}

impl fmt::Debug for ManifestIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManifestIndex").finish_non_exhaustive()
    }
}

impl ManifestIndex {
    /// Create an index over the given store.
    pub fn new(store: Arc<dyn ManifestStore>) -> Self {
        Self { store }
    }

    /// Read the full manifest in build order.
    pub fn load(&self) -> ManifestResult<Vec<ManifestEntry>> {
        self.store.read_all()
    }

    /// Overwrite the full manifest.
    pub fn save(&self, entries: &[ManifestEntry]) -> ManifestResult<()> {
        self.store.write_all(entries)
    }
}
