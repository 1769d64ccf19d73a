//! The [`ManifestStore`] trait defining the manifest storage interface.

use crate::entry::ManifestEntry;
use crate::error::ManifestResult;

/// Storage backend for the build manifest.
///
/// The manifest is always read and written whole. `write_all` must replace
/// the stored list in one step; there is no partial update and no
/// optimistic-concurrency check, so the last writer wins.
pub trait ManifestStore: Send + Sync {
    /// Read every entry in manifest order.
    fn read_all(&self) -> ManifestResult<Vec<ManifestEntry>>;

    /// Replace the stored manifest with `entries`.
    fn write_all(&self, entries: &[ManifestEntry]) -> ManifestResult<()>;
}
