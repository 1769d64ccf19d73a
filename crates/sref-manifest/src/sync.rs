//! Scene membership operations on the build manifest.
//!
//! Every operation reloads the manifest through the [`ManifestIndex`], and
//! every mutation writes the whole list back. Identifiers are unique in a
//! well-formed manifest; when duplicates do show up, lookups take the first
//! match and removal takes them all.

use std::sync::Arc;

use sref_types::{AssetId, AssetPath};
use tracing::debug;

use crate::entry::{BuildScene, ManifestEntry};
use crate::error::ManifestResult;
use crate::index::ManifestIndex;
use crate::traits::ManifestStore;

/// Outcome of [`ManifestSynchronizer::set_enabled`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetEnabled {
    /// The entry was found, updated, and the manifest saved.
    Modified,
    /// No entry carries the identifier; the manifest was not touched.
    NotFound,
}

/// Outcome of [`ManifestSynchronizer::add`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Added {
    /// Position of the appended entry.
    pub index: usize,
}

/// Finds and mutates scene entries in the build manifest.
#[derive(Clone, Debug)]
pub struct ManifestSynchronizer {
    index: ManifestIndex,
}

impl ManifestSynchronizer {
    /// Create a synchronizer over the given index.
    pub fn new(index: ManifestIndex) -> Self {
        Self { index }
    }

    /// Create a synchronizer directly over a store.
    pub fn from_store(store: Arc<dyn ManifestStore>) -> Self {
        Self::new(ManifestIndex::new(store))
    }

    /// The underlying index.
    pub fn index(&self) -> &ManifestIndex {
        &self.index
    }

    /// Look up the manifest entry for `id`.
    ///
    /// A scene that is not in the manifest comes back with
    /// [`BuildScene::ABSENT_INDEX`]; that is not an error.
    pub fn find(&self, id: &AssetId) -> ManifestResult<BuildScene> {
        let entries = self.index.load()?;
        Ok(entries
            .into_iter()
            .enumerate()
            .find(|(_, entry)| entry.identifier == *id)
            .map(|(position, entry)| BuildScene::present(position, entry))
            .unwrap_or_else(|| BuildScene::absent(*id, AssetPath::empty())))
    }

    /// Returns `true` if any entry carries `id`.
    pub fn contains_identifier(&self, id: &AssetId) -> ManifestResult<bool> {
        Ok(self.index.load()?.iter().any(|e| e.identifier == *id))
    }

    /// Set the enabled flag of the entry for `id`.
    ///
    /// The manifest is saved whenever the entry exists, even if the flag
    /// already had the requested value. A missing entry is reported as
    /// [`SetEnabled::NotFound`] and nothing is written.
    pub fn set_enabled(&self, id: &AssetId, enabled: bool) -> ManifestResult<SetEnabled> {
        let mut entries = self.index.load()?;
        let Some(entry) = entries.iter_mut().find(|e| e.identifier == *id) else {
            debug!(id = %id, "set_enabled: scene not in manifest");
            return Ok(SetEnabled::NotFound);
        };
        entry.enabled = enabled;
        self.index.save(&entries)?;
        debug!(id = %id, enabled, "set_enabled: manifest updated");
        Ok(SetEnabled::Modified)
    }

    /// Append a new entry for `id`.
    ///
    /// Duplicates are not checked here; callers that care use
    /// [`Self::contains_identifier`] first.
    pub fn add(&self, id: &AssetId, path: &AssetPath, enabled: bool) -> ManifestResult<Added> {
        let mut entries = self.index.load()?;
        entries.push(ManifestEntry::new(*id, path.clone(), enabled));
        self.index.save(&entries)?;
        let index = entries.len() - 1;
        debug!(id = %id, path = %path, index, enabled, "added scene to manifest");
        Ok(Added { index })
    }

    /// Remove every entry carrying `id` and return how many were removed.
    ///
    /// Nothing is written when there was no match.
    pub fn remove(&self, id: &AssetId) -> ManifestResult<usize> {
        let mut entries = self.index.load()?;
        let before = entries.len();
        entries.retain(|e| e.identifier != *id);
        let removed = before - entries.len();
        if removed > 0 {
            self.index.save(&entries)?;
            debug!(id = %id, removed, "removed scene from manifest");
        }
        Ok(removed)
    }

    /// Every entry in build order, with its derived position.
    pub fn entries(&self) -> ManifestResult<Vec<BuildScene>> {
        Ok(self
            .index
            .load()?
            .into_iter()
            .enumerate()
            .map(|(position, entry)| BuildScene::present(position, entry))
            .collect())
    }
}
