//! Identifier ↔ path resolution over an [`AssetStore`].

use std::fmt;
use std::sync::Arc;

use sref_types::{AssetId, AssetPath};

use crate::error::{AssetError, AssetResult};
use crate::traits::{AssetHandle, AssetStore};

/// Resolves asset identifiers to paths and back.
///
/// Holds no state besides the store handle: every call queries the live
/// store, which is the source of truth for where an asset currently lives.
#[derive(Clone)]
pub struct PathResolver {
    store: Arc<dyn AssetStore>,
}

impl fmt::Debug for PathResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathResolver").finish_non_exhaustive()
    }
}

impl PathResolver {
    /// Create a resolver over the given store.
    pub fn new(store: Arc<dyn AssetStore>) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<dyn AssetStore> {
        &self.store
    }

    /// Current path of the asset with identifier `id`.
    pub fn resolve(&self, id: &AssetId) -> AssetResult<AssetPath> {
        if id.is_null() {
            return Err(AssetError::IdNotFound(*id));
        }
        self.store
            .path_of(id)?
            .ok_or(AssetError::IdNotFound(*id))
    }

    /// Identifier of the asset at `path`.
    pub fn identifier_of(&self, path: &AssetPath) -> AssetResult<AssetId> {
        if path.is_empty() {
            return Err(AssetError::PathNotFound(path.clone()));
        }
        self.store
            .identifier_of(path)?
            .ok_or_else(|| AssetError::PathNotFound(path.clone()))
    }

    /// Handle to the scene at `path`, or `None` if there is no asset there or
    /// it is not a scene.
    pub fn scene_at(&self, path: &AssetPath) -> AssetResult<Option<AssetHandle>> {
        if path.is_empty() {
            return Ok(None);
        }
        Ok(self.store.load_by_path(path)?.filter(AssetHandle::is_scene))
    }

    /// Handle to the scene with identifier `id`, or `None` if the identifier
    /// does not resolve to a scene.
    pub fn scene_for(&self, id: &AssetId) -> AssetResult<Option<AssetHandle>> {
        match self.resolve(id) {
            Ok(path) => self.scene_at(&path),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }
}
