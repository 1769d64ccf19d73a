//! In-memory asset store for testing and embedding.
//!
//! [`InMemoryAssetStore`] keeps an identifier → path map behind a `RwLock`.
//! Asset kinds are derived from the path extension.

use std::collections::HashMap;
use std::sync::RwLock;

use sref_types::{AssetId, AssetPath};

use crate::error::{AssetError, AssetResult};
use crate::traits::{AssetHandle, AssetStore};

/// An in-memory implementation of [`AssetStore`].
#[derive(Debug, Default)]
pub struct InMemoryAssetStore {
    assets: RwLock<HashMap<AssetId, AssetPath>>,
}

impl InMemoryAssetStore {
    /// Create a new empty asset store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an asset at `path` under a freshly generated identifier.
    pub fn insert(&self, path: impl Into<AssetPath>) -> AssetResult<AssetId> {
        let id = AssetId::generate();
        self.insert_with_id(id, path)?;
        Ok(id)
    }

    /// Register (or move) the asset with the given identifier.
    pub fn insert_with_id(&self, id: AssetId, path: impl Into<AssetPath>) -> AssetResult<()> {
        let mut assets = self
            .assets
            .write()
            .map_err(|e| AssetError::Unavailable(format!("lock poisoned: {e}")))?;
        assets.insert(id, path.into());
        Ok(())
    }

    /// Move an existing asset to a new path, keeping its identifier.
    pub fn rename(&self, id: &AssetId, new_path: impl Into<AssetPath>) -> AssetResult<()> {
        let mut assets = self
            .assets
            .write()
            .map_err(|e| AssetError::Unavailable(format!("lock poisoned: {e}")))?;
        let slot = assets.get_mut(id).ok_or(AssetError::IdNotFound(*id))?;
        *slot = new_path.into();
        Ok(())
    }

    /// Delete an asset. Returns `true` if it existed.
    pub fn remove(&self, id: &AssetId) -> AssetResult<bool> {
        let mut assets = self
            .assets
            .write()
            .map_err(|e| AssetError::Unavailable(format!("lock poisoned: {e}")))?;
        Ok(assets.remove(id).is_some())
    }

    /// Number of registered assets.
    pub fn len(&self) -> usize {
        self.assets.read().map(|a| a.len()).unwrap_or(0)
    }

    /// Returns `true` if no assets are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AssetStore for InMemoryAssetStore {
    fn path_of(&self, id: &AssetId) -> AssetResult<Option<AssetPath>> {
        let assets = self
            .assets
            .read()
            .map_err(|e| AssetError::Unavailable(format!("lock poisoned: {e}")))?;
        Ok(assets.get(id).cloned())
    }

    fn identifier_of(&self, path: &AssetPath) -> AssetResult<Option<AssetId>> {
        let assets = self
            .assets
            .read()
            .map_err(|e| AssetError::Unavailable(format!("lock poisoned: {e}")))?;
        Ok(assets
            .iter()
            .find(|(_, p)| *p == path)
            .map(|(id, _)| *id))
    }

    fn load_by_path(&self, path: &AssetPath) -> AssetResult<Option<AssetHandle>> {
        Ok(self.identifier_of(path)?.map(|id| AssetHandle {
            id,
            path: path.clone(),
            kind: path.kind(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sref_types::AssetKind;

    #[test]
    fn insert_and_lookup_both_ways() {
        let store = InMemoryAssetStore::new();
        let path = AssetPath::new("Assets/Scenes/Main.unity");
        let id = store.insert(path.clone()).unwrap();

        assert_eq!(store.path_of(&id).unwrap(), Some(path.clone()));
        assert_eq!(store.identifier_of(&path).unwrap(), Some(id));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn load_by_path_classifies_kind() {
        let store = InMemoryAssetStore::new();
        store.insert("Assets/Scenes/Main.unity").unwrap();
        store.insert("Assets/Prefabs/Door.prefab").unwrap();

        let scene = store
            .load_by_path(&AssetPath::new("Assets/Scenes/Main.unity"))
            .unwrap()
            .unwrap();
        assert_eq!(scene.kind, AssetKind::Scene);
        assert!(scene.is_scene());

        let prefab = store
            .load_by_path(&AssetPath::new("Assets/Prefabs/Door.prefab"))
            .unwrap()
            .unwrap();
        assert!(!prefab.is_scene());
    }

    #[test]
    fn unknown_lookups_return_none() {
        let store = InMemoryAssetStore::new();
        assert!(store.path_of(&AssetId::generate()).unwrap().is_none());
        assert!(store
            .load_by_path(&AssetPath::new("Assets/Missing.unity"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn rename_keeps_identifier() {
        let store = InMemoryAssetStore::new();
        let id = store.insert("Assets/Old.unity").unwrap();
        store.rename(&id, "Assets/New.unity").unwrap();

        assert_eq!(
            store.path_of(&id).unwrap(),
            Some(AssetPath::new("Assets/New.unity"))
        );
        assert!(store
            .identifier_of(&AssetPath::new("Assets/Old.unity"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn rename_unknown_id_errors() {
        let store = InMemoryAssetStore::new();
        let err = store.rename(&AssetId::generate(), "Assets/X.unity").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn remove_reports_existence() {
        let store = InMemoryAssetStore::new();
        let id = store.insert("Assets/A.unity").unwrap();
        assert!(store.remove(&id).unwrap());
        assert!(!store.remove(&id).unwrap());
        assert!(store.is_empty());
    }
}
