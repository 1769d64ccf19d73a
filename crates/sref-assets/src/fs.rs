//! File-system asset store.
//!
//! A project directory where every asset `X` has a sidecar `X.meta` holding
//! its identifier on a `guid: <hex>` line. Identifier → path lookups walk the
//! tree on every call; nothing is cached.

use std::fs;
use std::path::{Path, PathBuf};

use sref_types::{AssetId, AssetKind, AssetPath};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{AssetError, AssetResult};
use crate::traits::{AssetHandle, AssetStore};

const META_SUFFIX: &str = ".meta";

/// An [`AssetStore`] backed by a project directory.
#[derive(Clone, Debug)]
pub struct FsAssetStore {
    root: PathBuf,
}

impl FsAssetStore {
    /// Open the project rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The project root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute location of an asset path.
    pub fn absolute(&self, path: &AssetPath) -> PathBuf {
        self.root.join(path.as_str())
    }

    /// Write a `.meta` sidecar with a fresh identifier for every scene file
    /// that does not have one yet. Returns the newly registered scenes.
    pub fn import(&self) -> AssetResult<Vec<AssetHandle>> {
        let mut imported = Vec::new();
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(path) = self.relative(entry.path()) else {
                continue;
            };
            if path.kind() != AssetKind::Scene {
                continue;
            }
            let meta = meta_path(entry.path());
            if meta.exists() {
                continue;
            }

            let id = AssetId::generate();
            fs::write(&meta, format!("fileFormatVersion: 2\nguid: {id}\n"))?;
            debug!(path = %path, id = %id, "imported scene");
            imported.push(AssetHandle {
                id,
                path,
                kind: AssetKind::Scene,
            });
        }
        Ok(imported)
    }

    fn relative(&self, abs: &Path) -> Option<AssetPath> {
        let rel = abs.strip_prefix(&self.root).ok()?;
        let parts: Vec<String> = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        if parts.is_empty() {
            return None;
        }
        Some(AssetPath::new(parts.join("/")))
    }
}

impl AssetStore for FsAssetStore {
    fn path_of(&self, id: &AssetId) -> AssetResult<Option<AssetPath>> {
        if id.is_null() {
            return Ok(None);
        }
        // Duplicated guids resolve to the first match in name order.
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            if !name.ends_with(META_SUFFIX) {
                continue;
            }

            let found = match read_guid(entry.path()) {
                Ok(found) => found,
                Err(e) => {
                    warn!(meta = %entry.path().display(), error = %e, "skipping unreadable meta file");
                    continue;
                }
            };
            if found != *id {
                continue;
            }

            let asset = asset_path_for_meta(entry.path());
            if !asset.exists() {
                // Orphaned sidecar left behind by a delete.
                continue;
            }
            return Ok(self.relative(&asset));
        }
        Ok(None)
    }

    fn identifier_of(&self, path: &AssetPath) -> AssetResult<Option<AssetId>> {
        if path.is_empty() {
            return Ok(None);
        }
        let meta = meta_path(&self.absolute(path));
        if !meta.is_file() {
            return Ok(None);
        }
        read_guid(&meta).map(Some)
    }

    fn load_by_path(&self, path: &AssetPath) -> AssetResult<Option<AssetHandle>> {
        if path.is_empty() || !self.absolute(path).is_file() {
            return Ok(None);
        }
        Ok(self.identifier_of(path)?.map(|id| AssetHandle {
            id,
            path: path.clone(),
            kind: path.kind(),
        }))
    }
}

fn meta_path(asset: &Path) -> PathBuf {
    let mut os = asset.as_os_str().to_owned();
    os.push(META_SUFFIX);
    PathBuf::from(os)
}

fn asset_path_for_meta(meta: &Path) -> PathBuf {
    let raw = meta.as_os_str().to_string_lossy();
    PathBuf::from(raw.strip_suffix(META_SUFFIX).unwrap_or(&raw).to_string())
}

fn read_guid(meta: &Path) -> AssetResult<AssetId> {
    let contents = fs::read_to_string(meta)?;
    let value = contents
        .lines()
        .find_map(|line| line.trim().strip_prefix("guid:"))
        .ok_or_else(|| AssetError::MalformedMeta {
            path: meta.display().to_string(),
            reason: "no guid line".to_string(),
        })?;
    AssetId::from_hex(value).map_err(|e| AssetError::MalformedMeta {
        path: meta.display().to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_scene(root: &Path, rel: &str, id: Option<AssetId>) {
        let abs = root.join(rel);
        fs::create_dir_all(abs.parent().unwrap()).unwrap();
        fs::write(&abs, "%YAML 1.1\n").unwrap();
        if let Some(id) = id {
            fs::write(meta_path(&abs), format!("fileFormatVersion: 2\nguid: {id}\n")).unwrap();
        }
    }

    #[test]
    fn duplicated_guid_resolves_in_name_order() {
        let dir = TempDir::new().unwrap();
        let id = AssetId::generate();
        write_scene(dir.path(), "Assets/Zed/Main.unity", Some(id));
        write_scene(dir.path(), "Assets/Copy/Main.unity", Some(id));
        write_scene(dir.path(), "Assets/Copy/Main 1.unity", Some(id));
        let store = FsAssetStore::new(dir.path());

        for _ in 0..3 {
            assert_eq!(
                store.path_of(&id).unwrap(),
                Some(AssetPath::new("Assets/Copy/Main 1.unity"))
            );
        }
    }

    #[test]
    fn resolves_identifier_from_meta() {
        let dir = TempDir::new().unwrap();
        let id = AssetId::generate();
        write_scene(dir.path(), "Assets/Scenes/Main.unity", Some(id));
        let store = FsAssetStore::new(dir.path());

        let path = AssetPath::new("Assets/Scenes/Main.unity");
        assert_eq!(store.identifier_of(&path).unwrap(), Some(id));
        assert_eq!(store.path_of(&id).unwrap(), Some(path.clone()));

        let handle = store.load_by_path(&path).unwrap().unwrap();
        assert_eq!(handle.id, id);
        assert!(handle.is_scene());
    }

    #[test]
    fn missing_meta_means_unknown_asset() {
        let dir = TempDir::new().unwrap();
        write_scene(dir.path(), "Assets/Loose.unity", None);
        let store = FsAssetStore::new(dir.path());

        let path = AssetPath::new("Assets/Loose.unity");
        assert!(store.identifier_of(&path).unwrap().is_none());
        assert!(store.load_by_path(&path).unwrap().is_none());
    }

    #[test]
    fn orphaned_meta_is_ignored() {
        let dir = TempDir::new().unwrap();
        let id = AssetId::generate();
        write_scene(dir.path(), "Assets/Gone.unity", Some(id));
        fs::remove_file(dir.path().join("Assets/Gone.unity")).unwrap();
        let store = FsAssetStore::new(dir.path());

        assert!(store.path_of(&id).unwrap().is_none());
    }

    #[test]
    fn malformed_meta_is_reported_on_direct_lookup() {
        let dir = TempDir::new().unwrap();
        write_scene(dir.path(), "Assets/Bad.unity", None);
        fs::write(dir.path().join("Assets/Bad.unity.meta"), "fileFormatVersion: 2\n").unwrap();
        let store = FsAssetStore::new(dir.path());

        let err = store
            .identifier_of(&AssetPath::new("Assets/Bad.unity"))
            .unwrap_err();
        assert!(matches!(err, AssetError::MalformedMeta { .. }));
    }

    #[test]
    fn import_registers_only_unregistered_scenes() {
        let dir = TempDir::new().unwrap();
        let existing = AssetId::generate();
        write_scene(dir.path(), "Assets/Scenes/Known.unity", Some(existing));
        write_scene(dir.path(), "Assets/Scenes/New.unity", None);
        fs::write(dir.path().join("Assets/readme.txt"), "notes").unwrap();
        let store = FsAssetStore::new(dir.path());

        let imported = store.import().unwrap();
        assert_eq!(imported.len(), 1);
        assert_eq!(imported[0].path.as_str(), "Assets/Scenes/New.unity");

        let path = AssetPath::new("Assets/Scenes/New.unity");
        assert_eq!(store.identifier_of(&path).unwrap(), Some(imported[0].id));
        assert_eq!(
            store
                .identifier_of(&AssetPath::new("Assets/Scenes/Known.unity"))
                .unwrap(),
            Some(existing)
        );

        // A second import finds nothing new.
        assert!(store.import().unwrap().is_empty());
    }
}
