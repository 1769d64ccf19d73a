use std::path::Path;
use std::sync::Arc;

use sref_assets::{AssetHandle, AssetStore, FsAssetStore, InMemoryAssetStore, PathResolver};
use sref_gate::{FsPermissionProvider, GateConfig, LockStatusProvider, ReadOnlyGate};
use sref_manifest::{
    BuildScene, InMemoryManifestStore, JsonManifestStore, ManifestStore, ManifestSynchronizer,
    SetEnabled,
};
use sref_reference::SceneReference;
use sref_types::{AssetId, AssetPath};
use tracing::{debug, info};

use crate::error::{SdkError, SdkResult};
use crate::options::{LockProviderKind, ProjectOptions};

/// A manifest entry together with where its scene lives now.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManifestScene {
    /// The entry as stored, with its build index.
    pub scene: BuildScene,
    /// Current path of the scene, if its identifier still resolves.
    pub current_path: Option<AssetPath>,
}

impl ManifestScene {
    /// Returns `true` if the scene asset no longer exists.
    pub fn is_missing(&self) -> bool {
        self.current_path.is_none()
    }

    /// Returns `true` if the scene moved since the entry was written.
    pub fn is_moved(&self) -> bool {
        self.current_path
            .as_ref()
            .is_some_and(|p| *p != self.scene.path)
    }
}

/// High-level project API.
#[derive(Debug)]
pub struct Project {
    resolver: PathResolver,
    manifest: ManifestSynchronizer,
    gate: ReadOnlyGate,
}

impl Project {
    /// Assemble a project from its parts.
    pub fn new(
        assets: Arc<dyn AssetStore>,
        manifest: Arc<dyn ManifestStore>,
        gate: ReadOnlyGate,
    ) -> Self {
        Self {
            resolver: PathResolver::new(assets),
            manifest: ManifestSynchronizer::from_store(manifest),
            gate,
        }
    }

    /// A project with in-memory stores and no version control.
    pub fn in_memory(assets: Arc<InMemoryAssetStore>) -> Self {
        Self::new(
            assets,
            Arc::new(InMemoryManifestStore::new()),
            ReadOnlyGate::new(GateConfig::default(), None),
        )
    }

    /// Open the project directory at `root`.
    pub fn open(root: &Path, options: &ProjectOptions) -> Self {
        let assets = Arc::new(FsAssetStore::new(root));
        let manifest = Arc::new(JsonManifestStore::new(root.join(&options.manifest)));

        let provider: Option<Arc<dyn LockStatusProvider>> = match options.lock_provider {
            LockProviderKind::None => None,
            LockProviderKind::FsPermissions => Some(Arc::new(FsPermissionProvider::new(root))),
        };
        let gate_config = GateConfig::for_manifest(options.manifest.to_string_lossy())
            .with_debounce(options.debounce());

        info!(
            root = %root.display(),
            manifest = %options.manifest.display(),
            lock_provider = ?options.lock_provider,
            "opened project"
        );
        Self::new(assets, manifest, ReadOnlyGate::new(gate_config, provider))
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    pub fn manifest(&self) -> &ManifestSynchronizer {
        &self.manifest
    }

    pub fn gate(&self) -> &ReadOnlyGate {
        &self.gate
    }

    // ---- Lookups ----

    /// The scene asset at `path`.
    pub fn scene(&self, path: &AssetPath) -> SdkResult<AssetHandle> {
        self.resolver
            .scene_at(path)?
            .ok_or_else(|| SdkError::NotAScene(path.clone()))
    }

    /// Build manifest membership of the scene at `path`.
    ///
    /// A deleted scene still reports the manifest entry stored under `path`.
    pub fn build_scene(&self, path: &AssetPath) -> SdkResult<BuildScene> {
        let (id, path) = self.target(path)?;
        Ok(self.lookup(&id, path)?)
    }

    /// Build manifest membership of the scene a reference points at.
    ///
    /// An unset or unresolvable reference is reported as absent.
    pub fn build_scene_for(&self, reference: &SceneReference) -> SdkResult<BuildScene> {
        let id = reference.identifier();
        if id.is_null() {
            return Ok(BuildScene::absent(id, reference.stored_path().clone()));
        }
        let path = reference.path(Some(&self.resolver));
        Ok(self.lookup(&id, path)?)
    }

    /// Build index of the scene a reference points at, or -1.
    pub fn build_index(&self, reference: &SceneReference) -> SdkResult<i32> {
        Ok(self.build_scene_for(reference)?.build_index())
    }

    /// Every manifest entry in build order, with the scene's current path.
    pub fn scenes(&self) -> SdkResult<Vec<ManifestScene>> {
        self.manifest
            .entries()?
            .into_iter()
            .map(|scene| -> SdkResult<ManifestScene> {
                let current_path = self.resolver.scene_for(&scene.identifier)?.map(|h| h.path);
                Ok(ManifestScene {
                    scene,
                    current_path,
                })
            })
            .collect()
    }

    /// Whether the manifest is currently read-only.
    pub fn is_read_only(&self) -> bool {
        self.gate.is_locked()
    }

    // ---- Mutations ----

    /// Append the scene at `path` to the manifest.
    ///
    /// Scenes already in the manifest are rejected rather than duplicated.
    pub fn add_scene(&self, path: &AssetPath, enabled: bool) -> SdkResult<BuildScene> {
        let scene = self.ensure_addable(path)?;
        self.manifest.add(&scene.id, &scene.path, enabled)?;
        Ok(self.lookup(&scene.id, scene.path)?)
    }

    /// Check that the scene at `path` could be added right now, without
    /// writing anything.
    pub fn ensure_addable(&self, path: &AssetPath) -> SdkResult<AssetHandle> {
        self.ensure_writable()?;
        let scene = self.scene(path)?;
        if self.manifest.contains_identifier(&scene.id)? {
            return Err(SdkError::AlreadyInManifest(scene.path));
        }
        Ok(scene)
    }

    /// Fail with [`SdkError::ReadOnly`] if the manifest cannot be written.
    pub fn ensure_writable(&self) -> SdkResult<()> {
        if self.gate.is_locked() {
            return Err(SdkError::ReadOnly(self.gate.config().manifest_path.clone()));
        }
        Ok(())
    }

    /// Remove the scene at `path` from the manifest, returning how many
    /// entries were removed (0 if it was not there).
    ///
    /// Works for deleted scenes too, through the entry stored under `path`.
    pub fn remove_scene(&self, path: &AssetPath) -> SdkResult<usize> {
        self.ensure_writable()?;
        let (id, _) = self.target(path)?;
        Ok(self.manifest.remove(&id)?)
    }

    /// Enable or disable the scene at `path`.
    pub fn set_scene_enabled(&self, path: &AssetPath, enabled: bool) -> SdkResult<SetEnabled> {
        self.ensure_writable()?;
        let (id, _) = self.target(path)?;
        Ok(self.manifest.set_enabled(&id, enabled)?)
    }

    /// Rewrite stored paths of entries whose scene has moved. Returns how many
    /// entries changed; nothing is written when none did.
    pub fn refresh_paths(&self) -> SdkResult<usize> {
        self.ensure_writable()?;
        let index = self.manifest.index();
        let mut entries = index.load()?;
        let mut changed = 0;
        for entry in &mut entries {
            if let Some(scene) = self.resolver.scene_for(&entry.identifier)? {
                if scene.path != entry.path {
                    debug!(from = %entry.path, to = %scene.path, "scene moved");
                    entry.path = scene.path;
                    changed += 1;
                }
            }
        }
        if changed > 0 {
            index.save(&entries)?;
        }
        Ok(changed)
    }

    fn lookup(&self, id: &AssetId, path: AssetPath) -> sref_manifest::ManifestResult<BuildScene> {
        let mut scene = self.manifest.find(id)?;
        if !path.is_empty() {
            scene.path = path;
        }
        Ok(scene)
    }

    /// Identifier the manifest knows `path` by: the live scene's, or that of
    /// the entry stored under `path` once the asset is gone.
    fn target(&self, path: &AssetPath) -> SdkResult<(AssetId, AssetPath)> {
        if let Some(scene) = self.resolver.scene_at(path)? {
            return Ok((scene.id, scene.path));
        }
        self.manifest
            .index()
            .load()?
            .into_iter()
            .find(|entry| entry.path == *path)
            .map(|entry| (entry.identifier, entry.path))
            .ok_or_else(|| SdkError::NotAScene(path.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (Arc<InMemoryAssetStore>, Project) {
        let assets = Arc::new(InMemoryAssetStore::new());
        let project = Project::in_memory(assets.clone());
        (assets, project)
    }

    #[test]
    fn scene_not_in_manifest_has_index_minus_one() {
        let (assets, project) = setup();
        assets.insert("Assets/Scenes/Main.unity").unwrap();

        let scene = project
            .build_scene(&AssetPath::new("Assets/Scenes/Main.unity"))
            .unwrap();
        assert_eq!(scene.build_index(), -1);
        assert_eq!(scene.path.as_str(), "Assets/Scenes/Main.unity");
    }

    #[test]
    fn add_then_lookup_by_reference() {
        let (assets, project) = setup();
        assets.insert("Assets/Boot.unity").unwrap();
        let id = assets.insert("Assets/Menu.unity").unwrap();

        project.add_scene(&AssetPath::new("Assets/Boot.unity"), true).unwrap();
        let added = project.add_scene(&AssetPath::new("Assets/Menu.unity"), false).unwrap();
        assert_eq!(added.build_index(), 1);
        assert!(!added.is_enabled());

        let handle = project.resolver().scene_for(&id).unwrap().unwrap();
        let reference = SceneReference::for_scene(&handle);
        assert_eq!(project.build_index(&reference).unwrap(), 1);
    }

    #[test]
    fn add_rejects_duplicates() {
        let (assets, project) = setup();
        assets.insert("Assets/Main.unity").unwrap();
        let path = AssetPath::new("Assets/Main.unity");

        project.add_scene(&path, true).unwrap();
        let err = project.add_scene(&path, true).unwrap_err();
        assert!(matches!(err, SdkError::AlreadyInManifest(_)));
        assert_eq!(project.scenes().unwrap().len(), 1);
    }

    #[test]
    fn add_rejects_non_scenes() {
        let (assets, project) = setup();
        assets.insert("Assets/Door.prefab").unwrap();
        let err = project
            .add_scene(&AssetPath::new("Assets/Door.prefab"), true)
            .unwrap_err();
        assert!(matches!(err, SdkError::NotAScene(_)));
    }

    #[test]
    fn enable_disable_and_remove() {
        let (assets, project) = setup();
        assets.insert("Assets/A.unity").unwrap();
        let path = AssetPath::new("Assets/A.unity");
        project.add_scene(&path, false).unwrap();

        assert_eq!(project.set_scene_enabled(&path, true).unwrap(), SetEnabled::Modified);
        assert!(project.build_scene(&path).unwrap().is_enabled());

        assert_eq!(project.remove_scene(&path).unwrap(), 1);
        assert_eq!(project.remove_scene(&path).unwrap(), 0);
        assert_eq!(project.set_scene_enabled(&path, true).unwrap(), SetEnabled::NotFound);
    }

    #[test]
    fn unset_reference_is_absent() {
        let (_, project) = setup();
        assert_eq!(project.build_index(&SceneReference::new()).unwrap(), -1);
    }

    #[test]
    fn scenes_report_moved_and_missing() {
        let (assets, project) = setup();
        let moved = assets.insert("Assets/Old/Moved.unity").unwrap();
        let gone = assets.insert("Assets/Gone.unity").unwrap();
        project.add_scene(&AssetPath::new("Assets/Old/Moved.unity"), true).unwrap();
        project.add_scene(&AssetPath::new("Assets/Gone.unity"), true).unwrap();

        assets.rename(&moved, "Assets/New/Moved.unity").unwrap();
        assets.remove(&gone).unwrap();

        let scenes = project.scenes().unwrap();
        assert!(scenes[0].is_moved());
        assert!(scenes[1].is_missing());

        assert_eq!(project.refresh_paths().unwrap(), 1);
        assert_eq!(project.refresh_paths().unwrap(), 0);
        let scenes = project.scenes().unwrap();
        assert_eq!(scenes[0].scene.path.as_str(), "Assets/New/Moved.unity");
        assert!(!scenes[0].is_moved());
    }

    #[test]
    fn deleted_scene_can_still_be_disabled_and_removed() {
        let (assets, project) = setup();
        let gone = assets.insert("Assets/Gone.unity").unwrap();
        let path = AssetPath::new("Assets/Gone.unity");
        project.add_scene(&path, true).unwrap();
        assets.remove(&gone).unwrap();

        let scene = project.build_scene(&path).unwrap();
        assert_eq!(scene.identifier, gone);
        assert_eq!(scene.build_index(), 0);

        assert_eq!(project.set_scene_enabled(&path, false).unwrap(), SetEnabled::Modified);
        assert_eq!(project.remove_scene(&path).unwrap(), 1);
        assert!(project.scenes().unwrap().is_empty());

        let err = project.remove_scene(&path).unwrap_err();
        assert!(matches!(err, SdkError::NotAScene(_)));
    }

    #[test]
    fn ensure_addable_checks_without_writing() {
        let assets = Arc::new(InMemoryAssetStore::new());
        let store = Arc::new(InMemoryManifestStore::new());
        let project = Project::new(
            assets.clone(),
            store.clone(),
            ReadOnlyGate::new(GateConfig::default(), None),
        );
        assets.insert("Assets/Main.unity").unwrap();
        let path = AssetPath::new("Assets/Main.unity");

        assert!(project.ensure_addable(&path).is_ok());
        assert_eq!(store.write_count(), 0);

        project.add_scene(&path, true).unwrap();
        let err = project.ensure_addable(&path).unwrap_err();
        assert!(matches!(err, SdkError::AlreadyInManifest(_)));
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn read_only_manifest_blocks_mutations() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("Assets")).unwrap();
        fs::write(root.join("Assets/Main.unity"), "scene").unwrap();
        let options = ProjectOptions {
            lock_provider: LockProviderKind::FsPermissions,
            ..ProjectOptions::default()
        };
        let project = Project::open(root, &options);
        FsAssetStore::new(root).import().unwrap();
        let path = AssetPath::new("Assets/Main.unity");

        // No manifest on disk yet: creating it is allowed.
        project.add_scene(&path, true).unwrap();

        let manifest = root.join(&options.manifest);
        let mut perms = fs::metadata(&manifest).unwrap().permissions();
        perms.set_readonly(true);
        fs::set_permissions(&manifest, perms).unwrap();
        project.gate().invalidate();

        assert!(project.is_read_only());
        assert!(matches!(project.ensure_writable(), Err(SdkError::ReadOnly(_))));
        assert!(matches!(project.ensure_addable(&path), Err(SdkError::ReadOnly(_))));
        let err = project.set_scene_enabled(&path, false).unwrap_err();
        assert!(matches!(err, SdkError::ReadOnly(_)));
        assert!(project.build_scene(&path).unwrap().is_enabled());
    }

    #[test]
    fn open_round_trips_through_disk() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("Assets/Scenes")).unwrap();
        fs::write(root.join("Assets/Scenes/Level.unity"), "scene").unwrap();
        FsAssetStore::new(root).import().unwrap();
        let path = AssetPath::new("Assets/Scenes/Level.unity");

        Project::open(root, &ProjectOptions::default())
            .add_scene(&path, true)
            .unwrap();

        let reopened = Project::open(root, &ProjectOptions::default());
        let scene = reopened.build_scene(&path).unwrap();
        assert_eq!(scene.build_index(), 0);
        assert!(scene.is_enabled());
    }
}
