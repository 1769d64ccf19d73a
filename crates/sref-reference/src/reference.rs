use std::cell::RefCell;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};
use sref_assets::{AssetHandle, AssetResult, PathResolver};
use sref_types::{AssetId, AssetPath};
use tracing::{debug, warn};

use crate::idle::{IdleQueue, TaskHandle};

/// A serializable reference to a scene asset.
///
/// The identifier is authoritative whenever a [`PathResolver`] is available
/// (authoring contexts); the stored path and display name are caches of what
/// it resolved to and serve as the durable fallback when no resolver is
/// injected (runtime contexts).
///
/// Serialized layout: `{ "storedPath", "displayName", "identifier" }`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneReference {
    #[serde(default)]
    stored_path: AssetPath,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    identifier: AssetId,
}

impl SceneReference {
    /// An unset reference.
    pub fn new() -> Self {
        Self::default()
    }

    /// A reference to the given scene.
    pub fn for_scene(scene: &AssetHandle) -> Self {
        let mut reference = Self::new();
        reference.assign(scene);
        reference
    }

    /// A runtime-style reference that only knows a path.
    pub fn from_path(path: impl Into<AssetPath>) -> Self {
        Self {
            stored_path: path.into(),
            ..Self::default()
        }
    }

    /// The scene's identifier; null when unset.
    pub fn identifier(&self) -> AssetId {
        self.identifier
    }

    /// The last stored path, without any resolution.
    pub fn stored_path(&self) -> &AssetPath {
        &self.stored_path
    }

    /// Name of the scene: its final path segment without extension.
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Returns `true` if neither an identifier nor a path is set.
    pub fn is_unset(&self) -> bool {
        self.identifier.is_null() && self.stored_path.is_empty()
    }

    /// Path of the referenced scene.
    ///
    /// With a resolver the path is derived from the identifier, and is empty
    /// when the identifier does not resolve to a scene. Without one the
    /// stored path is returned as-is.
    pub fn path(&self, resolver: Option<&PathResolver>) -> AssetPath {
        let Some(resolver) = resolver else {
            return self.stored_path.clone();
        };
        match self.resolved_scene(resolver) {
            Ok(Some(scene)) => scene.path,
            Ok(None) => AssetPath::empty(),
            Err(e) => {
                warn!(id = %self.identifier, error = %e, "scene reference lookup failed");
                AssetPath::empty()
            }
        }
    }

    /// Point the reference at `path`.
    ///
    /// With a resolver the identifier is re-derived from the path (and
    /// cleared if no scene lives there).
    pub fn set_path(&mut self, path: impl Into<AssetPath>, resolver: Option<&PathResolver>) {
        self.stored_path = path.into();
        let Some(resolver) = resolver else {
            return;
        };
        match resolver.scene_at(&self.stored_path) {
            Ok(Some(scene)) => {
                self.assign(&scene);
            }
            Ok(None) => {
                self.identifier = AssetId::null();
                self.display_name = None;
            }
            Err(e) => warn!(path = %self.stored_path, error = %e, "scene lookup failed"),
        }
    }

    /// Point the reference at `scene`. Non-scene assets are rejected and leave
    /// the reference unchanged.
    pub fn assign(&mut self, scene: &AssetHandle) -> bool {
        if !scene.is_scene() {
            return false;
        }
        self.identifier = scene.id;
        self.stored_path = scene.path.clone();
        self.display_name = Some(scene.path.display_name().to_string());
        true
    }

    /// Reset to an unset reference.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Returns `true` if the identifier resolves to an existing scene.
    pub fn is_resolvable(&self, resolver: &PathResolver) -> bool {
        matches!(self.resolved_scene(resolver), Ok(Some(_)))
    }

    /// Refresh the cached fields before the reference is persisted.
    ///
    /// Returns `true` if anything changed, so the host can mark its document
    /// dirty. A no-op without a resolver.
    pub fn on_before_save(&mut self, resolver: Option<&PathResolver>) -> bool {
        let Some(resolver) = resolver else {
            return false;
        };
        match self.resolved_scene(resolver) {
            Ok(Some(scene)) => self.apply(&scene),
            Ok(None) => self.resolve_from_stored_path(resolver),
            Err(e) => {
                warn!(id = %self.identifier, error = %e, "scene reference left unchanged");
                false
            }
        }
    }

    /// Schedule the deferred post-load resolution of `reference` on `queue`.
    ///
    /// Nothing is scheduled without a resolver. The task holds only a weak
    /// reference, so dropping the scene reference first makes it a no-op.
    /// If the reference is borrowed when the task runs, the resolution moves
    /// to the following tick and the returned handle no longer tracks it.
    pub fn on_after_load(
        reference: &Rc<RefCell<Self>>,
        queue: &IdleQueue,
        resolver: Option<PathResolver>,
    ) -> Option<TaskHandle> {
        let resolver = resolver?;
        Some(schedule_completion(
            Rc::downgrade(reference),
            queue,
            resolver,
        ))
    }

    /// The post-load resolution itself: a no-op when the identifier already
    /// resolves, otherwise re-derive it from the stored path. Returns `true`
    /// if anything changed.
    pub fn complete_load(&mut self, resolver: &PathResolver) -> bool {
        match self.resolved_scene(resolver) {
            Ok(Some(_)) => false,
            Ok(None) => self.resolve_from_stored_path(resolver),
            Err(e) => {
                warn!(id = %self.identifier, error = %e, "deferred scene resolution failed");
                false
            }
        }
    }

    fn resolved_scene(&self, resolver: &PathResolver) -> AssetResult<Option<AssetHandle>> {
        if self.identifier.is_null() {
            return Ok(None);
        }
        resolver.scene_for(&self.identifier)
    }

    fn resolve_from_stored_path(&mut self, resolver: &PathResolver) -> bool {
        let found = if self.stored_path.is_empty() {
            None
        } else {
            match resolver.scene_at(&self.stored_path) {
                Ok(found) => found,
                Err(e) => {
                    warn!(path = %self.stored_path, error = %e, "scene lookup failed");
                    return false;
                }
            }
        };

        match found {
            Some(scene) => self.apply(&scene),
            None => {
                let before = self.clone();
                if !self.stored_path.is_empty() {
                    debug!(path = %self.stored_path, "scene reference no longer resolves, clearing");
                }
                self.clear();
                *self != before
            }
        }
    }

    fn apply(&mut self, scene: &AssetHandle) -> bool {
        let before = self.clone();
        self.assign(scene);
        *self != before
    }
}

fn schedule_completion(
    weak: Weak<RefCell<SceneReference>>,
    queue: &IdleQueue,
    resolver: PathResolver,
) -> TaskHandle {
    let requeue = queue.downgrade();
    queue.schedule_once(move || {
        let Some(reference) = weak.upgrade() else {
            return;
        };
        let Ok(mut borrowed) = reference.try_borrow_mut() else {
            debug!("scene reference busy during deferred resolution, retrying next tick");
            if let Some(queue) = requeue.upgrade() {
                schedule_completion(weak, &queue, resolver);
            }
            return;
        };
        borrowed.complete_load(&resolver);
    })
}
