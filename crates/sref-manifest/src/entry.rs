//! Manifest entry types.

use serde::{Deserialize, Serialize};
use sref_types::{AssetId, AssetPath};

/// A row in the build manifest.
///
/// The entry's build index is its position in the manifest and is never
/// stored on the entry itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Stable identifier of the scene asset.
    pub identifier: AssetId,
    /// Scene path at the time the entry was last written.
    #[serde(default)]
    pub path: AssetPath,
    /// Whether the scene participates in builds.
    pub enabled: bool,
}

impl ManifestEntry {
    /// Create a new entry.
    pub fn new(identifier: AssetId, path: impl Into<AssetPath>, enabled: bool) -> Self {
        Self {
            identifier,
            path: path.into(),
            enabled,
        }
    }
}

/// A scene's membership in the build manifest.
///
/// Produced by lookups; `position` is `None` when the scene is not in the
/// manifest, which is not an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildScene {
    /// Zero-based position in the manifest, if present.
    pub position: Option<usize>,
    /// Identifier that was looked up.
    pub identifier: AssetId,
    /// Path of the scene (from the manifest entry, or supplied by the caller).
    pub path: AssetPath,
    /// The matching manifest entry, if present.
    pub entry: Option<ManifestEntry>,
}

impl BuildScene {
    /// Build index reported for scenes that are not in the manifest.
    pub const ABSENT_INDEX: i32 = -1;

    /// A lookup result for a scene that is not in the manifest.
    pub fn absent(identifier: AssetId, path: AssetPath) -> Self {
        Self {
            position: None,
            identifier,
            path,
            entry: None,
        }
    }

    /// A lookup result for the entry at `position`.
    pub fn present(position: usize, entry: ManifestEntry) -> Self {
        Self {
            position: Some(position),
            identifier: entry.identifier,
            path: entry.path.clone(),
            entry: Some(entry),
        }
    }

    /// Build index of the scene, or [`Self::ABSENT_INDEX`].
    pub fn build_index(&self) -> i32 {
        self.position
            .and_then(|p| i32::try_from(p).ok())
            .unwrap_or(Self::ABSENT_INDEX)
    }

    /// Returns `true` if the scene is in the manifest.
    pub fn is_present(&self) -> bool {
        self.entry.is_some()
    }

    /// Returns `true` if the scene is in the manifest and enabled.
    pub fn is_enabled(&self) -> bool {
        self.entry.as_ref().is_some_and(|e| e.enabled)
    }
}
