//! The [`AssetStore`] trait defining the asset lookup interface.

use serde::{Deserialize, Serialize};
use sref_types::{AssetId, AssetKind, AssetPath};

use crate::error::AssetResult;

/// A loaded reference to an existing asset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetHandle {
    /// Stable identifier of the asset.
    pub id: AssetId,
    /// Current path of the asset.
    pub path: AssetPath,
    /// Classification of the asset.
    pub kind: AssetKind,
}

impl AssetHandle {
    /// Returns `true` if the handle points at a scene asset.
    pub fn is_scene(&self) -> bool {
        self.kind == AssetKind::Scene
    }
}

/// Storage backend mapping asset identifiers to paths and back.
///
/// The store is the source of truth; callers never cache its answers. Lookups
/// return `Ok(None)` when the asset does not exist and reserve `Err` for
/// backend failures.
pub trait AssetStore: Send + Sync {
    /// Current path of the asset with the given identifier.
    fn path_of(&self, id: &AssetId) -> AssetResult<Option<AssetPath>>;

    /// Identifier of the asset at the given path.
    fn identifier_of(&self, path: &AssetPath) -> AssetResult<Option<AssetId>>;

    /// Load a handle to the asset at the given path.
    fn load_by_path(&self, path: &AssetPath) -> AssetResult<Option<AssetHandle>>;
}
