//! High-level API for scene references and the build manifest.
//!
//! [`Project`] wires an asset store, a manifest store, and a read-only gate
//! together and exposes the operations an editor front end needs: look up a
//! scene's build index, add or remove it, enable or disable it.

pub mod error;
pub mod options;
pub mod project;

pub use error::{SdkError, SdkResult};
pub use options::{LockProviderKind, ProjectOptions};
pub use project::{ManifestScene, Project};

// Re-export key types
pub use sref_assets::{AssetHandle, FsAssetStore, InMemoryAssetStore, PathResolver};
pub use sref_gate::ReadOnlyGate;
pub use sref_manifest::{BuildScene, ManifestEntry, SetEnabled};
pub use sref_reference::{IdleQueue, SceneReference};
pub use sref_types::{AssetId, AssetPath};
