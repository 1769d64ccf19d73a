//! Foundation types for scene references and build manifests.
//!
//! Every other `sref` crate depends on `sref-types`.
//!
//! # Key Types
//!
//! - [`AssetId`]: Stable 128-bit asset GUID, independent of the asset's path
//! - [`AssetPath`]: Project-relative, `/`-separated asset path
//! - [`AssetKind`]: Coarse asset classification (scene or anything else)

pub mod error;
pub mod id;
pub mod path;

pub use error::TypeError;
pub use id::AssetId;
pub use path::{AssetKind, AssetPath, SCENE_EXTENSION};
