//! Asset store interface and path resolution.
//!
//! Assets are addressed two ways: by their stable [`AssetId`] and by their
//! mutable project-relative [`AssetPath`]. The [`AssetStore`] trait is the
//! source of truth for the mapping between the two; [`PathResolver`] is the
//! thin, cache-free query layer the rest of the workspace goes through.
//!
//! # Modules
//!
//! - [`error`]: Error types for asset lookups
//! - [`traits`]: The [`AssetStore`] trait and [`AssetHandle`]
//! - [`memory`]: In-memory [`InMemoryAssetStore`] for tests and embedding
//! - [`fs`]: [`FsAssetStore`] backed by a project directory with `.meta` sidecars
//! - [`resolver`]: [`PathResolver`]
//!
//! [`AssetId`]: sref_types::AssetId
//! [`AssetPath`]: sref_types::AssetPath

pub mod error;
pub mod fs;
pub mod memory;
pub mod resolver;
pub mod traits;

pub use error::{AssetError, AssetResult};
pub use fs::FsAssetStore;
pub use memory::InMemoryAssetStore;
pub use resolver::PathResolver;
pub use traits::{AssetHandle, AssetStore};
