//! Build manifest storage and synchronization.
//!
//! The build manifest is an ordered list of scenes with an enabled flag each;
//! a scene's position in the list is its build index. This crate reads and
//! rewrites that list and applies membership changes keyed by [`AssetId`].
//!
//! # Key Types
//!
//! - [`ManifestEntry`] -- A stored manifest row (identifier, path, enabled)
//! - [`BuildScene`] -- Lookup result with the derived build index (-1 if absent)
//! - [`ManifestStore`] -- Backing storage interface (full read / full write)
//! - [`ManifestIndex`] -- Load/save layer over a store
//! - [`ManifestSynchronizer`] -- Find, enable/disable, add, and remove scenes
//!
//! [`AssetId`]: sref_types::AssetId

pub mod entry;
pub mod error;
pub mod index;
pub mod json;
pub mod memory;
pub mod sync;
pub mod traits;

pub use entry::{BuildScene, ManifestEntry};
pub use error::{ManifestError, ManifestResult};
pub use index::ManifestIndex;
pub use json::JsonManifestStore;
pub use memory::InMemoryManifestStore;
pub use sync::{Added, ManifestSynchronizer, SetEnabled};
pub use traits::ManifestStore;
