//! Serializable scene references.
//!
//! A [`SceneReference`] points at a scene asset by its stable identifier and
//! keeps a copy of the scene's path and display name for contexts where the
//! asset store is not available (runtime builds). Its lifecycle hooks are
//! called explicitly by the persistence layer:
//!
//! - [`SceneReference::on_before_save`] refreshes the stored path and name.
//! - [`SceneReference::on_after_load`] schedules a one-shot re-resolution on
//!   an [`IdleQueue`], because the asset store may not be queryable while
//!   deserialization is still in progress.
//!
//! # Modules
//!
//! - [`idle`]: [`IdleQueue`] of one-shot tasks run on the host's idle tick
//! - [`reference`]: [`SceneReference`]

pub mod idle;
pub mod reference;

pub use idle::{IdleQueue, TaskHandle, WeakIdleQueue};
pub use reference::SceneReference;
