//! Read-only gate for the build manifest.
//!
//! Whether the manifest may be edited depends on the version-control system:
//! with a checkout-style provider the file is writable only once it is checked
//! out in this session. Asking the provider blocks, so [`ReadOnlyGate`] caches
//! the answer and re-queries at most once per debounce window.
//!
//! # Quick Start
//!
//! ```rust
//! use sref_gate::{GateConfig, ReadOnlyGate};
//!
//! // Without a provider the manifest is always editable.
//! let gate = ReadOnlyGate::new(GateConfig::default(), None);
//! assert!(!gate.is_locked());
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod fs;
pub mod gate;
pub mod provider;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::GateConfig;
pub use error::{GateError, GateResult};
pub use fs::FsPermissionProvider;
pub use gate::{Freshness, ReadOnlyGate};
pub use provider::{AssetState, LockStatusProvider, StatusRecord};
