//! File-permission lock provider.
//!
//! Checkout-style version control keeps files read-only on disk until they
//! are checked out. [`FsPermissionProvider`] reads that convention straight
//! off the file system: a writable file counts as checked out in this
//! session, a read-only one as synced but not checked out.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::debug;

use crate::error::GateResult;
use crate::provider::{AssetState, LockStatusProvider, StatusRecord};

/// A [`LockStatusProvider`] that derives lock status from file permissions.
#[derive(Clone, Debug)]
pub struct FsPermissionProvider {
    root: PathBuf,
}

impl FsPermissionProvider {
    /// Provider for files under the project `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl LockStatusProvider for FsPermissionProvider {
    fn is_enabled(&self) -> bool {
        true
    }

    fn supports_checkout(&self) -> bool {
        true
    }

    fn status_of(&self, path: &str) -> GateResult<Vec<StatusRecord>> {
        let abs = self.root.join(path);
        let metadata = match fs::metadata(&abs) {
            Ok(metadata) => metadata,
            // Nothing on disk yet: the file will be created as a local add.
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Ok(vec![StatusRecord::new(
                    path,
                    vec![AssetState::AddedLocal, AssetState::CheckedOutLocal],
                )]);
            }
            Err(e) => return Err(e.into()),
        };

        let states = if metadata.permissions().readonly() {
            vec![AssetState::Synced]
        } else {
            vec![AssetState::Synced, AssetState::CheckedOutLocal]
        };
        debug!(path = %abs.display(), ?states, "file permission status");
        Ok(vec![StatusRecord::new(path, states)])
    }
}
