use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Where the read-only gate gets lock status from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LockProviderKind {
    /// No version control: the manifest is always editable.
    #[default]
    None,
    /// Read-only files are locked, writable files are checked out.
    FsPermissions,
}

/// How [`Project::open`](crate::Project::open) lays out a project on disk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectOptions {
    /// Manifest file, relative to the project root.
    pub manifest: PathBuf,
    /// Read-only gate debounce window in milliseconds.
    pub debounce_ms: u64,
    /// Lock-status source for the read-only gate.
    pub lock_provider: LockProviderKind,
}

impl Default for ProjectOptions {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from("ProjectSettings/EditorBuildSettings.json"),
            debounce_ms: 3000,
            lock_provider: LockProviderKind::None,
        }
    }
}

impl ProjectOptions {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
