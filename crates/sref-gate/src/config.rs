use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Path of the build manifest as the version-control provider knows it.
pub const DEFAULT_MANIFEST_PATH: &str = "ProjectSettings/EditorBuildSettings.asset";

/// Configuration for the read-only gate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateConfig {
    /// Minimum time between two provider queries.
    pub debounce: Duration,
    /// The single resource whose lock status is queried.
    pub manifest_path: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_secs(3),
            manifest_path: DEFAULT_MANIFEST_PATH.to_string(),
        }
    }
}

impl GateConfig {
    /// Default configuration querying a different manifest path.
    pub fn for_manifest(path: impl Into<String>) -> Self {
        Self {
            manifest_path: path.into(),
            ..Default::default()
        }
    }

    /// Replace the debounce window.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}
