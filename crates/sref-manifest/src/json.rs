//! JSON file manifest store.
//!
//! The manifest is a single JSON document:
//!
//! ```json
//! { "version": 1, "scenes": [ { "identifier": "…", "path": "…", "enabled": true } ] }
//! ```
//!
//! Writes go to a temporary file in the same directory which is then renamed
//! over the target, so readers never observe a half-written manifest.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::entry::ManifestEntry;
use crate::error::{ManifestError, ManifestResult};
use crate::traits::ManifestStore;

const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct ManifestFile {
    version: u32,
    #[serde(default)]
    scenes: Vec<ManifestEntry>,
}

/// A [`ManifestStore`] persisted as a JSON file.
#[derive(Clone, Debug)]
pub struct JsonManifestStore {
    path: PathBuf,
}

impl JsonManifestStore {
    /// Use the manifest file at `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the manifest file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ManifestStore for JsonManifestStore {
    fn read_all(&self) -> ManifestResult<Vec<ManifestEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        let file: ManifestFile = serde_json::from_str(&contents).map_err(|e| {
            ManifestError::Serialization(format!("{}: {e}", self.path.display()))
        })?;
        if file.version > FORMAT_VERSION {
            return Err(ManifestError::Serialization(format!(
                "{}: unsupported manifest version {}",
                self.path.display(),
                file.version
            )));
        }
        Ok(file.scenes)
    }

    fn write_all(&self, entries: &[ManifestEntry]) -> ManifestResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let file = ManifestFile {
            version: FORMAT_VERSION,
            scenes: entries.to_vec(),
        };
        let serialized = serde_json::to_string_pretty(&file)
            .map_err(|e| ManifestError::Serialization(e.to_string()))?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(serialized.as_bytes())?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        debug!(path = %self.path.display(), scenes = entries.len(), "wrote manifest");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sref_types::AssetId;
    use tempfile::TempDir;

    #[test]
    fn missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonManifestStore::new(dir.path().join("EditorBuildSettings.json"));
        assert!(store.read_all().unwrap().is_empty());
    }

    #[test]
    fn written_manifest_reads_back_in_order() {
        let dir = TempDir::new().unwrap();
        let store = JsonManifestStore::new(dir.path().join("ProjectSettings/build.json"));
        let entries = vec![
            ManifestEntry::new(AssetId::generate(), "Assets/Boot.unity", true),
            ManifestEntry::new(AssetId::generate(), "Assets/Menu.unity", false),
            ManifestEntry::new(AssetId::generate(), "Assets/Level1.unity", true),
        ];

        store.write_all(&entries).unwrap();
        assert_eq!(store.read_all().unwrap(), entries);

        // Overwrite with a shorter list.
        store.write_all(&entries[1..]).unwrap();
        assert_eq!(store.read_all().unwrap(), entries[1..].to_vec());
    }

    #[test]
    fn garbage_file_is_a_serialization_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("build.json");
        fs::write(&path, "{ not json").unwrap();

        let err = JsonManifestStore::new(&path).read_all().unwrap_err();
        assert!(matches!(err, ManifestError::Serialization(_)));
    }

    #[test]
    fn newer_format_version_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("build.json");
        fs::write(&path, r#"{"version": 99, "scenes": []}"#).unwrap();

        let err = JsonManifestStore::new(&path).read_all().unwrap_err();
        assert!(err.to_string().contains("unsupported manifest version"));
    }
}
