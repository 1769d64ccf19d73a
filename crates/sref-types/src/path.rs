use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// File extension that marks an asset as a scene.
pub const SCENE_EXTENSION: &str = "unity";

/// Coarse classification of an asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    /// A scene asset, eligible for the build manifest.
    Scene,
    /// Any other asset type.
    Other,
}

/// Project-relative asset path using `/` separators (e.g.
/// `Assets/Scenes/Main.unity`).
///
/// Paths are mutable properties of an asset: renaming or moving the asset
/// changes its path but not its [`AssetId`](crate::AssetId).
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct AssetPath(String);

impl AssetPath {
    /// Wrap a path, normalising `\` separators to `/`.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        if path.contains('\\') {
            Self(path.replace('\\', "/"))
        } else {
            Self(path)
        }
    }

    /// Wrap a path after checking it is a non-empty relative path without
    /// `..` segments.
    pub fn parse(path: &str) -> Result<Self, TypeError> {
        let path = Self::new(path.trim());
        if path.is_empty() {
            return Err(TypeError::InvalidPath("empty path".to_string()));
        }
        if path.0.starts_with('/') || path.0.contains(':') {
            return Err(TypeError::InvalidPath(format!(
                "{}: must be project-relative",
                path.0
            )));
        }
        if path.0.split('/').any(|segment| segment == "..") {
            return Err(TypeError::InvalidPath(format!(
                "{}: parent segments are not allowed",
                path.0
            )));
        }
        Ok(path)
    }

    /// The empty path.
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Returns `true` if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The final path segment (`Main.unity` for `Assets/Scenes/Main.unity`).
    pub fn file_name(&self) -> &str {
        match self.0.rfind('/') {
            Some(idx) => &self.0[idx + 1..],
            None => &self.0,
        }
    }

    /// The extension of the final segment, without the dot.
    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name();
        name.rfind('.').map(|idx| &name[idx + 1..])
    }

    /// The final segment minus its extension (`Main` for
    /// `Assets/Scenes/Main.unity`). A segment without a dot is returned whole.
    pub fn display_name(&self) -> &str {
        let name = self.file_name();
        match name.rfind('.') {
            Some(idx) => &name[..idx],
            None => name,
        }
    }

    /// Classify the asset by its extension.
    pub fn kind(&self) -> AssetKind {
        match self.extension() {
            Some(ext) if ext.eq_ignore_ascii_case(SCENE_EXTENSION) => AssetKind::Scene,
            _ => AssetKind::Other,
        }
    }

    /// Consume the path and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for AssetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssetPath({:?})", self.0)
    }
}

impl fmt::Display for AssetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AssetPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for AssetPath {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

impl From<AssetPath> for String {
    fn from(path: AssetPath) -> Self {
        path.0
    }
}

impl AsRef<str> for AssetPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
