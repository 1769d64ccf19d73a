//! `sref.toml` loading.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use sref_sdk::ProjectOptions;
use tracing::debug;

pub const CONFIG_FILE: &str = "sref.toml";

/// Load project options from `explicit`, or from `sref.toml` under `root`.
///
/// A missing default file yields the defaults; a missing explicit file is an
/// error.
pub fn load(root: &Path, explicit: Option<&Path>) -> anyhow::Result<ProjectOptions> {
    let (path, required) = match explicit {
        Some(path) => (path.to_path_buf(), true),
        None => (root.join(CONFIG_FILE), false),
    };
    match fs::read_to_string(&path) {
        Ok(text) => parse(&text).with_context(|| format!("invalid config {}", path.display())),
        Err(e) if e.kind() == ErrorKind::NotFound && !required => {
            debug!(path = %path.display(), "no config file, using defaults");
            Ok(ProjectOptions::default())
        }
        Err(e) => Err(e).with_context(|| format!("cannot read config {}", path.display())),
    }
}

pub fn parse(text: &str) -> anyhow::Result<ProjectOptions> {
    Ok(toml::from_str(text)?)
}

/// Manifest path the options point at, relative to `root`.
pub fn manifest_file(root: &Path, options: &ProjectOptions) -> PathBuf {
    root.join(&options.manifest)
}
