use sref_types::AssetPath;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("no scene asset at {0}")]
    NotAScene(AssetPath),

    #[error("{0} is already in the build manifest")]
    AlreadyInManifest(AssetPath),

    #[error("build manifest {0} is read-only; check it out first")]
    ReadOnly(String),

    #[error("asset error: {0}")]
    Asset(#[from] sref_assets::AssetError),

    #[error("manifest error: {0}")]
    Manifest(#[from] sref_manifest::ManifestError),
}

pub type SdkResult<T> = Result<T, SdkError>;
