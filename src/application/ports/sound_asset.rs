//! Recorded sound loading port

use std::path::Path;

use thiserror::Error;

use crate::domain::config::StreamSpec;

#[derive(Debug, Clone, Error)]
pub enum AssetError {
    #[error("Failed to open sound file: {0}")]
    NotFound(String),

    #[error("Failed to decode sound file: {0}")]
    DecodeFailed(String),

    #[error("Sound file contains no audio: {0}")]
    Empty(String),
}

/// Port for loading a recorded sound in place of the synthesized tone
pub trait SoundAssetLoader {
    /// Load `path` converted to `spec` as interleaved f32 samples
    fn load(&self, path: &Path, spec: StreamSpec) -> Result<Vec<f32>, AssetError>;
}
