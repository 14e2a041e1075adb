//! Rodio-based sound asset loader
//!
//! Decodes a sound file and converts it to the stream's channel count and
//! sample rate once at startup.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::source::UniformSourceIterator;
use rodio::Decoder;
use tracing::debug;

use crate::application::ports::{AssetError, SoundAssetLoader};
use crate::domain::config::StreamSpec;

/// Sound asset loader using rodio's decoders
#[derive(Debug, Default)]
pub struct RodioAssetLoader;

impl RodioAssetLoader {
    pub fn new() -> Self {
        Self
    }
}

impl SoundAssetLoader for RodioAssetLoader {
    fn load(&self, path: &Path, spec: StreamSpec) -> Result<Vec<f32>, AssetError> {
        let path_str = path.display().to_string();
        let file =
            File::open(path).map_err(|e| AssetError::NotFound(format!("{}: {}", path_str, e)))?;
        let decoder = Decoder::new(BufReader::new(file))
            .map_err(|e| AssetError::DecodeFailed(format!("{}: {}", path_str, e)))?;

        let samples: Vec<f32> =
            UniformSourceIterator::<_, f32>::new(decoder, spec.channels, spec.sample_rate)
                .collect();

        if samples.is_empty() {
            return Err(AssetError::Empty(path_str));
        }

        debug!(
            path = %path_str,
            samples = samples.len(),
            channels = spec.channels,
            sample_rate = spec.sample_rate,
            "loaded sound asset"
        );
        Ok(samples)
    }
}
