use std::io;
use std::path::PathBuf;

/// Failure to load an image or sound, or to open an audio device.
///
/// Loaders return this so callers can pick an explicit fallback (placeholder art, silence)
/// instead of aborting.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to decode sound {}: {source}", path.display())]
    Sound {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },

    #[error("no audio output available: {0}")]
    AudioOutput(#[from] rodio::StreamError),
}

impl AssetError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, AssetError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}
