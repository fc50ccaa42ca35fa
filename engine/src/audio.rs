use std::fmt;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use crate::assets::AssetError;

/// An encoded sound clip kept in memory so it can be decoded again for every playback.
#[derive(Clone)]
pub struct Sound {
    bytes: Arc<[u8]>,
}

impl Sound {
    /// Reads and validates a clip (any format rodio can decode).
    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let bytes = fs::read(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let sound = Self {
            bytes: Arc::from(bytes),
        };
        sound.decoder().map_err(|source| AssetError::Sound {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(sound)
    }

    pub fn len_bytes(&self) -> usize {
        self.bytes.len()
    }

    fn decoder(&self) -> Result<Decoder<Cursor<Arc<[u8]>>>, rodio::decoder::DecoderError> {
        Decoder::new(Cursor::new(Arc::clone(&self.bytes)))
    }
}

impl fmt::Debug for Sound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sound")
            .field("len_bytes", &self.bytes.len())
            .finish()
    }
}

/// Handle to the default output device. Dropping it stops all audio.
pub struct AudioOutput {
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl AudioOutput {
    pub fn try_default() -> Result<Self, AssetError> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            handle,
        })
    }

    /// Fire-and-forget playback. Failures are swallowed; a missed cue is not worth a crash.
    pub fn play(&self, sound: &Sound, volume: f32) {
        if volume <= 0.0 {
            return;
        }
        let Ok(sink) = Sink::try_new(&self.handle) else {
            return;
        };
        let Ok(source) = sound.decoder() else {
            return;
        };
        sink.set_volume(volume.clamp(0.0, 1.0));
        sink.append(source);
        sink.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_clip_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = Sound::load(&dir.path().join("flap.wav")).unwrap_err();
        assert!(err.is_not_found(), "unexpected error: {err}");
    }

    fn tiny_wav(samples: &[i16]) -> Vec<u8> {
        let data_len = (samples.len() * 2) as u32;
        let mut out = Vec::new();
        out.extend_from_slice(b"RIFF");
        out.extend_from_slice(&(36 + data_len).to_le_bytes());
        out.extend_from_slice(b"WAVEfmt ");
        out.extend_from_slice(&16u32.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes()); // PCM
        out.extend_from_slice(&1u16.to_le_bytes()); // mono
        out.extend_from_slice(&8_000u32.to_le_bytes());
        out.extend_from_slice(&16_000u32.to_le_bytes());
        out.extend_from_slice(&2u16.to_le_bytes());
        out.extend_from_slice(&16u16.to_le_bytes());
        out.extend_from_slice(b"data");
        out.extend_from_slice(&data_len.to_le_bytes());
        for s in samples {
            out.extend_from_slice(&s.to_le_bytes());
        }
        out
    }

    #[test]
    fn load_valid_wav_keeps_encoded_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("point.wav");
        let wav = tiny_wav(&[0, 1_000, -1_000, 0]);
        fs::write(&path, &wav).unwrap();

        let sound = Sound::load(&path).unwrap();
        assert_eq!(sound.len_bytes(), wav.len());
    }

    #[test]
    fn load_garbage_clip_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hit.wav");
        fs::write(&path, b"RIFF? no.").unwrap();

        let err = Sound::load(&path).unwrap_err();
        assert!(matches!(err, AssetError::Sound { .. }), "unexpected error: {err}");
    }
}
