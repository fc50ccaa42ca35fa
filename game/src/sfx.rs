use std::path::Path;

use engine::audio::{AudioOutput, Sound};
use tracing::{debug, warn};

use crate::session::GameEvent;

/// Per-cue volume (0.0..=1.0), multiplied by the player's sfx gain.
///
/// Flap fires constantly, so it sits under the point and hit cues.
pub const FLAP_SFX_VOLUME: f32 = 0.35;
pub const POINT_SFX_VOLUME: f32 = 0.5;
pub const HIT_SFX_VOLUME: f32 = 0.6;

pub const FLAP_SOUND_FILE: &str = "flap.wav";
pub const POINT_SOUND_FILE: &str = "point.wav";
pub const HIT_SOUND_FILE: &str = "hit.wav";

pub fn cue_volume(event: GameEvent) -> f32 {
    match event {
        GameEvent::Flap => FLAP_SFX_VOLUME,
        GameEvent::Point => POINT_SFX_VOLUME,
        GameEvent::Hit => HIT_SFX_VOLUME,
    }
}

/// The three gameplay cues plus the device they play on. Any of them may be missing, in which
/// case that event is simply silent.
#[derive(Default)]
pub struct SoundCues {
    flap: Option<Sound>,
    point: Option<Sound>,
    hit: Option<Sound>,
    output: Option<AudioOutput>,
    gain: f32,
}

impl SoundCues {
    pub fn silent() -> Self {
        Self::default()
    }

    /// Loads whichever clips exist under `dir`. Does not open an audio device.
    pub fn from_dir(dir: &Path) -> Self {
        Self {
            flap: load_clip(dir, FLAP_SOUND_FILE),
            point: load_clip(dir, POINT_SOUND_FILE),
            hit: load_clip(dir, HIT_SOUND_FILE),
            output: None,
            gain: 1.0,
        }
    }

    pub fn with_output(mut self, output: Option<AudioOutput>) -> Self {
        self.output = output;
        self
    }

    pub fn with_gain(mut self, gain: f32) -> Self {
        self.gain = gain.clamp(0.0, 1.0);
        self
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    pub fn loaded_count(&self) -> usize {
        [&self.flap, &self.point, &self.hit]
            .iter()
            .filter(|clip| clip.is_some())
            .count()
    }

    pub fn has_output(&self) -> bool {
        self.output.is_some()
    }

    pub fn play(&self, event: GameEvent) {
        let Some(output) = self.output.as_ref() else {
            return;
        };
        let clip = match event {
            GameEvent::Flap => self.flap.as_ref(),
            GameEvent::Point => self.point.as_ref(),
            GameEvent::Hit => self.hit.as_ref(),
        };
        if let Some(clip) = clip {
            output.play(clip, cue_volume(event) * self.gain);
        }
    }
}

fn load_clip(dir: &Path, file: &str) -> Option<Sound> {
    let path = dir.join(file);
    match Sound::load(&path) {
        Ok(sound) => {
            debug!(path = %path.display(), bytes = sound.len_bytes(), "loaded sound");
            Some(sound)
        }
        Err(err) => {
            warn!("{err}; continuing without it");
            None
        }
    }
}
