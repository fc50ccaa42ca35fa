use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

pub const DEFAULT_HIGH_SCORE_FILE: &str = "high_score.txt";

/// The best score ever reached, stored as a bare decimal integer in a text file.
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `FLAPPY_HIGH_SCORE_PATH` if set, otherwise `high_score.txt` in the working directory.
    pub fn from_env() -> Self {
        let path = std::env::var_os("FLAPPY_HIGH_SCORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_HIGH_SCORE_FILE));
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or unreadable files count as a high score of 0.
    pub fn load(&self) -> u32 {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no high score file yet");
                return 0;
            }
            Err(err) => {
                warn!(path = %self.path.display(), "failed to read high score: {err}");
                return 0;
            }
        };
        text.trim().parse::<u32>().unwrap_or_else(|err| {
            warn!(path = %self.path.display(), "ignoring malformed high score: {err}");
            0
        })
    }

    pub fn save(&self, high_score: u32) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, high_score.to_string())
    }
}
