use std::path::{Path, PathBuf};

use engine::graphics::Color;
use engine::sprite::Sprite;
use engine::ui::Size;
use tracing::{info, warn};

use crate::avatar::AVATAR_SIZE;
use crate::geometry::Playfield;
use crate::obstacle::OBSTACLE_WIDTH;

pub const BIRD_IMAGE_FILE: &str = "bird.png";
pub const PIPE_IMAGE_FILE: &str = "pipe.png";
pub const BACKGROUND_IMAGE_FILE: &str = "background.png";

/// Pipe art is this tall; the top pipe hangs from `gap_top - PIPE_SPRITE_HEIGHT`.
pub const PIPE_SPRITE_HEIGHT: u32 = 500;

pub const SKY_COLOR: Color = [135, 206, 235, 255];
pub const PLACEHOLDER_OUTLINE: Color = [255, 0, 0, 255];

/// Directory the binaries look in when no `--assets` flag is given.
pub fn default_asset_dir() -> PathBuf {
    std::env::var_os("FLAPPY_ASSET_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Sprites for one run, each either decoded from disk or a stand-in.
#[derive(Debug, Clone)]
pub struct GameAssets {
    pub bird: Sprite,
    pub pipe: Sprite,
    /// `pipe` upside down, used for the top segment.
    pub pipe_flipped: Sprite,
    pub background: Sprite,
}

impl GameAssets {
    /// Loads every image under `dir`, substituting placeholders for any that fail.
    pub fn load(dir: &Path, playfield: Playfield) -> Self {
        let bird = load_or(dir, BIRD_IMAGE_FILE, bird_size(), placeholder_bird);
        let pipe = load_or(dir, PIPE_IMAGE_FILE, pipe_size(), placeholder_pipe);
        let background = load_or(
            dir,
            BACKGROUND_IMAGE_FILE,
            playfield_size(playfield),
            || placeholder_background(playfield),
        );
        Self::from_parts(bird, pipe, background)
    }

    /// All stand-ins, no disk access.
    pub fn placeholder(playfield: Playfield) -> Self {
        Self::from_parts(
            placeholder_bird(),
            placeholder_pipe(),
            placeholder_background(playfield),
        )
    }

    fn from_parts(bird: Sprite, pipe: Sprite, background: Sprite) -> Self {
        let pipe_flipped = pipe.flipped_vertically();
        Self {
            bird,
            pipe,
            pipe_flipped,
            background,
        }
    }
}

fn load_or(dir: &Path, file: &str, size: Size, fallback: impl FnOnce() -> Sprite) -> Sprite {
    let path = dir.join(file);
    match Sprite::load(&path, Some(size)) {
        Ok(sprite) => {
            info!(path = %path.display(), "loaded image");
            sprite
        }
        Err(err) => {
            warn!("{err}; using placeholder");
            fallback()
        }
    }
}

fn bird_size() -> Size {
    Size::new(AVATAR_SIZE as u32, AVATAR_SIZE as u32)
}

fn pipe_size() -> Size {
    Size::new(OBSTACLE_WIDTH as u32, PIPE_SPRITE_HEIGHT)
}

fn playfield_size(playfield: Playfield) -> Size {
    Size::new(playfield.width as u32, playfield.height as u32)
}

fn placeholder_bird() -> Sprite {
    Sprite::outlined(bird_size(), PLACEHOLDER_OUTLINE)
}

fn placeholder_pipe() -> Sprite {
    Sprite::outlined(pipe_size(), PLACEHOLDER_OUTLINE)
}

fn placeholder_background(playfield: Playfield) -> Sprite {
    Sprite::solid(playfield_size(playfield), SKY_COLOR)
}
