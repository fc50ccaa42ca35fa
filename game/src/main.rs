use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use engine::app::{AppConfig, run_game};
use engine::audio::AudioOutput;
use engine::surface::SurfaceSize;
use flappy::assets::{GameAssets, default_asset_dir};
use flappy::geometry::Playfield;
use flappy::headful::FlappyApp;
use flappy::high_score::HighScoreStore;
use flappy::session::GameSession;
use flappy::settings::SettingsStore;
use flappy::sfx::SoundCues;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

pub const TICKS_PER_SECOND: u32 = 60;

#[derive(Debug, Parser)]
#[command(name = "flappy")]
#[command(about = "Flap between the pipes for as long as you can")]
struct Cli {
    /// Directory holding bird.png, pipe.png, background.png and the .wav cues.
    #[arg(long)]
    assets: Option<PathBuf>,
    /// Seed for pipe gaps; random if omitted.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = SettingsStore::from_env().load();
    let asset_dir = cli.assets.unwrap_or_else(default_asset_dir);
    let seed = cli.seed.unwrap_or_else(rand::random);
    info!(assets = %asset_dir.display(), seed, "starting flappy");

    let playfield = Playfield::DEFAULT;
    let assets = GameAssets::load(&asset_dir, playfield);

    let output = match AudioOutput::try_default() {
        Ok(output) => Some(output),
        Err(err) => {
            warn!("{err}; sound disabled");
            None
        }
    };
    let sfx = SoundCues::from_dir(&asset_dir)
        .with_gain(settings.audio.effective_sfx_gain())
        .with_output(output);

    let high_scores = HighScoreStore::from_env();
    let high_score = high_scores.load();
    info!(path = %high_scores.path().display(), high_score, "loaded high score");

    let session = GameSession::with_playfield(playfield, high_score, seed, 0);
    let app = FlappyApp::new(session, assets, sfx, high_scores);

    let config = AppConfig {
        title: "Flappy Bird".to_string(),
        logical_size: SurfaceSize::new(playfield.width as u32, playfield.height as u32),
        window_scale: settings.video.window_scale(),
        clamp_to_monitor: true,
        vsync: settings.video.vsync,
        ticks_per_second: TICKS_PER_SECOND,
    };
    run_game(config, app).context("failed to run the game window")
}
