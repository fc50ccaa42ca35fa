use std::time::Duration;

use engine::app::{AppFlow, GameApp};
use engine::graphics::Renderer2d;
use tracing::{info, warn};
use winit::event::{MouseButton, VirtualKeyCode};

use crate::assets::GameAssets;
use crate::high_score::HighScoreStore;
use crate::hud;
use crate::session::{Command, GameSession};
use crate::sfx::SoundCues;

pub fn command_for_key(key: VirtualKeyCode) -> Option<Command> {
    match key {
        VirtualKeyCode::Space => Some(Command::Action),
        VirtualKeyCode::Escape => Some(Command::Quit),
        _ => None,
    }
}

pub fn command_for_mouse(button: MouseButton) -> Option<Command> {
    match button {
        MouseButton::Left => Some(Command::Action),
        _ => None,
    }
}

/// The windowed game: feeds commands into the session, plays cues, draws, and persists the
/// high score on the way out.
pub struct FlappyApp {
    session: GameSession,
    assets: GameAssets,
    sfx: SoundCues,
    high_scores: HighScoreStore,
}

impl FlappyApp {
    pub fn new(
        session: GameSession,
        assets: GameAssets,
        sfx: SoundCues,
        high_scores: HighScoreStore,
    ) -> Self {
        Self {
            session,
            assets,
            sfx,
            high_scores,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Persists the best score, counting a run that is still in progress.
    fn save_high_score(&self) {
        let high_score = self.session.best_score();
        match self.high_scores.save(high_score) {
            Ok(()) => info!(
                path = %self.high_scores.path().display(),
                high_score,
                "saved high score"
            ),
            Err(err) => warn!(
                path = %self.high_scores.path().display(),
                "failed to save high score: {err}"
            ),
        }
    }
}

impl GameApp for FlappyApp {
    type Command = Command;

    fn command_for_key(&self, key: VirtualKeyCode) -> Option<Command> {
        command_for_key(key)
    }

    fn command_for_mouse(&self, button: MouseButton) -> Option<Command> {
        command_for_mouse(button)
    }

    fn update(&mut self, commands: &[Command], since_start: Duration) -> AppFlow {
        if commands.contains(&Command::Quit) {
            return AppFlow::Exit;
        }

        let now_ms = u64::try_from(since_start.as_millis()).unwrap_or(u64::MAX);
        self.session.tick(now_ms, commands);
        for event in self.session.events() {
            self.sfx.play(*event);
        }
        AppFlow::Continue
    }

    fn render(&mut self, gfx: &mut dyn Renderer2d) {
        hud::draw_session(gfx, &self.session, &self.assets);
    }

    fn shutdown(&mut self) {
        self.save_high_score();
    }
}
