use engine::GameLogic;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::avatar::Avatar;
use crate::geometry::Playfield;
use crate::obstacle_stream::ObstacleStream;
use crate::phase::{GamePhase, PhaseEffect, PhaseEvent};

/// Discrete input delivered by the adapter once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Start from the menu, flap while playing, restart after a crash.
    Action,
    /// Leave the game. Handled by the adapter; the session ignores it.
    Quit,
}

/// Something that happened during a tick which the adapter may want to hear about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Flap,
    Point,
    Hit,
}

/// One game of flappy plus the state that outlives it (high score, RNG).
#[derive(Debug, Clone)]
pub struct GameSession {
    phase: GamePhase,
    avatar: Avatar,
    stream: ObstacleStream,
    score: u32,
    high_score: u32,
    playfield: Playfield,
    rng: StdRng,
    events: Vec<GameEvent>,
}

impl GameSession {
    pub fn new(high_score: u32, seed: u64, now_ms: u64) -> Self {
        Self::with_playfield(Playfield::DEFAULT, high_score, seed, now_ms)
    }

    pub fn with_playfield(playfield: Playfield, high_score: u32, seed: u64, now_ms: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let stream = ObstacleStream::seeded(playfield, now_ms, &mut rng);
        Self::assemble(GamePhase::Menu, Avatar::new(), stream, high_score, playfield, rng)
    }

    /// Session resumed mid-flight from an explicit phase, bird, and pipe stream, with a score
    /// of 0. Later resets reseed pipes from `seed`.
    pub fn from_parts(
        phase: GamePhase,
        avatar: Avatar,
        stream: ObstacleStream,
        high_score: u32,
        seed: u64,
    ) -> Self {
        let playfield = stream.playfield();
        let rng = StdRng::seed_from_u64(seed);
        Self::assemble(phase, avatar, stream, high_score, playfield, rng)
    }

    fn assemble(
        phase: GamePhase,
        avatar: Avatar,
        stream: ObstacleStream,
        high_score: u32,
        playfield: Playfield,
        rng: StdRng,
    ) -> Self {
        Self {
            phase,
            avatar,
            stream,
            score: 0,
            high_score,
            playfield,
            rng,
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn avatar(&self) -> &Avatar {
        &self.avatar
    }

    pub fn stream(&self) -> &ObstacleStream {
        &self.stream
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// The high score with the run in progress folded in.
    pub fn best_score(&self) -> u32 {
        self.high_score.max(self.score)
    }

    pub fn playfield(&self) -> Playfield {
        self.playfield
    }

    /// Events emitted by the most recent `tick`.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Back to the menu with a new bird and freshly seeded pipes. The high score survives.
    pub fn reset(&mut self, now_ms: u64) {
        self.avatar = Avatar::new();
        self.stream = ObstacleStream::seeded(self.playfield, now_ms, &mut self.rng);
        self.score = 0;
        self.phase = GamePhase::Menu;
    }

    /// One simulation step: apply input, then (while playing) move the bird, move the pipes,
    /// and check for a crash.
    pub fn tick(&mut self, now_ms: u64, commands: &[Command]) {
        self.events.clear();

        for command in commands {
            if *command == Command::Action {
                self.apply(PhaseEvent::Action, now_ms);
            }
        }

        if self.phase.is_playing() {
            self.advance(now_ms);
        }
    }

    fn advance(&mut self, now_ms: u64) {
        self.avatar.tick();

        let points = self
            .stream
            .tick(now_ms, self.avatar.left(), &mut self.score, &mut self.rng);
        for _ in 0..points {
            self.events.push(GameEvent::Point);
        }

        let bounds = self.avatar.bounds();
        if self.stream.collides_with(&bounds) || bounds.bottom() >= self.playfield.height {
            self.apply(PhaseEvent::Crash, now_ms);
        }
    }

    fn apply(&mut self, event: PhaseEvent, now_ms: u64) {
        let previous = self.phase;
        let (next, effect) = previous.handle(event);
        match effect {
            PhaseEffect::None => {}
            PhaseEffect::StartRun => self.stream.restart_clock(now_ms),
            PhaseEffect::Flap => {
                self.avatar.flap();
                self.events.push(GameEvent::Flap);
            }
            PhaseEffect::ResetSession => self.reset(now_ms),
            PhaseEffect::RecordHighScore => {
                self.high_score = self.best_score();
                self.events.push(GameEvent::Hit);
            }
        }
        if next != previous {
            debug!(from = ?previous, to = ?next, score = self.score, "phase change");
        }
        self.phase = next;
    }
}

/// Input for one headless step: the wall clock and whatever was pressed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub now_ms: u64,
    pub commands: Vec<Command>,
}

impl TickInput {
    pub fn idle(now_ms: u64) -> Self {
        Self {
            now_ms,
            commands: Vec::new(),
        }
    }

    pub fn action(now_ms: u64) -> Self {
        Self {
            now_ms,
            commands: vec![Command::Action],
        }
    }
}

/// Adapts `GameSession` to the engine's `GameLogic` so it can run under `HeadlessRunner`.
#[derive(Debug, Clone)]
pub struct FlappyLogic {
    seed: u64,
    high_score: u32,
    playfield: Playfield,
}

impl FlappyLogic {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            high_score: 0,
            playfield: Playfield::DEFAULT,
        }
    }

    pub fn with_high_score(mut self, high_score: u32) -> Self {
        self.high_score = high_score;
        self
    }

    pub fn with_playfield(mut self, playfield: Playfield) -> Self {
        self.playfield = playfield;
        self
    }
}

impl GameLogic for FlappyLogic {
    type State = GameSession;
    type Input = TickInput;

    fn initial_state(&self) -> Self::State {
        GameSession::with_playfield(self.playfield, self.high_score, self.seed, 0)
    }

    fn step(&self, state: &Self::State, input: Self::Input) -> Self::State {
        let mut next = state.clone();
        next.tick(input.now_ms, &input.commands);
        next
    }
}
