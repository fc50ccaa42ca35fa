use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::geometry::{Aabb, Playfield};
use crate::obstacle::Obstacle;

pub const INITIAL_SPAWN_INTERVAL_MS: u64 = 1_500;
pub const MIN_SPAWN_INTERVAL_MS: u64 = 800;
pub const SPAWN_INTERVAL_STEP_MS: u64 = 100;
/// The spawn interval tightens each time the score reaches a multiple of this.
pub const SCORE_PER_SPEEDUP: u32 = 5;

pub const SEEDED_OBSTACLES: usize = 2;
pub const SEEDED_SPACING: f32 = 400.0;

/// The live pipes, oldest first, plus the time-based spawn schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleStream {
    obstacles: Vec<Obstacle>,
    playfield: Playfield,
    last_spawn_ms: u64,
    spawn_interval_ms: u64,
}

impl ObstacleStream {
    /// Fresh stream with a couple of obstacles already queued past the right edge, so the
    /// player has some lead time before the first one arrives.
    pub fn seeded<R: Rng + ?Sized>(playfield: Playfield, now_ms: u64, rng: &mut R) -> Self {
        let obstacles = (0..SEEDED_OBSTACLES)
            .map(|i| {
                let x = playfield.width + i as f32 * SEEDED_SPACING;
                Obstacle::spawn(x, playfield.height, rng)
            })
            .collect();
        Self {
            obstacles,
            playfield,
            last_spawn_ms: now_ms,
            spawn_interval_ms: INITIAL_SPAWN_INTERVAL_MS,
        }
    }

    pub fn empty(playfield: Playfield, now_ms: u64) -> Self {
        Self::with_obstacles(playfield, now_ms, Vec::new())
    }

    /// Stream holding exactly `obstacles` (oldest first) with a fresh spawn schedule.
    pub fn with_obstacles(playfield: Playfield, now_ms: u64, obstacles: Vec<Obstacle>) -> Self {
        Self {
            obstacles,
            playfield,
            last_spawn_ms: now_ms,
            spawn_interval_ms: INITIAL_SPAWN_INTERVAL_MS,
        }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn playfield(&self) -> Playfield {
        self.playfield
    }

    pub fn spawn_interval_ms(&self) -> u64 {
        self.spawn_interval_ms
    }

    pub fn last_spawn_ms(&self) -> u64 {
        self.last_spawn_ms
    }

    /// Counts the next spawn from `now_ms`, so time spent before a run starts never comes due
    /// all at once.
    pub fn restart_clock(&mut self, now_ms: u64) {
        self.last_spawn_ms = now_ms;
    }

    /// Spawns on schedule, scrolls every obstacle, scores pass-throughs, then drops whatever
    /// has left the screen. Returns how many points were scored this tick.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        now_ms: u64,
        avatar_left: f32,
        score: &mut u32,
        rng: &mut R,
    ) -> u32 {
        if now_ms.saturating_sub(self.last_spawn_ms) > self.spawn_interval_ms {
            self.obstacles
                .push(Obstacle::spawn(self.playfield.width, self.playfield.height, rng));
            self.last_spawn_ms = now_ms;
        }

        let mut points = 0;
        for obstacle in &mut self.obstacles {
            obstacle.tick();
            if obstacle.is_passed(avatar_left) {
                obstacle.mark_scored();
                *score += 1;
                points += 1;
                if *score % SCORE_PER_SPEEDUP == 0 {
                    self.spawn_interval_ms = self
                        .spawn_interval_ms
                        .saturating_sub(SPAWN_INTERVAL_STEP_MS)
                        .max(MIN_SPAWN_INTERVAL_MS);
                }
            }
        }

        self.obstacles.retain(|o| !o.is_off_screen());
        points
    }

    pub fn collides_with(&self, avatar_box: &Aabb) -> bool {
        self.obstacles.iter().any(|o| o.collides_with(avatar_box))
    }
}
