use serde::{Deserialize, Serialize};

use crate::geometry::Aabb;

pub const AVATAR_SIZE: f32 = 50.0;
/// Center of the avatar box at the start of every session.
pub const AVATAR_START_CENTER: (f32, f32) = (100.0, 350.0);

pub const GRAVITY: f32 = 0.5;
pub const MAX_FALL_VELOCITY: f32 = 10.0;
pub const FLAP_IMPULSE: f32 = -8.0;

const DEGREES_PER_VELOCITY: f32 = 3.0;
const MAX_NOSE_UP_DEGREES: f32 = 45.0;
const MAX_NOSE_DOWN_DEGREES: f32 = -30.0;

/// The player's bird.
///
/// `x`/`y` are the top-left corner of its bounding box. Rotation is cosmetic only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    x: f32,
    y: f32,
    velocity_y: f32,
    rotation: f32,
}

impl Default for Avatar {
    fn default() -> Self {
        Self::new()
    }
}

impl Avatar {
    pub fn new() -> Self {
        let (cx, cy) = AVATAR_START_CENTER;
        Self::at(cx - AVATAR_SIZE / 2.0, cy - AVATAR_SIZE / 2.0)
    }

    pub fn at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            velocity_y: 0.0,
            rotation: 0.0,
        }
    }

    pub fn with_velocity(mut self, velocity_y: f32) -> Self {
        self.velocity_y = velocity_y;
        self
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn velocity_y(&self) -> f32 {
        self.velocity_y
    }

    /// Display angle in degrees, positive is nose-up.
    pub fn rotation_degrees(&self) -> f32 {
        self.rotation
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn bottom(&self) -> f32 {
        self.y + AVATAR_SIZE
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, AVATAR_SIZE, AVATAR_SIZE)
    }

    /// Upward impulse. Replaces the current velocity no matter what it was.
    pub fn flap(&mut self) {
        self.velocity_y = FLAP_IMPULSE;
    }

    pub fn tick(&mut self) {
        self.velocity_y = (self.velocity_y + GRAVITY).min(MAX_FALL_VELOCITY);
        self.y += self.velocity_y;
        self.rotation = (-self.velocity_y * DEGREES_PER_VELOCITY)
            .clamp(MAX_NOSE_DOWN_DEGREES, MAX_NOSE_UP_DEGREES);

        // The ceiling stops the bird; it is not fatal.
        if self.y <= 0.0 {
            self.y = 0.0;
            self.velocity_y = 0.0;
        }
    }

    pub fn collides_with(&self, other: &Aabb) -> bool {
        self.bounds().intersects(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_centered_on_start_point() {
        let avatar = Avatar::new();
        assert_eq!(avatar.bounds().center(), AVATAR_START_CENTER);
        assert_eq!(avatar.velocity_y(), 0.0);
    }

    #[test]
    fn one_tick_of_gravity_from_rest() {
        let mut avatar = Avatar::at(75.0, 350.0);
        avatar.tick();
        assert_eq!(avatar.velocity_y(), 0.5);
        assert_eq!(avatar.y(), 350.5);
    }

    #[test]
    fn fall_speed_never_exceeds_cap() {
        let mut avatar = Avatar::at(75.0, 10.0);
        for _ in 0..200 {
            avatar.tick();
            assert!(avatar.velocity_y() <= MAX_FALL_VELOCITY);
        }
        assert_eq!(avatar.velocity_y(), MAX_FALL_VELOCITY);
    }

    #[test]
    fn flap_sets_impulse_regardless_of_prior_velocity() {
        for prior in [-20.0, -8.0, 0.0, 3.5, MAX_FALL_VELOCITY] {
            let mut avatar = Avatar::at(75.0, 300.0).with_velocity(prior);
            avatar.flap();
            assert_eq!(avatar.velocity_y(), FLAP_IMPULSE);
        }
    }

    #[test]
    fn ceiling_clamps_position_and_zeroes_velocity() {
        let mut avatar = Avatar::at(75.0, 3.0).with_velocity(FLAP_IMPULSE);
        avatar.tick();
        assert_eq!(avatar.y(), 0.0);
        assert_eq!(avatar.velocity_y(), 0.0);
    }

    #[test]
    fn rotation_follows_velocity_within_limits() {
        let mut rising = Avatar::at(75.0, 300.0).with_velocity(FLAP_IMPULSE);
        rising.tick();
        // velocity -7.5 -> 22.5 degrees nose-up
        assert_eq!(rising.rotation_degrees(), 22.5);

        let mut falling = Avatar::at(75.0, 300.0).with_velocity(MAX_FALL_VELOCITY);
        falling.tick();
        assert_eq!(falling.rotation_degrees(), -30.0);

        let mut rocket = Avatar::at(75.0, 300.0).with_velocity(-40.0);
        rocket.tick();
        assert_eq!(rocket.rotation_degrees(), 45.0);
    }
}
