use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::geometry::Aabb;

pub const OBSTACLE_WIDTH: f32 = 80.0;
pub const GAP_HEIGHT: f32 = 200.0;
/// Minimum distance between the gap and the top or bottom of the playfield.
pub const GAP_MARGIN: f32 = 100.0;
pub const SCROLL_SPEED: f32 = 5.0;

/// A pipe pair: a top segment from the ceiling down to `gap_top`, and a bottom segment from
/// `gap_bottom` to the floor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    x: f32,
    gap_top: f32,
    playfield_height: f32,
    scored: bool,
}

impl Obstacle {
    /// New obstacle at `x` with a gap placed uniformly inside the margins.
    pub fn spawn<R: Rng + ?Sized>(x: f32, playfield_height: f32, rng: &mut R) -> Self {
        let highest = GAP_MARGIN;
        // Playfields too short for both margins collapse to the highest legal gap.
        let lowest = (playfield_height - GAP_HEIGHT - GAP_MARGIN).max(highest);
        let gap_top = rng.gen_range(highest..=lowest);
        Self::with_gap(x, gap_top, playfield_height)
    }

    pub fn with_gap(x: f32, gap_top: f32, playfield_height: f32) -> Self {
        Self {
            x,
            gap_top,
            playfield_height,
            scored: false,
        }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + OBSTACLE_WIDTH
    }

    pub fn gap_top(&self) -> f32 {
        self.gap_top
    }

    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + GAP_HEIGHT
    }

    pub fn scored(&self) -> bool {
        self.scored
    }

    pub fn mark_scored(&mut self) {
        self.scored = true;
    }

    pub fn tick(&mut self) {
        self.x -= SCROLL_SPEED;
    }

    pub fn top_rect(&self) -> Aabb {
        Aabb::new(self.x, 0.0, OBSTACLE_WIDTH, self.gap_top)
    }

    pub fn bottom_rect(&self) -> Aabb {
        let bottom = self.gap_bottom();
        Aabb::new(
            self.x,
            bottom,
            OBSTACLE_WIDTH,
            (self.playfield_height - bottom).max(0.0),
        )
    }

    pub fn collides_with(&self, avatar_box: &Aabb) -> bool {
        self.top_rect().intersects(avatar_box) || self.bottom_rect().intersects(avatar_box)
    }

    pub fn is_off_screen(&self) -> bool {
        self.right() < 0.0
    }

    /// True the first time the obstacle's trailing edge is left of `avatar_left`.
    /// The caller marks it scored after counting the point.
    pub fn is_passed(&self, avatar_left: f32) -> bool {
        !self.scored && self.right() < avatar_left
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn spawned_gaps_fit_inside_playfield() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let o = Obstacle::spawn(1000.0, 700.0, &mut rng);
            assert!(o.gap_top() >= GAP_MARGIN);
            assert!(o.gap_top() >= 0.0);
            assert!(o.gap_bottom() <= 700.0 - GAP_MARGIN);
            assert_eq!(o.gap_bottom() - o.gap_top(), GAP_HEIGHT);
            assert!(!o.scored());
        }
    }

    #[test]
    fn short_playfield_still_spawns() {
        let mut rng = StdRng::seed_from_u64(1);
        let o = Obstacle::spawn(0.0, 250.0, &mut rng);
        assert_eq!(o.gap_top(), GAP_MARGIN);
    }

    #[test]
    fn three_ticks_scroll_fifteen_units() {
        let mut o = Obstacle::with_gap(1000.0, 250.0, 700.0);
        for _ in 0..3 {
            o.tick();
        }
        assert_eq!(o.x(), 985.0);
    }

    #[test]
    fn box_inside_gap_does_not_collide() {
        let o = Obstacle::with_gap(100.0, 250.0, 700.0);
        let inside = Aabb::new(110.0, 260.0, 50.0, 50.0);
        assert!(!o.collides_with(&inside));
    }

    #[test]
    fn box_overlapping_top_segment_collides() {
        let o = Obstacle::with_gap(100.0, 250.0, 700.0);
        let clipping_top = Aabb::new(110.0, 230.0, 50.0, 50.0);
        assert!(o.collides_with(&clipping_top));
    }

    #[test]
    fn box_overlapping_bottom_segment_collides() {
        let o = Obstacle::with_gap(100.0, 250.0, 700.0);
        let clipping_bottom = Aabb::new(60.0, 420.0, 50.0, 50.0);
        assert!(o.collides_with(&clipping_bottom));
    }

    #[test]
    fn segment_rects_cover_everything_but_the_gap() {
        let o = Obstacle::with_gap(40.0, 180.0, 700.0);
        assert_eq!(o.top_rect(), Aabb::new(40.0, 0.0, OBSTACLE_WIDTH, 180.0));
        assert_eq!(o.bottom_rect(), Aabb::new(40.0, 380.0, OBSTACLE_WIDTH, 320.0));
    }

    #[test]
    fn off_screen_only_once_fully_past_left_edge() {
        let mut o = Obstacle::with_gap(-OBSTACLE_WIDTH, 200.0, 700.0);
        assert!(!o.is_off_screen());
        o.tick();
        assert!(o.is_off_screen());
    }

    #[test]
    fn passed_is_reported_until_marked() {
        let mut o = Obstacle::with_gap(-10.0, 200.0, 700.0);
        assert!(o.is_passed(75.0));
        o.mark_scored();
        assert!(!o.is_passed(75.0));
    }
}
