use engine::graphics::{Color, Renderer2d, text_size};
use engine::ui::{Anchor, Rect};

use crate::assets::{GameAssets, PIPE_SPRITE_HEIGHT};
use crate::phase::GamePhase;
use crate::session::GameSession;

pub const TEXT_COLOR: Color = [255, 255, 255, 255];
pub const GAME_OVER_SHADE: Color = [0, 0, 0, 255];
pub const GAME_OVER_SHADE_ALPHA: u8 = 128;

pub const TITLE_SCALE: u32 = 6;
pub const BODY_SCALE: u32 = 3;
pub const SCORE_POSITION: (i32, i32) = (10, 10);

/// Draws one full frame for the session's current phase.
pub fn draw_session(gfx: &mut dyn Renderer2d, session: &GameSession, assets: &GameAssets) {
    gfx.blit(&assets.background, 0, 0);

    match session.phase() {
        GamePhase::Menu => draw_menu(gfx, session, assets),
        GamePhase::Playing => {
            draw_world(gfx, session, assets);
            draw_score(gfx, session.score());
        }
        GamePhase::GameOver => {
            draw_world(gfx, session, assets);
            draw_score(gfx, session.score());
            draw_game_over(gfx, session);
        }
    }
}

fn draw_world(gfx: &mut dyn Renderer2d, session: &GameSession, assets: &GameAssets) {
    let avatar = session.avatar();
    let (cx, cy) = avatar.bounds().center();
    gfx.blit_rotated(&assets.bird, cx, cy, avatar.rotation_degrees());

    for obstacle in session.stream().obstacles() {
        let x = obstacle.x().round() as i32;
        let top_y = obstacle.gap_top().round() as i32 - PIPE_SPRITE_HEIGHT as i32;
        gfx.blit(&assets.pipe_flipped, x, top_y);
        gfx.blit(&assets.pipe, x, obstacle.gap_bottom().round() as i32);
    }
}

fn draw_menu(gfx: &mut dyn Renderer2d, session: &GameSession, assets: &GameAssets) {
    let (w, h) = frame_extent(gfx);

    // Display only; the simulated bird stays at its start position.
    let bird = Rect::centered_at(w / 2, h / 2 - 50, assets.bird.size());
    gfx.blit(&assets.bird, bird.x, bird.y);

    draw_centered(gfx, "FLAPPY BIRD", h / 4, TITLE_SCALE);
    draw_centered(gfx, "PRESS SPACE TO START", h / 2 + 50, BODY_SCALE);
    draw_centered(
        gfx,
        &format!("HIGH SCORE: {}", session.high_score()),
        h / 2 + 100,
        BODY_SCALE,
    );
}

fn draw_game_over(gfx: &mut dyn Renderer2d, session: &GameSession) {
    let bounds = gfx.size().bounds();
    gfx.blend_rect(bounds, GAME_OVER_SHADE, GAME_OVER_SHADE_ALPHA);

    let (_, h) = frame_extent(gfx);
    draw_centered(gfx, "GAME OVER", h / 3, TITLE_SCALE);
    draw_centered(gfx, &format!("SCORE: {}", session.score()), h / 2, BODY_SCALE);
    draw_centered(
        gfx,
        &format!("HIGH SCORE: {}", session.high_score()),
        h / 2 + 50,
        BODY_SCALE,
    );
    draw_centered(gfx, "PRESS SPACE TO RESTART", h / 2 + 100, BODY_SCALE);
}

fn draw_score(gfx: &mut dyn Renderer2d, score: u32) {
    let (x, y) = SCORE_POSITION;
    gfx.draw_text_scaled(x, y, &format!("SCORE: {score}"), TEXT_COLOR, BODY_SCALE);
}

/// Text horizontally centred on the frame with its vertical centre at `center_y`.
fn draw_centered(gfx: &mut dyn Renderer2d, text: &str, center_y: i32, scale: u32) {
    let size = text_size(text, scale);
    let row = Rect::new(0, center_y - size.h as i32 / 2, gfx.size().width, size.h);
    let at = row.place(size, Anchor::TopCenter);
    gfx.draw_text_scaled(at.x, at.y, text, TEXT_COLOR, scale);
}

fn frame_extent(gfx: &dyn Renderer2d) -> (i32, i32) {
    let size = gfx.size();
    (size.width as i32, size.height as i32)
}
