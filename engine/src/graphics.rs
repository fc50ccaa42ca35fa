use crate::sprite::Sprite;
use crate::surface::SurfaceSize;
use crate::ui::{Rect, Size};

pub type Color = [u8; 4];

// A tiny block font (no font files to ship or fail to load).
const GLYPH_W: u32 = 3;
const GLYPH_H: u32 = 5;

fn glyph_advance_x(scale: u32) -> u32 {
    (GLYPH_W + 1) * scale.max(1)
}

/// Pixel size of `text` rendered in the block font at `scale` (single line).
pub fn text_size(text: &str, scale: u32) -> Size {
    let scale = scale.max(1);
    let chars = text.chars().count() as u32;
    if chars == 0 {
        return Size::new(0, 0);
    }
    // The last glyph has no trailing spacing column.
    let w = chars * glyph_advance_x(scale) - scale;
    Size::new(w, GLYPH_H * scale)
}

/// Unified 2D rendering interface.
///
/// Game code only talks to this trait so it can draw into a window or an offscreen buffer.
pub trait Renderer2d {
    fn begin_frame(&mut self, size: SurfaceSize);
    fn size(&self) -> SurfaceSize;

    /// Opaque fill. Parts of `rect` outside the surface are clipped.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Alpha-blended rect over existing content (alpha is applied to `color`'s RGB).
    fn blend_rect(&mut self, rect: Rect, color: Color, alpha: u8);

    fn draw_text_scaled(&mut self, x: i32, y: i32, text: &str, color: Color, scale: u32);

    /// Draws `sprite` with its top-left at (`x`, `y`), honoring per-pixel alpha.
    fn blit(&mut self, sprite: &Sprite, x: i32, y: i32);

    /// Draws `sprite` rotated counter-clockwise by `degrees` around its center, placed so the
    /// center lands on (`cx`, `cy`).
    fn blit_rotated(&mut self, sprite: &Sprite, cx: f32, cy: f32, degrees: f32);

    fn clear(&mut self, color: Color) {
        let s = self.size();
        self.fill_rect(Rect::from_size(s.width, s.height), color);
    }
}

/// CPU renderer that draws into an RGBA frame buffer.
pub struct CpuRenderer<'a> {
    frame: &'a mut [u8],
    size: SurfaceSize,
}

impl<'a> CpuRenderer<'a> {
    pub fn new(frame: &'a mut [u8], size: SurfaceSize) -> Self {
        Self { frame, size }
    }

    fn visible(&self, rect: Rect) -> Option<Rect> {
        if self.frame.len() < self.size.rgba_len() {
            return None;
        }
        self.size.bounds().intersection(rect)
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.size.width || y as u32 >= self.size.height {
            return None;
        }
        let idx = ((y as usize) * (self.size.width as usize) + x as usize) * 4;
        (idx + 4 <= self.frame.len()).then_some(idx)
    }

    fn blend_pixel(&mut self, x: i32, y: i32, color: Color) {
        let alpha = color[3] as u32;
        if alpha == 0 {
            return;
        }
        let Some(idx) = self.index(x, y) else {
            return;
        };
        let px = &mut self.frame[idx..idx + 4];
        if alpha == 255 {
            px.copy_from_slice(&color);
            return;
        }
        let inv = 255 - alpha;
        for c in 0..3 {
            px[c] = ((px[c] as u32 * inv + color[c] as u32 * alpha + 127) / 255) as u8;
        }
        px[3] = 255;
    }
}

impl Renderer2d for CpuRenderer<'_> {
    fn begin_frame(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(r) = self.visible(rect) else {
            return;
        };
        let stride = (self.size.width as usize) * 4;
        let row_bytes = (r.w as usize) * 4;
        let mut row_start = (r.y as usize) * stride + (r.x as usize) * 4;
        for _ in 0..r.h {
            for px in self.frame[row_start..row_start + row_bytes].chunks_exact_mut(4) {
                px.copy_from_slice(&color);
            }
            row_start += stride;
        }
    }

    fn blend_rect(&mut self, rect: Rect, color: Color, alpha: u8) {
        match alpha {
            0 => return,
            255 => return self.fill_rect(rect, color),
            _ => {}
        }
        let Some(r) = self.visible(rect) else {
            return;
        };
        let tinted = [color[0], color[1], color[2], alpha];
        for y in r.y..r.bottom() {
            for x in r.x..r.right() {
                self.blend_pixel(x, y, tinted);
            }
        }
    }

    fn draw_text_scaled(&mut self, x: i32, y: i32, text: &str, color: Color, scale: u32) {
        let scale = scale.max(1);
        let advance = glyph_advance_x(scale) as i32;
        let mut cursor_x = x;
        for ch in text.chars() {
            if ch != ' ' {
                for (row, bits) in glyph_rows(ch).into_iter().enumerate() {
                    for col in 0..GLYPH_W {
                        if bits & (1u8 << (GLYPH_W - 1 - col)) == 0 {
                            continue;
                        }
                        let cell = Rect::new(
                            cursor_x + (col * scale) as i32,
                            y + (row as u32 * scale) as i32,
                            scale,
                            scale,
                        );
                        self.fill_rect(cell, color);
                    }
                }
            }
            cursor_x += advance;
            if cursor_x >= self.size.width as i32 {
                break;
            }
        }
    }

    fn blit(&mut self, sprite: &Sprite, x: i32, y: i32) {
        let dest = Rect::new(x, y, sprite.width(), sprite.height());
        let Some(clip) = self.visible(dest) else {
            return;
        };
        for dy in clip.y..clip.bottom() {
            for dx in clip.x..clip.right() {
                if let Some(color) = sprite.pixel((dx - x) as u32, (dy - y) as u32) {
                    self.blend_pixel(dx, dy, color);
                }
            }
        }
    }

    fn blit_rotated(&mut self, sprite: &Sprite, cx: f32, cy: f32, degrees: f32) {
        if degrees.abs() < f32::EPSILON {
            let x = (cx - sprite.width() as f32 / 2.0).round() as i32;
            let y = (cy - sprite.height() as f32 / 2.0).round() as i32;
            return self.blit(sprite, x, y);
        }

        let (sin, cos) = degrees.to_radians().sin_cos();
        let half_w = sprite.width() as f32 / 2.0;
        let half_h = sprite.height() as f32 / 2.0;
        let reach_x = (half_w * cos.abs() + half_h * sin.abs()).ceil() as i32;
        let reach_y = (half_w * sin.abs() + half_h * cos.abs()).ceil() as i32;
        let center_x = cx.round() as i32;
        let center_y = cy.round() as i32;

        let dest = Rect::new(
            center_x - reach_x,
            center_y - reach_y,
            (reach_x * 2) as u32,
            (reach_y * 2) as u32,
        );
        let Some(clip) = self.visible(dest) else {
            return;
        };

        // Inverse-map each destination pixel back into sprite space (nearest neighbour).
        // Screen y grows downward, so a visual counter-clockwise turn flips the sign of sin.
        for dy in clip.y..clip.bottom() {
            for dx in clip.x..clip.right() {
                let rx = dx as f32 + 0.5 - cx;
                let ry = dy as f32 + 0.5 - cy;
                let sx = rx * cos - ry * sin + half_w;
                let sy = rx * sin + ry * cos + half_h;
                if sx < 0.0 || sy < 0.0 {
                    continue;
                }
                if let Some(color) = sprite.pixel(sx as u32, sy as u32) {
                    self.blend_pixel(dx, dy, color);
                }
            }
        }
    }
}

fn glyph_rows(ch: char) -> [u8; GLYPH_H as usize] {
    match ch.to_ascii_uppercase() {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b111, 0b001, 0b001, 0b101, 0b010],
        'K' => [0b101, 0b110, 0b100, 0b110, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b101, 0b111, 0b111, 0b111, 0b101],
        'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'R' => [0b111, 0b101, 0b111, 0b110, 0b101],
        'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        _ => [0b111, 0b001, 0b010, 0b000, 0b010], // '?'
    }
}
