//! Minimal layout primitives.
//!
//! `Rect` uses signed origins so that anything scrolling off the left or top edge of the
//! playfield can still be described (and clipped) without special casing.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_size(w: u32, h: u32) -> Self {
        Self { x: 0, y: 0, w, h }
    }

    pub fn size(&self) -> Size {
        Size {
            w: self.w,
            h: self.h,
        }
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.w as i32)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h as i32)
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Returns the overlapping area of two rects, or `None` when they do not overlap.
    pub fn intersection(&self, other: Rect) -> Option<Rect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some(Rect::new(x0, y0, (x1 - x0) as u32, (y1 - y0) as u32))
    }

    /// Places a child of `size` inside this rect using the requested `anchor`.
    ///
    /// If `size` exceeds this rect, it is clamped to fit.
    pub fn place(&self, size: Size, anchor: Anchor) -> Self {
        let w = size.w.min(self.w);
        let h = size.h.min(self.h);
        let slack_x = self.w.saturating_sub(w) as i32;
        let slack_y = self.h.saturating_sub(h) as i32;

        let x = match anchor {
            Anchor::TopLeft => self.x,
            Anchor::TopCenter | Anchor::Center => self.x + slack_x / 2,
        };
        let y = match anchor {
            Anchor::TopLeft | Anchor::TopCenter => self.y,
            Anchor::Center => self.y + slack_y / 2,
        };

        Self { x, y, w, h }
    }

    /// A rect of `size` whose center sits at (`cx`, `cy`).
    pub fn centered_at(cx: i32, cy: i32, size: Size) -> Self {
        Self {
            x: cx - (size.w / 2) as i32,
            y: cy - (size.h / 2) as i32,
            w: size.w,
            h: size.h,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    pub const fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    TopCenter,
    Center,
}
