use std::fs;
use std::path::Path;

use image::imageops::FilterType;

use crate::assets::AssetError;
use crate::graphics::Color;
use crate::ui::Size;

/// An owned RGBA image, ready to be blitted by a `Renderer2d`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    size: Size,
    pixels: Vec<u8>,
}

impl Sprite {
    /// Wraps raw RGBA bytes. Returns `None` if the byte count does not match `size`.
    pub fn from_rgba(size: Size, pixels: Vec<u8>) -> Option<Self> {
        let expected = (size.w as usize) * (size.h as usize) * 4;
        (pixels.len() == expected).then_some(Self { size, pixels })
    }

    pub fn solid(size: Size, color: Color) -> Self {
        let count = (size.w as usize) * (size.h as usize);
        let mut pixels = Vec::with_capacity(count * 4);
        for _ in 0..count {
            pixels.extend_from_slice(&color);
        }
        Self { size, pixels }
    }

    /// Transparent sprite with a one pixel border, used when real art is missing.
    pub fn outlined(size: Size, color: Color) -> Self {
        let mut sprite = Self::solid(size, [0, 0, 0, 0]);
        for y in 0..size.h {
            for x in 0..size.w {
                let edge = x == 0 || y == 0 || x + 1 == size.w || y + 1 == size.h;
                if edge {
                    sprite.set_pixel(x, y, color);
                }
            }
        }
        sprite
    }

    /// Loads a PNG from disk, optionally scaling it to `size`.
    pub fn load(path: &Path, size: Option<Size>) -> Result<Self, AssetError> {
        let bytes = fs::read(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut image = image::load_from_memory(&bytes).map_err(|source| AssetError::Image {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(size) = size {
            if image.width() != size.w || image.height() != size.h {
                image = image.resize_exact(size.w, size.h, FilterType::Triangle);
            }
        }
        let rgba = image.to_rgba8();
        let size = Size::new(rgba.width(), rgba.height());
        Ok(Self {
            size,
            pixels: rgba.into_raw(),
        })
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.w
    }

    pub fn height(&self) -> u32 {
        self.size.h
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.size.w || y >= self.size.h {
            return None;
        }
        let idx = ((y as usize) * (self.size.w as usize) + x as usize) * 4;
        let px = &self.pixels[idx..idx + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        let idx = ((y as usize) * (self.size.w as usize) + x as usize) * 4;
        self.pixels[idx..idx + 4].copy_from_slice(&color);
    }

    /// Returns a copy mirrored top-to-bottom.
    pub fn flipped_vertically(&self) -> Self {
        let stride = (self.size.w as usize) * 4;
        let mut pixels = Vec::with_capacity(self.pixels.len());
        for row in self.pixels.chunks_exact(stride.max(1)).rev() {
            pixels.extend_from_slice(row);
        }
        Self {
            size: self.size,
            pixels,
        }
    }
}
