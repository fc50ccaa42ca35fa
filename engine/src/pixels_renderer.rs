use pixels::Pixels;

use crate::graphics::{CpuRenderer, Renderer2d};
use crate::surface::SurfaceSize;

/// Headful renderer built on `pixels`.
///
/// The pixel buffer keeps the game's logical resolution; `pixels` scales it to whatever size
/// the window surface has, so game code never sees a resize.
pub struct PixelsRenderer2d {
    pixels: Pixels,
    logical: SurfaceSize,
}

impl PixelsRenderer2d {
    pub fn new(pixels: Pixels, logical: SurfaceSize) -> Self {
        Self { pixels, logical }
    }

    pub fn logical_size(&self) -> SurfaceSize {
        self.logical
    }

    pub fn resize_surface(&mut self, size: SurfaceSize) -> Result<(), pixels::Error> {
        if size.is_empty() {
            // Minimized windows report 0x0; wgpu rejects zero-sized surfaces.
            return Ok(());
        }
        self.pixels.resize_surface(size.width, size.height)?;
        Ok(())
    }

    pub fn draw_frame<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut dyn Renderer2d) -> R,
    {
        let mut cpu = CpuRenderer::new(self.pixels.frame_mut(), self.logical);
        cpu.begin_frame(self.logical);
        f(&mut cpu)
    }

    pub fn present(&mut self) -> Result<(), pixels::Error> {
        self.pixels.render()
    }
}
