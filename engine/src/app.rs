use std::time::{Duration, Instant};

use pixels::{PixelsBuilder, SurfaceTexture};
use tracing::{debug, warn};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, KeyboardInput, MouseButton, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::graphics::Renderer2d;
use crate::pixels_renderer::PixelsRenderer2d;
use crate::surface::SurfaceSize;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    /// Resolution the game renders at; the window scales it.
    pub logical_size: SurfaceSize,
    /// Initial window size as a multiple of `logical_size`.
    pub window_scale: f64,
    pub clamp_to_monitor: bool,
    pub vsync: bool,
    pub ticks_per_second: u32,
}

impl AppConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.ticks_per_second.max(1)))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("failed to create pixel surface: {0}")]
    Pixels(#[from] pixels::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppFlow {
    Continue,
    Exit,
}

/// A game driven by `run_game` at a fixed tick rate.
///
/// Raw input is translated into the game's own command type as it arrives; the commands queued
/// since the previous tick are handed to `update` in arrival order.
pub trait GameApp {
    type Command: Copy;

    fn command_for_key(&self, key: VirtualKeyCode) -> Option<Self::Command>;

    fn command_for_mouse(&self, _button: MouseButton) -> Option<Self::Command> {
        None
    }

    /// One simulation tick. `since_start` is wall-clock time since the loop started.
    fn update(&mut self, commands: &[Self::Command], since_start: Duration) -> AppFlow;

    fn render(&mut self, gfx: &mut dyn Renderer2d);

    /// Called once when the loop is torn down, however it was asked to stop.
    fn shutdown(&mut self) {}
}

pub fn run_game<G: GameApp + 'static>(config: AppConfig, mut game: G) -> Result<(), AppError> {
    let event_loop = EventLoop::new();

    let scale = config.window_scale.max(0.1);
    let desired = PhysicalSize::new(
        (f64::from(config.logical_size.width) * scale).round() as u32,
        (f64::from(config.logical_size.height) * scale).round() as u32,
    );
    let initial_size = match event_loop.primary_monitor().map(|m| m.size()) {
        Some(monitor) if config.clamp_to_monitor => PhysicalSize::new(
            desired.width.min(monitor.width),
            desired.height.min(monitor.height),
        ),
        _ => desired,
    };
    let window = WindowBuilder::new()
        .with_title(config.title.clone())
        .with_inner_size(initial_size)
        .build(&event_loop)?;

    let window_size = window.inner_size();
    let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
    let pixels = PixelsBuilder::new(
        config.logical_size.width,
        config.logical_size.height,
        surface_texture,
    )
    .enable_vsync(config.vsync)
    .build()?;
    let mut renderer = PixelsRenderer2d::new(pixels, config.logical_size);

    let tick = config.tick_interval();
    let started = Instant::now();
    let mut next_tick = started;
    let mut queued: Vec<G::Command> = Vec::new();
    debug!(?tick, "entering event loop");

    event_loop.run(move |event, _, control_flow| {
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(size) => {
                    let size = SurfaceSize::new(size.width, size.height);
                    if let Err(err) = renderer.resize_surface(size) {
                        warn!("resize failed: {err}");
                    }
                }
                WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                    let size = SurfaceSize::new(new_inner_size.width, new_inner_size.height);
                    if let Err(err) = renderer.resize_surface(size) {
                        warn!("resize failed: {err}");
                    }
                }
                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            state: ElementState::Pressed,
                            virtual_keycode: Some(key),
                            ..
                        },
                    ..
                } => {
                    if let Some(command) = game.command_for_key(key) {
                        queued.push(command);
                    }
                }
                WindowEvent::MouseInput {
                    state: ElementState::Pressed,
                    button,
                    ..
                } => {
                    if let Some(command) = game.command_for_mouse(button) {
                        queued.push(command);
                    }
                }
                _ => {}
            },
            Event::MainEventsCleared => {
                if matches!(*control_flow, ControlFlow::ExitWithCode(_)) {
                    return;
                }
                let now = Instant::now();
                if now >= next_tick {
                    let flow = game.update(&queued, now.saturating_duration_since(started));
                    queued.clear();
                    if flow == AppFlow::Exit {
                        *control_flow = ControlFlow::Exit;
                        return;
                    }
                    window.request_redraw();

                    next_tick += tick;
                    // After a stall, resume from now instead of replaying missed ticks.
                    if next_tick < now {
                        next_tick = now + tick;
                    }
                }
                *control_flow = ControlFlow::WaitUntil(next_tick);
            }
            Event::RedrawRequested(_) => {
                renderer.draw_frame(|gfx| game.render(gfx));
                if let Err(err) = renderer.present() {
                    warn!("present failed: {err}");
                    *control_flow = ControlFlow::Exit;
                }
            }
            Event::LoopDestroyed => {
                game.shutdown();
            }
            _ => {}
        }
    });
}
