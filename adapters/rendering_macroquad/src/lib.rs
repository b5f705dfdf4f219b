#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for the adventure.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! Textures are decoded with the `image` crate rather than macroquad's own
//! loader so a missing or corrupt file surfaces as an error instead of a
//! panic. Any such error switches the window to a fallback loop that draws a
//! single red circle until the window is closed.

mod limiter;
mod sprites;

use adventure_core::{Direction, HeldDirections};
use adventure_rendering::{
    compose_frame, fallback_frame, Color, DrawCommand, FrameInput, LoopState, Presentation,
    RenderingBackend, Scene, Viewport,
};
use anyhow::{Context, Result};
use macroquad::{
    camera::{set_camera, set_default_camera, Camera2D},
    input::{is_key_down, is_quit_requested, prevent_quit, KeyCode},
    math::Vec2 as MacroquadVec2,
};
use std::{sync::mpsc, time::Duration};
use tracing::{debug, error, info, warn};

pub use self::limiter::FrameLimiter;
pub use self::sprites::AssetPaths;
use self::sprites::SpriteAtlas;

const KEY_BINDINGS: [(KeyCode, Direction); 4] = [
    (KeyCode::W, Direction::North),
    (KeyCode::A, Direction::West),
    (KeyCode::S, Direction::South),
    (KeyCode::D, Direction::East),
];

/// Rendering backend implemented on top of macroquad.
#[derive(Clone, Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    target_fps: u32,
    asset_paths: AssetPaths,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: Some(1),
            target_fps: 60,
            asset_paths: AssetPaths::default(),
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend with vsync enabled, a 60 fps cap and the default
    /// asset locations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or leave pacing to the frame limiter alone.
    #[must_use]
    pub fn with_vsync(mut self, enabled: bool) -> Self {
        self.swap_interval = Some(i32::from(enabled));
        self
    }

    /// Caps the loop to `target_fps` frames per second; zero removes the cap.
    #[must_use]
    pub fn with_target_fps(mut self, target_fps: u32) -> Self {
        self.target_fps = target_fps;
        self
    }

    /// Overrides where the four textures are loaded from.
    #[must_use]
    pub fn with_asset_paths(mut self, asset_paths: AssetPaths) -> Self {
        self.asset_paths = asset_paths;
        self
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            target_fps,
            asset_paths,
        } = self;

        let Presentation {
            window_title,
            logical_size,
            clear_color,
            scene,
        } = presentation;

        info!(
            title = %window_title,
            width = logical_size.x,
            height = logical_size.y,
            "opening window"
        );

        let config = window_conf(window_title, logical_size, swap_interval);

        let (outcome_sender, outcome_receiver) = mpsc::channel::<Result<()>>();

        macroquad::Window::from_config(config, async move {
            prevent_quit();
            let background = to_macroquad_color(clear_color);
            let limiter = FrameLimiter::new(target_fps);

            let outcome = match SpriteAtlas::load(&asset_paths)
                .context("failed to initialise sprite atlas")
            {
                Ok(atlas) => {
                    info!("loaded sprite textures");
                    run_scene(&atlas, scene, update_scene, background, limiter).await;
                    Ok(())
                }
                Err(load_error) => {
                    error!("texture loading failed: {load_error:#}");
                    warn!("entering fallback loop");
                    run_fallback(background, limiter).await;
                    Err(load_error)
                }
            };

            info!("window closed");
            let _ = outcome_sender.send(outcome);
        });

        outcome_receiver.recv().unwrap_or_else(|_| Ok(()))
    }
}

async fn run_scene<F>(
    atlas: &SpriteAtlas,
    mut scene: Scene,
    mut update_scene: F,
    background: macroquad::color::Color,
    mut limiter: FrameLimiter,
) where
    F: FnMut(Duration, FrameInput, &mut Scene),
{
    let mut state = LoopState::Running;
    loop {
        state = state.observe(is_quit_requested());
        if !state.is_running() {
            break;
        }

        let dt_seconds = macroquad::time::get_frame_time();
        let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
        let player_extent = atlas
            .texture_size(scene.player.sprite)
            .map(|size| size * scene.player.scale);
        let frame_input = FrameInput {
            held_directions: held_directions(is_key_down),
            player_extent,
        };

        update_scene(frame_dt, frame_input, &mut scene);

        macroquad::window::clear_background(background);
        set_camera(&camera_for(&scene.viewport));
        for command in compose_frame(&scene) {
            execute(Some(atlas), command);
        }
        set_default_camera();

        macroquad::window::next_frame().await;
        limiter.wait();
    }
}

async fn run_fallback(background: macroquad::color::Color, mut limiter: FrameLimiter) {
    let mut state = LoopState::Running;
    loop {
        state = state.observe(is_quit_requested());
        if !state.is_running() {
            break;
        }

        macroquad::window::clear_background(background);
        for command in fallback_frame() {
            execute(None, command);
        }

        macroquad::window::next_frame().await;
        limiter.wait();
    }
}

fn execute(atlas: Option<&SpriteAtlas>, command: DrawCommand) {
    match command {
        DrawCommand::Sprite {
            key,
            position,
            scale,
        } => {
            let Some(atlas) = atlas else {
                return;
            };
            if let Err(draw_error) = atlas.draw(key, position, scale) {
                debug!(error = %draw_error, "skipped sprite");
            }
        }
        DrawCommand::Circle {
            center,
            radius,
            color,
        } => macroquad::shapes::draw_circle(center.x, center.y, radius, to_macroquad_color(color)),
    }
}

/// Window sized to the logical view; the OS may still resize it.
fn window_conf(
    window_title: String,
    logical_size: glam::Vec2,
    swap_interval: Option<i32>,
) -> macroquad::window::Conf {
    let mut config = macroquad::window::Conf {
        window_title,
        window_width: logical_size.x.round() as i32,
        window_height: logical_size.y.round() as i32,
        window_resizable: true,
        ..macroquad::window::Conf::default()
    };
    if let Some(swap_interval) = swap_interval {
        config.platform.swap_interval = Some(swap_interval);
    }
    config
}

/// Collects the held W/A/S/D keys using `is_down` to query each key.
fn held_directions(is_down: impl Fn(KeyCode) -> bool) -> HeldDirections {
    KEY_BINDINGS
        .iter()
        .filter(|(key, _)| is_down(*key))
        .map(|(_, direction)| *direction)
        .collect()
}

/// Camera that maps the viewport onto the whole window with +Y pointing down.
fn camera_for(viewport: &Viewport) -> Camera2D {
    let center = viewport.center();
    let size = viewport.size().max(glam::Vec2::ONE);
    Camera2D {
        target: MacroquadVec2::new(center.x, center.y),
        zoom: MacroquadVec2::new(2.0 / size.x, -2.0 / size.y),
        ..Camera2D::default()
    }
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
