#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that opens the top-down adventure window.

mod session;

use adventure_rendering::{Color, Presentation, RenderingBackend};
use adventure_rendering_macroquad::MacroquadBackend;
use adventure_system_bootstrap::Bootstrap;
use adventure_world::World;
use anyhow::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

use self::session::{Session, VIEW_SIZE};

/// Entry point for the top-down adventure.
fn main() -> Result<()> {
    init_tracing();

    let bootstrap = Bootstrap;
    let mut session = Session::new(World::new());
    let scene = session.initial_scene(&bootstrap)?;
    let presentation = Presentation::new(bootstrap.window_title(), VIEW_SIZE, Color::BLACK, scene);

    let outcome = MacroquadBackend::new()
        .with_vsync(true)
        .with_target_fps(60)
        .run(presentation, move |dt, input, scene| {
            session.advance(dt, input, scene);
        });

    if let Err(run_error) = &outcome {
        let message = format!("{run_error:#}");
        error!(error = %message, "session ended in degraded mode");
    }

    outcome
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
