#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Player controller that turns held directional keys into move proposals.
//!
//! The controller never mutates the world. It reacts to the clock advancing
//! by proposing a destination; the world tests the shrunk bounding box at
//! that destination and either commits the whole move or discards it.

use std::time::Duration;

use adventure_core::{Command, Event, HeldDirections, PlayerSnapshot};
use glam::Vec2;

/// Configuration parameters required to construct the player controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    speed: f32,
}

impl Config {
    /// Creates a configuration with the provided movement speed.
    #[must_use]
    pub const fn new(speed: f32) -> Self {
        Self { speed }
    }

    /// Movement speed along each held axis, in pixels per second.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(100.0)
    }
}

/// Pure system that proposes player moves from directional input.
#[derive(Debug, Default)]
pub struct PlayerControl {
    config: Config,
}

impl PlayerControl {
    /// Creates a new controller using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Consumes world events and the held keys to emit a move proposal.
    ///
    /// Nothing is emitted unless the batch advanced time and at least one
    /// key contributes movement.
    pub fn handle(
        &mut self,
        events: &[Event],
        held: HeldDirections,
        player: &PlayerSnapshot,
        out: &mut Vec<Command>,
    ) {
        let Some(dt) = elapsed(events) else {
            return;
        };

        let movement = movement_vector(held, self.config.speed());
        if movement == Vec2::ZERO {
            return;
        }

        out.push(Command::MovePlayer {
            destination: player.position + movement * dt.as_secs_f32(),
        });
    }
}

/// Sums the held directions scaled by `speed`.
///
/// Diagonals are not normalized, so holding two perpendicular keys moves
/// faster than holding one. Opposite keys cancel.
#[must_use]
pub fn movement_vector(held: HeldDirections, speed: f32) -> Vec2 {
    held.iter().fold(Vec2::ZERO, |movement, direction| {
        movement + direction.offset() * speed
    })
}

fn elapsed(events: &[Event]) -> Option<Duration> {
    events.iter().fold(None, |total, event| match event {
        Event::TimeAdvanced { dt } => Some(total.unwrap_or(Duration::ZERO) + *dt),
        _ => total,
    })
}
