#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Enemy agent that chases the player while it is within detection range.

use std::time::Duration;

use adventure_core::{Command, EnemySnapshot, Event};
use glam::Vec2;

/// Configuration parameters required to construct the pursuit system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    detection_radius: f32,
    chase_speed: f32,
}

impl Config {
    /// Creates a configuration using the provided radius and speed.
    #[must_use]
    pub const fn new(detection_radius: f32, chase_speed: f32) -> Self {
        Self {
            detection_radius,
            chase_speed,
        }
    }

    /// Distance below which the enemy starts chasing, in pixels.
    #[must_use]
    pub const fn detection_radius(&self) -> f32 {
        self.detection_radius
    }

    /// Constant speed while chasing, in pixels per second.
    #[must_use]
    pub const fn chase_speed(&self) -> f32 {
        self.chase_speed
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(200.0, 40.0)
    }
}

/// Pure system that steers the enemy toward the player.
#[derive(Debug, Default)]
pub struct Pursuit {
    config: Config,
    chasing: bool,
}

impl Pursuit {
    /// Creates a new pursuit system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            chasing: false,
        }
    }

    /// Whether the most recent frame produced a non-zero chase velocity.
    #[must_use]
    pub fn is_chasing(&self) -> bool {
        self.chasing
    }

    /// Consumes world events and actor positions to emit a steering command.
    ///
    /// The player position must already reflect this frame's player move.
    pub fn handle(
        &mut self,
        events: &[Event],
        enemy: &EnemySnapshot,
        player_position: Vec2,
        out: &mut Vec<Command>,
    ) {
        let Some(dt) = elapsed(events) else {
            return;
        };

        let velocity = chase_velocity(enemy.position, player_position, &self.config);
        self.chasing = velocity != Vec2::ZERO;

        out.push(Command::SteerEnemy {
            velocity,
            destination: enemy.position + velocity * dt.as_secs_f32(),
        });
    }
}

/// Velocity that moves `enemy` toward `player` at the chase speed.
///
/// Zero when the player is at or beyond the detection radius, and zero when
/// both positions coincide, since no direction exists.
#[must_use]
pub fn chase_velocity(enemy: Vec2, player: Vec2, config: &Config) -> Vec2 {
    let diff = player - enemy;
    let distance = diff.length();

    if distance <= 0.0 || distance >= config.detection_radius() || !distance.is_finite() {
        return Vec2::ZERO;
    }

    diff / distance * config.chase_speed()
}

fn elapsed(events: &[Event]) -> Option<Duration> {
    events.iter().fold(None, |total, event| match event {
        Event::TimeAdvanced { dt } => Some(total.unwrap_or(Duration::ZERO) + *dt),
        _ => total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Vec2, expected: Vec2) {
        assert!(
            (actual - expected).length() < 1e-3,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn chases_a_nearby_player_at_constant_speed() {
        let velocity = chase_velocity(
            Vec2::new(120.0, 120.0),
            Vec2::new(121.0, 121.0),
            &Config::default(),
        );

        let component = 40.0 / 2.0_f32.sqrt();
        assert_close(velocity, Vec2::new(component, component));
        assert!((velocity.length() - 40.0).abs() < 1e-3);
    }

    #[test]
    fn ignores_a_player_at_or_beyond_the_radius() {
        let config = Config::default();
        let enemy = Vec2::new(100.0, 100.0);

        assert_eq!(
            chase_velocity(enemy, enemy + Vec2::new(200.0, 0.0), &config),
            Vec2::ZERO
        );
        assert_eq!(
            chase_velocity(enemy, enemy + Vec2::new(300.0, 400.0), &config),
            Vec2::ZERO
        );
    }

    #[test]
    fn speed_is_either_zero_or_the_chase_speed() {
        let config = Config::default();
        let enemy = Vec2::new(400.0, 300.0);

        for step in 1..120 {
            let angle = step as f32 * 0.37;
            let distance = step as f32 * 3.1;
            let player = enemy + Vec2::new(angle.cos(), angle.sin()) * distance;
            let speed = chase_velocity(enemy, player, &config).length();
            let actual_distance = (player - enemy).length();

            if actual_distance >= config.detection_radius() {
                assert_eq!(speed, 0.0, "distance {actual_distance}");
            } else {
                assert!((speed - 40.0).abs() < 1e-3, "distance {actual_distance}");
            }
        }
    }

    #[test]
    fn coincident_positions_do_not_divide_by_zero() {
        let position = Vec2::new(50.0, 50.0);
        let velocity = chase_velocity(position, position, &Config::default());

        assert_eq!(velocity, Vec2::ZERO);
        assert!(velocity.is_finite());
    }

    #[test]
    fn handle_tracks_chase_state() {
        let mut pursuit = Pursuit::default();
        let enemy = EnemySnapshot {
            position: Vec2::new(120.0, 120.0),
            velocity: Vec2::ZERO,
        };
        let tick = [Event::TimeAdvanced {
            dt: Duration::from_millis(100),
        }];
        let mut commands = Vec::new();

        pursuit.handle(&tick, &enemy, Vec2::new(121.0, 121.0), &mut commands);
        assert!(pursuit.is_chasing());

        pursuit.handle(&tick, &enemy, Vec2::new(700.0, 500.0), &mut commands);
        assert!(!pursuit.is_chasing());

        assert_eq!(commands.len(), 2);
        assert_eq!(
            commands[1],
            Command::SteerEnemy {
                velocity: Vec2::ZERO,
                destination: enemy.position,
            }
        );
    }

    #[test]
    fn handle_waits_for_the_clock() {
        let mut pursuit = Pursuit::default();
        let enemy = EnemySnapshot {
            position: Vec2::new(120.0, 120.0),
            velocity: Vec2::ZERO,
        };
        let mut commands = Vec::new();

        pursuit.handle(&[], &enemy, Vec2::new(121.0, 121.0), &mut commands);

        assert!(commands.is_empty());
    }
}
