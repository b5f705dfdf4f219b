#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for the top-down adventure.

pub mod collision;
mod map;

use adventure_core::{Command, Event};
use glam::Vec2;

use self::collision::{bounds_blocked, enemy_probe, is_wall_at, PlayerBounds};

pub use self::map::{TileMap, LEVEL, MAP_HEIGHT, MAP_WIDTH, TILE_SIZE};

const PLAYER_SPAWN: Vec2 = Vec2::new(64.0, 64.0);
const ENEMY_SPAWN: Vec2 = Vec2::new(120.0, 120.0);

/// Player extent assumed until the rendering adapter reports the sprite size.
pub const DEFAULT_PLAYER_EXTENT: Vec2 = Vec2::new(32.0, 32.0);

#[derive(Clone, Copy, Debug)]
struct Player {
    position: Vec2,
    extent: Vec2,
}

#[derive(Clone, Copy, Debug)]
struct Enemy {
    position: Vec2,
    velocity: Vec2,
}

/// Represents the authoritative adventure world state.
#[derive(Debug)]
pub struct World {
    tile_map: TileMap,
    player: Player,
    enemy: Enemy,
    tick_index: u64,
}

impl World {
    /// Creates a world on the authored level with actors at their spawn points.
    #[must_use]
    pub fn new() -> Self {
        Self::with_tile_map(TileMap::level())
    }

    /// Creates a world on the provided map with actors at their spawn points.
    #[must_use]
    pub fn with_tile_map(tile_map: TileMap) -> Self {
        Self {
            tile_map,
            player: Player {
                position: PLAYER_SPAWN,
                extent: DEFAULT_PLAYER_EXTENT,
            },
            enemy: Enemy {
                position: ENEMY_SPAWN,
                velocity: Vec2::ZERO,
            },
            tick_index: 0,
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::ConfigurePlayerExtent { extent } => {
            if !extent.is_finite() || extent.min_element() < 0.0 {
                return;
            }
            if world.player.extent != extent {
                world.player.extent = extent;
                out_events.push(Event::PlayerExtentConfigured { extent });
            }
        }
        Command::MovePlayer { destination } => {
            let bounds = PlayerBounds::at(destination, world.player.extent);
            if bounds_blocked(&world.tile_map, &bounds) {
                out_events.push(Event::PlayerBlocked {
                    attempted: destination,
                });
                return;
            }

            let from = world.player.position;
            world.player.position = destination;
            out_events.push(Event::PlayerMoved {
                from,
                to: destination,
            });
        }
        Command::SteerEnemy {
            velocity,
            destination,
        } => {
            world.enemy.velocity = velocity;

            let from = world.enemy.position;
            if destination == from {
                return;
            }

            if is_wall_at(&world.tile_map, enemy_probe(destination)) {
                out_events.push(Event::EnemyBlocked {
                    attempted: destination,
                });
                return;
            }

            world.enemy.position = destination;
            out_events.push(Event::EnemyMoved {
                from,
                to: destination,
            });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use adventure_core::{EnemySnapshot, PlayerSnapshot};
    use glam::Vec2;

    use super::{collision, TileMap, World};

    /// Provides read-only access to the world's tile map.
    #[must_use]
    pub fn tile_map(world: &World) -> &TileMap {
        &world.tile_map
    }

    /// Captures the player's current state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        PlayerSnapshot {
            position: world.player.position,
            extent: world.player.extent,
        }
    }

    /// Captures the enemy's current state.
    #[must_use]
    pub fn enemy(world: &World) -> EnemySnapshot {
        EnemySnapshot {
            position: world.enemy.position,
            velocity: world.enemy.velocity,
        }
    }

    /// Reports whether the pixel position is impassable on the world's map.
    #[must_use]
    pub fn is_wall_at(world: &World, point: Vec2) -> bool {
        collision::is_wall_at(&world.tile_map, point)
    }

    /// Number of ticks processed since the world was created.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }
}
