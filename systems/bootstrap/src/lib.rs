#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the first frame of the adventure.

use adventure_core::{EnemySnapshot, PlayerSnapshot, WINDOW_TITLE};
use adventure_world::{query, TileMap, World};

/// Produces data required to open the window and build the initial scene.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Title that adapters should give the game window.
    #[must_use]
    pub fn window_title(&self) -> &'static str {
        WINDOW_TITLE
    }

    /// Exposes the tile map required for rendering.
    #[must_use]
    pub fn tile_map<'world>(&self, world: &'world World) -> &'world TileMap {
        query::tile_map(world)
    }

    /// Exposes the player's spawn state for presentation purposes.
    #[must_use]
    pub fn player(&self, world: &World) -> PlayerSnapshot {
        query::player(world)
    }

    /// Exposes the enemy's spawn state for presentation purposes.
    #[must_use]
    pub fn enemy(&self, world: &World) -> EnemySnapshot {
        query::enemy(world)
    }
}
