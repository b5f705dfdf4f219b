//! Point and box collision queries against the static tile map.

use adventure_core::TileCoord;
use glam::Vec2;

use crate::map::TileMap;

/// Inset applied to every side of the player's bounding box.
pub const PLAYER_COLLISION_MARGIN: f32 = 8.0;

/// Offset from the enemy's top-left corner to its single collision probe.
pub const ENEMY_PROBE_OFFSET: Vec2 = Vec2::new(8.0, 8.0);

/// Converts a pixel position into the tile that contains it.
///
/// Returns `None` for any position outside the grid, including negative and
/// non-finite coordinates.
#[must_use]
pub fn tile_at(map: &TileMap, point: Vec2) -> Option<TileCoord> {
    if !point.is_finite() {
        return None;
    }

    let tile_size = map.tile_size() as f32;
    // Floor, not truncation: (-4, y) lands in column -1 and is blocked.
    let column = (point.x / tile_size).floor();
    let row = (point.y / tile_size).floor();
    if column < 0.0 || row < 0.0 || column >= map.columns() as f32 || row >= map.rows() as f32 {
        return None;
    }

    Some(TileCoord::new(column as u32, row as u32))
}

/// Reports whether the pixel position is impassable.
///
/// Positions outside the grid are always blocked.
#[must_use]
pub fn is_wall_at(map: &TileMap, point: Vec2) -> bool {
    tile_at(map, point)
        .and_then(|coord| map.tile(coord))
        .map_or(true, |kind| kind.is_blocking())
}

/// Player bounding box shrunk inward by [`PLAYER_COLLISION_MARGIN`] per side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerBounds {
    left: f32,
    top: f32,
    width: f32,
    height: f32,
}

impl PlayerBounds {
    /// Shrunk bounds of a player whose sprite sits at `position` with `extent`.
    #[must_use]
    pub fn at(position: Vec2, extent: Vec2) -> Self {
        Self {
            left: position.x + PLAYER_COLLISION_MARGIN,
            top: position.y + PLAYER_COLLISION_MARGIN,
            width: extent.x - 2.0 * PLAYER_COLLISION_MARGIN,
            height: extent.y - 2.0 * PLAYER_COLLISION_MARGIN,
        }
    }

    /// Top-left, top-right, bottom-left and bottom-right corners.
    #[must_use]
    pub fn corners(&self) -> [Vec2; 4] {
        let right = self.left + self.width;
        let bottom = self.top + self.height;
        [
            Vec2::new(self.left, self.top),
            Vec2::new(right, self.top),
            Vec2::new(self.left, bottom),
            Vec2::new(right, bottom),
        ]
    }
}

/// Reports whether any corner of the bounds is blocked.
#[must_use]
pub fn bounds_blocked(map: &TileMap, bounds: &PlayerBounds) -> bool {
    bounds
        .corners()
        .into_iter()
        .any(|corner| is_wall_at(map, corner))
}

/// The single point tested when the enemy moves to `position`.
#[must_use]
pub fn enemy_probe(position: Vec2) -> Vec2 {
    position + ENEMY_PROBE_OFFSET
}
