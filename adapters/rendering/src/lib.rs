#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for adventure adapters.

mod frame;

use adventure_core::{HeldDirections, TileCoord, TileKind};
use anyhow::Result as AnyResult;
use glam::Vec2;
use std::time::Duration;
use thiserror::Error;

pub use self::frame::{compose_frame, fallback_frame, DrawCommand, FALLBACK_CIRCLE_RADIUS};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque red.
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);
    /// Opaque white, the neutral sprite tint.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }
}

/// Identifies one of the four textures the adventure draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    /// Walkable ground tile.
    Grass,
    /// Impassable wall tile.
    Wall,
    /// The player character.
    Player,
    /// The chasing enemy.
    Enemy,
}

impl SpriteKey {
    /// Every sprite key in load order.
    pub const ALL: [SpriteKey; 4] = [
        SpriteKey::Grass,
        SpriteKey::Wall,
        SpriteKey::Player,
        SpriteKey::Enemy,
    ];

    /// Sprite used to draw a tile of the provided kind.
    #[must_use]
    pub const fn for_tile(kind: TileKind) -> Self {
        match kind {
            TileKind::Grass => Self::Grass,
            TileKind::Wall => Self::Wall,
        }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Directional keys held during the frame.
    pub held_directions: HeldDirections,
    /// Rendered size of the player sprite, available once textures loaded.
    pub player_extent: Option<Vec2>,
}

/// Describes the tile map that adapters draw beneath the actors.
#[derive(Clone, Debug, PartialEq)]
pub struct TileMapPresentation {
    columns: u32,
    rows: u32,
    tile_length: f32,
    tiles: Vec<TileKind>,
}

impl TileMapPresentation {
    /// Creates a new tile map descriptor from row-major tiles.
    ///
    /// Returns an error when the tile count does not match the dimensions or
    /// the tile length is not a positive finite number.
    pub fn new(
        columns: u32,
        rows: u32,
        tile_length: f32,
        tiles: Vec<TileKind>,
    ) -> std::result::Result<Self, RenderingError> {
        if !tile_length.is_finite() || tile_length <= 0.0 {
            return Err(RenderingError::InvalidTileLength { tile_length });
        }

        let expected = u64::from(columns) * u64::from(rows);
        let actual = tiles.len() as u64;
        if expected != actual {
            return Err(RenderingError::TileCountMismatch { expected, actual });
        }

        Ok(Self {
            columns,
            rows,
            tile_length,
            tiles,
        })
    }

    /// Number of columns contained in the map.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the map.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Side length of a single tile expressed in world units.
    #[must_use]
    pub const fn tile_length(&self) -> f32 {
        self.tile_length
    }

    /// World-space position of the tile's top-left corner.
    #[must_use]
    pub fn tile_origin(&self, coord: TileCoord) -> Vec2 {
        Vec2::new(coord.column() as f32, coord.row() as f32) * self.tile_length
    }

    /// Iterates every tile in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (TileCoord, TileKind)> + '_ {
        let columns = self.columns.max(1);
        self.tiles.iter().enumerate().map(move |(index, kind)| {
            let index = u32::try_from(index).unwrap_or(u32::MAX);
            (TileCoord::new(index % columns, index / columns), *kind)
        })
    }
}

/// Sprite placement for a single actor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActorPresentation {
    /// Texture drawn for the actor.
    pub sprite: SpriteKey,
    /// World-space position of the sprite's top-left corner.
    pub position: Vec2,
    /// Uniform scale applied to the texture's pixel size.
    pub scale: f32,
}

impl ActorPresentation {
    /// Creates a new actor descriptor.
    #[must_use]
    pub const fn new(sprite: SpriteKey, position: Vec2, scale: f32) -> Self {
        Self {
            sprite,
            position,
            scale,
        }
    }
}

/// Camera rectangle in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    center: Vec2,
    size: Vec2,
}

impl Viewport {
    /// Creates a viewport of the provided size centered on `center`.
    #[must_use]
    pub const fn centered_on(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    /// Returns a copy recentered on `center`, keeping the size.
    #[must_use]
    pub const fn recentered(self, center: Vec2) -> Self {
        Self::centered_on(center, self.size)
    }

    /// World-space point at the middle of the screen.
    #[must_use]
    pub const fn center(&self) -> Vec2 {
        self.center
    }

    /// Width and height of the visible world region.
    #[must_use]
    pub const fn size(&self) -> Vec2 {
        self.size
    }
}

/// Everything adapters need to draw a frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Static tile map.
    pub tile_map: TileMapPresentation,
    /// Player sprite placement.
    pub player: ActorPresentation,
    /// Enemy sprite placement.
    pub enemy: ActorPresentation,
    /// Camera used for the frame.
    pub viewport: Viewport,
}

impl Scene {
    /// Creates a new scene description.
    #[must_use]
    pub fn new(
        tile_map: TileMapPresentation,
        player: ActorPresentation,
        enemy: ActorPresentation,
        viewport: Viewport,
    ) -> Self {
        Self {
            tile_map,
            player,
            enemy,
            viewport,
        }
    }
}

/// Top-level descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Logical window size in pixels; also the size of the camera view.
    pub logical_size: Vec2,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, logical_size: Vec2, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            logical_size,
            clear_color,
            scene,
        }
    }
}

/// Lifecycle of the render loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoopState {
    /// Frames are simulated and presented.
    #[default]
    Running,
    /// The window was asked to close. Terminal.
    Closed,
}

impl LoopState {
    /// Advances the state after polling the window's close request.
    #[must_use]
    pub const fn observe(self, close_requested: bool) -> Self {
        match self {
            Self::Running if close_requested => Self::Closed,
            Self::Running => Self::Running,
            Self::Closed => Self::Closed,
        }
    }

    /// Returns `true` while frames should keep being produced.
    #[must_use]
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }
}

/// Rendering backend capable of presenting adventure scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until the window is closed.
    ///
    /// The provided `update_scene` closure receives the measured frame delta
    /// and per-frame input captured by the adapter, and updates the scene
    /// before it is drawn. Returns an error when the backend had to run in
    /// degraded mode because its assets failed to load.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, Error, PartialEq)]
pub enum RenderingError {
    /// The number of tiles does not cover the grid exactly.
    #[error("tile map expects {expected} tiles but received {actual}")]
    TileCountMismatch {
        /// Number of tiles implied by the dimensions.
        expected: u64,
        /// Number of tiles supplied.
        actual: u64,
    },
    /// Tiles must have a positive, finite side length.
    #[error("tile length must be positive and finite (received {tile_length})")]
    InvalidTileLength {
        /// Provided length that failed validation.
        tile_length: f32,
    },
}
