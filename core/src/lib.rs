#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the top-down adventure engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::time::Duration;

use glam::Vec2;

/// Title shown on the game window.
pub const WINDOW_TITLE: &str = "Top-Down Adventure Game";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Records the rendered size of the player sprite used for collision.
    ConfigurePlayerExtent {
        /// Width and height of the player's bounding box in world pixels.
        extent: Vec2,
    },
    /// Requests that the player relocate to the provided top-left position.
    MovePlayer {
        /// Candidate position computed from held input.
        destination: Vec2,
    },
    /// Updates the enemy's velocity and requests a move to the destination.
    SteerEnemy {
        /// Velocity chosen for the current frame, in pixels per second.
        velocity: Vec2,
        /// Candidate position reached by integrating the velocity.
        destination: Vec2,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that the player's collision extent changed.
    PlayerExtentConfigured {
        /// Extent now used for the player's bounding box.
        extent: Vec2,
    },
    /// Confirms that the player moved.
    PlayerMoved {
        /// Position held before the move.
        from: Vec2,
        /// Position held after the move.
        to: Vec2,
    },
    /// Reports that a player move was discarded because a corner hit a wall.
    PlayerBlocked {
        /// Destination that failed the collision test.
        attempted: Vec2,
    },
    /// Confirms that the enemy moved.
    EnemyMoved {
        /// Position held before the move.
        from: Vec2,
        /// Position held after the move.
        to: Vec2,
    },
    /// Reports that an enemy move was discarded because its probe hit a wall.
    EnemyBlocked {
        /// Destination that failed the collision test.
        attempted: Vec2,
    },
}

/// Cardinal movement directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing y.
    North,
    /// Movement toward increasing x.
    East,
    /// Movement toward increasing y.
    South,
    /// Movement toward decreasing x.
    West,
}

impl Direction {
    /// All directions in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Unit offset in screen space, where y grows downward.
    #[must_use]
    pub const fn offset(self) -> Vec2 {
        match self {
            Self::North => Vec2::new(0.0, -1.0),
            Self::East => Vec2::new(1.0, 0.0),
            Self::South => Vec2::new(0.0, 1.0),
            Self::West => Vec2::new(-1.0, 0.0),
        }
    }
}

/// Set of directional keys held during a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct HeldDirections {
    north: bool,
    east: bool,
    south: bool,
    west: bool,
}

impl HeldDirections {
    /// No direction held.
    pub const NONE: Self = Self {
        north: false,
        east: false,
        south: false,
        west: false,
    };

    /// Returns a copy with the provided direction marked as held.
    #[must_use]
    pub const fn with(mut self, direction: Direction) -> Self {
        match direction {
            Direction::North => self.north = true,
            Direction::East => self.east = true,
            Direction::South => self.south = true,
            Direction::West => self.west = true,
        }
        self
    }

    /// Reports whether the provided direction is held.
    #[must_use]
    pub const fn is_held(&self, direction: Direction) -> bool {
        match direction {
            Direction::North => self.north,
            Direction::East => self.east,
            Direction::South => self.south,
            Direction::West => self.west,
        }
    }

    /// Iterator over the held directions in [`Direction::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL
            .into_iter()
            .filter(move |direction| self.is_held(*direction))
    }

    /// Returns `true` when no direction is held.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !(self.north || self.east || self.south || self.west)
    }
}

impl FromIterator<Direction> for HeldDirections {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::NONE, |held, direction| held.with(direction))
    }
}

/// Kind of terrain stored in a single map tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileKind {
    /// Walkable ground.
    Grass,
    /// Impassable wall.
    Wall,
}

impl TileKind {
    /// Raw map value that marks a wall.
    pub const WALL_VALUE: u8 = 1;

    /// Interprets a raw map value. Only [`Self::WALL_VALUE`] is a wall.
    #[must_use]
    pub const fn from_raw(value: u8) -> Self {
        if value == Self::WALL_VALUE {
            Self::Wall
        } else {
            Self::Grass
        }
    }

    /// Reports whether the tile blocks movement.
    #[must_use]
    pub const fn is_blocking(self) -> bool {
        matches!(self, Self::Wall)
    }
}

/// Location of a single map tile expressed as column and row indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCoord {
    column: u32,
    row: u32,
}

impl TileCoord {
    /// Creates a new tile coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the tile.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the tile.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Immutable representation of the player's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// Top-left corner of the player sprite in world pixels.
    pub position: Vec2,
    /// Width and height of the player sprite in world pixels.
    pub extent: Vec2,
}

impl PlayerSnapshot {
    /// Center of the player's full bounding box.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.position + self.extent / 2.0
    }
}

/// Immutable representation of the enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Top-left corner of the enemy sprite in world pixels.
    pub position: Vec2,
    /// Velocity chosen on the most recent frame, in pixels per second.
    pub velocity: Vec2,
}
