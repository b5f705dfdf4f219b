use adventure_core::{TileCoord, TileKind};

/// Number of tile columns in the authored level.
pub const MAP_WIDTH: usize = 50;
/// Number of tile rows in the authored level.
pub const MAP_HEIGHT: usize = 38;
/// Side length of a square tile in world pixels.
pub const TILE_SIZE: u32 = 16;

const AUTHORED_ROWS: [[u8; MAP_WIDTH]; 9] = [
    [
        1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
        1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    ],
    [
        1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1,
    ],
    [
        1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1,
    ],
    [
        1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1,
    ],
    [
        1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1,
    ],
    [
        1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1,
    ],
    [
        1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1,
    ],
    [
        1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1,
    ],
    [
        1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1,
    ],
];

/// Raw level data. Rows past the authored block are grass.
pub const LEVEL: [[u8; MAP_WIDTH]; MAP_HEIGHT] = pad_rows(AUTHORED_ROWS);

const fn pad_rows<const N: usize>(
    authored: [[u8; MAP_WIDTH]; N],
) -> [[u8; MAP_WIDTH]; MAP_HEIGHT] {
    let mut level = [[0; MAP_WIDTH]; MAP_HEIGHT];
    let mut row = 0;
    while row < N && row < MAP_HEIGHT {
        level[row] = authored[row];
        row += 1;
    }
    level
}

/// Immutable grid of terrain tiles addressed by `[row][column]`.
#[derive(Clone, Debug, PartialEq)]
pub struct TileMap {
    columns: u32,
    rows: u32,
    tile_size: u32,
    tiles: Vec<TileKind>,
}

impl TileMap {
    /// Builds the authored level.
    #[must_use]
    pub fn level() -> Self {
        Self::from_raw_rows(&LEVEL, TILE_SIZE)
    }

    /// Builds a map from raw rows where `1` marks a wall.
    ///
    /// Short rows are padded with grass up to the widest row. A zero tile
    /// size is promoted to one pixel so pixel lookups never divide by zero.
    #[must_use]
    pub fn from_raw_rows<R>(raw_rows: &[R], tile_size: u32) -> Self
    where
        R: AsRef<[u8]>,
    {
        let width = raw_rows
            .iter()
            .map(|row| row.as_ref().len())
            .max()
            .unwrap_or(0);
        let mut tiles = Vec::with_capacity(width * raw_rows.len());
        for row in raw_rows {
            let row = row.as_ref();
            tiles.extend(row.iter().map(|value| TileKind::from_raw(*value)));
            tiles.extend(std::iter::repeat(TileKind::Grass).take(width - row.len()));
        }

        Self {
            columns: u32::try_from(width).unwrap_or(u32::MAX),
            rows: u32::try_from(raw_rows.len()).unwrap_or(u32::MAX),
            tile_size: tile_size.max(1),
            tiles,
        }
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

    /// Side length of a single tile in world pixels.
    #[must_use]
    pub const fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Returns the tile stored at the coordinate, or `None` outside the grid.
    #[must_use]
    pub fn tile(&self, coord: TileCoord) -> Option<TileKind> {
        self.index(coord).and_then(|index| self.tiles.get(index).copied())
    }

    /// Iterates every tile in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = (TileCoord, TileKind)> + '_ {
        let columns = self.columns.max(1);
        self.tiles.iter().enumerate().map(move |(index, kind)| {
            let index = u32::try_from(index).unwrap_or(u32::MAX);
            (TileCoord::new(index % columns, index / columns), *kind)
        })
    }

    fn index(&self, coord: TileCoord) -> Option<usize> {
        if coord.column() < self.columns && coord.row() < self.rows {
            let row = usize::try_from(coord.row()).ok()?;
            let column = usize::try_from(coord.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}
