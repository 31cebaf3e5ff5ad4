//! Terrain grid and precomputed adjacency.
//!
//! The map is parsed once per episode from a grid of terrain symbols and never
//! changes afterwards. Because action enumeration and legality checking query
//! neighbors combinatorially many times per decision, the passable-neighbor
//! set of every cell is precomputed into an [`AdjacencyIndex`] instead of
//! being recomputed from the terrain on each call.

use std::fmt;

/// A grid coordinate (row, column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: u8,
    pub col: u8,
}

impl Coord {
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Terrain of a single map cell.
///
/// Symbols follow the input schema: `S` = sea, `I` = island, `B` = base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terrain {
    Sea,
    Island,
    Base,
}

impl Terrain {
    /// Parse a terrain symbol. Returns `None` for unknown symbols.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'S' => Some(Terrain::Sea),
            'I' => Some(Terrain::Island),
            'B' => Some(Terrain::Base),
            _ => None,
        }
    }

    /// Whether ships can occupy this cell. Islands are the only static
    /// obstacle; the base is passable.
    pub fn is_passable(self) -> bool {
        !matches!(self, Terrain::Island)
    }
}

/// Errors raised while parsing a terrain grid.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("map has no rows")]
    Empty,

    #[error("row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("unknown terrain symbol '{symbol}' at ({row}, {col})")]
    UnknownSymbol { symbol: char, row: usize, col: usize },

    #[error("map has no base cell")]
    NoBase,

    #[error("map has more than one base cell ({first} and {second})")]
    MultipleBases { first: Coord, second: Coord },

    #[error("map dimensions {rows}x{cols} exceed the coordinate range")]
    TooLarge { rows: usize, cols: usize },
}

/// The fixed terrain grid plus the base coordinate.
#[derive(Debug, Clone)]
pub struct GameMap {
    rows: usize,
    cols: usize,
    cells: Vec<Terrain>,
    base: Coord,
}

impl GameMap {
    /// Parse a map from rows of terrain symbols.
    ///
    /// The grid must be rectangular and contain exactly one base cell.
    pub fn from_symbols<S: AsRef<str>>(rows: &[S]) -> Result<Self, MapError> {
        if rows.is_empty() || rows[0].as_ref().is_empty() {
            return Err(MapError::Empty);
        }

        let cols = rows[0].as_ref().chars().count();
        if rows.len() > u8::MAX as usize + 1 || cols > u8::MAX as usize + 1 {
            return Err(MapError::TooLarge {
                rows: rows.len(),
                cols,
            });
        }

        let mut cells = Vec::with_capacity(rows.len() * cols);
        let mut base = None;

        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let width = row.chars().count();
            if width != cols {
                return Err(MapError::RaggedRow {
                    row: r,
                    expected: cols,
                    actual: width,
                });
            }
            for (c, symbol) in row.chars().enumerate() {
                let terrain = Terrain::from_symbol(symbol).ok_or(MapError::UnknownSymbol {
                    symbol,
                    row: r,
                    col: c,
                })?;
                if terrain == Terrain::Base {
                    let here = Coord::new(r as u8, c as u8);
                    if let Some(first) = base {
                        return Err(MapError::MultipleBases {
                            first,
                            second: here,
                        });
                    }
                    base = Some(here);
                }
                cells.push(terrain);
            }
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            cells,
            base: base.ok_or(MapError::NoBase)?,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The unique base coordinate.
    #[inline]
    pub fn base(&self) -> Coord {
        self.base
    }

    #[inline]
    pub fn in_bounds(&self, coord: Coord) -> bool {
        (coord.row as usize) < self.rows && (coord.col as usize) < self.cols
    }

    /// Terrain at a coordinate. Panics if out of bounds; callers validate
    /// coordinates at the scenario boundary.
    #[inline]
    pub fn terrain(&self, coord: Coord) -> Terrain {
        self.cells[coord.row as usize * self.cols + coord.col as usize]
    }

    /// Whether a coordinate is in bounds and not an island.
    #[inline]
    pub fn is_passable(&self, coord: Coord) -> bool {
        self.in_bounds(coord) && self.terrain(coord).is_passable()
    }
}

/// Precomputed passable orthogonal neighbors for every cell.
///
/// Built once per episode from the static map; immutable thereafter. The
/// neighbor list exists for every coordinate, including islands: treasures
/// sit on islands and are collected from the adjacent sea cells, so the
/// enumerator asks for the neighbors of impassable cells too.
#[derive(Debug, Clone)]
pub struct AdjacencyIndex {
    cols: usize,
    neighbors: Vec<Vec<Coord>>,
}

impl AdjacencyIndex {
    /// Precompute the adjacency lists for a map.
    pub fn build(map: &GameMap) -> Self {
        let mut neighbors = Vec::with_capacity(map.rows() * map.cols());
        for row in 0..map.rows() {
            for col in 0..map.cols() {
                let mut list = Vec::with_capacity(4);
                let row = row as isize;
                let col = col as isize;
                for (dr, dc) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
                    let (nr, nc) = (row + dr, col + dc);
                    if nr < 0 || nc < 0 {
                        continue;
                    }
                    let candidate = Coord::new(nr as u8, nc as u8);
                    if map.is_passable(candidate) {
                        list.push(candidate);
                    }
                }
                neighbors.push(list);
            }
        }
        Self {
            cols: map.cols(),
            neighbors,
        }
    }

    /// Passable orthogonal neighbors of a coordinate.
    #[inline]
    pub fn neighbors(&self, coord: Coord) -> &[Coord] {
        &self.neighbors[coord.row as usize * self.cols + coord.col as usize]
    }
}
