//! The immutable grid an [Individual](crate::Individual) walks through.
//!
//! Rows are stored in the order they are supplied, and row 0 is the bottom of the maze: moving
//! [Move::Up] increases the row index, [Move::Right] increases the column index.

use crate::{error::MazeError, genome::Move};
use core::{
    fmt::{self, Write},
    str::FromStr,
};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Start,
    End,
    Open,
    Wall,
}

impl Tile {
    pub const fn symbol(self) -> char {
        match self {
            Self::Start => 'S',
            Self::End => 'E',
            Self::Open => ' ',
            Self::Wall => 'x',
        }
    }
}

impl TryFrom<char> for Tile {
    type Error = char;

    fn try_from(symbol: char) -> Result<Self, Self::Error> {
        match symbol {
            'S' => Ok(Self::Start),
            'E' => Ok(Self::End),
            ' ' => Ok(Self::Open),
            'x' => Ok(Self::Wall),
            _ => Err(symbol),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// euclidean distance between the centers of two cells
    pub fn distance(self, other: Self) -> f64 {
        let d_row = self.row as f64 - other.row as f64;
        let d_col = self.col as f64 - other.col as f64;
        d_row.hypot(d_col)
    }

    /// The neighbouring cell in the direction of `m`, if it has non-negative coordinates. Says
    /// nothing about whether that cell exists in any particular maze.
    fn neighbour(self, m: Move) -> Option<Self> {
        Some(match m {
            Move::Up => Self::new(self.row + 1, self.col),
            Move::Down => Self::new(self.row.checked_sub(1)?, self.col),
            Move::Left => Self::new(self.row, self.col.checked_sub(1)?),
            Move::Right => Self::new(self.row, self.col + 1),
        })
    }
}

/// The demonstration maze, searched when no other is given. Its first row is the bottom of the maze.
pub const DEFAULT_MAZE: [&str; 11] = [
    "xxxxxxxxxxx",
    "x        Sx",
    "xxxxxxx xxx",
    "x         x",
    "x xxxx x xx",
    "x x    x  x",
    "xxx xxxxx x",
    "x     xx  x",
    "x xxxxx  xx",
    "x  Ex   xxx",
    "xxxxxxxxxxx",
];

/// A validated grid with exactly one start and one end tile. Rows may differ in width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    rows: Vec<Vec<Tile>>,
    tile_count: usize,
    start: Position,
    end: Position,
}

impl Maze {
    /// Build a maze from its rows, failing on anything that could not be searched: no rows, a
    /// missing or repeated start or end tile, or a character outside of the tile vocabulary.
    pub fn new<S: AsRef<str>>(rows: impl IntoIterator<Item = S>) -> Result<Self, MazeError> {
        let mut start = None;
        let mut end = None;

        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(row, line)| {
                line.as_ref()
                    .chars()
                    .enumerate()
                    .map(|(col, symbol)| {
                        let tile = Tile::try_from(symbol)
                            .map_err(|symbol| MazeError::UnknownTile { symbol, row, col })?;
                        let marker = match tile {
                            Tile::Start => Some(&mut start),
                            Tile::End => Some(&mut end),
                            Tile::Open | Tile::Wall => None,
                        };
                        if let Some(marker) = marker {
                            if marker.replace(Position::new(row, col)).is_some() {
                                return Err(MazeError::DuplicateTile { tile, row, col });
                            }
                        }
                        Ok(tile)
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        if rows.is_empty() {
            return Err(MazeError::Empty);
        }

        Ok(Self {
            tile_count: rows.iter().map(Vec::len).sum(),
            start: start.ok_or(MazeError::MissingStart)?,
            end: end.ok_or(MazeError::MissingEnd)?,
            rows,
        })
    }

    /// Read a maze from a text file, one row per line
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, MazeError> {
        fs::read_to_string(path.as_ref())
            .map_err(|source| MazeError::Io {
                path: path.as_ref().to_path_buf(),
                source,
            })?
            .parse()
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// width of a single row, which need not match its neighbours
    #[inline]
    pub fn row_width(&self, row: usize) -> Option<usize> {
        self.rows.get(row).map(Vec::len)
    }

    /// sum of every row's width; also the length of every freshly drawn genome
    #[inline]
    pub fn total_tile_count(&self) -> usize {
        self.tile_count
    }

    #[inline]
    pub fn start_position(&self) -> Position {
        self.start
    }

    #[inline]
    pub fn end_position(&self) -> Position {
        self.end
    }

    pub fn tile_at(&self, col: usize, row: usize) -> Result<Tile, MazeError> {
        self.tile(Position::new(row, col))
            .ok_or(MazeError::OutOfRange { col, row })
    }

    fn tile(&self, at: Position) -> Option<Tile> {
        self.rows.get(at.row)?.get(at.col).copied()
    }

    /// Whether `m` keeps an individual at (`col`, `row`) inside the outer edge of the maze. Up is
    /// only blocked on the top row, down on row 0, left on column 0, and right on the last column
    /// of the current row.
    pub fn is_within_bounds(&self, col: usize, row: usize, m: Move) -> bool {
        match m {
            Move::Up => row + 1 < self.rows.len(),
            Move::Down => row != 0,
            Move::Left => col != 0,
            Move::Right => self.row_width(row).is_some_and(|width| col + 1 < width),
        }
    }

    /// Whether the cell one step in the direction of `m` is walkable. Only meaningful after
    /// [Maze::is_within_bounds]; a neighbour that does not exist, such as a column past the end
    /// of a shorter row, is never walkable.
    pub fn is_move_valid(&self, col: usize, row: usize, m: Move) -> bool {
        Position::new(row, col)
            .neighbour(m)
            .and_then(|to| self.tile(to))
            .is_some_and(|tile| tile != Tile::Wall)
    }

    /// Where `m` takes an individual standing at `from`, or None if it is blocked
    pub fn step(&self, from: Position, m: Move) -> Option<Position> {
        (self.is_within_bounds(from.col, from.row, m) && self.is_move_valid(from.col, from.row, m))
            .then(|| from.neighbour(m))
            .flatten()
    }
}

impl FromStr for Maze {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s.lines().collect::<Vec<_>>();
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        Self::new(lines)
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, row) in self.rows.iter().enumerate() {
            if idx != 0 {
                f.write_char('\n')?;
            }
            row.iter().try_for_each(|tile| f.write_char(tile.symbol()))?;
        }
        Ok(())
    }
}
