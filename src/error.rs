//! Error types for maze construction, genome parsing, evolution and configuration.

use crate::maze::Tile;
use std::{io, path::PathBuf};
use thiserror::Error;

/// A maze literal that cannot be searched, or a query outside of its grid.
#[derive(Error, Debug)]
pub enum MazeError {
    #[error("maze has no rows")]
    Empty,
    #[error("maze has no start tile 'S'")]
    MissingStart,
    #[error("maze has no end tile 'E'")]
    MissingEnd,
    #[error("second {tile:?} tile at row {row}, column {col}")]
    DuplicateTile { tile: Tile, row: usize, col: usize },
    #[error("unknown tile {symbol:?} at row {row}, column {col}")]
    UnknownTile { symbol: char, row: usize, col: usize },
    #[error("column {col}, row {row} is outside of the maze")]
    OutOfRange { col: usize, row: usize },
    #[error("failed to read maze from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenomeError {
    #[error("unknown move {symbol:?} at index {index}")]
    UnknownMove { symbol: char, index: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvolutionError {
    #[error("population size must be even and at least 2, got {0}")]
    InvalidPopulation(usize),
    /// The cumulative weights handed to selection could not produce a parent index
    #[error("no parent could be selected from {candidates} weighted candidates")]
    SelectionFailed { candidates: usize },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
