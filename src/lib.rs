//! Path search through small grid mazes with a genetic algorithm.
//!
//! A [Maze] is a grid of walls and open tiles with one start and one end. Every [Individual]
//! carries a [Genome] of moves that it walks from the start, and a [Generation] evolves a
//! population of them until one stops on the end tile.

#[macro_use]
mod macros;

pub mod config;
pub mod constants;
pub mod error;
pub mod generation;
pub mod genome;
pub mod hook;
pub mod individual;
pub mod maze;
pub mod random;
pub mod selection;
pub mod serialize;

pub use config::Config;
pub use error::{ConfigError, EvolutionError, GenomeError, MazeError};
pub use generation::{Generation, Outcome};
pub use genome::{crossover, Genome, Move};
pub use hook::{Event, Hook, LogHook, Stats};
pub use individual::{Evaluation, Individual, Snapshot};
pub use maze::{Maze, Position, Tile, DEFAULT_MAZE};
pub use random::{percent, seed_urandom, Happens, ProbBinding, ProbStatic, Probabilities, WyRng};
pub use selection::{normalize_weights, select};
pub use serialize::{FromJson, ToJson};
