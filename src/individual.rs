//! A single candidate path, and the simulation that scores it.

use crate::{
    constants::{THESEUS_EFFICIENCY_WEIGHT, THESEUS_FITNESS_FLOOR, THESEUS_TRAVEL_WEIGHT},
    genome::{Genome, Move},
    maze::{Maze, Position},
    random::{EvolutionEvent, Happens},
};
use core::fmt;
use rand::{seq::SliceRandom, Rng, RngCore};
use serde::{Deserialize, Serialize};

/// What walking a genome through the maze produced
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// where the individual stopped
    pub position: Position,
    /// unrounded fitness
    pub fitness: f64,
    /// straight line distance from `position` to the end tile
    pub end_distance: f64,
}

/// An owned view of an evaluated [Individual], handed to observers and written to reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// fitness rounded to one decimal place
    pub fitness: f64,
    pub genome_len: usize,
    pub genome: Genome,
    pub position: Position,
}

#[derive(Debug, Clone)]
pub struct Individual<'m> {
    maze: &'m Maze,
    genome: Genome,
    evaluation: Option<Evaluation>,
}

impl<'m> Individual<'m> {
    /// An individual with one uniformly drawn move for every tile in the maze
    pub fn new_random(maze: &'m Maze, rng: &mut impl RngCore) -> Self {
        Self::new_from_genome(maze, Genome::random(maze.total_tile_count(), rng))
    }

    /// An individual walking a known genome. Any length is accepted; only genomes exactly as
    /// long as the maze has tiles score no efficiency bonus or penalty.
    pub fn new_from_genome(maze: &'m Maze, genome: Genome) -> Self {
        Self {
            maze,
            genome,
            evaluation: None,
        }
    }

    #[inline]
    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    #[inline]
    pub fn maze(&self) -> &'m Maze {
        self.maze
    }

    /// Walk the genome from the start tile and score the walk, replacing any previous
    /// evaluation. Draws no randomness, so it is a pure function of the genome and the maze.
    ///
    /// Blocked moves (off the edge or into a wall) cost a point each and leave the individual
    /// in place; moves that land score a small travel bonus. Every interior move that turns
    /// away from both of its neighbours scores a point, whether or not it executed. On top
    /// of that comes the maze size less the distance left to the end tile, and the genome
    /// length again when the walk stops on the end tile. Negative totals become exactly
    /// [THESEUS_FITNESS_FLOOR].
    pub fn calculate_fitness(&mut self) -> f64 {
        let moves = self.genome.as_ref();
        let start = self.maze.start_position();
        let end = self.maze.end_position();

        let mut position = start;
        let mut traveled = 0usize;
        let mut blocked = 0usize;
        for &m in moves {
            match self.maze.step(position, m) {
                Some(next) => {
                    position = next;
                    traveled += 1;
                }
                None => blocked += 1,
            }
        }

        let tile_count = self.maze.total_tile_count() as f64;
        let efficiency = tile_count - moves.len() as f64;
        let end_distance = position.distance(end);

        let mut fitness = traveled as f64 * THESEUS_TRAVEL_WEIGHT
            + efficiency * THESEUS_EFFICIENCY_WEIGHT
            + no_loop_count(moves) as f64
            - blocked as f64;
        fitness += tile_count - end_distance;
        if position == end {
            fitness += moves.len() as f64;
        }
        if fitness < 0. {
            fitness = THESEUS_FITNESS_FLOOR;
        }

        self.evaluation = Some(Evaluation {
            position,
            fitness,
            end_distance,
        });
        fitness
    }

    /// With the probability of [EvolutionEvent::MutateGenome], shuffle a random window of the
    /// genome that never includes its first or last move. Returns whether the mutation fired.
    /// Length and the moves themselves are preserved; only their order within the window
    /// changes. A fired mutation discards the previous evaluation.
    pub fn mutate(&mut self, rng: &mut (impl RngCore + Happens)) -> bool {
        if !rng.happens(EvolutionEvent::MutateGenome) {
            return false;
        }

        let len = self.genome.len();
        if len < 3 {
            return false;
        }

        let lower = rng.random_range(1..len - 1);
        let upper = rng.random_range(lower + 1..len);
        self.genome.moves_mut()[lower..upper].shuffle(rng);
        self.evaluation = None;
        true
    }

    #[inline]
    pub fn evaluation(&self) -> Option<&Evaluation> {
        self.evaluation.as_ref()
    }

    /// unrounded fitness of the last evaluation
    pub fn fitness(&self) -> Option<f64> {
        self.evaluation.map(|e| e.fitness)
    }

    /// fitness of the last evaluation rounded to one decimal place, as used for selection
    pub fn rounded_fitness(&self) -> Option<f64> {
        self.fitness().map(round_fitness)
    }

    pub fn position(&self) -> Option<Position> {
        self.evaluation.map(|e| e.position)
    }

    pub fn end_distance(&self) -> Option<f64> {
        self.evaluation.map(|e| e.end_distance)
    }

    /// whether the last evaluation stopped on the end tile
    pub fn reached_end(&self) -> bool {
        self.position() == Some(self.maze.end_position())
    }

    pub fn snapshot(&self) -> Option<Snapshot> {
        self.evaluation.map(|e| Snapshot {
            fitness: round_fitness(e.fitness),
            genome_len: self.genome.len(),
            genome: self.genome.clone(),
            position: e.position,
        })
    }
}

impl fmt::Display for Individual<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rounded_fitness() {
            Some(fitness) => write!(f, "an individual with fitness {fitness}"),
            None => write!(f, "an unevaluated individual"),
        }
    }
}

/// one decimal place, halves to even
fn round_fitness(fitness: f64) -> f64 {
    (fitness * 10.).round_ties_even() / 10.
}

/// interior moves differing from, and not reversing, both of their neighbours
fn no_loop_count(moves: &[Move]) -> usize {
    moves
        .windows(3)
        .filter(|w| {
            let &[prev, m, next] = *w else {
                return false;
            };
            m != prev && m != next && prev != m.reverse() && next != m.reverse()
        })
        .count()
}
