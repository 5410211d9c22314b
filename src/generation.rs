//! The evolving population, and the loop that drives it toward the end of the maze.
//!
//! Every generation is scored, checked for a winner, and otherwise replaced wholesale by its
//! offspring: parents are drawn from a fitness weighted roulette wheel, recombined with single
//! point crossover, and mutated. Nobody survives into the next generation unchanged.

use crate::{
    constants::THESEUS_FITNESS_FLOOR,
    error::EvolutionError,
    genome::crossover,
    hook::{Hook, Stats},
    individual::{Individual, Snapshot},
    maze::Maze,
    random::Happens,
    selection::{normalize_weights, select},
};
use core::{
    mem,
    sync::atomic::{AtomicBool, Ordering},
};
use log::{debug, info};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

/// How a run ended. None of these are errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// an individual of generation `generation` stopped on the end tile
    Winner {
        generation: usize,
        individual: Snapshot,
    },
    /// the evolution budget ran out
    Exhausted {
        generations: usize,
        best: Option<Snapshot>,
    },
    /// the caller asked the run to stop
    Cancelled {
        generations: usize,
        best: Option<Snapshot>,
    },
}

impl Outcome {
    pub fn winner(&self) -> Option<&Snapshot> {
        match self {
            Self::Winner { individual, .. } => Some(individual),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct Generation<'m, R> {
    maze: &'m Maze,
    rng: R,
    population: Vec<Individual<'m>>,
    offspring: Vec<Individual<'m>>,
    population_size: usize,
    evolution_count: usize,
    max_evolutions: usize,
}

impl<'m, R: RngCore + Happens> Generation<'m, R> {
    /// A first generation of `population_size` random individuals. The size must be even and at
    /// least 2, since every breeding event yields a pair of children.
    pub fn new(
        maze: &'m Maze,
        mut rng: R,
        population_size: usize,
        max_evolutions: usize,
    ) -> Result<Self, EvolutionError> {
        if population_size < 2 || population_size % 2 != 0 {
            return Err(EvolutionError::InvalidPopulation(population_size));
        }

        let population = (0..population_size)
            .map(|_| Individual::new_random(maze, &mut rng))
            .collect();

        Ok(Self {
            maze,
            rng,
            population,
            offspring: Vec::with_capacity(population_size),
            population_size,
            evolution_count: 0,
            max_evolutions,
        })
    }

    #[inline]
    pub fn maze(&self) -> &'m Maze {
        self.maze
    }

    #[inline]
    pub fn population(&self) -> &[Individual<'m>] {
        &self.population
    }

    #[inline]
    pub fn offspring(&self) -> &[Individual<'m>] {
        &self.offspring
    }

    #[inline]
    pub fn population_size(&self) -> usize {
        self.population_size
    }

    #[inline]
    pub fn evolution_count(&self) -> usize {
        self.evolution_count
    }

    #[inline]
    pub fn max_evolutions(&self) -> usize {
        self.max_evolutions
    }

    pub fn score_population(&mut self) {
        score(&mut self.population);
    }

    pub fn score_offspring(&mut self) {
        score(&mut self.offspring);
    }

    /// first individual of the current population whose last walk stopped on the end tile
    pub fn winner(&self) -> Option<&Individual<'m>> {
        self.population.iter().find(|i| i.reached_end())
    }

    /// Rounded fitness of every individual in population order. Individuals that were never
    /// scored count as the fitness floor.
    pub fn fitness_scores(&self) -> Vec<f64> {
        self.population
            .iter()
            .map(|i| i.rounded_fitness().unwrap_or(THESEUS_FITNESS_FLOOR))
            .collect()
    }

    /// Index of a parent in the current population, drawn against cumulative `weights`
    pub fn selection(&mut self, weights: &[f64]) -> Result<usize, EvolutionError> {
        select(weights, &mut self.rng)
            .filter(|&idx| idx < self.population.len())
            .ok_or(EvolutionError::SelectionFailed {
                candidates: weights.len(),
            })
    }

    /// Append `2 * floor(population_size / 2)` children to the offspring. Each pair comes from
    /// two independently selected parents (possibly the same one) split at one random point.
    pub fn breed(&mut self, weights: &[f64]) -> Result<(), EvolutionError> {
        let tile_count = self.maze.total_tile_count();
        for _ in 0..self.population_size / 2 {
            let first = self.selection(weights)?;
            let second = self.selection(weights)?;
            let split = self.rng.random_range(1..tile_count);

            let (left, right) = crossover(
                self.population[first].genome(),
                self.population[second].genome(),
                split,
            );
            self.offspring
                .push(Individual::new_from_genome(self.maze, left));
            self.offspring
                .push(Individual::new_from_genome(self.maze, right));
        }
        Ok(())
    }

    /// give every child a chance to mutate, returning how many did
    pub fn mutate_offspring(&mut self) -> usize {
        let mut mutated = 0;
        for child in self.offspring.iter_mut() {
            if child.mutate(&mut self.rng) {
                mutated += 1;
            }
        }
        mutated
    }

    /// replace the population with the offspring, leaving the offspring empty
    pub fn evolve(&mut self) {
        self.population = mem::take(&mut self.offspring);
    }

    /// highest rounded fitness in the population, the first such individual on ties
    pub fn best(&self) -> Option<&Individual<'m>> {
        self.population
            .iter()
            .filter_map(|i| i.rounded_fitness().map(|fitness| (i, fitness)))
            .fold(None, |best, (i, fitness)| match best {
                Some((_, best_fitness)) if best_fitness >= fitness => best,
                _ => Some((i, fitness)),
            })
            .map(|(i, _)| i)
    }

    pub fn stats(&self) -> Option<Stats> {
        let best = self.best()?.snapshot()?;
        let scores = self
            .population
            .iter()
            .filter_map(Individual::rounded_fitness)
            .collect::<Vec<_>>();
        Some(Stats {
            evolution_count: self.evolution_count,
            best,
            mean_fitness: scores.iter().sum::<f64>() / scores.len() as f64,
        })
    }

    /// Evolve until a winner turns up or the budget is spent
    pub fn run(&mut self, hook: &mut impl Hook) -> Result<Outcome, EvolutionError> {
        self.run_until(hook, &AtomicBool::new(false))
    }

    /// Evolve until a winner turns up, the budget is spent, or `stop` is raised. `stop` is
    /// checked once at the top of every generation.
    pub fn run_until(
        &mut self,
        hook: &mut impl Hook,
        stop: &AtomicBool,
    ) -> Result<Outcome, EvolutionError> {
        info!(
            "evolving {} individuals over {} tiles for up to {} generations",
            self.population_size,
            self.maze.total_tile_count(),
            self.max_evolutions
        );

        while self.evolution_count < self.max_evolutions {
            if stop.load(Ordering::Relaxed) {
                let best = self.best().and_then(Individual::snapshot);
                info!("stopped after {} generations", self.evolution_count);
                hook.on_cancelled(self.evolution_count, best.as_ref());
                return Ok(Outcome::Cancelled {
                    generations: self.evolution_count,
                    best,
                });
            }

            self.score_population();
            if let Some(winner) = self.winner().and_then(Individual::snapshot) {
                info!(
                    "winner found at generation {} with fitness {}",
                    self.evolution_count, winner.fitness
                );
                hook.on_winner(self.evolution_count, &winner);
                return Ok(Outcome::Winner {
                    generation: self.evolution_count,
                    individual: winner,
                });
            }

            let weights = normalize_weights(&self.fitness_scores());
            self.breed(&weights)?;
            let mutated = self.mutate_offspring();
            self.score_offspring();
            self.evolve();
            self.evolution_count += 1;

            if let Some(stats) = self.stats() {
                debug!(
                    "gen {}: {mutated} mutated, best {} (len {}) at ({}, {}): {}",
                    stats.evolution_count,
                    stats.best.fitness,
                    stats.best.genome_len,
                    stats.best.position.row,
                    stats.best.position.col,
                    stats.best.genome
                );
                hook.on_generation(&stats);
            }
        }

        let best = self.best().and_then(Individual::snapshot);
        info!("no winner after {} generations", self.evolution_count);
        hook.on_exhausted(self.evolution_count, best.as_ref());
        Ok(Outcome::Exhausted {
            generations: self.evolution_count,
            best,
        })
    }
}

// scoring draws no randomness, so the order individuals are scored in cannot change a run
#[cfg(feature = "parallel")]
fn score(individuals: &mut [Individual<'_>]) {
    use rayon::prelude::*;
    individuals.par_iter_mut().for_each(|i| {
        i.calculate_fitness();
    });
}

#[cfg(not(feature = "parallel"))]
fn score(individuals: &mut [Individual<'_>]) {
    for i in individuals.iter_mut() {
        i.calculate_fitness();
    }
}
