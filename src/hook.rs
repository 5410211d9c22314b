//! Observers of a running [Generation](crate::Generation).
//!
//! Hooks are called synchronously from the search loop, so an implementation must return
//! promptly. Anything slow belongs on the other side of a channel: `Sender<Event>` is itself a
//! hook, and sending on it never blocks.

use crate::individual::Snapshot;
use log::info;
use serde::{Deserialize, Serialize};
use std::sync::mpsc::Sender;

/// Summary of a population after one round of breeding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// number of generations evolved so far
    pub evolution_count: usize,
    /// fittest individual, first in population order on ties
    pub best: Snapshot,
    /// mean rounded fitness across the population
    pub mean_fitness: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Generation(Stats),
    Winner {
        generation: usize,
        individual: Snapshot,
    },
    Exhausted {
        generations: usize,
        best: Option<Snapshot>,
    },
    Cancelled {
        generations: usize,
        best: Option<Snapshot>,
    },
}

pub trait Hook {
    /// a new population replaced the previous one
    fn on_generation(&mut self, _stats: &Stats) {}

    /// an individual of `generation` stopped on the end tile
    fn on_winner(&mut self, _generation: usize, _winner: &Snapshot) {}

    /// the evolution budget ran out without a winner
    fn on_exhausted(&mut self, _generations: usize, _best: Option<&Snapshot>) {}

    /// the run was asked to stop before it found a winner or spent its budget
    fn on_cancelled(&mut self, _generations: usize, _best: Option<&Snapshot>) {}
}

impl Hook for () {}

/// Reports progress through the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogHook;

impl Hook for LogHook {
    fn on_generation(&mut self, stats: &Stats) {
        info!(
            "gen {}: best fitness {} at ({}, {}), mean {:.2}",
            stats.evolution_count,
            stats.best.fitness,
            stats.best.position.row,
            stats.best.position.col,
            stats.mean_fitness
        );
    }

    fn on_winner(&mut self, generation: usize, winner: &Snapshot) {
        info!(
            "gen {generation}: winner with fitness {}, path {}",
            winner.fitness, winner.genome
        );
    }

    fn on_exhausted(&mut self, generations: usize, best: Option<&Snapshot>) {
        match best {
            Some(best) => info!(
                "no winner after {generations} generations, best fitness {}",
                best.fitness
            ),
            None => info!("no winner after {generations} generations"),
        }
    }

    fn on_cancelled(&mut self, generations: usize, best: Option<&Snapshot>) {
        match best {
            Some(best) => info!(
                "stopped after {generations} generations, best fitness {}",
                best.fitness
            ),
            None => info!("stopped after {generations} generations"),
        }
    }
}

// a receiver that hung up stops listening, it does not stop the search
impl Hook for Sender<Event> {
    fn on_generation(&mut self, stats: &Stats) {
        let _ = self.send(Event::Generation(stats.clone()));
    }

    fn on_winner(&mut self, generation: usize, winner: &Snapshot) {
        let _ = self.send(Event::Winner {
            generation,
            individual: winner.clone(),
        });
    }

    fn on_exhausted(&mut self, generations: usize, best: Option<&Snapshot>) {
        let _ = self.send(Event::Exhausted {
            generations,
            best: best.cloned(),
        });
    }

    fn on_cancelled(&mut self, generations: usize, best: Option<&Snapshot>) {
        let _ = self.send(Event::Cancelled {
            generations,
            best: best.cloned(),
        });
    }
}
