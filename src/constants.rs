//! Centralized constants for Theseus evolution parameters.
//!
//! All configurable parameters are defined here with the `THESEUS_` prefix.
//! [Config](crate::config::Config) falls back to these when a value is not supplied.

use crate::random::percent;

// ============================================================================
// Generation Parameters
// ============================================================================

/// Number of individuals in every generation
pub const THESEUS_POPULATION_SIZE: usize = 100;

/// Number of generations to evolve before giving up on a winner
pub const THESEUS_MAX_EVOLUTIONS: usize = 5000;

// ============================================================================
// Mutation Parameters
// ============================================================================

/// Chance, in percent, that an offspring has a window of its genome shuffled
pub const THESEUS_MUTATION_PERCENT: u64 = 60;

/// [THESEUS_MUTATION_PERCENT] as a probability threshold
pub const THESEUS_MUTATION_PROB: u64 = percent(THESEUS_MUTATION_PERCENT);

// ============================================================================
// Fitness Coefficients
// ============================================================================

/// Reward for every move that actually changed the individual's position
pub const THESEUS_TRAVEL_WEIGHT: f64 = 0.01;

/// Reward for every tile of the maze the genome is shorter than
pub const THESEUS_EFFICIENCY_WEIGHT: f64 = 2.0;

/// Every negative fitness collapses onto this value
pub const THESEUS_FITNESS_FLOOR: f64 = -1.0;

// ============================================================================
// Selection Parameters
// ============================================================================

/// Total share of the roulette wheel handed out proportionally to fitness
pub const THESEUS_WEIGHT_SCALE: f64 = 100.0;

/// Share of the roulette wheel every individual receives regardless of fitness
pub const THESEUS_WEIGHT_FLOOR: f64 = 0.5;
