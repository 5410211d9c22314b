//! Theseus CLI - evolve a path through a maze and report how the search ended.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use clap::{Parser, ValueEnum};
use core::error::Error;
use log::info;
use std::{path::PathBuf, process::ExitCode};
use theseus::{
    seed_urandom, Config, Generation, Hook, LogHook, Maze, Outcome, ProbBinding, Snapshot, Stats,
    ToJson, WyRng, DEFAULT_MAZE,
};

/// Theseus - genetic algorithm path search through grid mazes
#[derive(Parser, Debug)]
#[command(name = "theseus")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maze file, one row per line (default: the built-in maze)
    #[arg(short, long)]
    maze: Option<PathBuf>,

    /// Random seed (default: random)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Individuals per generation, even and at least 2
    #[arg(short, long)]
    population: Option<usize>,

    /// Maximum number of generations to evolve
    #[arg(short, long)]
    generations: Option<usize>,

    /// Chance in percent that an offspring mutates
    #[arg(long)]
    mutation: Option<u64>,

    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Save the outcome as JSON
    #[arg(long)]
    save: Option<PathBuf>,

    /// Suppress generation-by-generation output
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Prints a line per generation to stdout
struct PrintHook;

impl Hook for PrintHook {
    fn on_generation(&mut self, stats: &Stats) {
        println!(
            "gen {:>5}  best {:>7.1}  mean {:>7.2}  at ({}, {})",
            stats.evolution_count,
            stats.best.fitness,
            stats.mean_fitness,
            stats.best.position.row,
            stats.best.position.col
        );
    }
}

impl Args {
    fn config(&self) -> Result<Config, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(maze) = &self.maze {
            config.maze_file = Some(maze.clone());
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(population) = self.population {
            config.population_size = population;
        }
        if let Some(generations) = self.generations {
            config.max_evolutions = generations;
        }
        if let Some(mutation) = self.mutation {
            config.mutation_percent = mutation;
        }
        config.validate()?;
        Ok(config)
    }
}

fn print_snapshot(snapshot: &Snapshot) {
    println!("  fitness  {}", snapshot.fitness);
    println!(
        "  position ({}, {})",
        snapshot.position.row, snapshot.position.col
    );
    println!("  moves    {}", snapshot.genome_len);
    println!("  path     {}", snapshot.genome);
}

fn print_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Winner {
            generation,
            individual,
        } => {
            println!("winner found in generation {generation}");
            print_snapshot(individual);
        }
        Outcome::Exhausted { generations, best } | Outcome::Cancelled { generations, best } => {
            println!("no winner after {generations} generations");
            if let Some(best) = best {
                println!("best individual:");
                print_snapshot(best);
            }
        }
    }
}

fn execute(args: Args) -> Result<(), Box<dyn Error>> {
    let config = args.config()?;

    let maze = match &config.maze_file {
        Some(path) => Maze::from_file(path)?,
        None => Maze::new(DEFAULT_MAZE)?,
    };
    let seed = match config.seed {
        Some(seed) => seed,
        None => seed_urandom()?,
    };
    info!("seed {seed}");

    let rng = ProbBinding::new(config.probabilities(), WyRng::seeded(seed));
    let mut generation = Generation::new(
        &maze,
        rng,
        config.population_size,
        config.max_evolutions,
    )?;

    let outcome = match args.format {
        OutputFormat::Text if !args.quiet => {
            println!("{maze}\n");
            let outcome = generation.run(&mut PrintHook)?;
            println!();
            outcome
        }
        _ => generation.run(&mut LogHook)?,
    };

    match args.format {
        OutputFormat::Text => print_outcome(&outcome),
        OutputFormat::Json => println!("{}", outcome.to_json()?),
    }

    if let Some(path) = &args.save {
        outcome.to_file(path)?;
        info!("outcome saved to {}", path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match execute(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
