use crate::{
    constants::{THESEUS_MAX_EVOLUTIONS, THESEUS_MUTATION_PERCENT, THESEUS_POPULATION_SIZE},
    error::ConfigError,
    random::{percent, EvolutionEvent, ProbStatic},
};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Settings for a single search. Every field is optional in the TOML file and falls back to
/// the `THESEUS_` constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub population_size: usize,
    pub max_evolutions: usize,
    /// chance, in percent, that an offspring mutates
    pub mutation_percent: u64,
    /// fixed seed for a reproducible run, drawn from the OS when absent
    pub seed: Option<u64>,
    /// maze to search, the built-in maze when absent
    pub maze_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            population_size: THESEUS_POPULATION_SIZE,
            max_evolutions: THESEUS_MAX_EVOLUTIONS,
            mutation_percent: THESEUS_MUTATION_PERCENT,
            seed: None,
            maze_file: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 2 || self.population_size % 2 != 0 {
            return Err(ConfigError::Invalid(format!(
                "population_size must be even and at least 2, got {}",
                self.population_size
            )));
        }
        if self.mutation_percent > 100 {
            return Err(ConfigError::Invalid(format!(
                "mutation_percent must be at most 100, got {}",
                self.mutation_percent
            )));
        }
        Ok(())
    }

    /// the probability table these settings describe
    pub fn probabilities(&self) -> ProbStatic {
        ProbStatic::default().with_overrides(&[(
            EvolutionEvent::MutateGenome,
            percent(self.mutation_percent),
        )])
    }
}
