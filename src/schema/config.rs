//! Search hyperparameters.

use serde::{Deserialize, Serialize};

/// Hyperparameters for the evolutionary search.
///
/// A `SearchConfig` is built once at startup, validated, and then passed by
/// reference; nothing reads tunables from ambient process state. Field
/// defaults match the reference parameter set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Number of states in each automaton. Fixed across the population.
    #[serde(default = "default_sda_size")]
    pub sda_size: usize,
    /// Number of genomes kept in the population.
    #[serde(default = "default_population_size")]
    pub population_size: usize,
    /// Number of distinct genomes sampled per tournament; the two best are
    /// crossed over and the two worst replaced.
    #[serde(default = "default_tournament_size")]
    pub tournament_size: usize,
    /// Upper bound on point mutations applied to each offspring.
    #[serde(default = "default_max_mutations")]
    pub max_mutations: usize,
    /// Number of steady-state update steps to run.
    #[serde(default = "default_generations")]
    pub generations: usize,
    /// Log the population maximum every this many generations (0 disables).
    #[serde(default = "default_report_interval")]
    pub report_interval: usize,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            sda_size: default_sda_size(),
            population_size: default_population_size(),
            tournament_size: default_tournament_size(),
            max_mutations: default_max_mutations(),
            generations: default_generations(),
            report_interval: default_report_interval(),
            random_seed: None,
        }
    }
}

fn default_sda_size() -> usize {
    12
}
fn default_population_size() -> usize {
    32
}
fn default_tournament_size() -> usize {
    7
}
fn default_max_mutations() -> usize {
    1
}
fn default_generations() -> usize {
    10_000
}
fn default_report_interval() -> usize {
    100
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("automaton size must be at least 2, got {0}")]
    SdaTooSmall(usize),
    #[error("population size must be at least 2, got {0}")]
    PopulationTooSmall(usize),
    #[error("tournament size must be at least 2, got {0}")]
    TournamentTooSmall(usize),
    #[error("tournament size {tournament} exceeds population size {population}")]
    TournamentExceedsPopulation { tournament: usize, population: usize },
    #[error("max mutations must be at least 1")]
    NoMutations,
}

impl SearchConfig {
    /// Validate the configuration, rejecting degenerate parameter sets that
    /// would otherwise fail mid-run (two-point crossover needs at least two
    /// states; the tournament scan needs at least two distinct members).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sda_size < 2 {
            return Err(ConfigError::SdaTooSmall(self.sda_size));
        }
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall(self.population_size));
        }
        if self.tournament_size < 2 {
            return Err(ConfigError::TournamentTooSmall(self.tournament_size));
        }
        if self.tournament_size > self.population_size {
            return Err(ConfigError::TournamentExceedsPopulation {
                tournament: self.tournament_size,
                population: self.population_size,
            });
        }
        if self.max_mutations < 1 {
            return Err(ConfigError::NoMutations);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = SearchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sda_size, 12);
        assert_eq!(config.population_size, 32);
        assert_eq!(config.tournament_size, 7);
    }

    #[test]
    fn test_degenerate_configs_rejected() {
        let config = SearchConfig {
            sda_size: 1,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::SdaTooSmall(1)));

        let config = SearchConfig {
            population_size: 1,
            tournament_size: 1,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::PopulationTooSmall(1)));

        let config = SearchConfig {
            tournament_size: 1,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::TournamentTooSmall(1)));

        let config = SearchConfig {
            population_size: 4,
            tournament_size: 7,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::TournamentExceedsPopulation {
                tournament: 7,
                population: 4
            })
        );

        let config = SearchConfig {
            max_mutations: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoMutations));
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let config: SearchConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.generations, 10_000);
        assert_eq!(config.report_interval, 100);
        assert_eq!(config.random_seed, None);
    }
}
