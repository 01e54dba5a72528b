use super::traits::{check_probability, ConfigSection};
use crate::error::TrussevoError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub generations: usize,
    pub crossover_rate: f64,
    pub mutation_rate: f64,
    /// Probability that a member is enabled when seeding a random genome
    pub seed_density: f64,
    pub max_seed_attempts: usize,
    pub max_reproduction_attempts: usize,
    pub rank_order: RankOrder,
    pub seed: Option<u64>,
}

/// Which end of the fitness ordering receives rank 1 (and so the largest
/// selection weight 1/1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RankOrder {
    /// Sort ascending by fitness: rank 1 is the lowest-fitness individual.
    #[default]
    Ascending,
    /// Sort descending by fitness: rank 1 is the fittest individual.
    Descending,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 40,
            generations: 20,
            crossover_rate: 0.8,
            mutation_rate: 0.01,
            seed_density: 0.2,
            max_seed_attempts: 10_000,
            max_reproduction_attempts: 10_000,
            rank_order: RankOrder::Ascending,
            seed: Some(42),
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), TrussevoError> {
        if self.population_size == 0 {
            return Err(TrussevoError::Configuration(
                "Population size must be at least 1".to_string(),
            ));
        }
        check_probability("evolution", "crossover_rate", self.crossover_rate)?;
        check_probability("evolution", "mutation_rate", self.mutation_rate)?;
        check_probability("evolution", "seed_density", self.seed_density)?;
        if self.max_seed_attempts == 0 || self.max_reproduction_attempts == 0 {
            return Err(TrussevoError::Configuration(
                "Retry caps must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
