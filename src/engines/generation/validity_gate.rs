use crate::engines::generation::genome::{random_genome, Genome};
use crate::engines::structure::{LoadBearing, StructureBuilder};
use crate::error::{Result, TrussevoError};
use rand::Rng;

/// Feasibility filter for genomes entering the active population.
///
/// A genome is valid when all of the following hold:
/// - the builder attaches both base supports,
/// - a joint exists at the load point,
/// - the structure has at least `2 * nodes - 4` members.
///
/// Reproduction is gated all-or-nothing: one invalid offspring discards the
/// whole candidate generation.
pub struct ValidityGate<'a, B: StructureBuilder> {
    builder: &'a B,
}

impl<'a, B: StructureBuilder> ValidityGate<'a, B> {
    pub fn new(builder: &'a B) -> Self {
        Self { builder }
    }

    pub fn is_valid(&self, genome: &[bool]) -> Result<bool> {
        let valid = match self.builder.build(genome)? {
            Some(structure) => {
                structure.load_node().is_some() && structure.satisfies_connectivity()
            }
            None => false,
        };
        Ok(valid)
    }

    pub fn is_generation_valid(&self, population: &[Genome]) -> Result<bool> {
        for genome in population {
            if !self.is_valid(genome)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Resample random genomes at `density` until one passes the gate
    pub fn seed_genome<R: Rng>(
        &self,
        rng: &mut R,
        density: f64,
        max_attempts: usize,
    ) -> Result<Genome> {
        let length = self.builder.genome_len();
        for _ in 0..max_attempts {
            let genome = random_genome(length, density, rng);
            if self.is_valid(&genome)? {
                return Ok(genome);
            }
        }
        Err(TrussevoError::SeedingExhausted {
            attempts: max_attempts,
        })
    }

    pub fn seed_population<R: Rng>(
        &self,
        rng: &mut R,
        size: usize,
        density: f64,
        max_attempts: usize,
    ) -> Result<Vec<Genome>> {
        (0..size)
            .map(|_| self.seed_genome(rng, density, max_attempts))
            .collect()
    }

    /// Run `reproduce` over the same parents until it yields a generation in
    /// which every genome is valid.
    pub fn admit_generation<R, F>(
        &self,
        parents: &[Genome],
        rng: &mut R,
        max_attempts: usize,
        generation: usize,
        mut reproduce: F,
    ) -> Result<Vec<Genome>>
    where
        R: Rng,
        F: FnMut(&[Genome], &mut R) -> Vec<Genome>,
    {
        for attempt in 1..=max_attempts {
            let candidate = reproduce(parents, rng);
            if self.is_generation_valid(&candidate)? {
                if attempt > 1 {
                    log::debug!(
                        "Generation {} accepted after {} reproduction attempts",
                        generation,
                        attempt
                    );
                }
                return Ok(candidate);
            }
        }
        Err(TrussevoError::ReproductionExhausted {
            attempts: max_attempts,
            generation,
        })
    }
}
