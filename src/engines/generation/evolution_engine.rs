use crate::config::EvolutionConfig;
use crate::engines::evaluation::FitnessEvaluator;
use crate::engines::generation::{
    genome::Genome,
    operators::{rank_selection, reproduce},
    validity_gate::ValidityGate,
};
use crate::engines::structure::StructureBuilder;
use crate::error::{Result, TrussevoError};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Snapshot handed to progress callbacks once a generation has been scored
#[derive(Debug, Clone, Copy)]
pub struct GenerationReport<'a> {
    pub generation: usize,
    pub population: &'a [Genome],
    pub fitness: &'a [f64],
    pub best_index: usize,
    pub best_fitness: f64,
}

impl<'a> GenerationReport<'a> {
    pub fn best_genome(&self) -> &'a Genome {
        &self.population[self.best_index]
    }
}

pub trait ProgressCallback {
    fn on_generation_start(&mut self, generation: usize);
    fn on_individual_evaluated(&mut self, index: usize, total: usize, fitness: f64);
    fn on_generation_complete(&mut self, report: &GenerationReport<'_>);
}

/// Lets two callbacks observe the same run
impl<A: ProgressCallback, B: ProgressCallback> ProgressCallback for (A, B) {
    fn on_generation_start(&mut self, generation: usize) {
        self.0.on_generation_start(generation);
        self.1.on_generation_start(generation);
    }

    fn on_individual_evaluated(&mut self, index: usize, total: usize, fitness: f64) {
        self.0.on_individual_evaluated(index, total, fitness);
        self.1.on_individual_evaluated(index, total, fitness);
    }

    fn on_generation_complete(&mut self, report: &GenerationReport<'_>) {
        self.0.on_generation_complete(report);
        self.1.on_generation_complete(report);
    }
}

#[derive(Debug, Clone)]
pub struct EvolutionOutcome {
    /// Population after the last reproduction step
    pub population: Vec<Genome>,
    /// Best fitness of each evaluated generation
    pub best_per_generation: Vec<f64>,
    /// Best genome seen across all generations, with its fitness
    pub best: Option<(Genome, f64)>,
}

pub struct EvolutionEngine<B, E>
where
    B: StructureBuilder,
    E: FitnessEvaluator<B::Structure>,
{
    config: EvolutionConfig,
    builder: B,
    evaluator: E,
    rng: StdRng,
}

impl<B, E> EvolutionEngine<B, E>
where
    B: StructureBuilder,
    E: FitnessEvaluator<B::Structure>,
{
    pub fn new(config: EvolutionConfig, builder: B, evaluator: E) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            config,
            builder,
            evaluator,
            rng,
        }
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    pub fn builder(&self) -> &B {
        &self.builder
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Seed a population of valid genomes
    pub fn initialize_population(&mut self) -> Result<Vec<Genome>> {
        let gate = ValidityGate::new(&self.builder);
        gate.seed_population(
            &mut self.rng,
            self.config.population_size,
            self.config.seed_density,
            self.config.max_seed_attempts,
        )
    }

    /// Seed a population and run the configured number of generations
    pub fn run<C: ProgressCallback>(&mut self, callback: &mut C) -> Result<EvolutionOutcome> {
        let population = self.initialize_population()?;
        log::info!(
            "Seeded {} valid genomes of length {}",
            population.len(),
            self.builder.genome_len()
        );
        self.run_from(population, callback)
    }

    /// Run the generation loop from an existing population
    pub fn run_from<C: ProgressCallback>(
        &mut self,
        mut population: Vec<Genome>,
        callback: &mut C,
    ) -> Result<EvolutionOutcome> {
        let expected = self.builder.genome_len();
        if let Some(genome) = population.iter().find(|g| g.len() != expected) {
            return Err(TrussevoError::GenomeLength {
                expected,
                actual: genome.len(),
            });
        }

        let mut best_per_generation = Vec::with_capacity(self.config.generations);
        let mut best: Option<(Genome, f64)> = None;

        for generation in 0..self.config.generations {
            callback.on_generation_start(generation);

            let fitness = self.evaluate_population(&population, callback)?;

            let Some((best_index, best_fitness)) = best_of(&fitness) else {
                // Nothing to select from or reproduce
                break;
            };
            best_per_generation.push(best_fitness);
            if best.as_ref().map_or(true, |(_, f)| best_fitness > *f) {
                best = Some((population[best_index].clone(), best_fitness));
            }

            log::info!(
                "Generation {}: best fitness {:.6} (individual {})",
                generation,
                best_fitness,
                best_index
            );

            callback.on_generation_complete(&GenerationReport {
                generation,
                population: &population,
                fitness: &fitness,
                best_index,
                best_fitness,
            });

            population = self.next_generation(&population, &fitness, generation)?;
        }

        Ok(EvolutionOutcome {
            population,
            best_per_generation,
            best,
        })
    }

    /// Build and score a single genome. Infeasible builds and numerical
    /// failures score 0.
    pub fn score(&self, genome: &[bool]) -> Result<f64> {
        let structure = match self.builder.build(genome)? {
            Some(structure) => structure,
            None => {
                log::debug!("Genome has no buildable structure, scoring 0");
                return Ok(0.0);
            }
        };

        match self.evaluator.evaluate(&structure) {
            Ok(fitness) if fitness.is_finite() => Ok(fitness.max(0.0)),
            Ok(fitness) => {
                log::debug!("Non-finite fitness {}, scoring 0", fitness);
                Ok(0.0)
            }
            Err(e) if e.is_numerical() => {
                log::debug!("Evaluation failed ({}), scoring 0", e);
                Ok(0.0)
            }
            Err(e) => Err(e),
        }
    }

    fn evaluate_population<C: ProgressCallback>(
        &self,
        population: &[Genome],
        callback: &mut C,
    ) -> Result<Vec<f64>> {
        let mut fitness = Vec::with_capacity(population.len());
        for (i, genome) in population.iter().enumerate() {
            let value = self.score(genome)?;
            callback.on_individual_evaluated(i, population.len(), value);
            fitness.push(value);
        }
        Ok(fitness)
    }

    /// Score a population outside the generation loop; when not `silent`,
    /// every individual is logged.
    pub fn score_population(&self, population: &[Genome], silent: bool) -> Result<Vec<f64>> {
        let mut fitness = Vec::with_capacity(population.len());
        for (i, genome) in population.iter().enumerate() {
            let value = self.score(genome)?;
            if !silent {
                log::info!("Individual {}: fitness {:.6}", i, value);
            }
            fitness.push(value);
        }
        Ok(fitness)
    }

    /// Rank selection once, then crossover and mutation until the validity
    /// gate accepts the whole generation.
    fn next_generation(
        &mut self,
        population: &[Genome],
        fitness: &[f64],
        generation: usize,
    ) -> Result<Vec<Genome>> {
        let selected =
            rank_selection(population, fitness, self.config.rank_order, &mut self.rng)?;

        let cross_rate = self.config.crossover_rate;
        let mutation_rate = self.config.mutation_rate;
        let gate = ValidityGate::new(&self.builder);
        gate.admit_generation(
            &selected,
            &mut self.rng,
            self.config.max_reproduction_attempts,
            generation,
            |parents, rng| reproduce(parents, cross_rate, mutation_rate, rng),
        )
    }
}

/// Index and value of the first maximum
fn best_of(fitness: &[f64]) -> Option<(usize, f64)> {
    fitness
        .iter()
        .copied()
        .enumerate()
        .fold(None, |best, (i, f)| match best {
            Some((_, bf)) if bf >= f => best,
            _ => Some((i, f)),
        })
}
