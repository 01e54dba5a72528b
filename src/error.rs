use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrussevoError {
    #[error("Genome length mismatch: grid has {expected} candidate members, genome has {actual}")]
    GenomeLength { expected: usize, actual: usize },

    #[error("Fitness length mismatch: population has {population} genomes, fitness has {fitness} values")]
    FitnessLength { population: usize, fitness: usize },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Singular stiffness matrix at degree of freedom {dof}")]
    SingularSystem { dof: usize },

    #[error("Degenerate load path: {0}")]
    DegenerateLoadPath(String),

    #[error("No valid genome found after {attempts} seeding attempts")]
    SeedingExhausted { attempts: usize },

    #[error("No fully valid generation after {attempts} reproduction attempts (generation {generation})")]
    ReproductionExhausted { attempts: usize, generation: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl TrussevoError {
    /// Numerical failures collapse to a zero fitness instead of aborting a run.
    pub fn is_numerical(&self) -> bool {
        matches!(
            self,
            TrussevoError::SingularSystem { .. } | TrussevoError::DegenerateLoadPath(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, TrussevoError>;
