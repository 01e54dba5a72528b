pub mod evolution_engine;
pub mod genome;
pub mod operators;
pub mod progress;
pub mod validity_gate;

pub use evolution_engine::{EvolutionEngine, EvolutionOutcome, GenerationReport, ProgressCallback};
pub use genome::{random_genome, Genome};
pub use operators::{crossover, mutate, rank_selection, reproduce};
pub use progress::ConsoleProgressCallback;
pub use validity_gate::ValidityGate;
