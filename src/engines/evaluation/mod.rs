pub mod capacity;
pub mod fitness;
pub mod solver;

pub use capacity::{capacity_ratio, column_regime, ColumnRegime};
pub use fitness::{FitnessEvaluator, TrussAnalysis, TrussFitnessEvaluator};
pub use solver::{solve, NodalLoad, TrussSolution};
