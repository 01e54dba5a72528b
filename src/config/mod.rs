pub mod evolution;
pub mod grid;
pub mod manager;
pub mod material;
pub mod run;
pub mod solver;
pub mod traits;

pub use evolution::{EvolutionConfig, RankOrder};
pub use grid::GridConfig;
pub use manager::{AppConfig, ConfigManager};
pub use material::MaterialConfig;
pub use run::RunConfig;
pub use solver::SolverConfig;
pub use traits::ConfigSection;
