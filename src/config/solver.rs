use super::traits::{check_positive, ConfigSection};
use crate::error::TrussevoError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Upper bound on iterative refinement passes after the LU solve
    pub max_iterations: usize,
    /// Pivots smaller than this fraction of the largest diagonal entry are singular
    pub pivot_tolerance: f64,
    /// Refinement stops once the residual norm drops below this, relative to the load norm
    pub residual_tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 500,
            pivot_tolerance: 1e-10,
            residual_tolerance: 1e-10,
        }
    }
}

impl ConfigSection for SolverConfig {
    fn section_name() -> &'static str {
        "solver"
    }

    fn validate(&self) -> Result<(), TrussevoError> {
        check_positive("solver", "pivot_tolerance", self.pivot_tolerance)?;
        check_positive("solver", "residual_tolerance", self.residual_tolerance)?;
        Ok(())
    }
}
