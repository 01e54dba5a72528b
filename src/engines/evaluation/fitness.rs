use super::capacity::capacity_ratio;
use super::solver::{solve, NodalLoad};
use crate::config::{MaterialConfig, SolverConfig};
use crate::engines::structure::Truss;
use crate::error::{Result, TrussevoError};

/// Magnitude of the downward unit load at the top-center joint
pub const UNIT_LOAD: f64 = 1.0;

/// Scores a built structure.
///
/// Numerical failures (see `TrussevoError::is_numerical`) are expected for
/// sparse random topologies; the evolution loop turns them into a zero
/// fitness. Any other error is a bug in the caller.
pub trait FitnessEvaluator<S> {
    fn evaluate(&self, structure: &S) -> Result<f64>;
}

/// Detailed result of one unit-load analysis
#[derive(Debug, Clone)]
pub struct TrussAnalysis {
    pub total_length: f64,
    pub material_weight: f64,
    /// Smallest capacity ratio across members, i.e. the load multiple at first failure
    pub max_load: f64,
    pub critical_member: usize,
    pub fitness: f64,
    pub member_forces: Vec<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct TrussFitnessEvaluator {
    material: MaterialConfig,
    solver: SolverConfig,
}

impl TrussFitnessEvaluator {
    pub fn new(material: MaterialConfig, solver: SolverConfig) -> Self {
        Self { material, solver }
    }

    pub fn material(&self) -> &MaterialConfig {
        &self.material
    }

    pub fn analyze(&self, truss: &Truss) -> Result<TrussAnalysis> {
        let load_node = truss.load_node.ok_or_else(|| {
            TrussevoError::DegenerateLoadPath("no joint at the load point".to_string())
        })?;

        let load = NodalLoad {
            node: load_node,
            fx: 0.0,
            fy: -UNIT_LOAD,
        };
        let solution = solve(truss, &[load], &self.material, &self.solver)?;

        let critical = solution
            .member_forces
            .iter()
            .enumerate()
            .filter_map(|(m, &force)| {
                capacity_ratio(force, truss.member_length(m), &self.material).map(|r| (m, r))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1));

        let (critical_member, max_load) = critical.ok_or_else(|| {
            TrussevoError::DegenerateLoadPath("no member carries the load".to_string())
        })?;

        let total_length = truss.total_length();
        let fitness = max_load / total_length;
        if !fitness.is_finite() {
            return Err(TrussevoError::DegenerateLoadPath(format!(
                "non-finite fitness (max load {}, length {})",
                max_load, total_length
            )));
        }

        Ok(TrussAnalysis {
            total_length,
            material_weight: self.material.cross_section_area
                * total_length
                * self.material.density,
            max_load,
            critical_member,
            fitness,
            member_forces: solution.member_forces,
        })
    }
}

impl FitnessEvaluator<Truss> for TrussFitnessEvaluator {
    fn evaluate(&self, structure: &Truss) -> Result<f64> {
        self.analyze(structure).map(|analysis| analysis.fitness)
    }
}
