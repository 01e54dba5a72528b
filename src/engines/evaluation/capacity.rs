use crate::config::MaterialConfig;
use std::f64::consts::PI;

/// Axial forces below this magnitude (per unit load) are treated as zero
pub const FORCE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRegime {
    /// Short column, parabolic Johnson formula
    Johnson,
    /// Long column, Euler critical load
    Euler,
}

pub fn column_regime(length: f64, material: &MaterialConfig) -> ColumnRegime {
    if length < material.transition_length {
        ColumnRegime::Johnson
    } else {
        ColumnRegime::Euler
    }
}

/// P = A (σy - (1/E) (σy / 2π)² (K L / r)²)
pub fn johnson_critical_load(length: f64, material: &MaterialConfig) -> f64 {
    let slenderness = material.end_condition_factor * length / material.radius_of_gyration();
    let reduction = (material.yield_stress / (2.0 * PI)).powi(2) * slenderness.powi(2)
        / material.modulus_of_elasticity;
    let load = material.cross_section_area * (material.yield_stress - reduction);
    load.max(0.0)
}

/// P = π² E I / (K L)²
pub fn euler_critical_load(length: f64, material: &MaterialConfig) -> f64 {
    PI.powi(2) * material.modulus_of_elasticity * material.moment_of_inertia
        / (material.end_condition_factor * length).powi(2)
}

pub fn compressive_capacity(length: f64, material: &MaterialConfig) -> f64 {
    match column_regime(length, material) {
        ColumnRegime::Johnson => johnson_critical_load(length, material),
        ColumnRegime::Euler => euler_critical_load(length, material),
    }
}

pub fn tensile_capacity(material: &MaterialConfig) -> f64 {
    material.cross_section_area * material.yield_stress
}

/// How many times over a member can carry `force` before it buckles or
/// yields. `None` for members that carry no load.
pub fn capacity_ratio(force: f64, length: f64, material: &MaterialConfig) -> Option<f64> {
    if force.abs() < FORCE_EPSILON {
        return None;
    }
    let capacity = if force < 0.0 {
        compressive_capacity(length, material)
    } else {
        tensile_capacity(material)
    };
    Some(capacity / force.abs())
}
