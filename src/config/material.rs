use super::traits::{check_positive, ConfigSection};
use crate::error::TrussevoError;
use serde::{Deserialize, Serialize};

/// Brass rod properties in inch/pound units
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialConfig {
    /// psi
    pub modulus_of_elasticity: f64,
    /// psi
    pub yield_stress: f64,
    /// in^2
    pub cross_section_area: f64,
    /// lb/in^3
    pub density: f64,
    /// in^4
    pub moment_of_inertia: f64,
    /// Member length below which the Johnson formula replaces Euler
    pub transition_length: f64,
    pub end_condition_factor: f64,
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            modulus_of_elasticity: 15_900_000.0,
            yield_stress: 59_000.0,
            cross_section_area: 0.006216,
            density: 0.308,
            moment_of_inertia: 1.2968e-5,
            transition_length: 3.3,
            end_condition_factor: 0.8,
        }
    }
}

impl MaterialConfig {
    /// Axial stiffness EA
    pub fn axial_stiffness(&self) -> f64 {
        self.modulus_of_elasticity * self.cross_section_area
    }

    pub fn radius_of_gyration(&self) -> f64 {
        (self.moment_of_inertia / self.cross_section_area).sqrt()
    }
}

impl ConfigSection for MaterialConfig {
    fn section_name() -> &'static str {
        "material"
    }

    fn validate(&self) -> Result<(), TrussevoError> {
        check_positive("material", "modulus_of_elasticity", self.modulus_of_elasticity)?;
        check_positive("material", "yield_stress", self.yield_stress)?;
        check_positive("material", "cross_section_area", self.cross_section_area)?;
        check_positive("material", "density", self.density)?;
        check_positive("material", "moment_of_inertia", self.moment_of_inertia)?;
        check_positive("material", "transition_length", self.transition_length)?;
        check_positive("material", "end_condition_factor", self.end_condition_factor)?;
        Ok(())
    }
}
