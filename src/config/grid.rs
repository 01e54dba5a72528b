use super::traits::{check_positive, ConfigSection};
use crate::error::TrussevoError;
use serde::{Deserialize, Serialize};

/// Design envelope and candidate grid resolution (inches)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Full distance between the two base supports
    pub span: f64,
    pub height: f64,
    /// Divisions along x over half the span (centerline included)
    pub half_divisions_x: usize,
    pub divisions_y: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            span: 15.0,
            height: 4.0,
            half_divisions_x: 2,
            divisions_y: 6,
        }
    }
}

impl ConfigSection for GridConfig {
    fn section_name() -> &'static str {
        "grid"
    }

    fn validate(&self) -> Result<(), TrussevoError> {
        check_positive("grid", "span", self.span)?;
        check_positive("grid", "height", self.height)?;
        if self.half_divisions_x == 0 || self.divisions_y == 0 {
            return Err(TrussevoError::Configuration(
                "Grid divisions must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
