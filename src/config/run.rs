use super::traits::ConfigSection;
use crate::error::TrussevoError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub name: String,
    /// Checkpoints land in `<output_dir>/<name>/`
    pub output_dir: PathBuf,
    pub checkpoint: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            name: "grid_4_6".to_string(),
            output_dir: PathBuf::from("./img"),
            checkpoint: true,
        }
    }
}

impl RunConfig {
    pub fn run_dir(&self) -> PathBuf {
        self.output_dir.join(&self.name)
    }
}

impl ConfigSection for RunConfig {
    fn section_name() -> &'static str {
        "run"
    }

    fn validate(&self) -> Result<(), TrussevoError> {
        if self.name.trim().is_empty() {
            return Err(TrussevoError::Configuration(
                "Run name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
