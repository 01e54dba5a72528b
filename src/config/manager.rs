use super::{
    evolution::EvolutionConfig, grid::GridConfig, material::MaterialConfig, run::RunConfig,
    solver::SolverConfig, traits::ConfigSection,
};
use crate::error::TrussevoError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub run: RunConfig,
    pub grid: GridConfig,
    pub evolution: EvolutionConfig,
    pub material: MaterialConfig,
    pub solver: SolverConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), TrussevoError> {
        validate_section(&self.run)?;
        validate_section(&self.grid)?;
        validate_section(&self.evolution)?;
        validate_section(&self.material)?;
        validate_section(&self.solver)?;
        Ok(())
    }
}

/// Tag configuration errors with the TOML table they came from
fn validate_section<S: ConfigSection>(section: &S) -> Result<(), TrussevoError> {
    section.validate().map_err(|e| match e {
        TrussevoError::Configuration(msg) => {
            TrussevoError::Configuration(format!("[{}] {}", S::section_name(), msg))
        }
        other => other,
    })
}

pub struct ConfigManager {
    config: AppConfig,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    /// Load a TOML file. Sections or fields missing from the file keep their defaults.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), TrussevoError> {
        let path = path.as_ref();
        let settings = config::Config::builder()
            .add_source(config::File::from(path).format(config::FileFormat::Toml))
            .build()
            .map_err(|e| {
                TrussevoError::Configuration(format!(
                    "Failed to read config {}: {}",
                    path.display(),
                    e
                ))
            })?;

        let config: AppConfig = settings
            .try_deserialize()
            .map_err(|e| TrussevoError::Configuration(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        log::info!("Loaded configuration from {}", path.display());
        self.config = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), TrussevoError> {
        let toml_str = toml::to_string_pretty(&self.config)
            .map_err(|e| TrussevoError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| TrussevoError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config.clone()
    }

    pub fn update<F>(&mut self, f: F) -> Result<(), TrussevoError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut candidate = self.config.clone();
        f(&mut candidate);
        candidate.validate()?;
        self.config = candidate;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.evolution.population_size, 40);
        assert_eq!(config.evolution.generations, 20);
        assert_eq!(config.run.name, "grid_4_6");
    }

    #[test]
    fn test_update_rejects_invalid_rate() {
        let mut manager = ConfigManager::new();
        let result = manager.update(|c| c.evolution.mutation_rate = 1.5);
        match result {
            Err(TrussevoError::Configuration(msg)) => assert!(msg.starts_with("[evolution]")),
            other => panic!("expected configuration error, got {:?}", other),
        }
        // Rejected updates leave the previous config in place
        assert_eq!(manager.get().evolution.mutation_rate, 0.01);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trussevo.toml");

        let mut manager = ConfigManager::new();
        manager
            .update(|c| {
                c.run.name = "grid_2_3".to_string();
                c.evolution.population_size = 12;
                c.grid.divisions_y = 3;
            })
            .unwrap();
        manager.save_to_file(&path).unwrap();

        let mut loaded = ConfigManager::new();
        loaded.load_from_file(&path).unwrap();
        let config = loaded.get();
        assert_eq!(config.run.name, "grid_2_3");
        assert_eq!(config.evolution.population_size, 12);
        assert_eq!(config.grid.divisions_y, 3);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[evolution]\ngenerations = 3").unwrap();

        let mut manager = ConfigManager::new();
        manager.load_from_file(&path).unwrap();
        let config = manager.get();
        assert_eq!(config.evolution.generations, 3);
        assert_eq!(config.evolution.population_size, 40);
        assert_eq!(config.grid.span, 15.0);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[evolution]\ncrossover_rate = -0.5\n").unwrap();

        let mut manager = ConfigManager::new();
        assert!(manager.load_from_file(&path).is_err());
    }
}
