use crate::config::RunConfig;
use crate::engines::generation::{GenerationReport, Genome, ProgressCallback};
use crate::engines::structure::StructureBuilder;
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Full population of one generation, overwritten every generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationCheckpoint {
    pub run_name: String,
    pub generation: usize,
    pub saved_at: DateTime<Utc>,
    pub population: Vec<Genome>,
    pub fitness: Vec<f64>,
    pub best_index: usize,
    pub best_fitness: f64,
}

/// Geometry of the best structure of one generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureSnapshot<S> {
    pub generation: usize,
    pub fitness: f64,
    pub structure: S,
}

pub struct CheckpointWriter {
    run_name: String,
    dir: PathBuf,
}

impl CheckpointWriter {
    pub fn new(run: &RunConfig) -> Self {
        Self {
            run_name: run.name.clone(),
            dir: run.run_dir(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn population_path(&self) -> PathBuf {
        self.dir.join("save.json")
    }

    pub fn structure_path(&self, generation: usize) -> PathBuf {
        self.dir.join(format!("best_gen{}.json", generation))
    }

    pub fn write_population(&self, report: &GenerationReport<'_>) -> Result<PathBuf> {
        let checkpoint = PopulationCheckpoint {
            run_name: self.run_name.clone(),
            generation: report.generation,
            saved_at: Utc::now(),
            population: report.population.to_vec(),
            fitness: report.fitness.to_vec(),
            best_index: report.best_index,
            best_fitness: report.best_fitness,
        };
        let path = self.population_path();
        write_json(&path, &checkpoint)?;
        Ok(path)
    }

    pub fn write_structure<S: Serialize>(
        &self,
        generation: usize,
        fitness: f64,
        structure: &S,
    ) -> Result<PathBuf> {
        let snapshot = StructureSnapshot {
            generation,
            fitness,
            structure,
        };
        let path = self.structure_path(generation);
        write_json(&path, &snapshot)?;
        Ok(path)
    }

    pub fn load_population<P: AsRef<Path>>(path: P) -> Result<PopulationCheckpoint> {
        let file = File::open(path)?;
        let checkpoint = serde_json::from_reader(BufReader::new(file))?;
        Ok(checkpoint)
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

/// Writes the population and the best structure after every generation.
///
/// Failures never reach the optimizer: they are logged and skipped.
pub struct CheckpointProgressCallback<B> {
    writer: CheckpointWriter,
    builder: B,
}

impl<B> CheckpointProgressCallback<B> {
    pub fn new(run: &RunConfig, builder: B) -> Self {
        Self {
            writer: CheckpointWriter::new(run),
            builder,
        }
    }

    pub fn writer(&self) -> &CheckpointWriter {
        &self.writer
    }
}

impl<B> ProgressCallback for CheckpointProgressCallback<B>
where
    B: StructureBuilder,
    B::Structure: Serialize,
{
    fn on_generation_start(&mut self, _generation: usize) {}

    fn on_individual_evaluated(&mut self, _index: usize, _total: usize, _fitness: f64) {}

    fn on_generation_complete(&mut self, report: &GenerationReport<'_>) {
        match self.builder.build(report.best_genome()) {
            Ok(Some(structure)) => {
                if let Err(e) = self.writer.write_structure(
                    report.generation,
                    report.best_fitness,
                    &structure,
                ) {
                    log::warn!(
                        "Skipping structure snapshot for generation {}: {}",
                        report.generation,
                        e
                    );
                }
            }
            Ok(None) => {
                log::debug!(
                    "Best genome of generation {} has no geometry to save",
                    report.generation
                );
            }
            Err(e) => {
                log::warn!(
                    "Could not rebuild best genome of generation {}: {}",
                    report.generation,
                    e
                );
            }
        }

        match self.writer.write_population(report) {
            Ok(path) => log::debug!("Population checkpoint written to {}", path.display()),
            Err(e) => log::warn!(
                "Skipping population checkpoint for generation {}: {}",
                report.generation,
                e
            ),
        }
    }
}
