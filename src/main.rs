use anyhow::{Context, Result};
use trussevo::config::ConfigManager;
use trussevo::data::CheckpointProgressCallback;
use trussevo::engines::evaluation::TrussFitnessEvaluator;
use trussevo::engines::generation::{ConsoleProgressCallback, EvolutionEngine, EvolutionOutcome};
use trussevo::engines::structure::{CandidateGrid, MirroredTrussBuilder, StructureBuilder};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut manager = ConfigManager::new();
    if let Some(path) = std::env::args().nth(1) {
        manager
            .load_from_file(&path)
            .with_context(|| format!("failed to load configuration from {}", path))?;
    }
    let config = manager.get();

    let grid = CandidateGrid::new(&config.grid);
    log::info!(
        "Run {}: {} grid points, {} candidate members per half",
        config.run.name,
        grid.points().len(),
        grid.len()
    );

    let builder = MirroredTrussBuilder::new(grid);
    let evaluator = TrussFitnessEvaluator::new(config.material.clone(), config.solver.clone());
    let mut engine = EvolutionEngine::new(config.evolution.clone(), builder.clone(), evaluator);

    let result = if config.run.checkpoint {
        let mut callback = (
            ConsoleProgressCallback,
            CheckpointProgressCallback::new(&config.run, builder),
        );
        engine.run(&mut callback)
    } else {
        engine.run(&mut ConsoleProgressCallback)
    };
    let outcome = result.context("optimization failed")?;

    final_report(&engine, &outcome)?;
    Ok(())
}

fn final_report(
    engine: &EvolutionEngine<MirroredTrussBuilder, TrussFitnessEvaluator>,
    outcome: &EvolutionOutcome,
) -> Result<()> {
    let scores = engine
        .score_population(&outcome.population, false)
        .context("final scoring failed")?;

    for (i, (genome, score)) in outcome.population.iter().zip(&scores).enumerate() {
        let Some(truss) = engine.builder().build(genome)? else {
            continue;
        };
        match engine.evaluator().analyze(&truss) {
            Ok(analysis) => log::info!(
                "Truss {}: all members {:.2} in, {:.2} lbs, holds max load {:.2}, score {:.4}",
                i,
                analysis.total_length,
                analysis.material_weight,
                analysis.max_load,
                score
            ),
            Err(e) => log::info!("Truss {}: score {:.4} ({})", i, score, e),
        }
    }

    if let Some((_, fitness)) = &outcome.best {
        log::info!("Best fitness across the run: {:.6}", fitness);
    }
    Ok(())
}
