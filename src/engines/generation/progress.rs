use super::evolution_engine::{GenerationReport, ProgressCallback};

/// Logs generation progress through the `log` facade
pub struct ConsoleProgressCallback;

impl ProgressCallback for ConsoleProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        log::info!("GENERATION {}", generation);
    }

    fn on_individual_evaluated(&mut self, index: usize, total: usize, fitness: f64) {
        let evaluated = index + 1;
        if evaluated % 10 == 0 || evaluated == total {
            log::debug!(
                "  Evaluated {}/{} trusses (last fitness {:.6})",
                evaluated,
                total,
                fitness
            );
        }
    }

    fn on_generation_complete(&mut self, report: &GenerationReport<'_>) {
        let feasible = report.fitness.iter().filter(|&&f| f > 0.0).count();
        log::info!(
            "Generation {} complete. Best fitness: {:.6}, scored above zero: {}/{}",
            report.generation,
            report.best_fitness,
            feasible,
            report.fitness.len()
        );
    }
}
