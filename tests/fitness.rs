use trussevo::config::{EvolutionConfig, GridConfig, MaterialConfig};
use trussevo::engines::evaluation::capacity::{
    euler_critical_load, johnson_critical_load, tensile_capacity,
};
use trussevo::engines::evaluation::{FitnessEvaluator, TrussFitnessEvaluator};
use trussevo::engines::generation::EvolutionEngine;
use trussevo::engines::structure::{
    CandidateGrid, MirroredTrussBuilder, StructureBuilder, Truss,
};
use trussevo::types::Point;
use trussevo::TrussevoError;

fn builder() -> MirroredTrussBuilder {
    MirroredTrussBuilder::new(CandidateGrid::new(&GridConfig::default()))
}

fn genome_with(
    builder: &MirroredTrussBuilder,
    members: &[((f64, f64), (f64, f64))],
) -> Vec<bool> {
    let mut genome = vec![false; builder.genome_len()];
    for &((ax, ay), (bx, by)) in members {
        let slot = builder
            .grid()
            .position_of(Point::new(ax, ay), Point::new(bx, by))
            .unwrap();
        genome[slot] = true;
    }
    genome
}

/// Two diagonals to the apex, a split bottom chord and a center post
fn kingpost(builder: &MirroredTrussBuilder) -> Truss {
    let genome = genome_with(
        builder,
        &[
            ((0.0, 0.0), (7.5, 4.0)),
            ((0.0, 0.0), (7.5, 0.0)),
            ((7.5, 0.0), (7.5, 4.0)),
        ],
    );
    builder.build(&genome).unwrap().unwrap()
}

#[test]
fn test_kingpost_fitness_is_capacity_over_length() {
    let builder = builder();
    let truss = kingpost(&builder);
    let evaluator = TrussFitnessEvaluator::default();
    let material = MaterialConfig::default();

    let analysis = evaluator.analyze(&truss).unwrap();

    // Diagonals take 1.0625 in compression; chords and post carry nothing
    let expected_ratio = euler_critical_load(8.5, &material) / 1.0625;
    assert!((analysis.total_length - 36.0).abs() < 1e-9);
    assert!(
        (analysis.max_load - expected_ratio).abs() / expected_ratio < 1e-6
    );
    assert!(
        (analysis.fitness - expected_ratio / 36.0).abs() / analysis.fitness < 1e-6
    );

    let critical = truss.segment(analysis.critical_member);
    assert!((critical.length() - 8.5).abs() < 1e-9);

    let fitness = evaluator.evaluate(&truss).unwrap();
    assert_eq!(fitness, analysis.fitness);
}

#[test]
fn test_material_weight_follows_length() {
    let builder = builder();
    let truss = kingpost(&builder);
    let evaluator = TrussFitnessEvaluator::default();

    let analysis = evaluator.analyze(&truss).unwrap();
    let material = evaluator.material();
    let expected = 36.0 * material.cross_section_area * material.density;
    assert!((analysis.material_weight - expected).abs() < 1e-12);
}

#[test]
fn test_capacity_regimes_around_transition() {
    let material = MaterialConfig::default();

    assert!(
        johnson_critical_load(1.0, &material) < tensile_capacity(&material)
    );
    assert!(
        johnson_critical_load(1.0, &material) > johnson_critical_load(3.0, &material)
    );
    assert!(
        euler_critical_load(4.0, &material) > euler_critical_load(8.0, &material)
    );
    // Quartering at double length
    let ratio = euler_critical_load(4.0, &material) / euler_critical_load(8.0, &material);
    assert!((ratio - 4.0).abs() < 1e-9);
}

#[test]
fn test_dangling_joint_is_a_numerical_failure() {
    let builder = builder();
    // Kingpost plus a loose spur ending in free air
    let genome = genome_with(
        &builder,
        &[
            ((0.0, 0.0), (7.5, 4.0)),
            ((0.0, 0.0), (7.5, 0.0)),
            ((7.5, 0.0), (7.5, 4.0)),
            ((7.5, 4.0), (3.75, 4.0)),
        ],
    );
    let truss = builder.build(&genome).unwrap().unwrap();
    let evaluator = TrussFitnessEvaluator::default();

    let err = evaluator.evaluate(&truss).unwrap_err();
    assert!(err.is_numerical(), "unexpected error {}", err);
    assert!(matches!(err, TrussevoError::SingularSystem { .. }));

    let engine = EvolutionEngine::new(EvolutionConfig::default(), builder, evaluator);
    assert_eq!(engine.score(&genome).unwrap(), 0.0);
}

#[test]
fn test_missing_load_joint_scores_zero() {
    let builder = builder();
    let genome = genome_with(&builder, &[((0.0, 0.0), (7.5, 0.0))]);
    let truss = builder.build(&genome).unwrap().unwrap();
    assert!(truss.load_node.is_none());

    let evaluator = TrussFitnessEvaluator::default();
    let err = evaluator.analyze(&truss).unwrap_err();
    assert!(matches!(err, TrussevoError::DegenerateLoadPath(_)));

    let engine = EvolutionEngine::new(EvolutionConfig::default(), builder, evaluator);
    assert_eq!(engine.score(&genome).unwrap(), 0.0);
}

#[test]
fn test_infeasible_genome_scores_zero() {
    let builder = builder();
    let genome = vec![false; builder.genome_len()];
    let engine = EvolutionEngine::new(
        EvolutionConfig::default(),
        builder,
        TrussFitnessEvaluator::default(),
    );

    assert_eq!(engine.score(&genome).unwrap(), 0.0);
}

#[test]
fn test_wrong_length_genome_is_not_scored() {
    let engine = EvolutionEngine::new(
        EvolutionConfig::default(),
        builder(),
        TrussFitnessEvaluator::default(),
    );
    let result = engine.score(&[true; 3]);
    assert!(matches!(result, Err(TrussevoError::GenomeLength { .. })));
}
