use rand::Rng;

/// Genome representation for the truss search
///
/// One bit per candidate member of the half-grid (see `CandidateGrid`): `true`
/// means the member is present. The structure builder mirrors the enabled
/// members across the centerline, so a genome always describes a symmetric
/// truss.
///
/// The length is fixed for a run and must equal the grid's member count.
pub type Genome = Vec<bool>;

/// Sample a genome where each member is enabled with probability `density`
pub fn random_genome<R: Rng>(length: usize, density: f64, rng: &mut R) -> Genome {
    (0..length).map(|_| rng.gen::<f64>() < density).collect()
}
