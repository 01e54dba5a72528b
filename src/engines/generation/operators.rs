use crate::config::RankOrder;
use crate::engines::generation::genome::Genome;
use crate::error::{Result, TrussevoError};
use rand::seq::SliceRandom;
use rand::Rng;

/// Unnormalized rank weights `[1, 1/2, ..., 1/n]`
pub fn rank_weights(n: usize) -> Vec<f64> {
    (1..=n).map(|rank| 1.0 / rank as f64).collect()
}

/// Selection probability of each rank: `(1/r) / Σ(1/i)`
pub fn rank_probabilities(n: usize) -> Vec<f64> {
    let weights = rank_weights(n);
    let total: f64 = weights.iter().sum();
    weights.into_iter().map(|w| w / total).collect()
}

/// Population indices in rank order (rank 1 first)
pub fn rank_order(fitness: &[f64], order: RankOrder) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..fitness.len()).collect();
    match order {
        RankOrder::Ascending => indices.sort_by(|&a, &b| fitness[a].total_cmp(&fitness[b])),
        RankOrder::Descending => indices.sort_by(|&a, &b| fitness[b].total_cmp(&fitness[a])),
    }
    indices
}

/// Rank selection: draw a full population with replacement, weighting each
/// individual by 1/rank rather than by raw fitness.
pub fn rank_selection<R: Rng>(
    population: &[Genome],
    fitness: &[f64],
    order: RankOrder,
    rng: &mut R,
) -> Result<Vec<Genome>> {
    if population.len() != fitness.len() {
        return Err(TrussevoError::FitnessLength {
            population: population.len(),
            fitness: fitness.len(),
        });
    }

    let ranked = rank_order(fitness, order);
    let weights = rank_weights(ranked.len());
    let total: f64 = weights.iter().sum();

    let selected = (0..ranked.len())
        .map(|_| {
            let mut spin = rng.gen::<f64>() * total;
            // Fallback to the last rank guards against rounding at the end of the wheel
            let mut pick = ranked.len() - 1;
            for (position, weight) in weights.iter().enumerate() {
                spin -= weight;
                if spin < 0.0 {
                    pick = position;
                    break;
                }
            }
            population[ranked[pick]].clone()
        })
        .collect();

    Ok(selected)
}

/// Uniform pairwise crossover.
///
/// Each individual joins the crossover pool with probability `cross_rate`.
/// The pool is shuffled and consecutive entries become partners; for every
/// gene position a fair coin decides whether the partners swap that gene.
/// When the pool is odd, the leftover is partnered with a random other
/// individual of the population. Individuals outside the pool only change
/// when picked as that partner.
pub fn crossover<R: Rng>(population: &[Genome], cross_rate: f64, rng: &mut R) -> Vec<Genome> {
    let mut offspring = population.to_vec();

    let mut pool: Vec<usize> = (0..offspring.len())
        .filter(|_| rng.gen::<f64>() < cross_rate)
        .collect();
    pool.shuffle(rng);

    let pairs = pool.chunks_exact(2);
    let leftover = pairs.remainder().first().copied();
    for pair in pairs {
        swap_genes(&mut offspring, pair[0], pair[1], rng);
    }

    if let Some(a) = leftover {
        if offspring.len() > 1 {
            let mut b = rng.gen_range(0..offspring.len() - 1);
            if b >= a {
                b += 1;
            }
            swap_genes(&mut offspring, a, b, rng);
        }
    }

    offspring
}

/// Swap each gene between rows `a` and `b` on a fair coin
fn swap_genes<R: Rng>(population: &mut [Genome], a: usize, b: usize, rng: &mut R) {
    let genes = population[a].len().min(population[b].len());
    for gene in 0..genes {
        if rng.gen::<bool>() {
            let tmp = population[a][gene];
            population[a][gene] = population[b][gene];
            population[b][gene] = tmp;
        }
    }
}

/// Mutation: each gene is resampled uniformly from {false, true} with
/// probability `mutation_rate`. A resample can land on the original value.
pub fn mutate<R: Rng>(population: &[Genome], mutation_rate: f64, rng: &mut R) -> Vec<Genome> {
    let mut mutated = Vec::with_capacity(population.len());
    for genome in population {
        let mut child = genome.clone();
        for gene in child.iter_mut() {
            if rng.gen::<f64>() < mutation_rate {
                *gene = rng.gen::<bool>();
            }
        }
        mutated.push(child);
    }
    mutated
}

/// Crossover followed by mutation over a fixed set of selected parents
pub fn reproduce<R: Rng>(
    parents: &[Genome],
    cross_rate: f64,
    mutation_rate: f64,
    rng: &mut R,
) -> Vec<Genome> {
    let crossed = crossover(parents, cross_rate, rng);
    mutate(&crossed, mutation_rate, rng)
}
