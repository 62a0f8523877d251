use crate::calendar::{DateCandidate, MAX_YEAR, MIN_YEAR};
use indexmap::IndexSet;
use log::debug;
use rand::Rng;

/// A generation of candidates. After the seed generation duplicates are
/// allowed: elites and mutated children are merged without deduplication.
pub type Population = Vec<DateCandidate>;

/// Edge cases every seed generation starts from.
pub const BOUNDARY_SEEDS: [DateCandidate; 5] = [
    DateCandidate::new(1, 1, 0),
    DateCandidate::new(31, 12, 9999),
    DateCandidate::new(29, 2, 2020),
    DateCandidate::new(29, 2, 2021),
    DateCandidate::new(31, 4, 2023),
];

/// Uniformly samples a triple from the generator's ranges:
/// day in `[1, 31]`, month in `[1, 12]`, year in `[0, 9999]`.
pub fn random_candidate<R: Rng>(rng: &mut R) -> DateCandidate {
    DateCandidate::new(
        rng.random_range(1..=31),
        rng.random_range(1..=12),
        rng.random_range(MIN_YEAR..=MAX_YEAR),
    )
}

/// Builds the seed generation of `n` unique candidates.
///
/// The boundary seeds go in first. Random samples then fill the rest: while
/// fewer than half of `n` are present only valid dates are admitted, after
/// that only invalid ones. The phase follows the current size, so the seeds
/// count toward both halves. When `n` is below the number of seeds the
/// seeds alone are returned.
///
/// The result is insertion-ordered, which keeps selection and crossover
/// pairing reproducible for a given random source.
pub fn initialize_population<R: Rng>(n: usize, rng: &mut R) -> Population {
    let mut population: IndexSet<DateCandidate> = BOUNDARY_SEEDS.iter().copied().collect();
    let mut rejected = 0usize;

    while population.len() < n {
        let candidate = random_candidate(rng);
        let want_valid = population.len() * 2 < n;
        if candidate.is_valid() == want_valid {
            if !population.insert(candidate) {
                rejected += 1;
            }
        } else {
            rejected += 1;
        }
    }

    debug!(
        "Seed generation of {} built, {} samples rejected",
        population.len(),
        rejected
    );
    population.into_iter().collect()
}
