//! Genetic operators applied once per generation.
//!
//! None of these fail: short or empty inputs produce short or empty outputs,
//! so degenerate settings (no parents, no children) shrink a generation
//! instead of aborting the run.

use crate::calendar::{DateCandidate, MAX_YEAR, MIN_YEAR};
use crate::evolution::fitness::fitness;
use rand::Rng;
use std::cmp::Reverse;
use std::collections::HashSet;

/// Floor of the adaptive mutation rate, reached when every child is unique.
pub const MIN_MUTATION_RATE: f64 = 0.05;
/// Ceiling of the adaptive mutation rate.
pub const MAX_MUTATION_RATE: f64 = 0.25;
/// How much a fully duplicated children set raises the rate above the floor.
const DIVERSITY_SENSITIVITY: f64 = 0.2;
/// Rates below this mean the children set is still diverse.
const DIVERSE_RATE_LIMIT: f64 = 0.15;
/// Chance that a year mutation jumps straight to an extreme year.
const EXTREME_YEAR_PROBABILITY: f64 = 0.1;

/// Ranks `population` by fitness and returns the best `num_parents`.
///
/// The sort is stable, so equally fit candidates keep their population order.
/// Returns fewer than `num_parents` when the population is smaller.
pub fn select_parents(population: &[DateCandidate], num_parents: usize) -> Vec<DateCandidate> {
    let mut ranked = population.to_vec();
    ranked.sort_by_key(|candidate| Reverse(fitness(candidate)));
    ranked.truncate(num_parents);
    ranked
}

/// Single-field crossover over every parent pair.
///
/// For each pair `(x, y)` with `x` before `y`, three children are built from
/// parent `y`, each taking exactly one field from parent `x`: first the day,
/// then the month, then the year. Pairs are walked with `x` ascending and `y`
/// ascending, and generation stops as soon as `num_children` children exist,
/// so the walk order decides which children survive a small budget.
/// Children are not deduplicated.
pub fn crossover(parents: &[DateCandidate], num_children: usize) -> Vec<DateCandidate> {
    let mut children = Vec::with_capacity(num_children);
    if num_children == 0 {
        return children;
    }

    for (x, px) in parents.iter().enumerate() {
        for py in &parents[x + 1..] {
            let offspring = [
                DateCandidate::new(px.day, py.month, py.year),
                DateCandidate::new(py.day, px.month, py.year),
                DateCandidate::new(py.day, py.month, px.year),
            ];
            for child in offspring {
                children.push(child);
                if children.len() >= num_children {
                    return children;
                }
            }
        }
    }

    children
}

/// Mutation rate derived from the diversity of a children set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MutationRate {
    /// Probability that a single child is mutated, within `[0.05, 0.25]`
    pub rate: f64,
    /// Unique children divided by all children
    pub diversity: f64,
}

impl MutationRate {
    /// Diversity is still healthy when the rate stays below 0.15.
    pub fn is_diverse(&self) -> bool {
        self.rate < DIVERSE_RATE_LIMIT
    }
}

/// Raises the mutation rate as duplicates accumulate among `children`.
///
/// `rate = clamp(0.05 + (1 - diversity) * 0.2, 0.05, 0.25)`. An empty set
/// counts as fully diverse.
pub fn mutation_rate(children: &[DateCandidate]) -> MutationRate {
    let diversity = if children.is_empty() {
        1.0
    } else {
        let unique: HashSet<&DateCandidate> = children.iter().collect();
        unique.len() as f64 / children.len() as f64
    };

    let rate = (MIN_MUTATION_RATE + (1.0 - diversity) * DIVERSITY_SENSITIVITY)
        .clamp(MIN_MUTATION_RATE, MAX_MUTATION_RATE);

    MutationRate { rate, diversity }
}

/// Which field of a candidate a mutation rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Day,
    Month,
    Year,
}

/// Rewrites exactly one field of `child`, leaving the other two untouched.
///
/// Day and month are redrawn uniformly from `[1, 31]` and `[1, 12]`. A year
/// jumps to 0 or 9999 one time in ten, otherwise it is redrawn from `[0, 9999]`.
pub fn mutate_field<R: Rng>(child: DateCandidate, field: Field, rng: &mut R) -> DateCandidate {
    match field {
        Field::Day => DateCandidate {
            day: rng.random_range(1..=31),
            ..child
        },
        Field::Month => DateCandidate {
            month: rng.random_range(1..=12),
            ..child
        },
        Field::Year => {
            let year = if rng.random_bool(EXTREME_YEAR_PROBABILITY) {
                if rng.random_bool(0.5) { MIN_YEAR } else { MAX_YEAR }
            } else {
                rng.random_range(MIN_YEAR..=MAX_YEAR)
            };
            DateCandidate { year, ..child }
        }
    }
}

/// Mutates each child independently with probability `rate`.
///
/// The mutated field is picked uniformly among day, month and year. The
/// output has the same length and order as `children`.
pub fn mutate<R: Rng>(children: &[DateCandidate], rate: f64, rng: &mut R) -> Vec<DateCandidate> {
    children
        .iter()
        .map(|&child| {
            if rng.random::<f64>() < rate {
                let field = match rng.random_range(0..3) {
                    0 => Field::Day,
                    1 => Field::Month,
                    _ => Field::Year,
                };
                mutate_field(child, field, rng)
            } else {
                child
            }
        })
        .collect()
}
