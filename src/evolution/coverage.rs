use crate::calendar::{
    DateCandidate, MAX_YEAR, MIN_YEAR, THIRTY_DAY_MONTHS, THIRTY_ONE_DAY_MONTHS,
};
use log::info;
use serde::{Deserialize, Serialize};

/// Valid candidates needed before the valid indicator is satisfied.
pub const MIN_VALID: usize = 10;
/// Invalid candidates needed before the invalid indicator is satisfied.
pub const MIN_INVALID: usize = 10;
/// Boundary candidates needed before the boundary indicator is satisfied.
pub const MIN_BOUNDARY: usize = 5;

/// Number of indicators that feed the coverage quotient.
const INDICATOR_COUNT: usize = 3;

/// Whether a candidate sits on a calendar edge: an extreme year, 29 February
/// in any year, or the last day of a 31- or 30-day month.
///
/// Looser than the month-boundary bonus used for fitness.
pub fn is_boundary_case(candidate: &DateCandidate) -> bool {
    let DateCandidate { day, month, year } = *candidate;
    year == MIN_YEAR
        || year == MAX_YEAR
        || (day == 29 && month == 2)
        || (day == 31 && THIRTY_ONE_DAY_MONTHS.contains(&month))
        || (day == 30 && THIRTY_DAY_MONTHS.contains(&month))
}

/// Population health as seen by the termination check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    pub valid: usize,
    pub invalid: usize,
    pub boundary: usize,
    /// Satisfied indicators divided by three: 0, 1/3, 2/3 or 1
    pub coverage: f64,
}

impl CoverageReport {
    pub fn of(population: &[DateCandidate]) -> Self {
        let valid = population.iter().filter(|c| c.is_valid()).count();
        let invalid = population.len() - valid;
        let boundary = population.iter().filter(|c| is_boundary_case(c)).count();

        let satisfied = [
            valid >= MIN_VALID,
            invalid >= MIN_INVALID,
            boundary >= MIN_BOUNDARY,
        ]
        .into_iter()
        .filter(|&met| met)
        .count();

        Self {
            valid,
            invalid,
            boundary,
            coverage: satisfied as f64 / INDICATOR_COUNT as f64,
        }
    }

    pub fn satisfies(&self, threshold: f64) -> bool {
        self.coverage >= threshold
    }
}

/// Decides whether the generation loop should stop.
///
/// Reaching `max_generations` stops the loop outright. Otherwise the loop
/// stops once coverage reaches `threshold`. Coverage only takes four values,
/// so with the default threshold of 0.95 all three indicators must hold.
pub fn should_terminate(
    population: &[DateCandidate],
    generation: usize,
    threshold: f64,
    max_generations: usize,
) -> bool {
    if generation >= max_generations {
        return true;
    }

    let report = CoverageReport::of(population);
    info!(
        "Generation {}: Coverage={:.2} | Valid={} | Invalid={} | Boundary={}",
        generation, report.coverage, report.valid, report.invalid, report.boundary
    );
    report.satisfies(threshold)
}
