use crate::calendar::{DateCandidate, MAX_YEAR, MIN_YEAR, THIRTY_DAY_MONTHS, is_leap_year};

const VALID_BASE: u32 = 5;
const INVALID_BASE: u32 = 2;
const LEAP_DAY_BONUS: u32 = 5;
const EXTREME_YEAR_BONUS: u32 = 3;
const MONTH_BOUNDARY_BONUS: u32 = 2;

/// Scores a candidate by how much edge-condition coverage it brings.
///
/// Validity only sets the base; the bonuses for leap days, extreme years and
/// month boundaries are what push boundary-rich candidates to the top of the
/// ranking. The extreme-year and month-boundary bonuses apply to invalid
/// candidates too.
pub fn fitness(candidate: &DateCandidate) -> u32 {
    let DateCandidate { day, month, year } = *candidate;
    let mut score = 0;

    if candidate.is_valid() {
        score += VALID_BASE;
        if day == 29 && month == 2 && is_leap_year(year) {
            score += LEAP_DAY_BONUS;
        }
    } else {
        score += INVALID_BASE;
    }

    if year == MIN_YEAR || year == MAX_YEAR {
        score += EXTREME_YEAR_BONUS;
    }

    if day == 1 || day == 31 || (day == 30 && THIRTY_DAY_MONTHS.contains(&month)) {
        score += MONTH_BOUNDARY_BONUS;
    }

    score
}
