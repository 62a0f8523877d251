use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest year a candidate can carry and still be a real date.
pub const MIN_YEAR: i32 = 0;
/// Largest year a candidate can carry and still be a real date.
pub const MAX_YEAR: i32 = 9999;

/// Months that stop at day 30.
pub const THIRTY_DAY_MONTHS: [i32; 4] = [4, 6, 9, 11];
/// Months that run to day 31.
pub const THIRTY_ONE_DAY_MONTHS: [i32; 7] = [1, 3, 5, 7, 8, 10, 12];

/// A (day, month, year) triple under test.
///
/// Nothing is enforced at construction: a candidate may well be calendrically
/// invalid, that is the point of generating it. Validity is derived through
/// [`is_valid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateCandidate {
    pub day: i32,
    pub month: i32,
    pub year: i32,
}

impl DateCandidate {
    pub const fn new(day: i32, month: i32, year: i32) -> Self {
        Self { day, month, year }
    }

    pub fn is_valid(&self) -> bool {
        is_valid(self.day, self.month, self.year)
    }
}

impl fmt::Display for DateCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.day, self.month, self.year)
    }
}

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    year % 400 == 0 || (year % 4 == 0 && year % 100 != 0)
}

/// Number of days in `month` of `year`, or `None` when the month does not exist.
pub fn days_in_month(month: i32, year: i32) -> Option<i32> {
    match month {
        2 if is_leap_year(year) => Some(29),
        2 => Some(28),
        m if THIRTY_DAY_MONTHS.contains(&m) => Some(30),
        1..=12 => Some(31),
        _ => None,
    }
}

/// Decides whether the triple is a real calendar date.
///
/// Total over every integer input: years outside `[0, 9999]`, months outside
/// `[1, 12]` and non-positive days are simply rejected.
pub fn is_valid(day: i32, month: i32, year: i32) -> bool {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return false;
    }
    match days_in_month(month, year) {
        Some(max_day) => (1..=max_day).contains(&day),
        None => false,
    }
}
