use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Maximum age, in years, of a vehicle the fleet accepts or offers for rent.
pub const MAX_VEHICLE_AGE: i32 = 5;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize, Fromln, AsRefln)]
pub struct YearOfManufacture(i32);

impl YearOfManufacture {
    pub fn new(year: impl Into<i32>) -> Self {
        Self(year.into())
    }

    /// Oldest manufacture year still inside the age window for `current_year`.
    pub fn oldest_allowed(current_year: i32) -> Self {
        Self(current_year.saturating_sub(MAX_VEHICLE_AGE))
    }

    /// Widened so that any pair of `i32` years yields an exact age.
    pub fn age(&self, current_year: i32) -> i64 {
        i64::from(current_year) - i64::from(self.0)
    }

    pub fn is_within_age_limit(&self, current_year: i32) -> bool {
        self.age(current_year) <= i64::from(MAX_VEHICLE_AGE)
    }
}
