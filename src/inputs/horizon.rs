//! Project horizon timing model

use serde::{Deserialize, Serialize};

/// Construction and operation period lengths for a capital project
///
/// Project years are 1-indexed over the full horizon: years
/// `1..=construction_years` are the build-out period, the remainder the
/// revenue-generating operation period. The horizon is validated by the
/// configuration layer and immutable for the lifetime of a projection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectHorizon {
    /// Number of construction (pre-revenue) years
    pub construction_years: u32,

    /// Number of operation years following construction
    pub operation_years: u32,
}

impl ProjectHorizon {
    pub fn new(construction_years: u32, operation_years: u32) -> Self {
        Self {
            construction_years,
            operation_years,
        }
    }

    /// Total number of years in the projection
    pub fn total_years(&self) -> u32 {
        self.construction_years + self.operation_years
    }

    /// Whether a 1-indexed project year falls in the construction period
    pub fn is_construction_year(&self, year: u32) -> bool {
        year >= 1 && year <= self.construction_years
    }

    /// The final construction year, if the project has a construction period
    pub fn final_construction_year(&self) -> Option<u32> {
        (self.construction_years > 0).then_some(self.construction_years)
    }

    /// Map a project year to its 1-indexed operation-year number
    ///
    /// Returns `None` for construction years and years past the horizon.
    pub fn operation_year_of(&self, year: u32) -> Option<u32> {
        if year > self.construction_years && year <= self.total_years() {
            Some(year - self.construction_years)
        } else {
            None
        }
    }

    /// Whether an operation-year index is the last year of the horizon
    pub fn is_final_operation_year(&self, op_year: u32) -> bool {
        self.operation_years > 0 && op_year == self.operation_years
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizon_timing() {
        let horizon = ProjectHorizon::new(2, 10);

        assert_eq!(horizon.total_years(), 12);

        // Years 1-2: construction
        assert!(horizon.is_construction_year(1));
        assert!(horizon.is_construction_year(2));
        assert!(!horizon.is_construction_year(3));
        assert_eq!(horizon.final_construction_year(), Some(2));

        // Year 3: first operation year
        assert_eq!(horizon.operation_year_of(2), None);
        assert_eq!(horizon.operation_year_of(3), Some(1));
        assert_eq!(horizon.operation_year_of(12), Some(10));
        assert_eq!(horizon.operation_year_of(13), None);

        assert!(horizon.is_final_operation_year(10));
        assert!(!horizon.is_final_operation_year(9));
    }

    #[test]
    fn test_year_zero_is_not_construction() {
        let horizon = ProjectHorizon::new(3, 5);
        assert!(!horizon.is_construction_year(0));
        assert_eq!(horizon.operation_year_of(0), None);
    }
}
