//! Construction investment breakdown and its year allocation rule

use serde::{Deserialize, Serialize};

/// Construction investment estimate, broken down by fee category
///
/// Produced by the investment-estimate collaborator; the engine only needs
/// the totals and the fixed allocation rule over the construction period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvestmentBreakdown {
    /// Engineering and construction works
    #[serde(default)]
    pub engineering_cost: f64,

    /// Equipment purchase, installed in the final construction year
    #[serde(default)]
    pub equipment_cost: f64,

    /// Land acquisition and other non-equipment fees, paid up front
    #[serde(default)]
    pub land_and_other: f64,

    /// Contingency reserve fees
    #[serde(default)]
    pub reserve_fees: f64,

    /// Working capital drawn at the end of construction and recovered at the
    /// end of the horizon
    #[serde(default)]
    pub working_capital: f64,

    /// Residual asset value recovered in the final operation year
    #[serde(default)]
    pub residual_value: f64,
}

impl InvestmentBreakdown {
    /// Total construction investment across all fee categories
    pub fn total_construction(&self) -> f64 {
        self.engineering_cost + self.equipment_cost + self.land_and_other + self.reserve_fees
    }

    /// Construction investment per construction year (index 0 = year 1)
    ///
    /// Engineering cost is spread evenly over the construction period. The
    /// first year additionally carries land and other non-equipment fees,
    /// the last year equipment and reserve fees. A single construction year
    /// receives everything.
    pub fn allocate(&self, construction_years: u32) -> Vec<f64> {
        let n = construction_years as usize;
        if n == 0 {
            return Vec::new();
        }

        let even_share = self.engineering_cost / n as f64;
        let mut years = vec![even_share; n];
        years[0] += self.land_and_other;
        years[n - 1] += self.equipment_cost + self.reserve_fees;
        years
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breakdown() -> InvestmentBreakdown {
        InvestmentBreakdown {
            engineering_cost: 3000.0,
            equipment_cost: 2000.0,
            land_and_other: 800.0,
            reserve_fees: 300.0,
            working_capital: 500.0,
            residual_value: 400.0,
        }
    }

    #[test]
    fn test_allocation_three_years() {
        let years = breakdown().allocate(3);
        assert_eq!(years.len(), 3);

        // Year 1: even engineering share + land/other
        assert!((years[0] - (1000.0 + 800.0)).abs() < 1e-9);
        // Year 2: even engineering share only
        assert!((years[1] - 1000.0).abs() < 1e-9);
        // Year 3: even engineering share + equipment + reserve
        assert!((years[2] - (1000.0 + 2000.0 + 300.0)).abs() < 1e-9);

        // Allocation conserves the total
        let allocated: f64 = years.iter().sum();
        assert!((allocated - breakdown().total_construction()).abs() < 1e-9);
    }

    #[test]
    fn test_allocation_single_year() {
        let years = breakdown().allocate(1);
        assert_eq!(years.len(), 1);
        assert!((years[0] - breakdown().total_construction()).abs() < 1e-9);
    }

    #[test]
    fn test_allocation_zero_years() {
        assert!(breakdown().allocate(0).is_empty());
    }
}
