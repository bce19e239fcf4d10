//! Operating cost configuration and year-by-year aggregation

use serde::{Deserialize, Serialize};

use super::revenue::{ProductionRateSchedule, RevenueLine};

/// Divisor for prices quoted in small currency units against quantities in
/// physical units, bringing the product back to the base monetary unit
pub const LARGE_UNIT_DIVISOR: f64 = 10_000.0;

/// Sourcing mode for a cost component
///
/// One variant per mode, resolved by exhaustive match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CostBasis {
    /// Percentage of a revenue base: one linked line, or the total of all
    /// revenue lines when no link is given
    Percentage {
        linked_revenue: Option<u32>,
        percentage: f64,
    },

    /// Physical quantity times unit price
    QuantityPrice { quantity: f64, unit_price: f64 },

    /// Literal annual amount
    DirectAmount { amount: f64 },
}

/// A single operating cost component (raw material, fuel, power, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostComponent {
    pub name: String,

    pub basis: CostBasis,

    /// Input VAT rate (percent) when the purchase is deductible
    #[serde(default)]
    pub input_tax_rate: Option<f64>,

    /// Scale this component by the production ramp-up schedule
    #[serde(default)]
    pub use_production_rate: bool,

    /// Price is quoted per large-denomination unit; the raw quantity × price
    /// product is divided by 10,000 before the production rate applies
    #[serde(default)]
    pub large_denomination_unit: bool,
}

impl CostComponent {
    /// Tax-inclusive cost contribution for an operation year
    ///
    /// Missing links and absent numeric data resolve to 0.
    pub fn amount_for(
        &self,
        op_year: u32,
        revenues: &[RevenueLine],
        rates: &ProductionRateSchedule,
    ) -> f64 {
        let raw = match &self.basis {
            CostBasis::Percentage {
                linked_revenue,
                percentage,
            } => {
                let base = match linked_revenue {
                    Some(id) => revenues
                        .iter()
                        .find(|r| r.id == *id)
                        .map(|r| r.amount_for(op_year, rates))
                        .unwrap_or(0.0),
                    None => revenues.iter().map(|r| r.amount_for(op_year, rates)).sum(),
                };
                base * percentage / 100.0
            }
            CostBasis::QuantityPrice {
                quantity,
                unit_price,
            } => {
                let mut product = quantity * unit_price;
                if self.large_denomination_unit {
                    product /= LARGE_UNIT_DIVISOR;
                }
                product
            }
            CostBasis::DirectAmount { amount } => *amount,
        };

        if self.use_production_rate {
            raw * rates.rate_for(op_year)
        } else {
            raw
        }
    }

    /// Input tax embedded in the year's tax-inclusive amount:
    /// `B × (r/100) / (1 + r/100)`
    pub fn input_tax_for(
        &self,
        op_year: u32,
        revenues: &[RevenueLine],
        rates: &ProductionRateSchedule,
    ) -> f64 {
        let rate = self.input_tax_rate.unwrap_or(0.0);
        let r = rate / 100.0;
        if (1.0 + r).abs() < f64::EPSILON {
            return 0.0;
        }
        self.amount_for(op_year, revenues, rates) * r / (1.0 + r)
    }
}

/// One wage line: a headcount at a base annual salary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WageItem {
    pub name: String,

    pub employees: f64,

    /// Base annual salary per employee, before escalation
    pub annual_salary: f64,

    /// Welfare surcharge on top of salary (percent)
    pub welfare_rate: f64,
}

/// Periodic salary escalation applied to every wage item
///
/// Every `change_interval` years the salary multiplies by
/// `1 + change_percentage/100`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WageEscalation {
    /// Years between salary adjustments
    pub change_interval: u32,

    /// Salary change at each adjustment (percent)
    pub change_percentage: f64,
}

impl WageEscalation {
    /// Number of adjustments in effect by an operation year
    pub fn adjustments_by(&self, op_year: u32) -> u32 {
        if self.change_interval == 0 {
            return 0;
        }
        op_year.saturating_sub(1) / self.change_interval
    }

    /// Cumulative salary multiplier for an operation year
    pub fn factor_for(&self, op_year: u32) -> f64 {
        (1.0 + self.change_percentage / 100.0).powi(self.adjustments_by(op_year) as i32)
    }
}

/// Full operating cost configuration
///
/// Raw materials and fuel/power are the VAT-deductible purchase groups;
/// wages and other expenses carry no input tax.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperatingCosts {
    #[serde(default)]
    pub raw_materials: Vec<CostComponent>,

    #[serde(default)]
    pub fuel_power: Vec<CostComponent>,

    #[serde(default)]
    pub wages: Vec<WageItem>,

    #[serde(default)]
    pub wage_escalation: Option<WageEscalation>,

    /// Repair, management and other expenses without deductible input tax
    #[serde(default)]
    pub other: Vec<CostComponent>,
}

impl OperatingCosts {
    /// Total wage cost for an operation year, welfare and escalation included
    pub fn wage_cost_for(&self, op_year: u32) -> f64 {
        let factor = self
            .wage_escalation
            .map(|e| e.factor_for(op_year))
            .unwrap_or(1.0);

        self.wages
            .iter()
            .map(|w| w.employees * w.annual_salary * factor * (1.0 + w.welfare_rate / 100.0))
            .sum()
    }

    /// Total tax-inclusive operating cost for an operation year
    pub fn total_for(
        &self,
        op_year: u32,
        revenues: &[RevenueLine],
        rates: &ProductionRateSchedule,
    ) -> f64 {
        let components: f64 = self
            .raw_materials
            .iter()
            .chain(&self.fuel_power)
            .chain(&self.other)
            .map(|c| c.amount_for(op_year, revenues, rates))
            .sum();

        components + self.wage_cost_for(op_year)
    }

    /// Deductible input tax for an operation year (raw materials and
    /// fuel/power purchases)
    pub fn deductible_input_tax_for(
        &self,
        op_year: u32,
        revenues: &[RevenueLine],
        rates: &ProductionRateSchedule,
    ) -> f64 {
        self.raw_materials
            .iter()
            .chain(&self.fuel_power)
            .map(|c| c.input_tax_for(op_year, revenues, rates))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn revenue_lines() -> Vec<RevenueLine> {
        vec![
            RevenueLine {
                id: 1,
                name: "Main product".to_string(),
                quantity: 100.0,
                unit_price: 50.0,
                vat_rate: 13.0,
                use_production_rate: true,
            },
            RevenueLine {
                id: 2,
                name: "By-product".to_string(),
                quantity: 400.0,
                unit_price: 2.5,
                vat_rate: 13.0,
                use_production_rate: true,
            },
        ]
    }

    #[test]
    fn test_percentage_of_total_revenue() {
        let revenues = revenue_lines();
        let rates = ProductionRateSchedule::full_capacity();

        let component = CostComponent {
            name: "Raw material".to_string(),
            basis: CostBasis::Percentage {
                linked_revenue: None,
                percentage: 30.0,
            },
            input_tax_rate: Some(13.0),
            use_production_rate: false,
            large_denomination_unit: false,
        };

        // Total revenue = 5000 + 1000 = 6000; 30% = 1800
        assert!((component.amount_for(1, &revenues, &rates) - 1800.0).abs() < 1e-9);
    }

    #[test]
    fn test_percentage_of_linked_line() {
        let revenues = revenue_lines();
        let rates = ProductionRateSchedule::full_capacity();

        let component = CostComponent {
            name: "Packaging".to_string(),
            basis: CostBasis::Percentage {
                linked_revenue: Some(2),
                percentage: 10.0,
            },
            input_tax_rate: None,
            use_production_rate: false,
            large_denomination_unit: false,
        };

        assert!((component.amount_for(1, &revenues, &rates) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_linked_line_is_zero() {
        let revenues = revenue_lines();
        let rates = ProductionRateSchedule::full_capacity();

        let component = CostComponent {
            name: "Orphan".to_string(),
            basis: CostBasis::Percentage {
                linked_revenue: Some(42),
                percentage: 50.0,
            },
            input_tax_rate: None,
            use_production_rate: false,
            large_denomination_unit: false,
        };

        assert_eq!(component.amount_for(1, &revenues, &rates), 0.0);
    }

    #[test]
    fn test_large_denomination_unit_conversion() {
        let rates = ProductionRateSchedule::from_pairs([(1, 0.8)]);

        let fuel = CostComponent {
            name: "Coal".to_string(),
            basis: CostBasis::QuantityPrice {
                quantity: 2_000.0,
                unit_price: 600.0,
            },
            input_tax_rate: Some(9.0),
            use_production_rate: true,
            large_denomination_unit: true,
        };

        // 2000 * 600 / 10000 = 120, then ramp-up 0.8 => 96
        assert!((fuel.amount_for(1, &[], &rates) - 96.0).abs() < 1e-9);
    }

    #[test]
    fn test_input_tax_extraction() {
        let rates = ProductionRateSchedule::full_capacity();

        let material = CostComponent {
            name: "Steel".to_string(),
            basis: CostBasis::DirectAmount { amount: 1130.0 },
            input_tax_rate: Some(13.0),
            use_production_rate: false,
            large_denomination_unit: false,
        };

        // 1130 * 0.13 / 1.13 = 130
        assert!((material.input_tax_for(1, &[], &rates) - 130.0).abs() < 1e-9);

        let untaxed = CostComponent {
            input_tax_rate: None,
            ..material
        };
        assert_eq!(untaxed.input_tax_for(1, &[], &rates), 0.0);
    }

    #[test]
    fn test_wage_escalation_steps() {
        let escalation = WageEscalation {
            change_interval: 3,
            change_percentage: 5.0,
        };

        // Years 1-3: no adjustment; years 4-6: one; year 7: two
        assert_eq!(escalation.adjustments_by(1), 0);
        assert_eq!(escalation.adjustments_by(3), 0);
        assert_eq!(escalation.adjustments_by(4), 1);
        assert_eq!(escalation.adjustments_by(6), 1);
        assert_eq!(escalation.adjustments_by(7), 2);

        assert!((escalation.factor_for(4) - 1.05).abs() < 1e-12);
        assert!((escalation.factor_for(7) - 1.1025).abs() < 1e-12);
    }

    #[test]
    fn test_zero_interval_never_escalates() {
        let escalation = WageEscalation {
            change_interval: 0,
            change_percentage: 5.0,
        };
        assert_eq!(escalation.adjustments_by(30), 0);
        assert!((escalation.factor_for(30) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_wage_cost_with_welfare() {
        let costs = OperatingCosts {
            wages: vec![
                WageItem {
                    name: "Production".to_string(),
                    employees: 60.0,
                    annual_salary: 7.2,
                    welfare_rate: 14.0,
                },
                WageItem {
                    name: "Management".to_string(),
                    employees: 15.0,
                    annual_salary: 9.6,
                    welfare_rate: 14.0,
                },
            ],
            wage_escalation: Some(WageEscalation {
                change_interval: 3,
                change_percentage: 5.0,
            }),
            ..Default::default()
        };

        let base = (60.0 * 7.2 + 15.0 * 9.6) * 1.14;
        assert!((costs.wage_cost_for(1) - base).abs() < 1e-9);
        // One escalation step by year 4
        assert!((costs.wage_cost_for(4) - base * 1.05).abs() < 1e-9);
    }

    #[test]
    fn test_empty_configuration_costs_nothing() {
        let costs = OperatingCosts::default();
        let rates = ProductionRateSchedule::full_capacity();
        assert_eq!(costs.total_for(1, &[], &rates), 0.0);
        assert_eq!(costs.deductible_input_tax_for(1, &[], &rates), 0.0);
    }
}
