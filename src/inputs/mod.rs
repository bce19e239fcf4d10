//! Project configuration: the full input snapshot consumed by the engine

mod costs;
mod horizon;
mod investment;
mod revenue;
mod series;
pub mod loader;

pub use costs::{
    CostBasis, CostComponent, OperatingCosts, WageEscalation, WageItem, LARGE_UNIT_DIVISOR,
};
pub use horizon::ProjectHorizon;
pub use investment::InvestmentBreakdown;
pub use loader::ConfigError;
pub use revenue::{ProductionRateSchedule, RevenueLine};
pub use series::{ExternalSeries, YearSeries};

use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

fn default_income_tax_rate() -> f64 {
    25.0
}

fn default_statutory_reserve_rate() -> f64 {
    10.0
}

fn default_surcharge_rate() -> f64 {
    crate::tax::DEFAULT_SURCHARGE_RATE
}

fn default_discount_rate() -> f64 {
    8.0
}

/// Statutory and benchmark rates, all carried as percentages
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialRates {
    /// Corporate income tax rate (percent)
    #[serde(default = "default_income_tax_rate")]
    pub income_tax_rate: f64,

    /// Statutory surplus reserve set aside from net profit (percent)
    #[serde(default = "default_statutory_reserve_rate")]
    pub statutory_reserve_rate: f64,

    /// Composite local surcharge rate on VAT (percent), used only when no
    /// pass-through surcharge series is supplied
    #[serde(default = "default_surcharge_rate")]
    pub surcharge_rate: f64,

    /// Benchmark rate of return discounting the pre-tax series (percent)
    #[serde(default = "default_discount_rate")]
    pub pre_tax_discount_rate: f64,

    /// Benchmark rate of return discounting the post-tax series (percent)
    #[serde(default = "default_discount_rate")]
    pub post_tax_discount_rate: f64,
}

impl Default for FinancialRates {
    fn default() -> Self {
        Self {
            income_tax_rate: default_income_tax_rate(),
            statutory_reserve_rate: default_statutory_reserve_rate(),
            surcharge_rate: default_surcharge_rate(),
            pre_tax_discount_rate: default_discount_rate(),
            post_tax_discount_rate: default_discount_rate(),
        }
    }
}

/// Complete input snapshot for one projection run
///
/// Created fresh from the current configuration on every request; the
/// engine never mutates it. `fingerprint()` gives the structural identity
/// used by the memoization cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInputs {
    pub horizon: ProjectHorizon,

    #[serde(default)]
    pub revenue_lines: Vec<RevenueLine>,

    #[serde(default)]
    pub production_rates: ProductionRateSchedule,

    #[serde(default)]
    pub operating_costs: OperatingCosts,

    #[serde(default)]
    pub investment: InvestmentBreakdown,

    #[serde(default)]
    pub external: ExternalSeries,

    #[serde(default)]
    pub rates: FinancialRates,

    /// Government subsidy received in every operation year
    #[serde(default)]
    pub subsidy_income: f64,
}

impl ProjectInputs {
    /// Structural fingerprint of the whole snapshot
    ///
    /// Hashes the canonical JSON encoding, so any change to any input field
    /// (horizon, lines, schedules, series, rates) produces a different key.
    /// Serialization of a well-formed snapshot cannot fail; the empty-string
    /// fallback keeps this total.
    pub fn fingerprint(&self) -> u64 {
        let encoded = serde_json::to_string(self).unwrap_or_default();
        let mut hasher = DefaultHasher::new();
        encoded.hash(&mut hasher);
        hasher.finish()
    }

    /// A small self-contained demonstration project: two construction years
    /// and ten operation years with a three-year production ramp-up
    pub fn demo_project() -> Self {
        let revenue_lines = vec![
            RevenueLine {
                id: 1,
                name: "Main product".to_string(),
                quantity: 120.0,
                unit_price: 50.0,
                vat_rate: 13.0,
                use_production_rate: true,
            },
            RevenueLine {
                id: 2,
                name: "By-product".to_string(),
                quantity: 400.0,
                unit_price: 1.5,
                vat_rate: 13.0,
                use_production_rate: true,
            },
        ];

        let operating_costs = OperatingCosts {
            raw_materials: vec![CostComponent {
                name: "Raw materials".to_string(),
                basis: CostBasis::Percentage {
                    linked_revenue: None,
                    // The revenue base is already ramp-adjusted, so the
                    // component itself does not re-apply the production rate
                    percentage: 28.0,
                },
                input_tax_rate: Some(13.0),
                use_production_rate: false,
                large_denomination_unit: false,
            }],
            fuel_power: vec![
                CostComponent {
                    name: "Coal".to_string(),
                    basis: CostBasis::QuantityPrice {
                        quantity: 2_000.0,
                        unit_price: 600.0,
                    },
                    input_tax_rate: Some(9.0),
                    use_production_rate: true,
                    large_denomination_unit: true,
                },
                CostComponent {
                    name: "Electricity".to_string(),
                    basis: CostBasis::QuantityPrice {
                        quantity: 1_500_000.0,
                        unit_price: 0.65,
                    },
                    input_tax_rate: Some(13.0),
                    use_production_rate: true,
                    large_denomination_unit: true,
                },
            ],
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
                WageItem {
                    name: "Sales".to_string(),
                    employees: 10.0,
                    annual_salary: 8.0,
                    welfare_rate: 14.0,
                },
            ],
            wage_escalation: Some(WageEscalation {
                change_interval: 3,
                change_percentage: 5.0,
            }),
            other: vec![
                CostComponent {
                    name: "Repairs".to_string(),
                    basis: CostBasis::DirectAmount { amount: 150.0 },
                    input_tax_rate: None,
                    use_production_rate: false,
                    large_denomination_unit: false,
                },
                CostComponent {
                    name: "Other expenses".to_string(),
                    basis: CostBasis::DirectAmount { amount: 200.0 },
                    input_tax_rate: None,
                    use_production_rate: false,
                    large_denomination_unit: false,
                },
            ],
        };

        let external = ExternalSeries {
            // 4000 loan at 6%, straight-line principal over ten years
            interest: YearSeries::from_pairs((1..=10).map(|y| (y, 240.0 - 24.0 * (y - 1) as f64))),
            depreciation: YearSeries::from_pairs((1..=10).map(|y| (y, 480.0))),
            amortization: YearSeries::from_pairs((1..=5).map(|y| (y, 60.0))),
            maintenance_investment: YearSeries::from_pairs([(5, 200.0), (8, 200.0)]),
            surcharges: None,
        };

        Self {
            horizon: ProjectHorizon::new(2, 10),
            revenue_lines,
            production_rates: ProductionRateSchedule::from_pairs([(1, 0.7), (2, 0.85), (3, 0.95)]),
            operating_costs,
            investment: InvestmentBreakdown {
                engineering_cost: 3_000.0,
                equipment_cost: 2_000.0,
                land_and_other: 800.0,
                reserve_fees: 300.0,
                working_capital: 500.0,
                residual_value: 400.0,
            },
            external,
            rates: FinancialRates::default(),
            subsidy_income: 50.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_stable() {
        let inputs = ProjectInputs::demo_project();
        assert_eq!(inputs.fingerprint(), inputs.fingerprint());
        assert_eq!(inputs.fingerprint(), inputs.clone().fingerprint());
    }

    #[test]
    fn test_fingerprint_tracks_every_input() {
        let base = ProjectInputs::demo_project();

        let mut changed = base.clone();
        changed.rates.post_tax_discount_rate += 0.5;
        assert_ne!(base.fingerprint(), changed.fingerprint());

        let mut changed = base.clone();
        changed.production_rates.set(4, 0.99);
        assert_ne!(base.fingerprint(), changed.fingerprint());

        let mut changed = base.clone();
        changed.external.interest.insert(11, 1.0);
        assert_ne!(base.fingerprint(), changed.fingerprint());

        let mut changed = base.clone();
        changed.subsidy_income = 0.0;
        assert_ne!(base.fingerprint(), changed.fingerprint());
    }

    #[test]
    fn test_default_rates() {
        let rates = FinancialRates::default();
        assert_eq!(rates.income_tax_rate, 25.0);
        assert_eq!(rates.statutory_reserve_rate, 10.0);
        assert_eq!(rates.surcharge_rate, 12.0);
    }
}
