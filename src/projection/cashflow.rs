//! Cash-flow table output structures

use serde::{Deserialize, Serialize};

/// Which period of the horizon a year belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectPhase {
    Construction,
    Operation,
}

/// One row of the investment cash-flow table for one project year
///
/// Inflow and outflow components are all expressed in the same base
/// monetary unit; no display rounding happens here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowYearRecord {
    /// Project year, 1-indexed over the full horizon
    pub year: u32,

    pub phase: ProjectPhase,

    // Inflows
    /// Tax-inclusive operating revenue
    pub operating_revenue: f64,
    pub subsidy_income: f64,
    /// Residual asset value recovered in the final year
    pub residual_value: f64,
    pub working_capital_recovery: f64,
    pub total_inflow: f64,

    // Outflows
    pub construction_investment: f64,
    pub working_capital: f64,
    /// Tax-exclusive operating cost
    pub operating_cost: f64,
    pub vat_and_surcharges: f64,
    pub maintenance_investment: f64,
    pub total_outflow: f64,

    // Derived flows
    pub pre_tax_cash_flow: f64,
    pub cumulative_pre_tax: f64,
    /// Income tax adjustment on the EBIT base (operation years only)
    pub adjusted_income_tax: f64,
    pub post_tax_cash_flow: f64,
    pub cumulative_post_tax: f64,

    // Discounted ("present value") flows at the two benchmark rates
    pub discounted_pre_tax: f64,
    pub cumulative_discounted_pre_tax: f64,
    pub discounted_post_tax: f64,
    pub cumulative_discounted_post_tax: f64,
}

impl CashFlowYearRecord {
    /// Create a zeroed row for a project year
    pub fn new(year: u32, phase: ProjectPhase) -> Self {
        Self {
            year,
            phase,
            operating_revenue: 0.0,
            subsidy_income: 0.0,
            residual_value: 0.0,
            working_capital_recovery: 0.0,
            total_inflow: 0.0,
            construction_investment: 0.0,
            working_capital: 0.0,
            operating_cost: 0.0,
            vat_and_surcharges: 0.0,
            maintenance_investment: 0.0,
            total_outflow: 0.0,
            pre_tax_cash_flow: 0.0,
            cumulative_pre_tax: 0.0,
            adjusted_income_tax: 0.0,
            post_tax_cash_flow: 0.0,
            cumulative_post_tax: 0.0,
            discounted_pre_tax: 0.0,
            cumulative_discounted_pre_tax: 0.0,
            discounted_post_tax: 0.0,
            cumulative_discounted_post_tax: 0.0,
        }
    }
}

/// Complete ordered cash-flow table over the project horizon
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CashFlowTable {
    pub years: Vec<CashFlowYearRecord>,
}

/// Aggregate totals over the whole table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowTotals {
    pub total_inflow: f64,
    pub total_outflow: f64,
    pub pre_tax_cash_flow: f64,
    pub post_tax_cash_flow: f64,
    pub adjusted_income_tax: f64,
    /// Sum of the discounted pre-tax series (NPV at the pre-tax benchmark)
    pub discounted_pre_tax: f64,
    /// Sum of the discounted post-tax series (NPV at the post-tax benchmark)
    pub discounted_post_tax: f64,
}

impl CashFlowTable {
    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Aggregate totals over all years
    pub fn totals(&self) -> CashFlowTotals {
        CashFlowTotals {
            total_inflow: self.years.iter().map(|y| y.total_inflow).sum(),
            total_outflow: self.years.iter().map(|y| y.total_outflow).sum(),
            pre_tax_cash_flow: self.years.iter().map(|y| y.pre_tax_cash_flow).sum(),
            post_tax_cash_flow: self.years.iter().map(|y| y.post_tax_cash_flow).sum(),
            adjusted_income_tax: self.years.iter().map(|y| y.adjusted_income_tax).sum(),
            discounted_pre_tax: self.years.iter().map(|y| y.discounted_pre_tax).sum(),
            discounted_post_tax: self.years.iter().map(|y| y.discounted_post_tax).sum(),
        }
    }

    /// Pre-tax net cash flow per year, in year order
    pub fn pre_tax_flows(&self) -> Vec<f64> {
        self.years.iter().map(|y| y.pre_tax_cash_flow).collect()
    }

    /// Post-tax net cash flow per year, in year order
    pub fn post_tax_flows(&self) -> Vec<f64> {
        self.years.iter().map(|y| y.post_tax_cash_flow).collect()
    }

    pub fn cumulative_pre_tax(&self) -> Vec<f64> {
        self.years.iter().map(|y| y.cumulative_pre_tax).collect()
    }

    pub fn cumulative_post_tax(&self) -> Vec<f64> {
        self.years.iter().map(|y| y.cumulative_post_tax).collect()
    }

    pub fn cumulative_discounted_pre_tax(&self) -> Vec<f64> {
        self.years
            .iter()
            .map(|y| y.cumulative_discounted_pre_tax)
            .collect()
    }

    pub fn cumulative_discounted_post_tax(&self) -> Vec<f64> {
        self.years
            .iter()
            .map(|y| y.cumulative_discounted_post_tax)
            .collect()
    }
}
