//! Profit and profit-distribution waterfall
//!
//! A strict linear fold over the operation years. Two running accumulators
//! carry everything the next year needs: the loss balance still available to
//! offset future profits, and retained earnings net of the statutory
//! reserve. The fold produces every year in one O(n) pass; per-year lookups
//! read the precomputed rows.

use serde::{Deserialize, Serialize};

use crate::inputs::ProjectInputs;
use crate::tax::TaxSeries;

/// One row of the profit and distribution statement for one operation year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitWaterfallYearRecord {
    /// Operation year, 1-indexed
    pub year: u32,

    /// Tax-exclusive operating revenue
    pub operating_revenue: f64,

    /// Local surcharges on VAT (VAT itself is not a profit-statement item)
    pub tax_and_surcharges: f64,

    /// Operating cost plus depreciation, amortization and interest
    pub total_cost: f64,

    pub subsidy_income: f64,

    pub total_profit: f64,

    /// Prior-year losses still available to offset this year's profit
    pub cumulative_loss: f64,

    pub taxable_income: f64,

    pub income_tax: f64,

    pub net_profit: f64,

    /// Retained earnings carried in from prior years, net of reserve
    pub opening_undistributed: f64,

    /// Net profit plus opening undistributed profit
    pub distributable: f64,

    pub statutory_reserve: f64,

    pub investor_distributable: f64,

    pub common_stock_dividend: f64,

    pub undistributed: f64,

    pub ebit: f64,

    pub ebitda: f64,
}

/// Distribution policy placeholders, fixed at zero
const PREFERRED_STOCK_DIVIDEND: f64 = 0.0;
const ARBITRARY_SURPLUS_RESERVE: f64 = 0.0;
const OTHER_DISTRIBUTION: f64 = 0.0;

/// Ordered profit-waterfall rows over the operation period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfitWaterfallTable {
    pub years: Vec<ProfitWaterfallYearRecord>,
}

impl ProfitWaterfallTable {
    /// Run the waterfall fold over every operation year
    ///
    /// Missing external series years (interest, depreciation, amortization)
    /// read as 0; the fold never aborts.
    pub fn build(inputs: &ProjectInputs, tax: &TaxSeries) -> Self {
        let op_years = inputs.horizon.operation_years;
        let rate = inputs.rates.income_tax_rate / 100.0;
        let reserve_rate = inputs.rates.statutory_reserve_rate / 100.0;

        let mut years = Vec::with_capacity(op_years as usize);
        let mut loss_balance = 0.0_f64;
        let mut retained_earnings = 0.0_f64;

        for year in 1..=op_years {
            let idx = (year - 1) as usize;
            let operating_revenue = tax.revenue_exclusive.get(idx).copied().unwrap_or(0.0);
            let tax_and_surcharges = tax.surcharges.get(idx).copied().unwrap_or(0.0);
            let operating_cost = tax.operating_cost_exclusive.get(idx).copied().unwrap_or(0.0);

            let interest = inputs.external.interest.get(year);
            let depreciation = inputs.external.depreciation.get(year);
            let amortization = inputs.external.amortization.get(year);

            let total_cost = operating_cost + depreciation + amortization + interest;
            let total_profit =
                operating_revenue - tax_and_surcharges - total_cost + inputs.subsidy_income;

            // Loss balance from years 1..y-1, before this year's result
            let cumulative_loss = loss_balance;
            let taxable_income = (total_profit - cumulative_loss).max(0.0);
            let income_tax = taxable_income * rate;
            let net_profit = total_profit - income_tax;

            let opening_undistributed = retained_earnings;
            let distributable = net_profit + opening_undistributed;
            let statutory_reserve = net_profit * reserve_rate;
            let investor_distributable = distributable - statutory_reserve;
            let common_stock_dividend =
                investor_distributable - PREFERRED_STOCK_DIVIDEND - ARBITRARY_SURPLUS_RESERVE;
            let undistributed = investor_distributable
                - PREFERRED_STOCK_DIVIDEND
                - ARBITRARY_SURPLUS_RESERVE
                - OTHER_DISTRIBUTION;

            let ebit = total_profit + interest;
            let ebitda = ebit + depreciation + amortization;

            years.push(ProfitWaterfallYearRecord {
                year,
                operating_revenue,
                tax_and_surcharges,
                total_cost,
                subsidy_income: inputs.subsidy_income,
                total_profit,
                cumulative_loss,
                taxable_income,
                income_tax,
                net_profit,
                opening_undistributed,
                distributable,
                statutory_reserve,
                investor_distributable,
                common_stock_dividend,
                undistributed,
                ebit,
                ebitda,
            });

            // Advance the fold: losses accumulate, profits absorb them
            if total_profit < 0.0 {
                loss_balance += -total_profit;
            } else {
                loss_balance = (loss_balance - total_profit).max(0.0);
            }
            retained_earnings += net_profit * (1.0 - reserve_rate);
        }

        Self { years }
    }

    /// EBIT per operation year, in year order
    pub fn ebit_series(&self) -> Vec<f64> {
        self.years.iter().map(|y| y.ebit).collect()
    }

    /// Residual loss balance left unabsorbed at the end of the horizon
    pub fn residual_loss(&self) -> f64 {
        let mut balance = 0.0_f64;
        for row in &self.years {
            if row.total_profit < 0.0 {
                balance += -row.total_profit;
            } else {
                balance = (balance - row.total_profit).max(0.0);
            }
        }
        balance
    }
}
