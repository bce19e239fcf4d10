//! Core projection engine: one input snapshot in, three result tables out

use crate::inputs::ProjectInputs;
use crate::tax::TaxSeries;

use super::cashflow::{CashFlowTable, CashFlowYearRecord, ProjectPhase};
use super::indicators::FinancialIndicatorSet;
use super::waterfall::ProfitWaterfallTable;

/// Everything one projection run produces
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ProjectionOutput {
    pub cash_flow: CashFlowTable,
    pub waterfall: ProfitWaterfallTable,
    pub indicators: FinancialIndicatorSet,
}

/// Main projection engine
///
/// A pure function of its input snapshot: running it twice on unchanged
/// inputs produces bit-identical output. Year-indexed series are computed
/// in strictly increasing year order because the cumulative and
/// loss-carry-forward fields are left-to-right folds.
pub struct ProjectionEngine {
    inputs: ProjectInputs,
}

impl ProjectionEngine {
    pub fn new(inputs: ProjectInputs) -> Self {
        Self { inputs }
    }

    pub fn inputs(&self) -> &ProjectInputs {
        &self.inputs
    }

    /// Run the full projection: tax cascade, profit waterfall, cash-flow
    /// table, indicator set
    pub fn run(&self) -> ProjectionOutput {
        let tax = TaxSeries::derive(&self.inputs);
        let waterfall = ProfitWaterfallTable::build(&self.inputs, &tax);
        let cash_flow = self.build_cash_flow_table(&tax, &waterfall);
        let indicators = FinancialIndicatorSet::from_table(&cash_flow, &self.inputs.rates);

        log::debug!(
            "projection complete: {} horizon years, {} operation years",
            cash_flow.len(),
            waterfall.years.len()
        );

        ProjectionOutput {
            cash_flow,
            waterfall,
            indicators,
        }
    }

    /// Assemble one cash-flow record per horizon year
    fn build_cash_flow_table(
        &self,
        tax: &TaxSeries,
        waterfall: &ProfitWaterfallTable,
    ) -> CashFlowTable {
        let horizon = self.inputs.horizon;
        let rates = self.inputs.rates;
        let investment = &self.inputs.investment;
        let allocation = investment.allocate(horizon.construction_years);

        let pre_tax_rate = rates.pre_tax_discount_rate / 100.0;
        let post_tax_rate = rates.post_tax_discount_rate / 100.0;

        let mut table = CashFlowTable::default();
        let mut cumulative_pre = 0.0_f64;
        let mut cumulative_post = 0.0_f64;
        let mut cumulative_disc_pre = 0.0_f64;
        let mut cumulative_disc_post = 0.0_f64;

        for year in 1..=horizon.total_years() {
            let phase = if horizon.is_construction_year(year) {
                ProjectPhase::Construction
            } else {
                ProjectPhase::Operation
            };
            let mut row = CashFlowYearRecord::new(year, phase);

            match horizon.operation_year_of(year) {
                None => {
                    row.construction_investment = allocation
                        .get((year - 1) as usize)
                        .copied()
                        .unwrap_or(0.0);
                    // Working capital is drawn just before operations start
                    if Some(year) == horizon.final_construction_year() {
                        row.working_capital = investment.working_capital;
                    }
                }
                Some(op_year) => {
                    let idx = (op_year - 1) as usize;
                    row.operating_revenue =
                        tax.revenue_inclusive.get(idx).copied().unwrap_or(0.0);
                    row.subsidy_income = self.inputs.subsidy_income;
                    if horizon.is_final_operation_year(op_year) {
                        row.residual_value = investment.residual_value;
                        row.working_capital_recovery = investment.working_capital;
                    }

                    row.operating_cost = tax
                        .operating_cost_exclusive
                        .get(idx)
                        .copied()
                        .unwrap_or(0.0);
                    row.vat_and_surcharges = tax.vat_and_surcharges(op_year);
                    row.maintenance_investment =
                        self.inputs.external.maintenance_investment.get(op_year);

                    // Income tax adjustment on the EBIT base, independent of
                    // the waterfall's carry-forward accounting figure
                    let ebit = waterfall
                        .years
                        .get(idx)
                        .map(|w| w.ebit)
                        .unwrap_or(0.0);
                    row.adjusted_income_tax = ebit * rates.income_tax_rate / 100.0;
                }
            }

            row.total_inflow = row.operating_revenue
                + row.subsidy_income
                + row.residual_value
                + row.working_capital_recovery;
            row.total_outflow = row.construction_investment
                + row.working_capital
                + row.operating_cost
                + row.vat_and_surcharges
                + row.maintenance_investment;

            row.pre_tax_cash_flow = row.total_inflow - row.total_outflow;
            row.post_tax_cash_flow = row.pre_tax_cash_flow - row.adjusted_income_tax;

            cumulative_pre += row.pre_tax_cash_flow;
            cumulative_post += row.post_tax_cash_flow;
            row.cumulative_pre_tax = cumulative_pre;
            row.cumulative_post_tax = cumulative_post;

            // Discount to year 1: factor (1+rate)^(year-1)
            let exponent = (year - 1) as i32;
            row.discounted_pre_tax = row.pre_tax_cash_flow / (1.0 + pre_tax_rate).powi(exponent);
            row.discounted_post_tax =
                row.post_tax_cash_flow / (1.0 + post_tax_rate).powi(exponent);

            cumulative_disc_pre += row.discounted_pre_tax;
            cumulative_disc_post += row.discounted_post_tax;
            row.cumulative_discounted_pre_tax = cumulative_disc_pre;
            row.cumulative_discounted_post_tax = cumulative_disc_post;

            table.years.push(row);
        }

        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::ProjectHorizon;
    use crate::projection::cashflow::ProjectPhase;
    use crate::projection::indicators::npv;

    #[test]
    fn test_projection_runs_over_full_horizon() {
        let inputs = ProjectInputs::demo_project();
        let output = ProjectionEngine::new(inputs.clone()).run();

        assert_eq!(output.cash_flow.len(), 12);
        assert_eq!(output.waterfall.years.len(), 10);

        // First two years are construction outflows only
        for row in &output.cash_flow.years[..2] {
            assert_eq!(row.phase, ProjectPhase::Construction);
            assert_eq!(row.operating_revenue, 0.0);
            assert!(row.total_outflow > 0.0);
        }
        assert_eq!(output.cash_flow.years[2].phase, ProjectPhase::Operation);
        assert!(output.cash_flow.years[2].operating_revenue > 0.0);
    }

    #[test]
    fn test_flow_identities() {
        let output = ProjectionEngine::new(ProjectInputs::demo_project()).run();

        let mut running = 0.0;
        for row in &output.cash_flow.years {
            assert!(
                (row.pre_tax_cash_flow - (row.total_inflow - row.total_outflow)).abs() < 1e-9
            );
            assert!(
                (row.post_tax_cash_flow - (row.pre_tax_cash_flow - row.adjusted_income_tax))
                    .abs()
                    < 1e-9
            );
            running += row.pre_tax_cash_flow;
            assert!((row.cumulative_pre_tax - running).abs() < 1e-9);
        }
    }

    #[test]
    fn test_construction_allocation_in_table() {
        let inputs = ProjectInputs::demo_project();
        let expected = inputs.investment.allocate(2);
        let output = ProjectionEngine::new(inputs.clone()).run();

        assert!(
            (output.cash_flow.years[0].construction_investment - expected[0]).abs() < 1e-9
        );
        assert!(
            (output.cash_flow.years[1].construction_investment - expected[1]).abs() < 1e-9
        );
        // Working capital drawn in the final construction year only
        assert_eq!(output.cash_flow.years[0].working_capital, 0.0);
        assert!(
            (output.cash_flow.years[1].working_capital - inputs.investment.working_capital)
                .abs()
                < 1e-9
        );
    }

    #[test]
    fn test_final_year_recoveries() {
        let inputs = ProjectInputs::demo_project();
        let output = ProjectionEngine::new(inputs.clone()).run();
        let last = output.cash_flow.years.last().unwrap();

        assert!((last.residual_value - inputs.investment.residual_value).abs() < 1e-9);
        assert!(
            (last.working_capital_recovery - inputs.investment.working_capital).abs() < 1e-9
        );
        // No other year recovers anything
        for row in &output.cash_flow.years[..output.cash_flow.len() - 1] {
            assert_eq!(row.residual_value, 0.0);
            assert_eq!(row.working_capital_recovery, 0.0);
        }
    }

    #[test]
    fn test_discounted_series_matches_npv() {
        // The cumulative discounted column at the last year equals the NPV
        // of the raw series at the same rate
        let inputs = ProjectInputs::demo_project();
        let output = ProjectionEngine::new(inputs.clone()).run();

        let flows = output.cash_flow.pre_tax_flows();
        let expected = npv(&flows, inputs.rates.pre_tax_discount_rate);
        let last = output.cash_flow.years.last().unwrap();
        assert!((last.cumulative_discounted_pre_tax - expected).abs() < 1e-6);
        assert!((output.indicators.pre_tax.npv - expected).abs() < 1e-9);
    }

    #[test]
    fn test_idempotence() {
        let inputs = ProjectInputs::demo_project();
        let first = ProjectionEngine::new(inputs.clone()).run();
        let second = ProjectionEngine::new(inputs).run();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_revenue_projects_losses() {
        let mut inputs = ProjectInputs::demo_project();
        inputs.revenue_lines.clear();
        let output = ProjectionEngine::new(inputs).run();

        // Every operation year runs at a loss and nothing is taxable
        for row in &output.waterfall.years {
            assert!(row.total_profit < 0.0);
            assert_eq!(row.taxable_income, 0.0);
            assert_eq!(row.income_tax, 0.0);
        }
        // Cash never pays back: sentinel is horizon length + 1
        assert_eq!(
            output.indicators.pre_tax.static_payback,
            output.cash_flow.len() as f64 + 1.0
        );
    }

    #[test]
    fn test_operation_only_horizon() {
        let mut inputs = ProjectInputs::demo_project();
        inputs.horizon = ProjectHorizon::new(1, 3);
        let output = ProjectionEngine::new(inputs).run();
        assert_eq!(output.cash_flow.len(), 4);
        assert_eq!(output.waterfall.years.len(), 3);
    }
}
