//! VAT and surcharge cascade derived from the revenue and cost configuration

use serde::Serialize;

use crate::inputs::ProjectInputs;

/// City maintenance and construction tax, as a percent of VAT
pub const CITY_MAINTENANCE_RATE: f64 = 7.0;

/// National education surcharge, as a percent of VAT
pub const EDUCATION_SURCHARGE_RATE: f64 = 3.0;

/// Local education surcharge, as a percent of VAT
pub const LOCAL_EDUCATION_SURCHARGE_RATE: f64 = 2.0;

/// Composite local surcharge rate applied to VAT when the tax-configuration
/// collaborator does not publish a surcharge series
pub const DEFAULT_SURCHARGE_RATE: f64 =
    CITY_MAINTENANCE_RATE + EDUCATION_SURCHARGE_RATE + LOCAL_EDUCATION_SURCHARGE_RATE;

/// Per-operation-year tax series, each vector indexed by `operation year − 1`
///
/// Derived once per projection run and shared by the cash-flow table and the
/// profit waterfall so the same values are never computed twice.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaxSeries {
    /// Tax-inclusive operating revenue
    pub revenue_inclusive: Vec<f64>,

    /// Tax-exclusive operating revenue (inclusive minus output tax)
    pub revenue_exclusive: Vec<f64>,

    /// VAT output tax on sales
    pub output_tax: Vec<f64>,

    /// Deductible VAT input tax on purchases
    pub input_tax: Vec<f64>,

    /// VAT payable: output minus input
    pub vat: Vec<f64>,

    /// Local surcharges on VAT
    pub surcharges: Vec<f64>,

    /// Tax-inclusive operating cost
    pub operating_cost_inclusive: Vec<f64>,

    /// Tax-exclusive operating cost (inclusive minus input tax)
    pub operating_cost_exclusive: Vec<f64>,
}

impl TaxSeries {
    /// Derive the full cascade from an input snapshot
    pub fn derive(inputs: &ProjectInputs) -> Self {
        let n = inputs.horizon.operation_years as usize;
        let mut series = Self {
            revenue_inclusive: Vec::with_capacity(n),
            revenue_exclusive: Vec::with_capacity(n),
            output_tax: Vec::with_capacity(n),
            input_tax: Vec::with_capacity(n),
            vat: Vec::with_capacity(n),
            surcharges: Vec::with_capacity(n),
            operating_cost_inclusive: Vec::with_capacity(n),
            operating_cost_exclusive: Vec::with_capacity(n),
        };

        for op_year in 1..=inputs.horizon.operation_years {
            let revenue: f64 = inputs
                .revenue_lines
                .iter()
                .map(|line| line.amount_for(op_year, &inputs.production_rates))
                .sum();
            let output_tax: f64 = inputs
                .revenue_lines
                .iter()
                .map(|line| line.output_tax_for(op_year, &inputs.production_rates))
                .sum();

            let cost = inputs.operating_costs.total_for(
                op_year,
                &inputs.revenue_lines,
                &inputs.production_rates,
            );
            let input_tax = inputs.operating_costs.deductible_input_tax_for(
                op_year,
                &inputs.revenue_lines,
                &inputs.production_rates,
            );

            let vat = output_tax - input_tax;
            let surcharge = match &inputs.external.surcharges {
                Some(published) => published.get(op_year),
                None => vat * inputs.rates.surcharge_rate / 100.0,
            };

            series.revenue_inclusive.push(revenue);
            series.revenue_exclusive.push(revenue - output_tax);
            series.output_tax.push(output_tax);
            series.input_tax.push(input_tax);
            series.vat.push(vat);
            series.surcharges.push(surcharge);
            series.operating_cost_inclusive.push(cost);
            series.operating_cost_exclusive.push(cost - input_tax);
        }

        series
    }

    /// VAT plus surcharges for a 1-indexed operation year
    pub fn vat_and_surcharges(&self, op_year: u32) -> f64 {
        let idx = op_year.saturating_sub(1) as usize;
        let vat = self.vat.get(idx).copied().unwrap_or(0.0);
        let surcharge = self.surcharges.get(idx).copied().unwrap_or(0.0);
        vat + surcharge
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::{ProjectInputs, YearSeries};

    #[test]
    fn test_cascade_identity() {
        let inputs = ProjectInputs::demo_project();
        let tax = TaxSeries::derive(&inputs);

        for i in 0..inputs.horizon.operation_years as usize {
            // Output tax plus tax-exclusive revenue reconstructs revenue
            assert!(
                (tax.output_tax[i] + tax.revenue_exclusive[i] - tax.revenue_inclusive[i]).abs()
                    < 1e-9
            );
            // Same identity on the cost side
            assert!(
                (tax.input_tax[i] + tax.operating_cost_exclusive[i]
                    - tax.operating_cost_inclusive[i])
                    .abs()
                    < 1e-9
            );
            // VAT payable is output minus input
            assert!((tax.vat[i] - (tax.output_tax[i] - tax.input_tax[i])).abs() < 1e-12);
        }
    }

    #[test]
    fn test_composite_surcharge_fallback() {
        let mut inputs = ProjectInputs::demo_project();
        inputs.external.surcharges = None;
        let tax = TaxSeries::derive(&inputs);

        for i in 0..tax.vat.len() {
            let expected = tax.vat[i] * DEFAULT_SURCHARGE_RATE / 100.0;
            assert!((tax.surcharges[i] - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_published_surcharges_pass_through() {
        let mut inputs = ProjectInputs::demo_project();
        inputs.external.surcharges =
            Some(YearSeries::from_pairs((1..=10).map(|y| (y, 33.0 + y as f64))));
        let tax = TaxSeries::derive(&inputs);

        assert!((tax.surcharges[0] - 34.0).abs() < 1e-12);
        assert!((tax.surcharges[9] - 43.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_project_is_all_zero() {
        let mut inputs = ProjectInputs::demo_project();
        inputs.revenue_lines.clear();
        inputs.operating_costs = Default::default();
        let tax = TaxSeries::derive(&inputs);

        assert!(tax.vat.iter().all(|v| v.abs() < 1e-12));
        assert!(tax.surcharges.iter().all(|v| v.abs() < 1e-12));
        assert!(tax.operating_cost_exclusive.iter().all(|v| v.abs() < 1e-12));
    }
}
