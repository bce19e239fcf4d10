//! Investment appraisal indicators: NPV, IRR and payback period
//!
//! All solvers fail soft: empty series and degenerate numerics produce 0 or
//! a sentinel rather than an error, because partially configured projects
//! are a normal transient state upstream.

use serde::{Deserialize, Serialize};

use super::cashflow::CashFlowTable;
use crate::inputs::FinancialRates;

/// Default Newton-Raphson starting point for the IRR search
pub const DEFAULT_IRR_GUESS: f64 = 0.1;

const MAX_ITERATIONS: u32 = 100;
const CONVERGENCE_TOLERANCE: f64 = 1e-6;
const RATE_FLOOR: f64 = -0.99;
const RATE_CEILING: f64 = 10.0;

/// Net present value of a cash-flow series at a percentage rate
///
/// `Σ cf[i] / (1+r)^i` with `i` zero-based and `r = rate_pct / 100`.
pub fn npv(cash_flows: &[f64], rate_pct: f64) -> f64 {
    let rate = rate_pct / 100.0;
    if (1.0 + rate).abs() < 1e-12 {
        return 0.0;
    }

    cash_flows
        .iter()
        .enumerate()
        .map(|(i, &cf)| cf / (1.0 + rate).powi(i as i32))
        .sum()
}

/// Internal rate of return as a percentage, via Newton-Raphson
///
/// Starts from the default guess, runs at most 100 iterations and stops
/// when the step falls under 1e-6. The rate is clamped to `[-0.99, 10]`
/// after every step so a bad guess cannot diverge; a vanishing derivative
/// returns the last stable estimate instead of failing. An empty series
/// returns 0.
pub fn irr(cash_flows: &[f64]) -> f64 {
    irr_from(cash_flows, DEFAULT_IRR_GUESS)
}

/// IRR with an explicit starting guess (fractional, e.g. 0.1 for 10%)
pub fn irr_from(cash_flows: &[f64], initial_guess: f64) -> f64 {
    if cash_flows.is_empty() {
        return 0.0;
    }

    let mut rate = initial_guess;
    for _ in 0..MAX_ITERATIONS {
        let (npv, dnpv) = npv_and_derivative(cash_flows, rate);

        if dnpv.abs() < 1e-12 {
            // Flat derivative: the step is undefined, keep the last estimate
            return rate * 100.0;
        }

        let next = (rate - npv / dnpv).clamp(RATE_FLOOR, RATE_CEILING);
        if (next - rate).abs() < CONVERGENCE_TOLERANCE {
            return next * 100.0;
        }
        rate = next;
    }

    rate * 100.0
}

/// NPV and its derivative with respect to the fractional rate
fn npv_and_derivative(cash_flows: &[f64], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for (i, &cf) in cash_flows.iter().enumerate() {
        npv += cf / (1.0 + rate).powi(i as i32);
        if i > 0 {
            dnpv -= (i as f64) * cf / (1.0 + rate).powi(i as i32 + 1);
        }
    }

    (npv, dnpv)
}

/// Payback period in years from a cumulative cash-flow series
///
/// Finds the first year whose cumulative flow turns non-negative and
/// interpolates linearly inside it when that year's own flow is positive.
/// A series that never recovers returns the sentinel `length + 1`; an
/// empty series returns 0 (callers map both to a not-applicable state).
pub fn payback_period(cumulative: &[f64]) -> f64 {
    if cumulative.is_empty() {
        return 0.0;
    }

    match cumulative.iter().position(|&c| c >= 0.0) {
        None => cumulative.len() as f64 + 1.0,
        Some(0) => 1.0,
        Some(i) => {
            let year_flow = cumulative[i] - cumulative[i - 1];
            if year_flow > 0.0 {
                i as f64 + cumulative[i - 1].abs() / year_flow
            } else {
                i as f64 + 1.0
            }
        }
    }
}

/// One indicator group: static and discounted views of one series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorGroup {
    /// Internal rate of return (percent)
    pub irr: f64,

    /// Net present value at the benchmark rate
    pub npv: f64,

    /// Undiscounted payback period (years)
    pub static_payback: f64,

    /// Discounted payback period (years)
    pub dynamic_payback: f64,
}

/// The full appraisal grid: pre-tax and post-tax indicator groups
///
/// Derived read-only from a completed cash-flow table; a new set is
/// produced per input snapshot, never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialIndicatorSet {
    pub pre_tax: IndicatorGroup,
    pub post_tax: IndicatorGroup,
}

impl FinancialIndicatorSet {
    /// Compute all indicators from a finished cash-flow table
    pub fn from_table(table: &CashFlowTable, rates: &FinancialRates) -> Self {
        let pre_flows = table.pre_tax_flows();
        let post_flows = table.post_tax_flows();

        Self {
            pre_tax: IndicatorGroup {
                irr: irr(&pre_flows),
                npv: npv(&pre_flows, rates.pre_tax_discount_rate),
                static_payback: payback_period(&table.cumulative_pre_tax()),
                dynamic_payback: payback_period(&table.cumulative_discounted_pre_tax()),
            },
            post_tax: IndicatorGroup {
                irr: irr(&post_flows),
                npv: npv(&post_flows, rates.post_tax_discount_rate),
                static_payback: payback_period(&table.cumulative_post_tax()),
                dynamic_payback: payback_period(&table.cumulative_discounted_post_tax()),
            },
        }
    }
}
