//! Projection tables and the engine that assembles them

mod cashflow;
mod engine;
mod indicators;
mod waterfall;

pub use cashflow::{CashFlowTable, CashFlowTotals, CashFlowYearRecord, ProjectPhase};
pub use engine::{ProjectionEngine, ProjectionOutput};
pub use indicators::{
    irr, irr_from, npv, payback_period, FinancialIndicatorSet, IndicatorGroup, DEFAULT_IRR_GUESS,
};
pub use waterfall::{ProfitWaterfallTable, ProfitWaterfallYearRecord};
