//! Revenue lines and the production ramp-up schedule

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single product or service revenue line
///
/// Produces a tax-inclusive revenue amount per operation year via
/// `quantity × unit_price × production_rate(year)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueLine {
    /// Identifier used by percentage-based cost components to link a base
    pub id: u32,

    pub name: String,

    /// Annual sales quantity at full capacity
    pub quantity: f64,

    /// Tax-inclusive unit price
    pub unit_price: f64,

    /// VAT rate on sales (percent)
    pub vat_rate: f64,

    /// Scale this line by the production ramp-up schedule
    #[serde(default = "default_true")]
    pub use_production_rate: bool,
}

fn default_true() -> bool {
    true
}

impl RevenueLine {
    /// Tax-inclusive revenue for an operation year
    pub fn amount_for(&self, op_year: u32, rates: &ProductionRateSchedule) -> f64 {
        let base = self.quantity * self.unit_price;
        if self.use_production_rate {
            base * rates.rate_for(op_year)
        } else {
            base
        }
    }

    /// VAT output tax embedded in the year's tax-inclusive revenue:
    /// `R − R/(1+v)` with `v` the fractional VAT rate
    pub fn output_tax_for(&self, op_year: u32, rates: &ProductionRateSchedule) -> f64 {
        let revenue = self.amount_for(op_year, rates);
        let v = self.vat_rate / 100.0;
        if (1.0 + v).abs() < f64::EPSILON {
            return 0.0;
        }
        revenue - revenue / (1.0 + v)
    }
}

/// Ramp-up ratio per operation year
///
/// Years absent from the schedule run at full capacity (ratio 1.0). That
/// defaulting is policy, not an accident: a partially configured schedule is
/// a normal transient state and `rate_for` is total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductionRateSchedule {
    #[serde(default)]
    rates: BTreeMap<u32, f64>,
}

impl ProductionRateSchedule {
    /// Schedule with every year at full capacity
    pub fn full_capacity() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (u32, f64)>) -> Self {
        Self {
            rates: pairs.into_iter().collect(),
        }
    }

    pub fn set(&mut self, op_year: u32, rate: f64) {
        self.rates.insert(op_year, rate);
    }

    /// Ramp-up ratio for an operation year; 1.0 when not configured
    pub fn rate_for(&self, op_year: u32) -> f64 {
        self.rates.get(&op_year).copied().unwrap_or(1.0)
    }
}
