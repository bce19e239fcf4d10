//! Year-indexed value series supplied by external collaborators

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sparse year-indexed series of monetary values
///
/// Absent years read as 0. Backed by an ordered map so the serialized form
/// (and therefore the input fingerprint) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearSeries {
    #[serde(default)]
    values: BTreeMap<u32, f64>,
}

impl YearSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (u32, f64)>) -> Self {
        Self {
            values: pairs.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, year: u32, value: f64) {
        self.values.insert(year, value);
    }

    /// Value for a year; absent years are 0 by policy, never an error
    pub fn get(&self, year: u32) -> f64 {
        self.values.get(&year).copied().unwrap_or(0.0)
    }

    /// Sum over all populated years
    pub fn total(&self) -> f64 {
        self.values.values().sum()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.values.iter().map(|(&y, &v)| (y, v))
    }
}

/// Pre-computed per-year series consumed from collaborators
///
/// Interest comes from the loan repayment schedule, depreciation and
/// amortization from the depreciation schedule, maintenance investment from
/// the investment estimate. All are keyed by 1-indexed operation year.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalSeries {
    /// Interest expense per operation year
    #[serde(default)]
    pub interest: YearSeries,

    /// Depreciation charge per operation year
    #[serde(default)]
    pub depreciation: YearSeries,

    /// Amortization charge per operation year
    #[serde(default)]
    pub amortization: YearSeries,

    /// Maintenance (sustaining) investment per operation year
    #[serde(default)]
    pub maintenance_investment: YearSeries,

    /// Surcharges on VAT published by the tax-rate configuration owner.
    /// When present this series is used verbatim instead of recomputing
    /// surcharges from the composite rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surcharges: Option<YearSeries>,
}
