//! Module defining the timeseries rows attached to a scenario

use serde::{Deserialize, Serialize};

use crate::domain::Year;

/// A single time-indexed observation attached to a scenario.
///
/// Rows tagged `meta` describe the scenario itself (calibration factors,
/// documentation values) rather than model results and survive every
/// solution-clearing operation. Non-meta rows survive only while they predate
/// the relevant first-model-year boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeseriesEntry {
    pub region: String,
    pub variable: String,
    pub unit: String,
    pub year: Year,
    pub value: f64,
    #[serde(default)]
    pub meta: bool,
}

impl TimeseriesEntry {
    pub fn new(
        region: impl Into<String>,
        variable: impl Into<String>,
        unit: impl Into<String>,
        year: Year,
        value: f64,
        meta: bool,
    ) -> Self {
        Self {
            region: region.into(),
            variable: variable.into(),
            unit: unit.into(),
            year,
            value,
            meta,
        }
    }

    /// Whether this row survives clearing against the given horizon boundary.
    pub fn survives(&self, boundary: Year) -> bool {
        self.meta || self.year < boundary
    }
}
