//! Module for the types defining the scenario domain.

use std::fmt;

use serde::{Deserialize, Serialize};

mod scenario;
mod solution;
mod timeseries;

pub use scenario::{ParRow, Parameter, ScenarioData};
pub(crate) use scenario::CloneMode;
pub use solution::{EquRecord, Solution, SolvedEquation, SolvedVariable, VarRecord, VarValue};
pub use timeseries::TimeseriesEntry;

/// Calendar year used as the time index for model horizons and timeseries.
pub type Year = i32;

/// Identity of a stored scenario: model name, scenario name, and version.
///
/// Versions are allocated per `(model, scenario)` pair by the platform a
/// scenario is created on, so two scenarios on the same platform never share
/// an identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScenarioIdent {
    model: String,
    scenario: String,
    version: u32,
}

impl ScenarioIdent {
    pub fn new(model: impl Into<String>, scenario: impl Into<String>, version: u32) -> Self {
        Self {
            model: model.into(),
            scenario: scenario.into(),
            version,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    pub fn version(&self) -> u32 {
        self.version
    }
}

impl fmt::Display for ScenarioIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.model, self.scenario, self.version)
    }
}
