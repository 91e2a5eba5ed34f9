//! Module defining the capability interface for numeric optimization engines

use crate::domain::{ScenarioData, Solution};

mod transport;

pub use transport::TransportEngine;

/// Capability interface for the numeric engine that turns a fully populated
/// scenario's sets and parameters into variable and equation values.
///
/// Engines see only the scenario data, never the platform: reference data and
/// persistence stay the lifecycle layer's concern. Errors are plain messages;
/// the caller wraps them with the scenario's identity.
pub trait OptimizationEngine {
    /// Short engine name, used in logs.
    fn name(&self) -> &'static str;

    /// Solves the model for every year at or after the scenario's first
    /// model year and returns the full solution, or fails without producing
    /// partial results.
    fn solve(&self, model: &ScenarioData) -> Result<Solution, String>;
}
