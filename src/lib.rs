//! Scenario lifecycle management for energy-system optimization platforms.
//!
//! A [`Platform`] is an isolated storage instance (in-memory or JSON
//! file-backed) hosting versioned [`Scenario`]s plus the shared reference
//! data (units, regions) their tables point at. The lifecycle contract
//! covers solving through a pluggable [`OptimizationEngine`], clearing
//! solutions, cloning with or without the solution, shifting the model
//! horizon, and migrating a scenario to another platform without dropping
//! references.
//!
//! # Example
//!
//! ```no_run
//! use scenario_engine_rs::{BackendKind, CloneOptions, Platform, TransportEngine, testing};
//!
//! let mut mp = Platform::open("transport-demo", BackendKind::Memory).unwrap();
//! let mut scen = testing::make_transport(&mut mp, false, false).unwrap();
//! scen.solve(&mut mp, &TransportEngine).unwrap();
//! assert!((scen.objective() - 153.675).abs() < 1e-9);
//!
//! // a solution-free clone resets the scenario to its historical baseline
//! let baseline = scen
//!     .clone_scenario(&mut mp, CloneOptions::new().keep_solution(false))
//!     .unwrap();
//! assert!(baseline.objective().is_nan());
//! ```

mod domain;
mod error;
mod input;
mod lifecycle;
mod output;
mod platform;
mod solver;
mod storage;
mod telemetry;

pub mod testing;

pub use domain::{
    EquRecord, ParRow, Parameter, ScenarioData, ScenarioIdent, Solution, SolvedEquation,
    SolvedVariable, TimeseriesEntry, VarRecord, VarValue, Year,
};
pub use error::Error;
pub use input::read_timeseries;
pub use lifecycle::{CloneOptions, Scenario};
pub use output::{SolutionRecord, solution_records};
pub use platform::Platform;
pub use solver::{OptimizationEngine, TransportEngine};
pub use storage::{
    Backend, BackendKind, JsonBackend, MemoryBackend, Region, ScenarioInfo, ScenarioRecord,
};
pub use telemetry::setup_logging;
