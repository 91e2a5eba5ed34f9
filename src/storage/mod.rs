//! Module defining the storage capability interface and the bundled backends

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{ScenarioData, ScenarioIdent};

mod json;
mod memory;
mod state;

pub use json::JsonBackend;
pub use memory::MemoryBackend;

/// Which bundled backend a platform location is opened with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Process-local state, isolated per open platform. Gone on close.
    Memory,
    /// One JSON document per location, reloaded on open.
    JsonFile,
}

/// A region registered on a platform: name plus its place in the spatial
/// hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    pub hierarchy: String,
}

/// A scenario as stored: identity plus data. The default-version flag is
/// managed by the backend, not the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRecord {
    pub ident: ScenarioIdent,
    pub data: ScenarioData,
}

/// One row of a scenario listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioInfo {
    pub model: String,
    pub scenario: String,
    pub version: u32,
    pub is_default: bool,
}

/// Capability interface for scenario storage.
///
/// Errors are plain messages; the platform wraps them with its location.
/// `write_scenario` upserts by identity and marks the first version written
/// for a `(model, scenario)` pair as the default.
pub trait Backend {
    fn add_unit(&mut self, name: &str) -> Result<(), String>;
    fn units(&self) -> Result<Vec<String>, String>;
    fn add_region(&mut self, name: &str, hierarchy: &str) -> Result<(), String>;
    fn regions(&self) -> Result<Vec<Region>, String>;
    fn next_version(&self, model: &str, scenario: &str) -> Result<u32, String>;
    fn write_scenario(&mut self, record: &ScenarioRecord) -> Result<(), String>;
    /// Reads one version, or the default version when `version` is `None`.
    fn read_scenario(
        &self,
        model: &str,
        scenario: &str,
        version: Option<u32>,
    ) -> Result<ScenarioRecord, String>;
    fn set_default_version(&mut self, model: &str, scenario: &str, version: u32)
    -> Result<(), String>;
    /// Listing sorted by `(model, scenario, version)`, optionally filtered
    /// to default versions only.
    fn scenario_list(&self, default_only: bool) -> Result<Vec<ScenarioInfo>, String>;
    fn flush(&mut self) -> Result<(), String>;
}

pub(crate) fn open_backend(location: &Path, kind: BackendKind) -> Result<Box<dyn Backend>, String> {
    match kind {
        BackendKind::Memory => Ok(Box::new(MemoryBackend::default())),
        BackendKind::JsonFile => Ok(Box::new(JsonBackend::open(location)?)),
    }
}
