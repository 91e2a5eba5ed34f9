//! File-backed backend: one JSON document per platform location

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::storage::state::PlatformState;
use crate::storage::{Backend, Region, ScenarioInfo, ScenarioRecord};

const STATE_FILE: &str = "platform.json";

/// Persists the whole platform state on every mutation, via a temp file and
/// rename so readers never observe a half-written document. Reopening the
/// same location restores the previous state.
#[derive(Debug)]
pub struct JsonBackend {
    path: PathBuf,
    state: PlatformState,
}

impl JsonBackend {
    pub fn open(location: &Path) -> Result<Self, String> {
        fs::create_dir_all(location)
            .map_err(|e| format!("cannot create platform directory: {e}"))?;
        let path = location.join(STATE_FILE);
        let state = if path.exists() {
            let raw = fs::read_to_string(&path)
                .map_err(|e| format!("cannot read platform state: {e}"))?;
            serde_json::from_str(&raw).map_err(|e| format!("corrupt platform state: {e}"))?
        } else {
            PlatformState::default()
        };
        debug!(path = %path.display(), "opened json platform state");
        Ok(Self { path, state })
    }

    fn persist(&self) -> Result<(), String> {
        let raw = serde_json::to_vec_pretty(&self.state)
            .map_err(|e| format!("cannot serialize platform state: {e}"))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw).map_err(|e| format!("cannot write platform state: {e}"))?;
        fs::rename(&tmp, &self.path).map_err(|e| format!("cannot replace platform state: {e}"))
    }
}

impl Backend for JsonBackend {
    fn add_unit(&mut self, name: &str) -> Result<(), String> {
        self.state.add_unit(name)?;
        self.persist()
    }

    fn units(&self) -> Result<Vec<String>, String> {
        Ok(self.state.units())
    }

    fn add_region(&mut self, name: &str, hierarchy: &str) -> Result<(), String> {
        self.state.add_region(name, hierarchy)?;
        self.persist()
    }

    fn regions(&self) -> Result<Vec<Region>, String> {
        Ok(self.state.regions())
    }

    fn next_version(&self, model: &str, scenario: &str) -> Result<u32, String> {
        Ok(self.state.next_version(model, scenario))
    }

    fn write_scenario(&mut self, record: &ScenarioRecord) -> Result<(), String> {
        self.state.write_scenario(record)?;
        self.persist()
    }

    fn read_scenario(
        &self,
        model: &str,
        scenario: &str,
        version: Option<u32>,
    ) -> Result<ScenarioRecord, String> {
        self.state.read_scenario(model, scenario, version)
    }

    fn set_default_version(
        &mut self,
        model: &str,
        scenario: &str,
        version: u32,
    ) -> Result<(), String> {
        self.state.set_default_version(model, scenario, version)?;
        self.persist()
    }

    fn scenario_list(&self, default_only: bool) -> Result<Vec<ScenarioInfo>, String> {
        Ok(self.state.scenario_list(default_only))
    }

    fn flush(&mut self) -> Result<(), String> {
        self.persist()
    }
}
