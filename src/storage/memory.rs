//! Process-local backend, isolated per open platform

use crate::storage::state::PlatformState;
use crate::storage::{Backend, Region, ScenarioInfo, ScenarioRecord};

#[derive(Debug, Default)]
pub struct MemoryBackend {
    state: PlatformState,
}

impl Backend for MemoryBackend {
    fn add_unit(&mut self, name: &str) -> Result<(), String> {
        self.state.add_unit(name)
    }

    fn units(&self) -> Result<Vec<String>, String> {
        Ok(self.state.units())
    }

    fn add_region(&mut self, name: &str, hierarchy: &str) -> Result<(), String> {
        self.state.add_region(name, hierarchy)
    }

    fn regions(&self) -> Result<Vec<Region>, String> {
        Ok(self.state.regions())
    }

    fn next_version(&self, model: &str, scenario: &str) -> Result<u32, String> {
        Ok(self.state.next_version(model, scenario))
    }

    fn write_scenario(&mut self, record: &ScenarioRecord) -> Result<(), String> {
        self.state.write_scenario(record)
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
        self.state.set_default_version(model, scenario, version)
    }

    fn scenario_list(&self, default_only: bool) -> Result<Vec<ScenarioInfo>, String> {
        Ok(self.state.scenario_list(default_only))
    }

    fn flush(&mut self) -> Result<(), String> {
        Ok(())
    }
}
