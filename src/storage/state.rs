//! In-memory platform state shared by the bundled backends

use serde::{Deserialize, Serialize};

use crate::storage::{Region, ScenarioInfo, ScenarioRecord};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct StoredScenario {
    record: ScenarioRecord,
    is_default: bool,
}

/// The full state of one platform location: reference data plus scenarios.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub(crate) struct PlatformState {
    units: Vec<String>,
    regions: Vec<Region>,
    scenarios: Vec<StoredScenario>,
}

impl PlatformState {
    pub(crate) fn add_unit(&mut self, name: &str) -> Result<(), String> {
        if name.is_empty() {
            return Err("unit name must not be empty".to_string());
        }
        if !self.units.iter().any(|u| u == name) {
            self.units.push(name.to_string());
        }
        Ok(())
    }

    pub(crate) fn units(&self) -> Vec<String> {
        self.units.clone()
    }

    pub(crate) fn add_region(&mut self, name: &str, hierarchy: &str) -> Result<(), String> {
        if name.is_empty() {
            return Err("region name must not be empty".to_string());
        }
        match self.regions.iter().find(|r| r.name == name) {
            Some(existing) if existing.hierarchy != hierarchy => Err(format!(
                "region `{name}` already registered with hierarchy `{}`",
                existing.hierarchy
            )),
            Some(_) => Ok(()),
            None => {
                self.regions.push(Region {
                    name: name.to_string(),
                    hierarchy: hierarchy.to_string(),
                });
                Ok(())
            }
        }
    }

    pub(crate) fn regions(&self) -> Vec<Region> {
        self.regions.clone()
    }

    pub(crate) fn next_version(&self, model: &str, scenario: &str) -> u32 {
        self.scenarios
            .iter()
            .filter(|s| s.record.ident.model() == model && s.record.ident.scenario() == scenario)
            .map(|s| s.record.ident.version())
            .max()
            .map_or(1, |v| v + 1)
    }

    pub(crate) fn write_scenario(&mut self, record: &ScenarioRecord) -> Result<(), String> {
        if let Some(existing) = self
            .scenarios
            .iter_mut()
            .find(|s| s.record.ident == record.ident)
        {
            existing.record = record.clone();
            return Ok(());
        }
        let is_default = !self.scenarios.iter().any(|s| {
            s.is_default
                && s.record.ident.model() == record.ident.model()
                && s.record.ident.scenario() == record.ident.scenario()
        });
        self.scenarios.push(StoredScenario {
            record: record.clone(),
            is_default,
        });
        Ok(())
    }

    pub(crate) fn read_scenario(
        &self,
        model: &str,
        scenario: &str,
        version: Option<u32>,
    ) -> Result<ScenarioRecord, String> {
        let matches = |s: &&StoredScenario| {
            s.record.ident.model() == model && s.record.ident.scenario() == scenario
        };
        let found = match version {
            Some(v) => self
                .scenarios
                .iter()
                .filter(matches)
                .find(|s| s.record.ident.version() == v),
            None => self.scenarios.iter().filter(matches).find(|s| s.is_default),
        };
        found.map(|s| s.record.clone()).ok_or_else(|| match version {
            Some(v) => format!("scenario `{model}/{scenario}#{v}` not found"),
            None => format!("no default version of scenario `{model}/{scenario}`"),
        })
    }

    pub(crate) fn set_default_version(
        &mut self,
        model: &str,
        scenario: &str,
        version: u32,
    ) -> Result<(), String> {
        if !self.scenarios.iter().any(|s| {
            s.record.ident.model() == model
                && s.record.ident.scenario() == scenario
                && s.record.ident.version() == version
        }) {
            return Err(format!("scenario `{model}/{scenario}#{version}` not found"));
        }
        for s in &mut self.scenarios {
            if s.record.ident.model() == model && s.record.ident.scenario() == scenario {
                s.is_default = s.record.ident.version() == version;
            }
        }
        Ok(())
    }

    pub(crate) fn scenario_list(&self, default_only: bool) -> Vec<ScenarioInfo> {
        let mut infos: Vec<ScenarioInfo> = self
            .scenarios
            .iter()
            .filter(|s| s.is_default || !default_only)
            .map(|s| ScenarioInfo {
                model: s.record.ident.model().to_string(),
                scenario: s.record.ident.scenario().to_string(),
                version: s.record.ident.version(),
                is_default: s.is_default,
            })
            .collect();
        infos.sort_by(|a, b| {
            (&a.model, &a.scenario, a.version).cmp(&(&b.model, &b.scenario, b.version))
        });
        infos
    }
}
