//! Module defining the platform handle over a storage backend

use std::path::Path;

use tracing::info;

use crate::error::{Error, storage_error};
use crate::storage::{Backend, BackendKind, Region, ScenarioInfo, ScenarioRecord, open_backend};

/// An isolated storage instance hosting scenarios and shared reference data
/// (units and regions).
///
/// A platform is opened explicitly and closed explicitly; operations on a
/// closed platform fail with a storage error. Two open platforms never share
/// state unless a scenario is migrated between them.
pub struct Platform {
    location: String,
    backend: Box<dyn Backend>,
    open: bool,
}

impl Platform {
    pub fn open(location: impl AsRef<Path>, kind: BackendKind) -> Result<Self, Error> {
        let location_str = location.as_ref().display().to_string();
        let backend = open_backend(location.as_ref(), kind)
            .map_err(|msg| storage_error(&location_str, msg))?;
        info!(location = %location_str, ?kind, "platform opened");
        Ok(Self {
            location: location_str,
            backend,
            open: true,
        })
    }

    /// Opens a platform over a caller-supplied backend implementation.
    pub fn with_backend(location: impl Into<String>, backend: Box<dyn Backend>) -> Self {
        Self {
            location: location.into(),
            backend,
            open: true,
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Flushes the backend and releases the handle. Idempotent.
    pub fn close(&mut self) -> Result<(), Error> {
        if self.open {
            self.backend
                .flush()
                .map_err(|msg| storage_error(&self.location, msg))?;
            self.open = false;
            info!(location = %self.location, "platform closed");
        }
        Ok(())
    }

    pub fn add_unit(&mut self, name: &str) -> Result<(), Error> {
        self.ensure_open()?;
        self.backend
            .add_unit(name)
            .map_err(|msg| storage_error(&self.location, msg))
    }

    pub fn units(&self) -> Result<Vec<String>, Error> {
        self.ensure_open()?;
        self.backend
            .units()
            .map_err(|msg| storage_error(&self.location, msg))
    }

    pub fn add_region(&mut self, name: &str, hierarchy: &str) -> Result<(), Error> {
        self.ensure_open()?;
        self.backend
            .add_region(name, hierarchy)
            .map_err(|msg| storage_error(&self.location, msg))
    }

    pub fn regions(&self) -> Result<Vec<Region>, Error> {
        self.ensure_open()?;
        self.backend
            .regions()
            .map_err(|msg| storage_error(&self.location, msg))
    }

    /// All stored scenarios, or only default versions when `default_only`.
    pub fn scenario_list(&self, default_only: bool) -> Result<Vec<ScenarioInfo>, Error> {
        self.ensure_open()?;
        self.backend
            .scenario_list(default_only)
            .map_err(|msg| storage_error(&self.location, msg))
    }

    pub(crate) fn next_version(&self, model: &str, scenario: &str) -> Result<u32, Error> {
        self.ensure_open()?;
        self.backend
            .next_version(model, scenario)
            .map_err(|msg| storage_error(&self.location, msg))
    }

    pub(crate) fn write_scenario(&mut self, record: &ScenarioRecord) -> Result<(), Error> {
        self.ensure_open()?;
        self.backend
            .write_scenario(record)
            .map_err(|msg| storage_error(&self.location, msg))
    }

    pub(crate) fn read_scenario(
        &self,
        model: &str,
        scenario: &str,
        version: Option<u32>,
    ) -> Result<ScenarioRecord, Error> {
        self.ensure_open()?;
        self.backend
            .read_scenario(model, scenario, version)
            .map_err(|msg| storage_error(&self.location, msg))
    }

    pub(crate) fn set_default_version(
        &mut self,
        model: &str,
        scenario: &str,
        version: u32,
    ) -> Result<(), Error> {
        self.ensure_open()?;
        self.backend
            .set_default_version(model, scenario, version)
            .map_err(|msg| storage_error(&self.location, msg))
    }

    fn ensure_open(&self) -> Result<(), Error> {
        if self.open {
            Ok(())
        } else {
            Err(storage_error(&self.location, "platform is closed"))
        }
    }
}
