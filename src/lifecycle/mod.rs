//! Module for the scenario lifecycle: create, solve, clear, clone, migrate

use std::collections::HashMap;

use tracing::{debug, info};

use crate::domain::{
    CloneMode, EquRecord, ParRow, Parameter, ScenarioData, ScenarioIdent, TimeseriesEntry,
    VarRecord, VarValue, Year,
};
use crate::error::{Error, argument_error, options_error, reference_error, solver_error, state_error};
use crate::platform::Platform;
use crate::solver::OptimizationEngine;
use crate::storage::ScenarioRecord;

/// Options for cloning a scenario.
///
/// Defaults: same model and scenario names (version allocated on the target
/// platform), solution kept. A horizon shift always produces a solution-free
/// clone; pre-boundary values of mapped variables become historical
/// parameters (`ACT` becomes `historical_activity`, `CAP_NEW` becomes
/// `historical_new_capacity`).
#[derive(Debug, Clone)]
pub struct CloneOptions {
    model: Option<String>,
    scenario: Option<String>,
    keep_solution: bool,
    shift_first_model_year: Option<Year>,
}

impl CloneOptions {
    pub fn new() -> Self {
        Self {
            model: None,
            scenario: None,
            keep_solution: true,
            shift_first_model_year: None,
        }
    }

    /// Target model name; the source's name when unset.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Target scenario name; the source's name when unset.
    pub fn scenario(mut self, scenario: impl Into<String>) -> Self {
        self.scenario = Some(scenario.into());
        self
    }

    pub fn keep_solution(mut self, keep: bool) -> Self {
        self.keep_solution = keep;
        self
    }

    pub fn shift_first_model_year(mut self, year: Year) -> Self {
        self.shift_first_model_year = Some(year);
        self
    }

    fn mode(&self) -> CloneMode {
        match self.shift_first_model_year {
            Some(year) => CloneMode::Shift(year),
            None if self.keep_solution => CloneMode::Full,
            None => CloneMode::Reset,
        }
    }
}

impl Default for CloneOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// A named, versioned bundle of model input data plus optional solved
/// output, bound to the platform it was read from or created on.
///
/// The handle owns its data; operations that mutate or persist state take
/// the platform explicitly and write the scenario through in a single
/// storage call, so a failed operation never leaves a partially-updated
/// record behind.
#[derive(Debug)]
pub struct Scenario {
    ident: ScenarioIdent,
    data: ScenarioData,
}

impl Scenario {
    /// Creates a new scenario on the platform, allocating the next version
    /// for the `(model, scenario)` pair.
    pub fn new(
        mp: &mut Platform,
        model: &str,
        scenario: &str,
        first_model_year: Year,
    ) -> Result<Self, Error> {
        let version = mp.next_version(model, scenario)?;
        let scen = Self {
            ident: ScenarioIdent::new(model, scenario, version),
            data: ScenarioData::new(first_model_year),
        };
        scen.store(mp)?;
        debug!(ident = %scen.ident, "scenario created");
        Ok(scen)
    }

    /// Loads the default version of a stored scenario.
    pub fn load(mp: &Platform, model: &str, scenario: &str) -> Result<Self, Error> {
        let record = mp.read_scenario(model, scenario, None)?;
        Ok(Self {
            ident: record.ident,
            data: record.data,
        })
    }

    /// Loads a specific version of a stored scenario.
    pub fn load_version(
        mp: &Platform,
        model: &str,
        scenario: &str,
        version: u32,
    ) -> Result<Self, Error> {
        let record = mp.read_scenario(model, scenario, Some(version))?;
        Ok(Self {
            ident: record.ident,
            data: record.data,
        })
    }

    pub fn ident(&self) -> &ScenarioIdent {
        &self.ident
    }

    pub fn model(&self) -> &str {
        self.ident.model()
    }

    pub fn scenario_name(&self) -> &str {
        self.ident.scenario()
    }

    pub fn version(&self) -> u32 {
        self.ident.version()
    }

    pub fn first_model_year(&self) -> Year {
        self.data.first_model_year()
    }

    pub fn has_solution(&self) -> bool {
        self.data.has_solution()
    }

    /// The underlying data, as handed to optimization engines.
    pub fn data(&self) -> &ScenarioData {
        &self.data
    }

    pub fn set_members(&self, name: &str) -> Option<&[String]> {
        self.data.set_members(name)
    }

    pub fn par(&self, name: &str) -> Option<&Parameter> {
        self.data.parameter(name)
    }

    pub fn timeseries(&self) -> &[TimeseriesEntry] {
        self.data.timeseries()
    }

    /// Scalar variable lookup; NaN when unsolved, never an error.
    pub fn var(&self, name: &str) -> VarValue {
        self.data.var(name)
    }

    /// Scalar equation lookup; NaN when unsolved, never an error.
    pub fn equ(&self, name: &str) -> VarValue {
        self.data.equ(name)
    }

    pub fn var_records(&self, name: &str) -> &[VarRecord] {
        self.data.var_records(name)
    }

    pub fn equ_records(&self, name: &str) -> &[EquRecord] {
        self.data.equ_records(name)
    }

    /// The objective value, NaN when unsolved.
    pub fn objective(&self) -> f64 {
        self.var("OBJ").lvl
    }

    pub fn add_set(&mut self, mp: &mut Platform, name: &str, members: &[&str]) -> Result<(), Error> {
        self.data.add_set(name, members);
        self.store(mp)
    }

    pub fn add_par(
        &mut self,
        mp: &mut Platform,
        name: &str,
        dims: &[&str],
        rows: Vec<ParRow>,
    ) -> Result<(), Error> {
        self.data.add_parameter(name, dims, rows);
        self.store(mp)
    }

    pub fn add_timeseries(
        &mut self,
        mp: &mut Platform,
        entries: impl IntoIterator<Item = TimeseriesEntry>,
    ) -> Result<(), Error> {
        self.data.add_timeseries(entries);
        self.store(mp)
    }

    pub fn set_as_default(&self, mp: &mut Platform) -> Result<(), Error> {
        mp.set_default_version(self.model(), self.scenario_name(), self.version())
    }

    /// Runs the engine over the scenario's sets and parameters and attaches
    /// the solution.
    ///
    /// Rejected with a state error if a solution already exists, before the
    /// engine is invoked. A failed solve leaves the stored scenario
    /// unsolved and unchanged.
    pub fn solve(
        &mut self,
        mp: &mut Platform,
        engine: &dyn OptimizationEngine,
    ) -> Result<(), Error> {
        if self.data.has_solution() {
            return Err(state_error(
                &self.ident,
                "scenario already has a solution; remove it before solving again",
            ));
        }
        let solution = engine
            .solve(&self.data)
            .map_err(|msg| solver_error(&self.ident, msg))?;
        self.data
            .attach_solution(solution)
            .map_err(|msg| state_error(&self.ident, msg))?;
        self.store(mp)?;
        info!(ident = %self.ident, engine = engine.name(), objective = self.objective(), "scenario solved");
        Ok(())
    }

    /// Clears the solution if present and prunes non-meta timeseries at or
    /// after the scenario's own first model year. Idempotent with respect
    /// to the solution; the pruning applies either way.
    pub fn remove_solution(&mut self, mp: &mut Platform) -> Result<(), Error> {
        self.remove_solution_from(mp, None)
    }

    /// Variant taking an explicit horizon boundary. Any supplied year is
    /// rejected: the boundary is read from the scenario's own declared
    /// first model year, so stored parameters and the solution window
    /// cannot drift apart.
    pub fn remove_solution_from(
        &mut self,
        mp: &mut Platform,
        first_model_year: Option<Year>,
    ) -> Result<(), Error> {
        if let Some(year) = first_model_year {
            return Err(argument_error(
                "remove_solution",
                format!(
                    "an explicit first model year ({year}) is not accepted; \
                     the boundary is the scenario's own first model year"
                ),
            ));
        }
        let pruned = self.data.clear_solution();
        self.store(mp)?;
        debug!(ident = %self.ident, pruned, "solution removed");
        Ok(())
    }

    /// Clones this scenario onto the same platform, allocating a fresh
    /// version for the target names. The source is never mutated.
    pub fn clone_scenario(&self, mp: &mut Platform, options: CloneOptions) -> Result<Scenario, Error> {
        let model = options.model.as_deref().unwrap_or(self.model());
        let scenario = options.scenario.as_deref().unwrap_or(self.scenario_name());
        let version = mp.next_version(model, scenario)?;
        let clone = Scenario {
            ident: ScenarioIdent::new(model, scenario, version),
            data: self.data.cloned(options.mode()),
        };
        clone.store(mp)?;
        debug!(source = %self.ident, clone = %clone.ident, mode = ?options.mode(), "scenario cloned");
        Ok(clone)
    }

    /// Clones this scenario onto another platform.
    ///
    /// Cross-platform clones must carry the full solution: requesting
    /// `keep_solution(false)` or a horizon shift together with a
    /// destination platform is an option conflict. All referenced units and
    /// regions are validated against both registries before anything is
    /// written to the destination; missing entries are then created on
    /// demand and the scenario lands in a single storage call.
    pub fn clone_to_platform(
        &self,
        source: &Platform,
        dest: &mut Platform,
        options: CloneOptions,
    ) -> Result<Scenario, Error> {
        if options.shift_first_model_year.is_some() {
            return Err(options_error(
                "clone",
                "a horizon shift cannot be combined with a destination platform; \
                 shift on the source platform first",
            ));
        }
        if !options.keep_solution {
            return Err(options_error(
                "clone",
                "cloning across platforms must copy the full solution; \
                 `keep_solution(false)` is only defined within one platform",
            ));
        }

        let (missing_units, missing_regions) = self.migration_plan(source, dest)?;

        for unit in &missing_units {
            dest.add_unit(unit)?;
        }
        for region in &missing_regions {
            dest.add_region(&region.0, &region.1)?;
        }

        let model = options.model.as_deref().unwrap_or(self.model());
        let scenario = options.scenario.as_deref().unwrap_or(self.scenario_name());
        let version = dest.next_version(model, scenario)?;
        let clone = Scenario {
            ident: ScenarioIdent::new(model, scenario, version),
            data: self.data.cloned(CloneMode::Full),
        };
        clone.store(dest)?;
        info!(
            source = %self.ident,
            clone = %clone.ident,
            destination = dest.location(),
            units = missing_units.len(),
            regions = missing_regions.len(),
            "scenario migrated"
        );
        Ok(clone)
    }

    /// Validates referenced units and regions against both platforms and
    /// returns what must be created on the destination. Performs no writes.
    fn migration_plan(
        &self,
        source: &Platform,
        dest: &Platform,
    ) -> Result<(Vec<String>, Vec<(String, String)>), Error> {
        let (units, regions) = self.data.referenced_refs();

        let source_units = source.units()?;
        let dest_units = dest.units()?;
        let mut missing_units = Vec::new();
        for unit in units {
            if !source_units.contains(&unit) {
                return Err(reference_error(
                    "unit",
                    unit,
                    "referenced by the scenario but not registered on the source platform",
                ));
            }
            if !dest_units.contains(&unit) {
                missing_units.push(unit);
            }
        }

        let source_regions: HashMap<String, String> = source
            .regions()?
            .into_iter()
            .map(|r| (r.name, r.hierarchy))
            .collect();
        let dest_regions: HashMap<String, String> = dest
            .regions()?
            .into_iter()
            .map(|r| (r.name, r.hierarchy))
            .collect();
        let mut missing_regions = Vec::new();
        for region in regions {
            let Some(hierarchy) = source_regions.get(&region) else {
                return Err(reference_error(
                    "region",
                    region,
                    "referenced by the scenario but not registered on the source platform",
                ));
            };
            match dest_regions.get(&region) {
                Some(existing) if existing != hierarchy => {
                    return Err(reference_error(
                        "region",
                        region,
                        format!(
                            "registered on the destination with hierarchy `{existing}`, \
                             expected `{hierarchy}`"
                        ),
                    ));
                }
                Some(_) => {}
                None => missing_regions.push((region, hierarchy.clone())),
            }
        }

        Ok((missing_units, missing_regions))
    }

    fn store(&self, mp: &mut Platform) -> Result<(), Error> {
        mp.write_scenario(&ScenarioRecord {
            ident: self.ident.clone(),
            data: self.data.clone(),
        })
    }
}
