//! Module defining the scenario data container and its state transitions

use serde::{Deserialize, Serialize};

use crate::domain::{Solution, TimeseriesEntry, Year};

/// Solved variables that a horizon shift converts into parameters, so the
/// information is not destroyed when years move out of the model horizon.
pub(crate) const HISTORICAL_PARAMETERS: &[(&str, &str)] = &[
    ("ACT", "historical_activity"),
    ("CAP_NEW", "historical_new_capacity"),
];

/// A named set of categorical members, insertion-ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetData {
    name: String,
    members: Vec<String>,
}

/// One row of a parameter table: key tuple, optional year, value, unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParRow {
    pub keys: Vec<String>,
    pub year: Option<Year>,
    pub value: f64,
    pub unit: String,
}

impl ParRow {
    pub fn new(
        keys: &[&str],
        year: impl Into<Option<Year>>,
        value: f64,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            keys: keys.iter().map(|k| k.to_string()).collect(),
            year: year.into(),
            value,
            unit: unit.into(),
        }
    }
}

/// A named multi-dimensional numeric table with declared dimension names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    name: String,
    dims: Vec<String>,
    rows: Vec<ParRow>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, dims: &[&str]) -> Self {
        Self {
            name: name.into(),
            dims: dims.iter().map(|d| d.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dims(&self) -> &[String] {
        &self.dims
    }

    pub fn rows(&self) -> &[ParRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn push_row(&mut self, row: ParRow) {
        self.rows.push(row);
    }

    /// Value of the row matching the given key tuple and year.
    pub fn value(&self, keys: &[&str], year: Year) -> Option<f64> {
        self.rows
            .iter()
            .find(|r| r.year == Some(year) && r.keys.iter().map(String::as_str).eq(keys.iter().copied()))
            .map(|r| r.value)
    }
}

/// How a clone treats the source's solution and timeseries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CloneMode {
    /// Solution and all timeseries copy verbatim.
    Full,
    /// No solution; timeseries only if meta or before the first model year.
    Reset,
    /// No solution; horizon starts at the given year, pre-boundary variable
    /// values convert into historical parameters.
    Shift(Year),
}

/// The versioned bundle of model input data plus optional solved output.
///
/// This type holds the state itself; the transition rules mirror the
/// lifecycle contract: a solution can only be attached once, clearing is
/// idempotent, and every clearing operation prunes non-meta timeseries at or
/// after the horizon boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioData {
    first_model_year: Year,
    sets: Vec<SetData>,
    parameters: Vec<Parameter>,
    timeseries: Vec<TimeseriesEntry>,
    solution: Option<Solution>,
}

impl ScenarioData {
    pub fn new(first_model_year: Year) -> Self {
        Self {
            first_model_year,
            sets: Vec::new(),
            parameters: Vec::new(),
            timeseries: Vec::new(),
            solution: None,
        }
    }

    pub fn first_model_year(&self) -> Year {
        self.first_model_year
    }

    pub fn has_solution(&self) -> bool {
        self.solution.is_some()
    }

    pub fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }

    /// Members of the named set, in insertion order.
    pub fn set_members(&self, name: &str) -> Option<&[String]> {
        self.sets
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.members.as_slice())
    }

    pub fn set_names(&self) -> impl Iterator<Item = &str> {
        self.sets.iter().map(|s| s.name.as_str())
    }

    /// Creates the set if absent, then appends members not already present.
    pub fn add_set(&mut self, name: &str, members: &[&str]) {
        let set = match self.sets.iter_mut().find(|s| s.name == name) {
            Some(set) => set,
            None => {
                self.sets.push(SetData {
                    name: name.to_string(),
                    members: Vec::new(),
                });
                self.sets.last_mut().expect("pushed above")
            }
        };
        for member in members {
            if !set.members.iter().any(|m| m == member) {
                set.members.push(member.to_string());
            }
        }
    }

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().map(|p| p.name.as_str())
    }

    /// Creates the parameter if absent, then appends the rows.
    pub fn add_parameter(&mut self, name: &str, dims: &[&str], rows: Vec<ParRow>) {
        let par = match self.parameters.iter_mut().find(|p| p.name == name) {
            Some(par) => par,
            None => {
                self.parameters.push(Parameter::new(name, dims));
                self.parameters.last_mut().expect("pushed above")
            }
        };
        par.rows.extend(rows);
    }

    pub fn timeseries(&self) -> &[TimeseriesEntry] {
        &self.timeseries
    }

    pub fn add_timeseries(&mut self, entries: impl IntoIterator<Item = TimeseriesEntry>) {
        self.timeseries.extend(entries);
    }

    /// Model years: members of the `year` set at or after the first model
    /// year, sorted ascending.
    pub fn model_years(&self) -> Result<Vec<Year>, String> {
        let members = self
            .set_members("year")
            .ok_or_else(|| "scenario has no `year` set".to_string())?;
        let mut years = members
            .iter()
            .map(|m| {
                m.parse::<Year>()
                    .map_err(|_| format!("`year` set member `{m}` is not a year"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        years.retain(|y| *y >= self.first_model_year);
        years.sort_unstable();
        Ok(years)
    }

    /// Scalar variable lookup; NaN when unsolved or unknown, never an error.
    pub fn var(&self, name: &str) -> super::VarValue {
        self.solution
            .as_ref()
            .map(|s| s.var(name))
            .unwrap_or_else(super::VarValue::nan)
    }

    /// Scalar equation lookup; NaN when unsolved or unknown, never an error.
    pub fn equ(&self, name: &str) -> super::VarValue {
        self.solution
            .as_ref()
            .map(|s| s.equ(name))
            .unwrap_or_else(super::VarValue::nan)
    }

    /// All records of the named variable; empty when unsolved.
    pub fn var_records(&self, name: &str) -> &[super::VarRecord] {
        self.solution
            .as_ref()
            .and_then(|s| s.variable(name))
            .map(|v| v.records.as_slice())
            .unwrap_or(&[])
    }

    /// All records of the named equation; empty when unsolved.
    pub fn equ_records(&self, name: &str) -> &[super::EquRecord] {
        self.solution
            .as_ref()
            .and_then(|s| s.equation(name))
            .map(|e| e.records.as_slice())
            .unwrap_or(&[])
    }

    pub(crate) fn attach_solution(&mut self, solution: Solution) -> Result<(), String> {
        if self.solution.is_some() {
            return Err("scenario already has a solution".to_string());
        }
        self.solution = Some(solution);
        Ok(())
    }

    /// Drops the solution if present and prunes non-meta timeseries at or
    /// after the scenario's own first model year. Idempotent.
    pub(crate) fn clear_solution(&mut self) -> usize {
        self.solution = None;
        let before = self.timeseries.len();
        let boundary = self.first_model_year;
        self.timeseries.retain(|ts| ts.survives(boundary));
        before - self.timeseries.len()
    }

    /// Timeseries rows surviving the given boundary, cloned in order.
    pub(crate) fn retained_timeseries(&self, boundary: Year) -> Vec<TimeseriesEntry> {
        self.timeseries
            .iter()
            .filter(|ts| ts.survives(boundary))
            .cloned()
            .collect()
    }

    /// Produces the data of a clone. The source is never mutated.
    pub(crate) fn cloned(&self, mode: CloneMode) -> ScenarioData {
        match mode {
            CloneMode::Full => self.clone(),
            CloneMode::Reset => ScenarioData {
                first_model_year: self.first_model_year,
                sets: self.sets.clone(),
                parameters: self.parameters.clone(),
                timeseries: self.retained_timeseries(self.first_model_year),
                solution: None,
            },
            CloneMode::Shift(boundary) => {
                let mut data = ScenarioData {
                    first_model_year: boundary,
                    sets: self.sets.clone(),
                    parameters: self.parameters.clone(),
                    timeseries: self.retained_timeseries(boundary),
                    solution: None,
                };
                data.absorb_historical(self, boundary);
                data
            }
        }
    }

    /// Converts the source's pre-boundary variable values into historical
    /// parameters, per the mapping table.
    fn absorb_historical(&mut self, source: &ScenarioData, boundary: Year) {
        let Some(solution) = source.solution() else {
            return;
        };
        for (var_name, par_name) in HISTORICAL_PARAMETERS {
            let Some(variable) = solution.variable(var_name) else {
                continue;
            };
            let rows: Vec<ParRow> = variable
                .records
                .iter()
                .filter(|r| matches!(r.year, Some(y) if y < boundary))
                .map(|r| ParRow {
                    keys: r.keys.clone(),
                    year: r.year,
                    value: r.lvl,
                    unit: r.unit.clone(),
                })
                .collect();
            if !rows.is_empty() {
                let dims: Vec<&str> = variable.dims.iter().map(String::as_str).collect();
                self.add_parameter(par_name, &dims, rows);
            }
        }
    }

    /// Units referenced by parameter rows and timeseries, and regions
    /// referenced by timeseries and the `node` set. Migration requires all
    /// of these to exist on the destination platform.
    pub(crate) fn referenced_refs(&self) -> (Vec<String>, Vec<String>) {
        let mut units: Vec<String> = Vec::new();
        let mut regions: Vec<String> = Vec::new();
        let mut push_unique = |list: &mut Vec<String>, value: &str| {
            if !value.is_empty() && !list.iter().any(|v| v == value) {
                list.push(value.to_string());
            }
        };
        for par in &self.parameters {
            for row in &par.rows {
                push_unique(&mut units, &row.unit);
            }
        }
        for ts in &self.timeseries {
            push_unique(&mut units, &ts.unit);
            push_unique(&mut regions, &ts.region);
        }
        if let Some(nodes) = self.set_members("node") {
            for node in nodes {
                push_unique(&mut regions, node);
            }
        }
        (units, regions)
    }
}
