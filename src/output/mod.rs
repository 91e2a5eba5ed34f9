use std::fmt;

use serde::Serialize;

use crate::domain::Year;
use crate::lifecycle::Scenario;


/// Flat, serializable view of one solved variable row, ready for CSV output.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SolutionRecord {
    pub variable: String,
    pub key: String,
    pub year: Option<Year>,
    pub lvl: f64,
    pub mrg: f64,
}

/// All solved variable rows of a scenario, in solution order. Empty when the
/// scenario has no solution.
pub fn solution_records(scenario: &Scenario) -> impl Iterator<Item = SolutionRecord> + '_ {
    scenario
        .data()
        .solution()
        .into_iter()
        .flat_map(|solution| solution.variables())
        .flat_map(|variable| {
            variable.records.iter().map(move |record| SolutionRecord {
                variable: variable.name.clone(),
                key: record.keys.join("/"),
                year: record.year,
                lvl: record.lvl,
                mrg: record.mrg,
            })
        })
}

impl fmt::Display for SolutionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.year {
            Some(year) => write!(
                f,
                "{} [{}] {}: lvl {}, mrg {}",
                self.variable, self.key, year, self.lvl, self.mrg
            ),
            None => write!(
                f,
                "{} [{}]: lvl {}, mrg {}",
                self.variable, self.key, self.lvl, self.mrg
            ),
        }
    }
}
