//! Module defining the solution state derived from a successful solve

use serde::{Deserialize, Serialize};

use crate::domain::Year;

/// Scalar view of a variable or equation: level and marginal.
///
/// Lookups on a scenario without a solution return [`VarValue::nan`] rather
/// than an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarValue {
    pub lvl: f64,
    pub mrg: f64,
}

impl VarValue {
    pub fn nan() -> Self {
        Self {
            lvl: f64::NAN,
            mrg: f64::NAN,
        }
    }
}

/// One row of a solved variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarRecord {
    pub keys: Vec<String>,
    pub year: Option<Year>,
    pub lvl: f64,
    pub mrg: f64,
    pub unit: String,
}

/// One row of a solved equation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquRecord {
    pub keys: Vec<String>,
    pub year: Option<Year>,
    pub lvl: f64,
    pub mrg: f64,
}

/// All rows of one solved variable, with its dimension names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolvedVariable {
    pub name: String,
    pub dims: Vec<String>,
    pub records: Vec<VarRecord>,
}

/// All rows of one solved equation, with its dimension names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolvedEquation {
    pub name: String,
    pub dims: Vec<String>,
    pub records: Vec<EquRecord>,
}

/// The output of a successful optimization run: values for all variables and
/// equations. A scenario has exactly zero or one of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    variables: Vec<SolvedVariable>,
    equations: Vec<SolvedEquation>,
}

impl Solution {
    pub fn new(variables: Vec<SolvedVariable>, equations: Vec<SolvedEquation>) -> Self {
        Self {
            variables,
            equations,
        }
    }

    pub fn variable(&self, name: &str) -> Option<&SolvedVariable> {
        self.variables.iter().find(|v| v.name == name)
    }

    pub fn equation(&self, name: &str) -> Option<&SolvedEquation> {
        self.equations.iter().find(|e| e.name == name)
    }

    pub fn variables(&self) -> &[SolvedVariable] {
        &self.variables
    }

    pub fn equations(&self) -> &[SolvedEquation] {
        &self.equations
    }

    /// Scalar lookup: the first record of the named variable. Meaningful for
    /// scalar variables such as the objective; multi-record variables are
    /// read in full via [`Solution::variable`].
    pub fn var(&self, name: &str) -> VarValue {
        self.variable(name)
            .and_then(|v| v.records.first())
            .map(|r| VarValue {
                lvl: r.lvl,
                mrg: r.mrg,
            })
            .unwrap_or_else(VarValue::nan)
    }

    pub fn equ(&self, name: &str) -> VarValue {
        self.equation(name)
            .and_then(|e| e.records.first())
            .map(|r| VarValue {
                lvl: r.lvl,
                mrg: r.mrg,
            })
            .unwrap_or_else(VarValue::nan)
    }
}
