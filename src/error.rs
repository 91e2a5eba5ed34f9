//! Module defining the errors which are exposed to the users of the crate

use crate::domain::{ScenarioIdent, Year};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Valid CSV violating domain invariants, e.g., a timeseries row with a non-finite value
    #[error("validation error — region: {region}, year: {year}: {message}")]
    Validation {
        region: String,
        year: Year,
        message: String,
    },

    /// Operation invalid for the scenario's current solution state (e.g., solving twice)
    #[error("state error — {model}/{scenario}#{version}: {message}")]
    State {
        model: String,
        scenario: String,
        version: u32,
        message: String,
    },

    /// Caller supplied an argument disallowed by policy
    #[error("argument error — {operation}: {message}")]
    Argument {
        operation: &'static str,
        message: String,
    },

    /// Caller requested a disallowed combination of options
    #[error("option conflict — {operation}: {message}")]
    Options {
        operation: &'static str,
        message: String,
    },

    /// Shared reference data (unit, region) missing or inconsistent during migration
    #[error("missing reference — {kind} `{name}`: {message}")]
    Reference {
        kind: &'static str,
        name: String,
        message: String,
    },

    /// Backend or platform failure
    #[error("storage error — {location}: {message}")]
    Storage { location: String, message: String },

    /// The optimization engine rejected or failed to solve the model
    #[error("solver error — {model}/{scenario}#{version}: {message}")]
    Solver {
        model: String,
        scenario: String,
        version: u32,
        message: String,
    },
}

pub(crate) fn validation_error(
    region: impl Into<String>,
    year: Year,
    message: impl Into<String>,
) -> Error {
    Error::Validation {
        region: region.into(),
        year,
        message: message.into(),
    }
}

pub(crate) fn state_error(ident: &ScenarioIdent, message: impl Into<String>) -> Error {
    Error::State {
        model: ident.model().to_string(),
        scenario: ident.scenario().to_string(),
        version: ident.version(),
        message: message.into(),
    }
}

pub(crate) fn argument_error(operation: &'static str, message: impl Into<String>) -> Error {
    Error::Argument {
        operation,
        message: message.into(),
    }
}

pub(crate) fn options_error(operation: &'static str, message: impl Into<String>) -> Error {
    Error::Options {
        operation,
        message: message.into(),
    }
}

pub(crate) fn reference_error(
    kind: &'static str,
    name: impl Into<String>,
    message: impl Into<String>,
) -> Error {
    Error::Reference {
        kind,
        name: name.into(),
        message: message.into(),
    }
}

pub(crate) fn storage_error(location: impl Into<String>, message: impl Into<String>) -> Error {
    Error::Storage {
        location: location.into(),
        message: message.into(),
    }
}

pub(crate) fn solver_error(ident: &ScenarioIdent, message: impl Into<String>) -> Error {
    Error::Solver {
        model: ident.model().to_string(),
        scenario: ident.scenario().to_string(),
        version: ident.version(),
        message: message.into(),
    }
}
