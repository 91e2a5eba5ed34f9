//! Module defining the parsing logic used to convert user-provided timeseries data into validated domain types.

use std::io::Read;

use serde::Deserialize;

use crate::domain::{TimeseriesEntry, Year};
use crate::error::{Error, validation_error};


/// Parses the data provided by the reader and returns an iterator over the parsing results
pub fn read_timeseries(reader: impl Read) -> impl Iterator<Item = Result<TimeseriesEntry, Error>> {
    let csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader.into_deserialize::<RawTimeseriesRow>().map(|result| {
        let raw = result?;
        TimeseriesEntry::try_from(raw)
    })
}

// Intermediate type mirroring the CSV columns
#[derive(Deserialize)]
struct RawTimeseriesRow {
    region: String,
    variable: String,
    unit: String,
    year: Year,
    value: f64,
    meta: Option<bool>,
}

impl TryFrom<RawTimeseriesRow> for TimeseriesEntry {
    type Error = crate::error::Error;

    fn try_from(raw: RawTimeseriesRow) -> Result<Self, Self::Error> {
        let RawTimeseriesRow {
            region,
            variable,
            unit,
            year,
            value,
            meta,
        } = raw;
        if region.is_empty() {
            return Err(validation_error(region, year, "no region provided"));
        }
        if variable.is_empty() {
            return Err(validation_error(region, year, "no variable provided"));
        }
        if !value.is_finite() {
            return Err(validation_error(
                region,
                year,
                format!("value for `{variable}` must be finite"),
            ));
        }
        Ok(TimeseriesEntry::new(
            region,
            variable,
            unit,
            year,
            value,
            meta.unwrap_or(false),
        ))
    }
}
