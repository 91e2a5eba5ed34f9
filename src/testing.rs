//! Fixture builders and assertion helpers shared by tests, benches, and the
//! demo binary.
//!
//! The transport fixture is the classic two-plant, three-market shipment
//! problem: it is small enough to check by hand and its objective value,
//! 153.675, serves as the crate's end-to-end regression anchor.

use crate::domain::{ParRow, TimeseriesEntry, Year};
use crate::error::Error;
use crate::lifecycle::Scenario;
use crate::platform::Platform;
use crate::solver::TransportEngine;

/// Freight cost in USD per case per thousand miles.
const FREIGHT_USD: f64 = 90.0;

/// Distances in thousand miles: (supplier, market, distance).
const DISTANCES: &[(&str, &str, f64)] = &[
    ("seattle", "new-york", 2.5),
    ("seattle", "chicago", 1.7),
    ("seattle", "topeka", 1.8),
    ("san-diego", "new-york", 2.5),
    ("san-diego", "chicago", 1.8),
    ("san-diego", "topeka", 1.4),
];

const SUPPLIES: &[(&str, f64)] = &[("seattle", 350.0), ("san-diego", 600.0)];

const DEMANDS: &[(&str, f64)] = &[("new-york", 325.0), ("chicago", 300.0), ("topeka", 275.0)];

/// Builds the canonical transport scenario on the given platform, seeding
/// units, regions, parameters, and the fixture timeseries. `multi_year`
/// repeats the identical structure for 1964 and 1965; `solve` runs the
/// bundled engine before returning.
pub fn make_transport(mp: &mut Platform, solve: bool, multi_year: bool) -> Result<Scenario, Error> {
    for unit in ["cases", "thousand_miles", "USD/case", "USD"] {
        mp.add_unit(unit)?;
    }
    for &(region, _) in SUPPLIES {
        mp.add_region(region, "city")?;
    }
    for &(region, _) in DEMANDS {
        mp.add_region(region, "city")?;
    }

    let mut scen = Scenario::new(mp, "transport problem", "standard", 1963)?;

    let years: &[Year] = if multi_year {
        &[1963, 1964, 1965]
    } else {
        &[1963]
    };
    let year_members: Vec<String> = years.iter().map(Year::to_string).collect();
    let year_refs: Vec<&str> = year_members.iter().map(String::as_str).collect();

    let nodes: Vec<&str> = SUPPLIES
        .iter()
        .map(|&(n, _)| n)
        .chain(DEMANDS.iter().map(|&(n, _)| n))
        .collect();
    scen.add_set(mp, "node", &nodes)?;
    scen.add_set(mp, "supplier", &["seattle", "san-diego"])?;
    scen.add_set(mp, "market", &["new-york", "chicago", "topeka"])?;
    scen.add_set(mp, "year", &year_refs)?;

    let mut supply_rows = Vec::new();
    let mut demand_rows = Vec::new();
    let mut distance_rows = Vec::new();
    let mut cost_rows = Vec::new();
    for &year in years {
        for &(node, cases) in SUPPLIES {
            supply_rows.push(ParRow::new(&[node], year, cases, "cases"));
        }
        for &(node, cases) in DEMANDS {
            demand_rows.push(ParRow::new(&[node], year, cases, "cases"));
        }
        for &(from, to, distance) in DISTANCES {
            distance_rows.push(ParRow::new(&[from, to], year, distance, "thousand_miles"));
            cost_rows.push(ParRow::new(
                &[from, to],
                year,
                distance * FREIGHT_USD / 1000.0,
                "USD/case",
            ));
        }
    }
    scen.add_par(mp, "supply", &["node"], supply_rows)?;
    scen.add_par(mp, "demand", &["node"], demand_rows)?;
    scen.add_par(mp, "distance", &["node_loc", "node_dest"], distance_rows)?;
    scen.add_par(mp, "var_cost", &["node_loc", "node_dest"], cost_rows)?;

    let entries = if multi_year { ts_full_multi() } else { ts_full() };
    scen.add_timeseries(mp, entries)?;

    if solve {
        scen.solve(mp, &TransportEngine)?;
    }
    Ok(scen)
}

/// The fixture timeseries of the single-year scenario: one pre-horizon row,
/// one in-horizon demand row, one meta-tagged calibration row.
pub fn ts_full() -> Vec<TimeseriesEntry> {
    vec![
        TimeseriesEntry::new("seattle", "supply-cost", "USD/case", 1962, 0.18, false),
        TimeseriesEntry::new("new-york", "demand", "cases", 1963, 325.0, false),
        TimeseriesEntry::new("san-diego", "calibration-factor", "USD", 1963, 1.02, true),
    ]
}

/// The multi-year fixture adds an in-horizon 1964 demand row.
pub fn ts_full_multi() -> Vec<TimeseriesEntry> {
    let mut entries = ts_full();
    entries.push(TimeseriesEntry::new(
        "new-york", "demand", "cases", 1964, 330.0, false,
    ));
    entries
}

/// What survives clearing at the declared first model year (1963): the
/// pre-horizon row and the meta row.
pub fn ts_cleared() -> Vec<TimeseriesEntry> {
    ts_full()
        .into_iter()
        .filter(|ts| ts.survives(1963))
        .collect()
}

/// What survives a horizon shift to 1964 on the multi-year fixture.
pub fn ts_shifted() -> Vec<TimeseriesEntry> {
    ts_full_multi()
        .into_iter()
        .filter(|ts| ts.survives(1964))
        .collect()
}

/// Asserts two timeseries tables are equal ignoring row order.
///
/// Panics with the row that differs; values compare exactly since cloned
/// rows are copied bit-for-bit.
pub fn assert_ts_equal(actual: &[TimeseriesEntry], expected: &[TimeseriesEntry]) {
    let sort_key = |ts: &TimeseriesEntry| {
        (
            ts.region.clone(),
            ts.variable.clone(),
            ts.year,
            ts.meta,
        )
    };
    let mut actual: Vec<TimeseriesEntry> = actual.to_vec();
    let mut expected: Vec<TimeseriesEntry> = expected.to_vec();
    actual.sort_by_key(sort_key);
    expected.sort_by_key(sort_key);

    assert_eq!(
        actual.len(),
        expected.len(),
        "timeseries row count mismatch: {actual:#?} vs {expected:#?}"
    );
    for (a, e) in actual.iter().zip(&expected) {
        assert_eq!(a, e, "timeseries row mismatch");
    }
}
