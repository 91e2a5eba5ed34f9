//! Property tests for the timeseries retention rules.
//! Whatever the rows look like, clearing and solution-free cloning keep
//! exactly the meta rows plus the rows before the horizon boundary.

use proptest::prelude::*;
use scenario_engine_rs::{
    BackendKind, CloneOptions, Platform, Scenario, TimeseriesEntry, Year,
};

fn entries_strategy() -> impl Strategy<Value = Vec<TimeseriesEntry>> {
    prop::collection::vec(
        (1950i32..1980, any::<bool>(), -1000.0f64..1000.0),
        0..24,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (year, meta, value))| {
                TimeseriesEntry::new(
                    format!("region-{}", i % 3),
                    format!("variable-{}", i % 4),
                    "cases",
                    year,
                    value,
                    meta,
                )
            })
            .collect()
    })
}

fn build_scenario(
    mp: &mut Platform,
    first_model_year: Year,
    entries: &[TimeseriesEntry],
) -> Scenario {
    let mut scen = Scenario::new(mp, "retention", "proptest", first_model_year).unwrap();
    scen.add_timeseries(mp, entries.to_vec()).unwrap();
    scen
}

fn expected_retained(entries: &[TimeseriesEntry], boundary: Year) -> Vec<TimeseriesEntry> {
    entries
        .iter()
        .filter(|ts| ts.meta || ts.year < boundary)
        .cloned()
        .collect()
}

proptest! {
    #[test]
    fn solution_free_clone_retains_exactly_the_baseline(
        entries in entries_strategy(),
        first_model_year in 1950i32..1980,
    ) {
        let mut mp = Platform::open("retention-clone", BackendKind::Memory).unwrap();
        let scen = build_scenario(&mut mp, first_model_year, &entries);

        let clone = scen
            .clone_scenario(&mut mp, CloneOptions::new().keep_solution(false))
            .unwrap();

        let expected = expected_retained(&entries, first_model_year);
        prop_assert_eq!(clone.timeseries(), expected.as_slice());
        // the source keeps every row
        prop_assert_eq!(scen.timeseries(), entries.as_slice());
    }

    #[test]
    fn remove_solution_retains_exactly_the_baseline(
        entries in entries_strategy(),
        first_model_year in 1950i32..1980,
    ) {
        let mut mp = Platform::open("retention-remove", BackendKind::Memory).unwrap();
        let mut scen = build_scenario(&mut mp, first_model_year, &entries);

        scen.remove_solution(&mut mp).unwrap();
        let expected = expected_retained(&entries, first_model_year);
        prop_assert_eq!(scen.timeseries(), expected.as_slice());
    }

    #[test]
    fn full_clone_retains_every_row(
        entries in entries_strategy(),
        first_model_year in 1950i32..1980,
    ) {
        let mut mp = Platform::open("retention-full", BackendKind::Memory).unwrap();
        let scen = build_scenario(&mut mp, first_model_year, &entries);

        let clone = scen.clone_scenario(&mut mp, CloneOptions::new()).unwrap();
        prop_assert_eq!(clone.timeseries(), entries.as_slice());
    }

    #[test]
    fn shift_boundary_governs_retention(
        entries in entries_strategy(),
        boundary in 1950i32..1980,
    ) {
        let mut mp = Platform::open("retention-shift", BackendKind::Memory).unwrap();
        let scen = build_scenario(&mut mp, 1963, &entries);

        let clone = scen
            .clone_scenario(&mut mp, CloneOptions::new().shift_first_model_year(boundary))
            .unwrap();
        let expected = expected_retained(&entries, boundary);
        prop_assert_eq!(clone.timeseries(), expected.as_slice());
        prop_assert_eq!(clone.first_model_year(), boundary);
    }
}
