//! Integration tests for migrating scenarios between platforms

use scenario_engine_rs::{
    BackendKind, CloneOptions, Error, Platform, Scenario, ScenarioInfo,
    testing::{assert_ts_equal, make_transport, ts_full},
};

fn model_scenario_pairs(mp: &Platform) -> Vec<(String, String)> {
    mp.scenario_list(false)
        .unwrap()
        .into_iter()
        .map(|info: ScenarioInfo| (info.model, info.scenario))
        .collect()
}

#[test]
fn partial_solution_clones_cannot_cross_platforms() {
    let dir = tempfile::tempdir().unwrap();
    let mut mp1 = Platform::open(dir.path().join("mp1"), BackendKind::JsonFile).unwrap();
    let mut mp2 = Platform::open(dir.path().join("mp2"), BackendKind::JsonFile).unwrap();
    let scen = make_transport(&mut mp1, true, false).unwrap();

    let err = scen
        .clone_to_platform(&mp1, &mut mp2, CloneOptions::new().keep_solution(false))
        .unwrap_err();
    assert!(matches!(err, Error::Options { .. }), "got: {err}");

    let err = scen
        .clone_to_platform(&mp1, &mut mp2, CloneOptions::new().shift_first_model_year(1964))
        .unwrap_err();
    assert!(matches!(err, Error::Options { .. }), "got: {err}");

    // nothing was written to the destination
    assert!(mp2.scenario_list(false).unwrap().is_empty());
}

#[test]
fn full_clone_migrates_everything_and_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let mut mp1 = Platform::open(dir.path().join("mp1"), BackendKind::JsonFile).unwrap();
    let scen1 = make_transport(&mut mp1, true, false).unwrap();

    let mut mp2 = Platform::open(dir.path().join("mp2"), BackendKind::JsonFile).unwrap();
    // unrelated reference data on the destination must not disturb the mapping
    mp2.add_unit("wrong_unit").unwrap();
    mp2.add_region("wrong_region", "country").unwrap();

    scen1
        .clone_to_platform(&mp1, &mut mp2, CloneOptions::new())
        .unwrap();
    mp2.close().unwrap();
    drop(mp2);

    let mp2 = Platform::open(dir.path().join("mp2"), BackendKind::JsonFile).unwrap();
    let scen2 = Scenario::load(&mp2, "transport problem", "standard").unwrap();

    assert_eq!(model_scenario_pairs(&mp1), model_scenario_pairs(&mp2));

    // sets, parameters, and the solution were copied exactly
    assert_eq!(scen1.set_members("node"), scen2.set_members("node"));
    assert_eq!(scen1.par("var_cost"), scen2.par("var_cost"));
    assert!((scen2.var("OBJ").lvl - 153.675).abs() < 1e-9);
    assert_eq!(scen1.var_records("ACT"), scen2.var_records("ACT"));

    // units, regions, and timeseries migrated
    assert_ts_equal(scen2.timeseries(), &ts_full());
    let units = mp2.units().unwrap();
    for unit in ["cases", "thousand_miles", "USD/case", "USD"] {
        assert!(units.contains(&unit.to_string()), "missing unit {unit}");
    }
    let regions = mp2.regions().unwrap();
    assert!(regions.iter().any(|r| r.name == "seattle" && r.hierarchy == "city"));
}

#[test]
fn conflicting_region_hierarchy_fails_before_any_write() {
    let dir = tempfile::tempdir().unwrap();
    let mut mp1 = Platform::open(dir.path().join("mp1"), BackendKind::JsonFile).unwrap();
    let scen = make_transport(&mut mp1, true, false).unwrap();

    let mut mp2 = Platform::open(dir.path().join("mp2"), BackendKind::JsonFile).unwrap();
    mp2.add_region("seattle", "country").unwrap();

    let err = scen
        .clone_to_platform(&mp1, &mut mp2, CloneOptions::new())
        .unwrap_err();
    assert!(matches!(err, Error::Reference { .. }), "got: {err}");

    // deterministic partial-failure policy: no clone, no extra references
    assert!(mp2.scenario_list(false).unwrap().is_empty());
    assert!(mp2.units().unwrap().is_empty());
}

#[test]
fn unregistered_source_reference_fails_the_migration() {
    let dir = tempfile::tempdir().unwrap();
    let mut mp1 = Platform::open(dir.path().join("mp1"), BackendKind::JsonFile).unwrap();
    let mut scen = make_transport(&mut mp1, true, false).unwrap();

    // a timeseries row pointing at a region the source never registered
    scen.add_timeseries(
        &mut mp1,
        [scenario_engine_rs::TimeseriesEntry::new(
            "atlantis", "demand", "cases", 1962, 1.0, false,
        )],
    )
    .unwrap();

    let mut mp2 = Platform::open(dir.path().join("mp2"), BackendKind::JsonFile).unwrap();
    let err = scen
        .clone_to_platform(&mp1, &mut mp2, CloneOptions::new())
        .unwrap_err();
    assert!(matches!(err, Error::Reference { .. }), "got: {err}");
    assert!(mp2.scenario_list(false).unwrap().is_empty());
}

#[test]
fn memory_platforms_migrate_too() {
    let mut mp1 = Platform::open("mem-src", BackendKind::Memory).unwrap();
    let mut mp2 = Platform::open("mem-dst", BackendKind::Memory).unwrap();
    let scen = make_transport(&mut mp1, true, false).unwrap();

    let clone = scen
        .clone_to_platform(&mp1, &mut mp2, CloneOptions::new())
        .unwrap();
    assert_eq!(clone.version(), 1);
    assert!((clone.var("OBJ").lvl - 153.675).abs() < 1e-9);
}
