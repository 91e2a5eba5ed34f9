//! Integration tests for same-platform cloning

use scenario_engine_rs::{
    BackendKind, CloneOptions, Platform,
    testing::{assert_ts_equal, make_transport, ts_cleared, ts_full},
};

#[test]
fn full_clone_keeps_solution_and_timeseries() {
    let mut mp = Platform::open("clone-full", BackendKind::Memory).unwrap();
    let scen = make_transport(&mut mp, true, false).unwrap();

    let clone = scen.clone_scenario(&mut mp, CloneOptions::new()).unwrap();

    assert!((clone.var("OBJ").lvl - 153.675).abs() < 1e-9);
    assert_eq!(clone.var_records("ACT"), scen.var_records("ACT"));
    assert_ts_equal(clone.timeseries(), &ts_full());

    // fresh identity on the same platform
    assert_eq!(clone.model(), scen.model());
    assert_eq!(clone.scenario_name(), scen.scenario_name());
    assert_eq!(clone.version(), scen.version() + 1);
}

#[test]
fn solution_free_clone_resets_to_the_historical_baseline() {
    let mut mp = Platform::open("clone-reset", BackendKind::Memory).unwrap();
    let scen = make_transport(&mut mp, true, false).unwrap();

    let clone = scen
        .clone_scenario(&mut mp, CloneOptions::new().keep_solution(false))
        .unwrap();

    assert!(clone.var("OBJ").lvl.is_nan());
    assert!(clone.var_records("ACT").is_empty());
    assert_ts_equal(clone.timeseries(), &ts_cleared());

    // inputs copy unconditionally
    assert_eq!(clone.set_members("node"), scen.set_members("node"));
    assert_eq!(clone.par("var_cost"), scen.par("var_cost"));
    assert_eq!(clone.first_model_year(), scen.first_model_year());
}

#[test]
fn cloning_never_mutates_the_source() {
    let mut mp = Platform::open("clone-source", BackendKind::Memory).unwrap();
    let scen = make_transport(&mut mp, true, false).unwrap();

    let _ = scen
        .clone_scenario(&mut mp, CloneOptions::new().keep_solution(false))
        .unwrap();

    assert!(scen.has_solution());
    assert!((scen.var("OBJ").lvl - 153.675).abs() < 1e-9);
    assert_ts_equal(scen.timeseries(), &ts_full());
}

#[test]
fn clone_can_target_new_names() {
    let mut mp = Platform::open("clone-names", BackendKind::Memory).unwrap();
    let scen = make_transport(&mut mp, false, false).unwrap();

    let clone = scen
        .clone_scenario(
            &mut mp,
            CloneOptions::new().model("transport problem").scenario("variant"),
        )
        .unwrap();

    assert_eq!(clone.scenario_name(), "variant");
    // a fresh pair starts at version 1
    assert_eq!(clone.version(), 1);

    let listing = mp.scenario_list(false).unwrap();
    assert_eq!(listing.len(), 2);
}

#[test]
fn default_version_follows_the_flag() {
    use scenario_engine_rs::Scenario;

    let mut mp = Platform::open("clone-default", BackendKind::Memory).unwrap();
    let scen = make_transport(&mut mp, false, false).unwrap();
    let clone = scen.clone_scenario(&mut mp, CloneOptions::new()).unwrap();

    // the first version stays the default until the flag moves
    let loaded = Scenario::load(&mp, "transport problem", "standard").unwrap();
    assert_eq!(loaded.version(), scen.version());

    clone.set_as_default(&mut mp).unwrap();
    let loaded = Scenario::load(&mp, "transport problem", "standard").unwrap();
    assert_eq!(loaded.version(), clone.version());

    let defaults = mp.scenario_list(true).unwrap();
    assert_eq!(defaults.len(), 1);
    assert_eq!(defaults[0].version, clone.version());

    // older versions stay reachable explicitly
    let first = Scenario::load_version(&mp, "transport problem", "standard", scen.version()).unwrap();
    assert_eq!(first.version(), scen.version());
}

#[test]
fn unsolved_clone_without_solution_applies_the_same_retention() {
    let mut mp = Platform::open("clone-unsolved", BackendKind::Memory).unwrap();
    let scen = make_transport(&mut mp, false, false).unwrap();

    let clone = scen
        .clone_scenario(&mut mp, CloneOptions::new().keep_solution(false))
        .unwrap();
    assert_ts_equal(clone.timeseries(), &ts_cleared());
}
