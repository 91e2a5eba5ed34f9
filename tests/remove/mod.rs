//! Integration tests for clearing solutions

use rstest::rstest;
use scenario_engine_rs::{
    BackendKind, Error, Platform, Scenario,
    testing::{assert_ts_equal, make_transport, ts_cleared},
};

#[test]
fn remove_solution_clears_values_and_prunes_timeseries() {
    let mut mp = Platform::open("remove-basic", BackendKind::Memory).unwrap();
    let mut scen = make_transport(&mut mp, true, false).unwrap();
    assert!((scen.var("OBJ").lvl - 153.675).abs() < 1e-9);

    scen.remove_solution(&mut mp).unwrap();

    assert!(!scen.has_solution());
    assert!(scen.var("OBJ").lvl.is_nan());
    assert!(scen.var_records("ACT").is_empty());
    // pre-horizon and meta rows survive, in-horizon rows are gone
    assert_ts_equal(scen.timeseries(), &ts_cleared());

    // the stored copy matches the handle
    let reloaded = Scenario::load(&mp, "transport problem", "standard").unwrap();
    assert!(!reloaded.has_solution());
    assert_ts_equal(reloaded.timeseries(), &ts_cleared());
}

#[rstest]
fn explicit_boundary_is_always_rejected(#[values(1963, 1964, 0, -5)] year: i32) {
    let mut mp = Platform::open("remove-arg", BackendKind::Memory).unwrap();
    let mut scen = make_transport(&mut mp, true, false).unwrap();

    let err = scen.remove_solution_from(&mut mp, Some(year)).unwrap_err();
    assert!(
        matches!(err, Error::Argument { .. }),
        "expected an argument error, got: {err}"
    );
    // the rejected call must not have touched anything
    assert!(scen.has_solution());
    assert_eq!(scen.timeseries().len(), 3);
}

#[test]
fn remove_solution_is_idempotent_and_still_prunes() {
    let mut mp = Platform::open("remove-idem", BackendKind::Memory).unwrap();
    let mut scen = make_transport(&mut mp, false, false).unwrap();

    // no solution attached, yet the call succeeds and prunes
    scen.remove_solution(&mut mp).unwrap();
    assert_ts_equal(scen.timeseries(), &ts_cleared());

    scen.remove_solution(&mut mp).unwrap();
    assert_ts_equal(scen.timeseries(), &ts_cleared());
}
