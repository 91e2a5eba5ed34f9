//! Integration tests for solving scenarios

use scenario_engine_rs::{BackendKind, Error, Platform, TransportEngine, testing::make_transport};

#[test]
fn transport_objective_matches_the_regression_anchor() {
    let mut mp = Platform::open("solve-anchor", BackendKind::Memory).unwrap();
    let scen = make_transport(&mut mp, true, false).unwrap();

    assert!((scen.var("OBJ").lvl - 153.675).abs() < 1e-9);

    // two plants ship to three markets; everything demanded is delivered
    let act = scen.var_records("ACT");
    assert_eq!(act.len(), 6);
    let shipped: f64 = act.iter().map(|r| r.lvl).sum();
    assert!((shipped - 900.0).abs() < 1e-9);
}

#[test]
fn multi_year_objective_sums_identical_years() {
    let mut mp = Platform::open("solve-multi", BackendKind::Memory).unwrap();
    let scen = make_transport(&mut mp, true, true).unwrap();

    assert!((scen.var("OBJ").lvl - 461.025).abs() < 1e-9);
    // six routes per year across 1963..=1965
    assert_eq!(scen.var_records("ACT").len(), 18);
}

#[test]
fn demand_balance_equations_cover_every_market() {
    let mut mp = Platform::open("solve-equ", BackendKind::Memory).unwrap();
    let scen = make_transport(&mut mp, true, false).unwrap();

    let balance = scen.equ_records("DEMAND_BALANCE");
    assert_eq!(balance.len(), 3);
    for record in balance {
        assert!(record.lvl > 0.0, "every market receives shipments");
    }
}

#[test]
fn resolving_a_solved_scenario_is_a_state_error() {
    let mut mp = Platform::open("solve-twice", BackendKind::Memory).unwrap();
    let mut scen = make_transport(&mut mp, true, false).unwrap();

    let err = scen.solve(&mut mp, &TransportEngine).unwrap_err();
    assert!(
        matches!(err, Error::State { .. }),
        "expected a state error, got: {err}"
    );
    // the stored solution is untouched
    assert!((scen.var("OBJ").lvl - 153.675).abs() < 1e-9);
}

#[test]
fn failed_solve_leaves_the_scenario_unsolved() {
    use scenario_engine_rs::{ParRow, Scenario};

    let mut mp = Platform::open("solve-fail", BackendKind::Memory).unwrap();
    let mut scen = Scenario::new(&mut mp, "transport problem", "starved", 1963).unwrap();
    scen.add_set(&mut mp, "supplier", &["seattle"]).unwrap();
    scen.add_set(&mut mp, "market", &["chicago"]).unwrap();
    scen.add_set(&mut mp, "year", &["1963"]).unwrap();
    scen.add_par(
        &mut mp,
        "supply",
        &["node"],
        vec![ParRow::new(&["seattle"], 1963, 10.0, "cases")],
    )
    .unwrap();
    // demand nothing can satisfy
    scen.add_par(
        &mut mp,
        "demand",
        &["node"],
        vec![ParRow::new(&["chicago"], 1963, 10_000.0, "cases")],
    )
    .unwrap();
    scen.add_par(
        &mut mp,
        "var_cost",
        &["node_loc", "node_dest"],
        vec![ParRow::new(&["seattle", "chicago"], 1963, 0.153, "USD/case")],
    )
    .unwrap();

    let err = scen.solve(&mut mp, &TransportEngine).unwrap_err();
    assert!(
        matches!(err, Error::Solver { .. }),
        "expected a solver error, got: {err}"
    );
    assert!(!scen.has_solution());
    assert!(scen.var("OBJ").lvl.is_nan());
}
