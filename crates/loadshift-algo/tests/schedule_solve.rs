//! Schedule model solved end to end with Clarabel

use loadshift_algo::{solve_scenario, ClarabelBackend, ModelParameters, SolverSettings};
use loadshift_core::{
    ApplianceProfile, CurrencyPerKwh, HourlyProfile, KilowattHours, Kilowatts, Scenario,
    ScenarioResult, SharedProfiles, SolveStatus, HOURS,
};

const TOL: f64 = 1e-5;

/// PV bell around noon, evening-heavy reference load
fn shared() -> SharedProfiles {
    SharedProfiles {
        appliance: ApplianceProfile::new(KilowattHours(1.5)),
        pv_production: HourlyProfile::from_fn(|t| {
            let x = (t as f64 - 12.0) / 4.0;
            (0.8 - 0.2 * x * x).max(0.0)
        }),
        reference_load: HourlyProfile::from_fn(|t| if (17..22).contains(&t) { 0.9 } else { 0.3 }),
    }
}

/// Prices high in the evening, low at midday
fn scenario(id: &str) -> Scenario {
    Scenario {
        scenario_id: id.to_string(),
        energy_price: HourlyProfile::from_fn(|t| match t {
            10..=14 => 0.2,
            17..=21 => 2.5,
            _ => 1.0,
        }),
        max_import: Kilowatts(5.0),
        max_export: Kilowatts(5.0),
        import_tariff: CurrencyPerKwh(0.5),
        export_tariff: CurrencyPerKwh(0.1),
    }
}

fn solve(shared: &SharedProfiles, scenario: &Scenario, alpha: f64) -> ScenarioResult {
    solve_scenario(
        &ClarabelBackend,
        shared,
        scenario,
        &ModelParameters { alpha },
        &SolverSettings::default(),
    )
    .expect("solver invocation")
}

#[test]
fn optimal_schedule_satisfies_balances_and_bounds() {
    let shared = shared();
    let sc = scenario("base");
    let result = solve(&shared, &sc, 10.0);
    assert_eq!(result.status, SolveStatus::Optimal);
    let traj = result.trajectories.as_ref().expect("trajectories");

    for t in 0..HOURS {
        let pv = shared.pv_production[t];
        assert!(
            (traj.pv_used[t] + traj.pv_curtailed[t] - pv).abs() < TOL,
            "PV allocation violated at hour {t}"
        );
        assert!(
            (traj.pv_used[t] + traj.grid_import[t] - traj.load[t] - traj.grid_export[t]).abs()
                < TOL,
            "energy balance violated at hour {t}"
        );
        assert!(traj.load[t] >= -TOL && traj.load[t] <= 1.5 + TOL);
        assert!(traj.grid_import[t] >= -TOL && traj.grid_import[t] <= 5.0 + TOL);
        assert!(traj.grid_export[t] >= -TOL && traj.grid_export[t] <= 5.0 + TOL);
        assert!(traj.pv_used[t] >= -TOL && traj.pv_curtailed[t] >= -TOL);
    }
}

#[test]
fn discomfort_matches_squared_deviation() {
    let shared = shared();
    let result = solve(&shared, &scenario("base"), 10.0);
    let traj = result.trajectories.expect("trajectories");
    for t in 0..HOURS {
        let dev = shared.reference_load[t] - traj.load[t];
        assert!(
            (traj.discomfort[t] - dev * dev).abs() < 1e-4,
            "hour {t}: D = {}, (ref - L)^2 = {}",
            traj.discomfort[t],
            dev * dev
        );
    }
}

#[test]
fn objective_equals_weighted_discomfort_plus_cost() {
    let alpha = 10.0;
    let result = solve(&shared(), &scenario("base"), alpha);
    let traj = result.trajectories.as_ref().expect("trajectories");
    let expected: f64 = (0..HOURS)
        .map(|t| alpha * traj.discomfort[t] + traj.hourly_cost[t])
        .sum();
    let objective = result.objective.expect("objective");
    assert!((objective - expected).abs() < 1e-6 * expected.abs().max(1.0));
}

#[test]
fn resolving_identical_inputs_is_stable() {
    let shared = shared();
    let sc = scenario("base");
    let first = solve(&shared, &sc, 10.0).objective.expect("objective");
    let second = solve(&shared, &sc, 10.0).objective.expect("objective");
    assert!((first - second).abs() <= 1e-6 * first.abs().max(1.0));
}

#[test]
fn tracking_without_pv_matches_closed_form() {
    // Without PV or export each hour minimizes 10·(1 - L)² + L,
    // so L = 0.95 and the hourly objective is 0.025 + 0.95.
    let shared = SharedProfiles {
        appliance: ApplianceProfile::new(KilowattHours(2.0)),
        pv_production: HourlyProfile::constant(0.0),
        reference_load: HourlyProfile::constant(1.0),
    };
    let sc = Scenario {
        scenario_id: "closed_form".into(),
        energy_price: HourlyProfile::constant(1.0),
        max_import: Kilowatts(10.0),
        max_export: Kilowatts(0.0),
        import_tariff: CurrencyPerKwh(0.0),
        export_tariff: CurrencyPerKwh(0.0),
    };
    let result = solve(&shared, &sc, 10.0);
    let traj = result.trajectories.as_ref().expect("trajectories");
    for t in 0..HOURS {
        assert!((traj.load[t] - 0.95).abs() < 1e-4);
    }
    assert!((result.objective.expect("objective") - 23.4).abs() < 1e-4);
}

#[test]
fn islanded_scenario_without_pv_rests_at_zero_load() {
    let mut sc = scenario("island");
    sc.max_import = Kilowatts(0.0);
    sc.max_export = Kilowatts(0.0);
    let shared = shared();
    let result = solve(&shared, &sc, 10.0);
    assert_eq!(result.status, SolveStatus::Optimal);
    let traj = result.trajectories.expect("trajectories");
    // hour 0 has no PV, so nothing can be consumed
    assert!(traj.load[0].abs() < TOL);
    for t in 0..HOURS {
        assert!(traj.load[t] <= shared.pv_production[t] + TOL);
    }
}

#[test]
fn negative_pv_is_infeasible_without_objective() {
    let mut shared = shared();
    shared.pv_production = HourlyProfile::from_fn(|t| if t == 5 { -1.0 } else { 0.0 });
    let result = solve(&shared, &scenario("negative_pv"), 10.0);
    assert_eq!(result.status, SolveStatus::Infeasible);
    assert!(result.objective.is_none());
    assert!(result.trajectories.is_none());
}

#[test]
fn minimum_load_above_islanded_supply_is_infeasible() {
    let mut shared = shared();
    shared.appliance = ApplianceProfile::new(KilowattHours(1.5)).with_min_load(KilowattHours(0.5));
    let mut sc = scenario("stranded");
    sc.max_import = Kilowatts(0.0);
    let result = solve(&shared, &sc, 10.0);
    assert_eq!(result.status, SolveStatus::Infeasible);
    assert_eq!(result.objective, None);
}

#[test]
fn iteration_cap_surfaces_backend_status_verbatim() {
    let settings = SolverSettings {
        max_iterations: 1,
        ..SolverSettings::default()
    };
    let result = solve_scenario(
        &ClarabelBackend,
        &shared(),
        &scenario("capped"),
        &ModelParameters { alpha: 10.0 },
        &settings,
    )
    .expect("solver invocation");
    assert!(matches!(result.status, SolveStatus::Other(ref s) if s == "MaxIterations"));
    assert!(result.objective.is_none());
    assert!(result.trajectories.is_none());
    assert_eq!(result.scenario_id, "capped");
}
