//! Batch runner behaviour with scripted and real backends

use loadshift_algo::{
    ClarabelBackend, Model, ModelParameters, SolveError, SolveOutcome, SolverBackend,
    SolverSettings,
};
use loadshift_batch::{load_batch_manifest, run_batch, BatchRunnerConfig};
use loadshift_core::{
    ApplianceProfile, CurrencyPerKwh, HourlyProfile, InputBundle, KilowattHours, Kilowatts,
    Scenario, SharedProfiles, SolveStatus, HOURS,
};
use loadshift_io::{load_inputs, InputPaths};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

/// Picks an outcome from the scenario id embedded in the model name.
struct ScriptedBackend;

impl SolverBackend for ScriptedBackend {
    fn id(&self) -> &str {
        "scripted"
    }

    fn solve(&self, model: &Model, _settings: &SolverSettings) -> Result<SolveOutcome, SolveError> {
        let name = model.name();
        if name.contains("broken") {
            return Err(SolveError::Backend {
                backend: "scripted".into(),
                message: "license server unreachable".into(),
            });
        }
        if name.contains("infeasible") {
            return Ok(SolveOutcome::without_solution(SolveStatus::Infeasible, 3, 0.1));
        }
        if name.contains("unbounded") {
            return Ok(SolveOutcome::without_solution(SolveStatus::Unbounded, 3, 0.1));
        }
        let values = vec![0.1; model.num_variables()];
        let objective = model.objective().evaluate(&values);
        Ok(SolveOutcome::optimal(values, objective, 5, 0.2))
    }
}

fn shared() -> SharedProfiles {
    SharedProfiles {
        appliance: ApplianceProfile::new(KilowattHours(1.0)),
        pv_production: HourlyProfile::constant(0.2),
        reference_load: HourlyProfile::constant(0.5),
    }
}

fn scenario(id: &str) -> Scenario {
    Scenario {
        scenario_id: id.into(),
        energy_price: HourlyProfile::constant(1.0),
        max_import: Kilowatts(2.0),
        max_export: Kilowatts(2.0),
        import_tariff: CurrencyPerKwh(0.1),
        export_tariff: CurrencyPerKwh(0.1),
    }
}

fn bundle(ids: &[&str]) -> InputBundle {
    InputBundle {
        shared: shared(),
        scenarios: ids.iter().map(|id| scenario(id)).collect(),
    }
}

fn repo_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join(relative)
}

#[test]
fn summary_rows_follow_input_order() {
    let inputs = bundle(&["c", "a", "b"]);
    let report = run_batch(&inputs, &ScriptedBackend, &BatchRunnerConfig::default()).unwrap();
    let summary = report.summary.unwrap();
    let ids: Vec<_> = summary.rows().iter().map(|r| r.scenario_id.as_str()).collect();
    assert_eq!(ids, ["c", "a", "b"]);
    assert!(report.failures.is_empty());
    assert!(report.manifest_path.is_none());
}

#[test]
fn parallel_run_preserves_order() {
    let ids: Vec<String> = (0..12).map(|i| format!("s{i:02}")).collect();
    let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
    let inputs = bundle(&refs);
    let config = BatchRunnerConfig {
        threads: 4,
        ..BatchRunnerConfig::default()
    };
    let report = run_batch(&inputs, &ScriptedBackend, &config).unwrap();
    let got: Vec<_> = report.results.iter().map(|r| r.scenario_id.clone()).collect();
    assert_eq!(got, ids);
}

#[test]
fn empty_scenario_list_reports_no_results() {
    let inputs = bundle(&[]);
    let report = run_batch(&inputs, &ScriptedBackend, &BatchRunnerConfig::default()).unwrap();
    assert!(report.summary.is_none());
    assert!(report.results.is_empty());
    assert!(report.records.is_empty());
}

#[test]
fn invocation_failure_does_not_stop_the_batch() {
    let inputs = bundle(&["first", "broken", "last"]);
    let report = run_batch(&inputs, &ScriptedBackend, &BatchRunnerConfig::default()).unwrap();

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].scenario_id, "broken");
    assert!(report.failures[0].message.contains("license server unreachable"));

    let summary = report.summary.unwrap();
    let ids: Vec<_> = summary.rows().iter().map(|r| r.scenario_id.as_str()).collect();
    assert_eq!(ids, ["first", "last"]);
    assert_eq!(report.records.len(), 3);
    assert!(report.records[1].is_failure());
}

#[test]
fn non_optimal_statuses_keep_a_row_without_objective() {
    let inputs = bundle(&["infeasible", "unbounded", "fine"]);
    let report = run_batch(&inputs, &ScriptedBackend, &BatchRunnerConfig::default()).unwrap();
    let summary = report.summary.as_ref().unwrap();
    assert_eq!(summary.len(), 3);
    assert_eq!(summary.rows()[0].status, SolveStatus::Infeasible);
    assert_eq!(summary.rows()[0].objective, None);
    assert_eq!(summary.rows()[1].status, SolveStatus::Unbounded);
    assert_eq!(summary.rows()[1].objective, None);
    assert!(summary.rows()[2].objective.is_some());
    assert_eq!(report.optimal_count(), 1);
}

#[test]
fn results_directory_receives_artifacts_and_manifest() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("results");
    let inputs = bundle(&["winter/peak", "infeasible"]);
    let config = BatchRunnerConfig {
        output_root: Some(out.clone()),
        ..BatchRunnerConfig::default()
    };
    let report = run_batch(&inputs, &ScriptedBackend, &config).unwrap();

    let csv_path = out.join("1b-scenario-winter_peak-trajectories.csv");
    let text = fs::read_to_string(&csv_path).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some(
            "hour,load,pv_used,pv_curtailed,grid_import,grid_export,hourly_cost,discomfort,\
             pv_production,reference_load,energy_price"
        )
    );
    assert_eq!(lines.count(), HOURS);

    #[cfg(feature = "plots")]
    {
        assert!(out.join("1b-scenario-winter_peak-AllDecisionVariables.svg").exists());
        assert!(out.join("1b-scenario-winter_peak-EnergyPriceVsGrid.svg").exists());
    }
    assert!(!out.join("1b-scenario-infeasible-trajectories.csv").exists());

    let manifest = load_batch_manifest(report.manifest_path.as_ref().unwrap()).unwrap();
    assert_eq!(manifest.num_jobs, 2);
    assert_eq!(manifest.optimal, 1);
    assert_eq!(manifest.without_solution, 1);
    assert_eq!(manifest.failure, 0);
    assert_eq!(manifest.alpha, 10.0);
    assert!(!manifest.jobs[0].artifacts.is_empty());
}

#[test]
fn plots_can_be_disabled() {
    let dir = tempdir().unwrap();
    let inputs = bundle(&["base"]);
    let config = BatchRunnerConfig {
        output_root: Some(dir.path().to_path_buf()),
        render_plots: false,
        model_prefix: "run".into(),
        ..BatchRunnerConfig::default()
    };
    let report = run_batch(&inputs, &ScriptedBackend, &config).unwrap();
    assert_eq!(report.records[0].artifacts.len(), 1);
    assert!(dir.path().join("run-scenario-base-trajectories.csv").exists());
    assert!(!dir.path().join("run-scenario-base-AllDecisionVariables.svg").exists());
}

#[test]
fn sample_data_solves_sequentially_and_in_parallel_alike() {
    let inputs = load_inputs(&InputPaths::from_data_dir(&repo_path("data"))).unwrap();
    let sequential =
        run_batch(&inputs, &ClarabelBackend, &BatchRunnerConfig::default()).unwrap();
    let parallel = run_batch(
        &inputs,
        &ClarabelBackend,
        &BatchRunnerConfig {
            threads: 0,
            ..BatchRunnerConfig::default()
        },
    )
    .unwrap();

    let a = sequential.summary.unwrap();
    let b = parallel.summary.unwrap();
    assert_eq!(a.len(), inputs.scenarios.len());
    for (x, y) in a.rows().iter().zip(b.rows()) {
        assert_eq!(x.scenario_id, y.scenario_id);
        assert_eq!(x.status, SolveStatus::Optimal);
        let (x, y) = (x.objective.unwrap(), y.objective.unwrap());
        assert!((x - y).abs() <= 1e-6 * x.abs().max(1.0));
    }
}

#[cfg(feature = "plots")]
#[test]
fn partly_written_artifacts_keep_paths_and_surface_the_error() {
    let dir = tempdir().unwrap();
    // a directory squatting on the first chart's path makes that write fail
    fs::create_dir_all(dir.path().join("1b-scenario-base-AllDecisionVariables.svg")).unwrap();
    let inputs = bundle(&["base"]);
    let config = BatchRunnerConfig {
        output_root: Some(dir.path().to_path_buf()),
        ..BatchRunnerConfig::default()
    };
    let report = run_batch(&inputs, &ScriptedBackend, &config).unwrap();

    let record = &report.records[0];
    assert_eq!(record.artifacts.len(), 1);
    assert!(record.artifacts[0].ends_with("1b-scenario-base-trajectories.csv"));
    assert!(record.error.is_some());

    assert!(report.failures.is_empty());
    assert_eq!(report.artifact_errors.len(), 1);
    assert_eq!(report.artifact_errors[0].scenario_id, "base");
    assert!(report.summary.unwrap().rows()[0].objective.is_some());

    let manifest = load_batch_manifest(report.manifest_path.as_ref().unwrap()).unwrap();
    assert_eq!(manifest.artifact_failure, 1);
    assert_eq!(manifest.failure, 0);
}

#[test]
fn non_positive_alpha_stops_the_batch_before_solving() {
    let inputs = bundle(&["base"]);
    for alpha in [0.0, -2.0] {
        let config = BatchRunnerConfig {
            params: ModelParameters { alpha },
            ..BatchRunnerConfig::default()
        };
        let err = run_batch(&inputs, &ScriptedBackend, &config).unwrap_err();
        assert!(format!("{err:#}").contains("alpha"));
    }
}
