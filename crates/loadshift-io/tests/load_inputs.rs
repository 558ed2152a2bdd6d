use loadshift_core::{KilowattHours, HOURS};
use loadshift_io::{load_inputs, InputPaths};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn repo_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join(relative)
}

#[test]
fn loads_sample_data_dir() {
    let paths = InputPaths::from_data_dir(&repo_path("data"));
    let inputs = load_inputs(&paths).unwrap();

    assert_eq!(inputs.shared.appliance.max_load, KilowattHours(1.5));
    assert_eq!(inputs.shared.pv_production.values().len(), HOURS);
    assert_eq!(inputs.shared.reference_load.values().len(), HOURS);
    let ids: Vec<_> = inputs
        .scenarios
        .iter()
        .map(|s| s.scenario_id.as_str())
        .collect();
    assert_eq!(ids, ["base", "flat_price", "negative_midday", "island"]);
}

#[test]
fn truncated_profile_fails_before_scenarios() {
    let dir = tempdir().unwrap();
    let question = dir.path().join("question_1b");
    fs::create_dir_all(&question).unwrap();
    let src = InputPaths::from_data_dir(&repo_path("data"));
    fs::copy(&src.appliance, question.join("appliance_params.json")).unwrap();
    fs::copy(&src.usage_preferences, question.join("usage_preferences.json")).unwrap();
    fs::copy(&src.scenarios, dir.path().join("scenarios.json")).unwrap();
    fs::write(
        question.join("DER_production.json"),
        r#"[{"hourly_profile_ratio": [0.0, 0.1, 0.2]}]"#,
    )
    .unwrap();

    let err = load_inputs(&InputPaths::from_data_dir(dir.path())).unwrap_err();
    assert!(err.is_malformed_input());
}

#[test]
fn missing_file_reports_path() {
    let dir = tempdir().unwrap();
    let err = load_inputs(&InputPaths::from_data_dir(dir.path())).unwrap_err();
    assert!(!err.is_malformed_input());
    assert!(err.to_string().contains("appliance_params.json"));
}
