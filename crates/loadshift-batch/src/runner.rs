use crate::artifacts::write_scenario_artifacts;
use crate::job::{jobs_from_scenarios, BatchJob, BatchJobRecord, ScenarioFailure};
use crate::manifest::{write_batch_manifest, BatchManifest};
use anyhow::{Context, Result};
use chrono::Utc;
use loadshift_algo::{solve_scenario, ModelParameters, SolverBackend, SolverSettings};
use loadshift_core::{InputBundle, ScenarioResult, SummaryTable};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const DEFAULT_MODEL_PREFIX: &str = "1b";

/// Runner settings.
#[derive(Debug, Clone)]
pub struct BatchRunnerConfig {
    /// Results directory; nothing is written when `None`
    pub output_root: Option<PathBuf>,
    /// Prefix for artifact file names and job ids
    pub model_prefix: String,
    pub params: ModelParameters,
    pub settings: SolverSettings,
    /// 1 runs sequentially, 0 uses every CPU
    pub threads: usize,
    pub render_plots: bool,
}

impl Default for BatchRunnerConfig {
    fn default() -> Self {
        Self {
            output_root: None,
            model_prefix: DEFAULT_MODEL_PREFIX.to_string(),
            params: ModelParameters::default(),
            settings: SolverSettings::default(),
            threads: 1,
            render_plots: true,
        }
    }
}

/// Everything a batch produced, in input order.
#[derive(Debug)]
pub struct BatchReport {
    /// `None` when no scenario produced a row
    pub summary: Option<SummaryTable>,
    pub results: Vec<ScenarioResult>,
    pub failures: Vec<ScenarioFailure>,
    /// Solved scenarios whose result files could not all be written
    pub artifact_errors: Vec<ScenarioFailure>,
    pub records: Vec<BatchJobRecord>,
    pub manifest_path: Option<PathBuf>,
}

impl BatchReport {
    pub fn optimal_count(&self) -> usize {
        self.results.iter().filter(|r| r.status.is_optimal()).count()
    }
}

struct JobOutcome {
    record: BatchJobRecord,
    result: Option<ScenarioResult>,
    artifact_error: Option<String>,
}

/// Solve every scenario in `inputs` and aggregate the outcomes.
///
/// A scenario whose solve cannot be invoked is recorded as a failure and the
/// batch moves on. Only setup problems (model parameters, thread pool,
/// results directory, manifest) fail the whole run.
pub fn run_batch(
    inputs: &InputBundle,
    backend: &dyn SolverBackend,
    config: &BatchRunnerConfig,
) -> Result<BatchReport> {
    config
        .params
        .validate()
        .context("checking model parameters")?;
    if let Some(root) = &config.output_root {
        fs::create_dir_all(root)
            .with_context(|| format!("creating batch output root '{}'", root.display()))?;
    }

    let jobs = jobs_from_scenarios(&inputs.scenarios, &config.model_prefix);
    info!(
        scenarios = jobs.len(),
        backend = backend.id(),
        alpha = config.params.alpha,
        "starting batch"
    );

    let outcomes: Vec<JobOutcome> = if config.threads == 1 || jobs.len() <= 1 {
        jobs.iter()
            .map(|job| run_job(job, inputs, backend, config))
            .collect()
    } else {
        let thread_count = if config.threads == 0 {
            num_cpus::get()
        } else {
            config.threads
        };
        let pool = ThreadPoolBuilder::new()
            .num_threads(thread_count)
            .build()
            .context("building Rayon thread pool for batch runs")?;
        // indexed parallel iterators collect in input order
        pool.install(|| {
            jobs.par_iter()
                .map(|job| run_job(job, inputs, backend, config))
                .collect()
        })
    };

    let mut summary = SummaryTable::new();
    let mut results = Vec::with_capacity(outcomes.len());
    let mut failures = Vec::new();
    let mut artifact_errors = Vec::new();
    let mut records = Vec::with_capacity(outcomes.len());
    for JobOutcome {
        record,
        result,
        artifact_error,
    } in outcomes
    {
        if let Some(message) = artifact_error {
            artifact_errors.push(ScenarioFailure {
                scenario_id: record.scenario_id.clone(),
                message,
            });
        }
        match result {
            Some(result) => {
                summary.push(&result);
                results.push(result);
            }
            None => failures.push(ScenarioFailure {
                scenario_id: record.scenario_id.clone(),
                message: record.error.clone().unwrap_or_default(),
            }),
        }
        records.push(record);
    }

    let manifest_path = match &config.output_root {
        Some(root) => Some(write_manifest(
            root,
            config,
            &results,
            &failures,
            artifact_errors.len(),
            &records,
        )?),
        None => None,
    };

    info!(
        solved = results.len(),
        failed = failures.len(),
        artifact_errors = artifact_errors.len(),
        "batch finished"
    );
    Ok(BatchReport {
        summary: summary.finish(),
        results,
        failures,
        artifact_errors,
        records,
        manifest_path,
    })
}

fn write_manifest(
    root: &Path,
    config: &BatchRunnerConfig,
    results: &[ScenarioResult],
    failures: &[ScenarioFailure],
    artifact_failure: usize,
    records: &[BatchJobRecord],
) -> Result<PathBuf> {
    let optimal = results.iter().filter(|r| r.status.is_optimal()).count();
    let manifest = BatchManifest {
        created_at: Utc::now(),
        model_prefix: config.model_prefix.clone(),
        alpha: config.params.alpha,
        num_jobs: records.len(),
        optimal,
        without_solution: results.len() - optimal,
        failure: failures.len(),
        artifact_failure,
        jobs: records.to_vec(),
    };
    let path = root.join("batch_manifest.json");
    write_batch_manifest(&path, &manifest)?;
    info!(path = %path.display(), "wrote batch manifest");
    Ok(path)
}

/// Solve one scenario and write its artifacts when it is optimal.
fn run_job(
    job: &BatchJob<'_>,
    inputs: &InputBundle,
    backend: &dyn SolverBackend,
    config: &BatchRunnerConfig,
) -> JobOutcome {
    let scenario = job.scenario;
    info!(job = %job.job_id, "solving scenario {}", scenario.scenario_id);

    let result = match solve_scenario(
        backend,
        &inputs.shared,
        scenario,
        &config.params,
        &config.settings,
    ) {
        Ok(result) => result,
        Err(err) => {
            warn!("scenario {} failed: {err}", scenario.scenario_id);
            return JobOutcome {
                record: BatchJobRecord::from_failure(job, &err.to_string()),
                result: None,
                artifact_error: None,
            };
        }
    };

    let mut record = BatchJobRecord::from_result(job, &result);
    let mut artifact_error = None;
    if let (Some(root), Some(traj)) = (&config.output_root, &result.trajectories) {
        let mut written = Vec::new();
        if let Err(err) = write_scenario_artifacts(
            root,
            &config.model_prefix,
            &inputs.shared,
            scenario,
            traj,
            config.render_plots,
            &mut written,
        ) {
            warn!("writing artifacts for {} failed: {err:#}", scenario.scenario_id);
            record.error = Some(format!("{err:#}"));
            artifact_error = Some(format!("{err:#}"));
        }
        record.artifacts = written.iter().map(|p| p.display().to_string()).collect();
    }
    JobOutcome {
        record,
        result: Some(result),
        artifact_error,
    }
}
