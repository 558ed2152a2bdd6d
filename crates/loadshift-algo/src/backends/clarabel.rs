//! Clarabel solver backend.
//!
//! Clarabel is a pure-Rust interior-point solver for conic programs:
//!
//! ```text
//! minimize    (1/2)·x'Px + q'x
//! subject to  Ax + s = b,  s ∈ K
//! ```
//!
//! The [`Model`] maps onto this form as follows:
//!
//! | model element | rows of A | cone |
//! |---------------|-----------|------|
//! | `expr == rhs` | 1 | zero cone |
//! | finite `lower <= x` / `x <= upper` | 1 each | nonnegative cone |
//! | `d >= (t - x)²` | 3 | second-order cone |
//!
//! The epigraph uses the standard rotated-cone identity
//! `d >= (t - x)²  ⇔  (d + 1) >= ‖(d - 1, 2(t - x))‖₂`, so the objective stays
//! linear and `P` is empty.

use std::collections::BTreeMap;

use ::clarabel::algebra::CscMatrix;
use ::clarabel::solver::{
    DefaultSettingsBuilder, DefaultSolver, IPSolver, SolverStatus, SupportedConeT,
};
use loadshift_core::SolveStatus;
use web_time::Instant;

use super::{SolveOutcome, SolverBackend, SolverSettings};
use crate::error::SolveError;
use crate::model::Model;

/// Clarabel backend; always available (pure Rust).
pub struct ClarabelBackend;

impl SolverBackend for ClarabelBackend {
    fn id(&self) -> &str {
        "clarabel"
    }

    fn solve(&self, model: &Model, settings: &SolverSettings) -> Result<SolveOutcome, SolveError> {
        model.validate()?;
        let problem = ConicProblem::from_model(model);

        let clarabel_settings = DefaultSettingsBuilder::default()
            .verbose(settings.verbose)
            .max_iter(settings.max_iterations)
            .time_limit(settings.time_limit_seconds.unwrap_or(f64::INFINITY))
            .tol_feas(settings.tolerance)
            .tol_gap_abs(settings.tolerance)
            .tol_gap_rel(settings.tolerance)
            .build()
            .map_err(|e| self.backend_error(format!("settings error: {e:?}")))?;

        let start = Instant::now();
        let mut solver = DefaultSolver::new(
            &problem.p,
            &problem.q,
            &problem.a,
            &problem.b,
            &problem.cones,
            clarabel_settings,
        )
        .map_err(|e| self.backend_error(format!("initialization failed: {e:?}")))?;
        solver.solve();
        let solve_time_ms = start.elapsed().as_secs_f64() * 1000.0;

        let sol = &solver.solution;
        let iterations = sol.iterations;
        let status = match &sol.status {
            SolverStatus::Solved | SolverStatus::AlmostSolved => SolveStatus::Optimal,
            SolverStatus::PrimalInfeasible | SolverStatus::AlmostPrimalInfeasible => {
                SolveStatus::Infeasible
            }
            SolverStatus::DualInfeasible | SolverStatus::AlmostDualInfeasible => {
                SolveStatus::Unbounded
            }
            other => SolveStatus::Other(format!("{other:?}")),
        };

        if !status.is_optimal() {
            return Ok(SolveOutcome::without_solution(
                status,
                iterations,
                solve_time_ms,
            ));
        }

        let values = sol.x.clone();
        let objective = model.objective().evaluate(&values);
        Ok(SolveOutcome::optimal(
            values,
            objective,
            iterations,
            solve_time_ms,
        ))
    }
}

impl ClarabelBackend {
    fn backend_error(&self, message: String) -> SolveError {
        SolveError::Backend {
            backend: self.id().to_string(),
            message,
        }
    }
}

/// Problem data in Clarabel's standard form.
struct ConicProblem {
    p: CscMatrix<f64>,
    q: Vec<f64>,
    a: CscMatrix<f64>,
    b: Vec<f64>,
    cones: Vec<SupportedConeT<f64>>,
}

impl ConicProblem {
    fn from_model(model: &Model) -> Self {
        let n_var = model.num_variables();

        // A is accumulated column-wise; BTreeMap keeps rows sorted and merges
        // repeated terms for the same (row, column).
        let mut columns: Vec<BTreeMap<usize, f64>> = vec![BTreeMap::new(); n_var];
        let mut b: Vec<f64> = Vec::new();
        let mut cones: Vec<SupportedConeT<f64>> = Vec::new();

        // Equalities: Ax = b  →  zero cone
        for eq in model.equalities() {
            let row = b.len();
            for &(var, coeff) in eq.expr.terms() {
                *columns[var.index()].entry(row).or_insert(0.0) += coeff;
            }
            b.push(eq.rhs - eq.expr.constant());
        }
        if !model.equalities().is_empty() {
            cones.push(SupportedConeT::ZeroConeT(model.equalities().len()));
        }

        // Bounds: -x + s = -lower and x + s = upper, s >= 0
        let mut n_bounds = 0;
        for (col, var) in model.variables().iter().enumerate() {
            if var.lower.is_finite() {
                columns[col].insert(b.len(), -1.0);
                b.push(-var.lower);
                n_bounds += 1;
            }
            if var.upper.is_finite() {
                columns[col].insert(b.len(), 1.0);
                b.push(var.upper);
                n_bounds += 1;
            }
        }
        if n_bounds > 0 {
            cones.push(SupportedConeT::NonnegativeConeT(n_bounds));
        }

        // Epigraphs: s = (d + 1, d - 1, 2(t - x)) ∈ SOC(3)
        for epi in model.epigraphs() {
            let base = b.len();
            columns[epi.bound.index()].insert(base, -1.0);
            columns[epi.bound.index()].insert(base + 1, -1.0);
            columns[epi.var.index()].insert(base + 2, 2.0);
            b.push(1.0);
            b.push(-1.0);
            b.push(2.0 * epi.target);
            cones.push(SupportedConeT::SecondOrderConeT(3));
        }

        let n_rows = b.len();
        let mut col_ptr = Vec::with_capacity(n_var + 1);
        let mut row_idx = Vec::new();
        let mut values = Vec::new();
        for column in &columns {
            col_ptr.push(row_idx.len());
            for (&row, &value) in column {
                row_idx.push(row);
                values.push(value);
            }
        }
        col_ptr.push(row_idx.len());
        let a = CscMatrix::new(n_rows, n_var, col_ptr, row_idx, values);

        // Linear objective only
        let p = CscMatrix::new(n_var, n_var, vec![0; n_var + 1], Vec::new(), Vec::new());
        let mut q = vec![0.0; n_var];
        for &(var, coeff) in model.objective().terms() {
            q[var.index()] += coeff;
        }

        Self { p, q, a, b, cones }
    }
}
