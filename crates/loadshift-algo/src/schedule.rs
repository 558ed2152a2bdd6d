//! Hourly load-scheduling model.
//!
//! For each hour `t` in `0..24` the model carries seven variables:
//!
//! | variable | domain | meaning |
//! |----------|--------|---------|
//! | `L_t` | `[Lmin, Lmax]` | scheduled load |
//! | `u_t` | `>= 0` | PV used directly |
//! | `c_t` | `>= 0` | PV curtailed |
//! | `g_imp_t` | `[0, max_import]` | grid import |
//! | `g_exp_t` | `[0, max_export]` | grid export |
//! | `HC_t` | free | net hourly cost |
//! | `D_t` | `>= 0` | discomfort |
//!
//! and four constraints, none of which couple different hours:
//!
//! ```text
//! u_t + c_t                                    = PV_t
//! u_t + g_imp_t                                = L_t + g_exp_t
//! (p_t + τ_imp)·g_imp_t − (p_t − τ_exp)·g_exp_t = HC_t
//! D_t                                         >= (Lref_t − L_t)²
//! ```
//!
//! The objective is `minimize Σ_t α·D_t + HC_t`. With `α > 0` the discomfort
//! bound is tight at the optimum, so `D_t` equals the squared deviation.

use loadshift_core::{HourlyProfile, Scenario, SharedProfiles, Trajectories, HOURS};
use serde::{Deserialize, Serialize};

use crate::error::SolveError;
use crate::model::{LinearExpr, Model, VarId};

/// Default weight of discomfort against cost.
pub const DEFAULT_ALPHA: f64 = 10.0;

/// Scenario-independent model parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParameters {
    /// Discomfort weight `α` in the objective
    pub alpha: f64,
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
        }
    }
}

impl ModelParameters {
    /// `alpha` must be finite and positive: the discomfort epigraph is only
    /// tight at the optimum when `D_t` carries a positive weight.
    pub fn validate(&self) -> Result<(), SolveError> {
        if !self.alpha.is_finite() || self.alpha <= 0.0 {
            return Err(SolveError::InvalidModel(format!(
                "discomfort weight alpha must be finite and positive, got {}",
                self.alpha
            )));
        }
        Ok(())
    }
}

/// Variable handles for one hour.
#[derive(Debug, Clone, Copy)]
pub struct HourVars {
    pub load: VarId,
    pub pv_used: VarId,
    pub pv_curtailed: VarId,
    pub grid_import: VarId,
    pub grid_export: VarId,
    pub hourly_cost: VarId,
    pub discomfort: VarId,
}

/// A built model together with the handles needed to read a solution back.
#[derive(Debug, Clone)]
pub struct ScheduleModel {
    pub model: Model,
    pub hours: Vec<HourVars>,
}

impl ScheduleModel {
    /// Split a flat assignment into per-hour trajectories.
    pub fn trajectories(&self, values: &[f64]) -> Trajectories {
        let pick = |f: fn(&HourVars) -> VarId| {
            HourlyProfile::from_fn(|t| values[f(&self.hours[t]).index()])
        };
        Trajectories {
            load: pick(|h| h.load),
            pv_used: pick(|h| h.pv_used),
            pv_curtailed: pick(|h| h.pv_curtailed),
            grid_import: pick(|h| h.grid_import),
            grid_export: pick(|h| h.grid_export),
            hourly_cost: pick(|h| h.hourly_cost),
            discomfort: pick(|h| h.discomfort),
        }
    }
}

/// Build the scheduling model for one scenario.
pub fn build_schedule_model(
    shared: &SharedProfiles,
    scenario: &Scenario,
    params: &ModelParameters,
) -> Result<ScheduleModel, SolveError> {
    params.validate()?;
    let mut model = Model::new(format!("schedule[{}]", scenario.scenario_id));
    let min_load = shared.appliance.min_load.value();
    let max_load = shared.appliance.max_load.value();
    let max_import = scenario.max_import.over_one_hour().value();
    let max_export = scenario.max_export.over_one_hour().value();

    let mut hours = Vec::with_capacity(HOURS);
    for t in 0..HOURS {
        hours.push(HourVars {
            load: model.add_var(format!("L{t}"), min_load, max_load),
            pv_used: model.add_var(format!("u{t}"), 0.0, f64::INFINITY),
            pv_curtailed: model.add_var(format!("c{t}"), 0.0, f64::INFINITY),
            grid_import: model.add_var(format!("g{t}_imp"), 0.0, max_import),
            grid_export: model.add_var(format!("g{t}_exp"), 0.0, max_export),
            hourly_cost: model.add_var(format!("HC{t}"), f64::NEG_INFINITY, f64::INFINITY),
            discomfort: model.add_var(format!("D{t}"), 0.0, f64::INFINITY),
        });
    }

    let mut objective = LinearExpr::new();
    for (t, h) in hours.iter().enumerate() {
        model.add_equality(
            format!("pv_allocation[{t}]"),
            LinearExpr::new()
                .term(h.pv_used, 1.0)
                .term(h.pv_curtailed, 1.0),
            shared.pv_production[t],
        );
        model.add_equality(
            format!("energy_balance[{t}]"),
            LinearExpr::new()
                .term(h.pv_used, 1.0)
                .term(h.grid_import, 1.0)
                .term(h.load, -1.0)
                .term(h.grid_export, -1.0),
            0.0,
        );
        model.add_equality(
            format!("hourly_cost[{t}]"),
            LinearExpr::new()
                .term(h.grid_import, scenario.import_cost(t))
                .term(h.grid_export, -scenario.export_revenue(t))
                .term(h.hourly_cost, -1.0),
            0.0,
        );
        model.add_squared_deviation_bound(
            format!("discomfort[{t}]"),
            h.discomfort,
            h.load,
            shared.reference_load[t],
        );
        objective.add_term(h.discomfort, params.alpha);
        objective.add_term(h.hourly_cost, 1.0);
    }
    model.set_objective(objective);
    model.validate()?;

    Ok(ScheduleModel { model, hours })
}
