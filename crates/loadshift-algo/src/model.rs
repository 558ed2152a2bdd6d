//! Backend-neutral description of a convex scheduling model.
//!
//! A [`Model`] holds:
//! - bounded continuous variables (bounds may be infinite),
//! - linear equality constraints `expr == rhs`,
//! - squared-deviation epigraph constraints `bound >= (target - var)²`,
//! - a linear objective to minimize.
//!
//! Backends translate this into their own problem format. The epigraph form is
//! the convex relaxation of `bound == (target - var)²`; when `bound` carries a
//! positive objective weight the two coincide at the optimum.

use crate::error::SolveError;

/// Handle to a variable inside one [`Model`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(usize);

impl VarId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub lower: f64,
    pub upper: f64,
}

/// `Σ coeff·var + constant`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    terms: Vec<(VarId, f64)>,
    constant: f64,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn term(mut self, var: VarId, coeff: f64) -> Self {
        self.add_term(var, coeff);
        self
    }

    pub fn add_term(&mut self, var: VarId, coeff: f64) {
        self.terms.push((var, coeff));
    }

    pub fn with_constant(mut self, constant: f64) -> Self {
        self.constant = constant;
        self
    }

    pub fn terms(&self) -> &[(VarId, f64)] {
        &self.terms
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }

    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|(var, coeff)| coeff * values[var.index()])
            .sum::<f64>()
            + self.constant
    }
}

/// `expr == rhs`
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    pub name: String,
    pub expr: LinearExpr,
    pub rhs: f64,
}

/// `bound >= (target - var)²`
#[derive(Debug, Clone, PartialEq)]
pub struct EpigraphConstraint {
    pub name: String,
    pub bound: VarId,
    pub var: VarId,
    pub target: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    name: String,
    variables: Vec<Variable>,
    equalities: Vec<LinearConstraint>,
    epigraphs: Vec<EpigraphConstraint>,
    objective: LinearExpr,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: Vec::new(),
            equalities: Vec::new(),
            epigraphs: Vec::new(),
            objective: LinearExpr::new(),
        }
    }

    pub fn add_var(&mut self, name: impl Into<String>, lower: f64, upper: f64) -> VarId {
        self.variables.push(Variable {
            name: name.into(),
            lower,
            upper,
        });
        VarId(self.variables.len() - 1)
    }

    pub fn add_equality(&mut self, name: impl Into<String>, expr: LinearExpr, rhs: f64) {
        self.equalities.push(LinearConstraint {
            name: name.into(),
            expr,
            rhs,
        });
    }

    pub fn add_squared_deviation_bound(
        &mut self,
        name: impl Into<String>,
        bound: VarId,
        var: VarId,
        target: f64,
    ) {
        self.epigraphs.push(EpigraphConstraint {
            name: name.into(),
            bound,
            var,
            target,
        });
    }

    /// Set the expression to minimize.
    pub fn set_objective(&mut self, objective: LinearExpr) {
        self.objective = objective;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn equalities(&self) -> &[LinearConstraint] {
        &self.equalities
    }

    pub fn epigraphs(&self) -> &[EpigraphConstraint] {
        &self.epigraphs
    }

    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    /// Check that every handle belongs to this model and every number is usable.
    ///
    /// Inverted bounds (`lower > upper`) pass: they make the model infeasible,
    /// which is for the backend to report.
    pub fn validate(&self) -> Result<(), SolveError> {
        for var in &self.variables {
            if var.lower.is_nan() || var.upper.is_nan() {
                return Err(SolveError::InvalidModel(format!(
                    "variable '{}' has a NaN bound",
                    var.name
                )));
            }
            if var.lower == f64::INFINITY || var.upper == f64::NEG_INFINITY {
                return Err(SolveError::InvalidModel(format!(
                    "variable '{}' has an empty domain [{}, {}]",
                    var.name, var.lower, var.upper
                )));
            }
        }
        for eq in &self.equalities {
            self.check_expr(&eq.expr, &eq.name)?;
            if !eq.rhs.is_finite() {
                return Err(SolveError::InvalidModel(format!(
                    "constraint '{}' has non-finite right-hand side {}",
                    eq.name, eq.rhs
                )));
            }
        }
        for epi in &self.epigraphs {
            self.check_var(epi.bound, &epi.name)?;
            self.check_var(epi.var, &epi.name)?;
            if epi.bound == epi.var {
                return Err(SolveError::InvalidModel(format!(
                    "constraint '{}' bounds a variable by its own square",
                    epi.name
                )));
            }
            if !epi.target.is_finite() {
                return Err(SolveError::InvalidModel(format!(
                    "constraint '{}' has non-finite target {}",
                    epi.name, epi.target
                )));
            }
        }
        self.check_expr(&self.objective, "objective")
    }

    /// Largest absolute violation of any equality or epigraph constraint.
    pub fn max_violation(&self, values: &[f64]) -> f64 {
        let eq = self
            .equalities
            .iter()
            .map(|c| (c.expr.evaluate(values) - c.rhs).abs());
        let epi = self.epigraphs.iter().map(|c| {
            let deviation = c.target - values[c.var.index()];
            (deviation * deviation - values[c.bound.index()]).max(0.0)
        });
        eq.chain(epi).fold(0.0, f64::max)
    }

    fn check_expr(&self, expr: &LinearExpr, context: &str) -> Result<(), SolveError> {
        for &(var, coeff) in expr.terms() {
            self.check_var(var, context)?;
            if !coeff.is_finite() {
                return Err(SolveError::InvalidModel(format!(
                    "'{context}' has non-finite coefficient {coeff} on '{}'",
                    self.variables[var.index()].name
                )));
            }
        }
        if !expr.constant().is_finite() {
            return Err(SolveError::InvalidModel(format!(
                "'{context}' has non-finite constant {}",
                expr.constant()
            )));
        }
        Ok(())
    }

    fn check_var(&self, var: VarId, context: &str) -> Result<(), SolveError> {
        if var.index() >= self.variables.len() {
            return Err(SolveError::InvalidModel(format!(
                "'{context}' references unknown variable #{}",
                var.index()
            )));
        }
        Ok(())
    }
}
