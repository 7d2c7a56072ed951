//! Solver interface.
//!
//! This crate verifies problems but does not solve them. A numerical backend
//! implements [`Solver`] and receives only problems that passed the DCP
//! check, see [`Problem::solve_with`](crate::problem::Problem::solve_with).

use std::collections::HashMap;
use std::fmt;

use crate::error::{CvxError, Result};
use crate::expr::{Array, Expr, ExprId};
use crate::problem::Problem;

/// A numerical backend for DCP problems.
pub trait Solver {
    /// Solve a verified problem.
    fn solve(&self, problem: &Problem, settings: &Settings) -> Result<Solution>;
}

/// Solution status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// Optimal solution found.
    Optimal,
    /// Problem is infeasible.
    Infeasible,
    /// Problem is unbounded.
    Unbounded,
    /// Maximum iterations reached.
    MaxIterations,
    /// Numerical difficulties.
    NumericalError,
    /// Unknown status.
    Unknown,
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SolveStatus::Optimal => "optimal",
            SolveStatus::Infeasible => "infeasible",
            SolveStatus::Unbounded => "unbounded",
            SolveStatus::MaxIterations => "max iterations",
            SolveStatus::NumericalError => "numerical error",
            SolveStatus::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Solver settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Print solver output.
    pub verbose: bool,
    /// Maximum iterations.
    pub max_iter: u32,
    /// Time limit in seconds.
    pub time_limit: f64,
    /// Absolute tolerance.
    pub tol_gap_abs: f64,
    /// Relative tolerance.
    pub tol_gap_rel: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            verbose: false,
            max_iter: 100,
            time_limit: f64::INFINITY,
            tol_gap_abs: 1e-8,
            tol_gap_rel: 1e-8,
        }
    }
}

/// Solution reported by a solver.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Solution status.
    pub status: SolveStatus,
    /// Optimal value (if solved).
    pub value: Option<f64>,
    /// Primal variable values (if solved).
    pub primal: Option<HashMap<ExprId, Array>>,
    /// Dual values, one per constraint entry (if reported).
    pub dual: Option<Vec<f64>>,
    /// Solve time in seconds.
    pub solve_time: f64,
    /// Number of iterations.
    pub iterations: u32,
}

impl Solution {
    /// A solution carrying only a status.
    pub fn with_status(status: SolveStatus) -> Self {
        Solution {
            status,
            value: None,
            primal: None,
            dual: None,
            solve_time: 0.0,
            iterations: 0,
        }
    }

    /// Get the value of a variable.
    pub fn get_value(&self, var_id: ExprId) -> Option<&Array> {
        self.primal.as_ref().and_then(|p| p.get(&var_id))
    }

    /// Get scalar value for a variable.
    ///
    /// # Panics
    ///
    /// Panics if the expression is not a variable, the variable is not in the
    /// solution, or the variable is not scalar. Use `try_value()` for explicit
    /// error handling.
    pub fn value(&self, var: &Expr) -> f64 {
        match self.try_value(var) {
            Ok(v) => v,
            Err(err) => panic!("{}", err),
        }
    }

    /// Get scalar value for a variable, returning an error on failure.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The expression is not a variable
    /// - The variable is not in the solution
    /// - The variable is not scalar
    pub fn try_value(&self, var: &Expr) -> Result<f64> {
        let var_id = var
            .variable_id()
            .ok_or_else(|| CvxError::InvalidProblem("Expression is not a variable".into()))?;
        let arr = self
            .get_value(var_id)
            .ok_or_else(|| CvxError::InvalidProblem("Variable not in solution".into()))?;
        arr.as_scalar()
            .ok_or_else(|| CvxError::InvalidProblem("Variable is not scalar".into()))
    }

    /// Get all dual values.
    pub fn duals(&self) -> Option<&[f64]> {
        self.dual.as_deref()
    }

    /// Check the status and turn anything but `Optimal` into an error.
    pub(crate) fn into_result(self) -> Result<Solution> {
        match self.status {
            SolveStatus::Optimal => Ok(self),
            SolveStatus::Infeasible => Err(CvxError::SolverError("Problem is infeasible".into())),
            SolveStatus::Unbounded => Err(CvxError::SolverError("Problem is unbounded".into())),
            SolveStatus::MaxIterations => {
                Err(CvxError::SolverError("Maximum iterations reached".into()))
            }
            SolveStatus::NumericalError => Err(CvxError::SolverError(
                "Solver encountered numerical difficulties".into(),
            )),
            SolveStatus::Unknown => Err(CvxError::SolverError("Unknown solver status".into())),
        }
    }
}
