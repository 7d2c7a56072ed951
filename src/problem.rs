//! Problem definition and verification.
//!
//! The `Problem` struct represents an optimization problem with:
//! - An objective (minimize or maximize)
//! - A set of constraints
//!
//! Use the builder pattern to construct problems:
//! ```ignore
//! let solution = Problem::minimize(objective)
//!     .subject_to([constraint1, constraint2])
//!     .solve_with(&backend, &Settings::default())?;
//! ```

use std::fmt;

use tracing::{debug, info, warn};

use crate::constraints::Constraint;
use crate::error::{CvxError, Result};
use crate::expr::{Expr, ExprId, Shape};
use crate::solver::{Settings, Solution, Solver};

/// Objective type for optimization problems.
#[derive(Debug, Clone)]
pub enum Objective {
    /// Minimize the expression.
    Minimize(Expr),
    /// Maximize the expression.
    Maximize(Expr),
}

impl Objective {
    /// Get the expression being optimized.
    pub fn expr(&self) -> &Expr {
        match self {
            Objective::Minimize(e) | Objective::Maximize(e) => e,
        }
    }

    /// Check if this is a minimization.
    pub fn is_minimize(&self) -> bool {
        matches!(self, Objective::Minimize(_))
    }

    /// Minimize needs a convex objective, maximize a concave one.
    pub fn is_dcp(&self) -> bool {
        match self {
            Objective::Minimize(e) => e.is_convex(),
            Objective::Maximize(e) => e.is_concave(),
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Objective::Minimize(e) => write!(f, "minimize {}", e),
            Objective::Maximize(e) => write!(f, "maximize {}", e),
        }
    }
}

/// An optimization problem.
#[derive(Debug, Clone)]
pub struct Problem {
    /// The objective to optimize.
    pub objective: Objective,
    /// The constraints.
    pub constraints: Vec<Constraint>,
}

impl Problem {
    /// Create a minimization problem.
    pub fn minimize(expr: Expr) -> ProblemBuilder {
        ProblemBuilder {
            objective: Objective::Minimize(expr),
            constraints: Vec::new(),
        }
    }

    /// Create a maximization problem.
    pub fn maximize(expr: Expr) -> ProblemBuilder {
        ProblemBuilder {
            objective: Objective::Maximize(expr),
            constraints: Vec::new(),
        }
    }

    /// Check if this problem is DCP-compliant.
    ///
    /// A problem is DCP if:
    /// - Minimize: objective is convex
    /// - Maximize: objective is concave
    /// - All constraints are DCP
    pub fn is_dcp(&self) -> bool {
        self.objective.is_dcp() && self.constraints.iter().all(|c| c.is_dcp())
    }

    /// Get all variable IDs in this problem.
    pub fn variables(&self) -> Vec<ExprId> {
        let mut vars = self.objective.expr().variables();
        for c in &self.constraints {
            vars.extend(c.variables());
        }
        vars.sort();
        vars.dedup();
        vars
    }

    /// Get all variables with their shapes, sorted by ID.
    pub fn variable_shapes(&self) -> Vec<(ExprId, Shape)> {
        let mut shapes = self.objective.expr().variable_shapes();
        for c in &self.constraints {
            for expr in c.expressions() {
                shapes.extend(expr.variable_shapes());
            }
        }
        shapes.sort_by_key(|(id, _)| *id);
        shapes.dedup_by_key(|(id, _)| *id);
        shapes
    }

    /// Hand the problem to `solver` after checking it is DCP.
    ///
    /// # Errors
    ///
    /// Returns `NotDcp` without calling the solver if the problem violates
    /// the DCP rules, the solver's own error if it fails, and a
    /// `SolverError` for any status other than optimal.
    pub fn solve_with<S: Solver + ?Sized>(
        &self,
        solver: &S,
        settings: &Settings,
    ) -> Result<Solution> {
        debug!(
            constraints = self.constraints.len(),
            variables = self.variables().len(),
            "verifying problem"
        );
        if !self.is_dcp() {
            let msg = self.dcp_violation_message();
            warn!(reason = %msg, "rejecting non-DCP problem");
            return Err(CvxError::NotDcp(msg));
        }

        info!(objective = %self.objective, "handing problem to solver");
        let solution = solver.solve(self, settings)?;
        debug!(status = %solution.status, value = ?solution.value, "solver finished");
        solution.into_result()
    }

    /// Describe why the problem is not DCP.
    pub fn dcp_violation_message(&self) -> String {
        let mut violations = Vec::new();

        match &self.objective {
            Objective::Minimize(e) if !e.is_convex() => {
                violations.push(format!(
                    "Objective has curvature {} but must be convex for minimization",
                    e.curvature()
                ));
            }
            Objective::Maximize(e) if !e.is_concave() => {
                violations.push(format!(
                    "Objective has curvature {} but must be concave for maximization",
                    e.curvature()
                ));
            }
            _ => {}
        }

        for (i, c) in self.constraints.iter().enumerate() {
            if !c.is_dcp() {
                violations.push(format!("Constraint {} ({}) is not DCP", i, c));
            }
        }

        if violations.is_empty() {
            "Unknown DCP violation".into()
        } else {
            violations.join("; ")
        }
    }
}

/// Builder for constructing problems.
#[derive(Debug, Clone)]
pub struct ProblemBuilder {
    objective: Objective,
    constraints: Vec<Constraint>,
}

impl ProblemBuilder {
    /// Add constraints to the problem.
    pub fn subject_to(mut self, constraints: impl IntoIterator<Item = Constraint>) -> Self {
        self.constraints.extend(constraints);
        self
    }

    /// Add a single constraint.
    pub fn constraint(mut self, c: Constraint) -> Self {
        self.constraints.push(c);
        self
    }

    /// Build the problem.
    pub fn build(self) -> Problem {
        Problem {
            objective: self.objective,
            constraints: self.constraints,
        }
    }

    /// Build the problem and hand it to `solver`.
    pub fn solve_with<S: Solver + ?Sized>(
        self,
        solver: &S,
        settings: &Settings,
    ) -> Result<Solution> {
        self.build().solve_with(solver, settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atoms::{norm2, sqrt, sum};
    use crate::constraints::ConstraintExt;
    use crate::expr::{constant, named_variable, variable};

    #[test]
    fn test_problem_builder() {
        let x = variable(5);
        let problem = Problem::minimize(sum(&x)).build();
        assert!(problem.is_dcp());
        assert!(problem.objective.is_minimize());
    }

    #[test]
    fn test_minimize_convex_is_dcp() {
        let x = variable(5);
        let problem = Problem::minimize(norm2(&x)).build();
        assert!(problem.is_dcp());
    }

    #[test]
    fn test_maximize_convex_not_dcp() {
        let x = variable(5);
        let problem = Problem::maximize(norm2(&x)).build();
        assert!(!problem.is_dcp());
        assert_eq!(
            problem.dcp_violation_message(),
            "Objective has curvature CONVEX but must be concave for maximization"
        );
    }

    #[test]
    fn test_minimize_concave_not_dcp() {
        let x = variable(5);
        let problem = Problem::minimize(-norm2(&x)).build();
        assert!(!problem.is_dcp());
    }

    #[test]
    fn test_maximize_concave_is_dcp() {
        let x = variable(5);
        let problem = Problem::maximize(-norm2(&x)).build();
        assert!(problem.is_dcp());
    }

    #[test]
    fn test_problem_with_constraints() {
        let x = variable(5);
        let c = constant(1.0);
        let problem = Problem::minimize(sum(&x))
            .subject_to([x.geq(&c).unwrap()])
            .build();
        assert!(problem.is_dcp());
    }

    #[test]
    fn test_constraint_violation_message() {
        let x = named_variable("x", ());
        let problem = Problem::minimize(x.clone())
            .constraint(sqrt(&x).equals(&constant(1.0)).unwrap())
            .build();
        assert!(!problem.is_dcp());
        assert_eq!(
            problem.dcp_violation_message(),
            "Constraint 0 (sqrt(x) + -1 == 0) is not DCP"
        );
    }

    #[test]
    fn test_variables_are_collected_once() {
        let x = variable(3);
        let y = variable(());
        let problem = Problem::minimize(norm2(&x))
            .subject_to([x.geq(&y).unwrap(), y.leq(&constant(4.0)).unwrap()])
            .build();
        let shapes = problem.variable_shapes();
        assert_eq!(shapes.len(), 2);
        assert_eq!(problem.variables().len(), 2);
        assert!(shapes.contains(&(x.variable_id().unwrap(), Shape::vector(3))));
    }
}
