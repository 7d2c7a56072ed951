//! Constraint types for optimization problems.
//!
//! Every constraint is stored in a normalized form:
//! - Zero: expr == 0 (equality)
//! - NonNeg: expr >= 0 (inequality)
//! - Soc: ||x||_2 <= t (second-order cone)

use std::fmt;

use crate::error::{CvxError, Result};
use crate::expr::{Expr, ExprId};

/// A constraint in an optimization problem.
#[derive(Debug, Clone)]
pub enum Constraint {
    /// Equality constraint: expr == 0.
    Zero(Expr),

    /// Inequality constraint: expr >= 0.
    NonNeg(Expr),

    /// Second-order cone constraint: ||x||_2 <= t.
    /// The t argument must be scalar, x can be a vector or matrix.
    Soc {
        /// The scalar upper bound.
        t: Expr,
        /// The cone argument.
        x: Expr,
    },
}

impl Constraint {
    /// Create an equality constraint: lhs == rhs.
    ///
    /// # Errors
    ///
    /// Returns a `ShapeError` if the two sides do not broadcast.
    pub fn eq(lhs: &Expr, rhs: &Expr) -> Result<Self> {
        Ok(Constraint::Zero(lhs.try_sub(rhs)?))
    }

    /// Create an inequality constraint: lhs <= rhs.
    pub fn leq(lhs: &Expr, rhs: &Expr) -> Result<Self> {
        // lhs <= rhs  <=>  rhs - lhs >= 0
        Ok(Constraint::NonNeg(rhs.try_sub(lhs)?))
    }

    /// Create an inequality constraint: lhs >= rhs.
    pub fn geq(lhs: &Expr, rhs: &Expr) -> Result<Self> {
        Ok(Constraint::NonNeg(lhs.try_sub(rhs)?))
    }

    /// Create a SOC constraint: ||x||_2 <= t.
    ///
    /// # Errors
    ///
    /// Returns a `ShapeError` if t is not a scalar.
    pub fn soc(t: &Expr, x: &Expr) -> Result<Self> {
        if !t.shape().is_scalar() {
            return Err(CvxError::ShapeError(format!(
                "The bound of a second-order cone must be a scalar, got {}.",
                t.shape()
            )));
        }
        Ok(Constraint::Soc {
            t: t.clone(),
            x: x.clone(),
        })
    }

    /// Check if this constraint is DCP-compliant.
    ///
    /// DCP rules for constraints:
    /// - Zero: expression must be affine (equality of affine expressions)
    /// - NonNeg: expression must be concave (concave >= 0)
    /// - Soc: both t and x must be affine
    pub fn is_dcp(&self) -> bool {
        match self {
            Constraint::Zero(expr) => expr.is_affine(),
            Constraint::NonNeg(expr) => expr.is_concave(),
            Constraint::Soc { t, x } => t.is_affine() && x.is_affine(),
        }
    }

    /// Get all expressions in this constraint.
    pub fn expressions(&self) -> Vec<&Expr> {
        match self {
            Constraint::Zero(e) | Constraint::NonNeg(e) => vec![e],
            Constraint::Soc { t, x } => vec![t, x],
        }
    }

    /// Get all variable IDs in this constraint.
    pub fn variables(&self) -> Vec<ExprId> {
        let mut vars: Vec<ExprId> = self
            .expressions()
            .into_iter()
            .flat_map(Expr::variables)
            .collect();
        vars.sort();
        vars.dedup();
        vars
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Zero(e) => write!(f, "{} == 0", e),
            Constraint::NonNeg(e) => write!(f, "{} >= 0", e),
            Constraint::Soc { t, x } => write!(f, "soc({}, {})", t, x),
        }
    }
}

/// Extension trait for creating constraints from expressions.
pub trait ConstraintExt {
    /// Create equality constraint: self == rhs.
    fn equals(&self, rhs: &Expr) -> Result<Constraint>;

    /// Create inequality constraint: self <= rhs.
    fn leq(&self, rhs: &Expr) -> Result<Constraint>;

    /// Create inequality constraint: self >= rhs.
    fn geq(&self, rhs: &Expr) -> Result<Constraint>;
}

impl ConstraintExt for Expr {
    fn equals(&self, rhs: &Expr) -> Result<Constraint> {
        Constraint::eq(self, rhs)
    }

    fn leq(&self, rhs: &Expr) -> Result<Constraint> {
        Constraint::leq(self, rhs)
    }

    fn geq(&self, rhs: &Expr) -> Result<Constraint> {
        Constraint::geq(self, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atoms::{norm2, sqrt};
    use crate::expr::{constant, named_variable, variable};

    #[test]
    fn test_equality_constraint() {
        let x = variable(5);
        let c = constant(1.0);
        let constr = Constraint::eq(&x, &c).unwrap();

        assert!(constr.is_dcp());
        assert!(matches!(constr, Constraint::Zero(_)));
    }

    #[test]
    fn test_inequality_constraint() {
        let x = variable(5);
        let c = constant(0.0);
        let constr = Constraint::geq(&x, &c).unwrap();

        assert!(constr.is_dcp());
        assert!(matches!(constr, Constraint::NonNeg(_)));
    }

    #[test]
    fn test_incompatible_sides() {
        let x = variable(5);
        let y = variable(3);
        assert!(matches!(
            Constraint::eq(&x, &y),
            Err(CvxError::ShapeError(_))
        ));
    }

    #[test]
    fn test_soc_constraint() {
        let t = variable(());
        let x = variable(5);
        let constr = Constraint::soc(&t, &x).unwrap();
        assert!(constr.is_dcp());

        assert!(Constraint::soc(&x, &t).is_err());
    }

    #[test]
    fn test_non_dcp_constraint() {
        let x = variable(5);
        // norm(x) >= 1 is NOT DCP (convex >= constant)
        let c = constant(1.0);
        let constr = Constraint::geq(&norm2(&x), &c).unwrap();

        // norm_x - 1 is convex, not concave
        assert!(!constr.is_dcp());

        // 1 <= sqrt(x) is concave >= 0
        let constr = Constraint::leq(&c, &sqrt(&x)).unwrap();
        assert!(constr.is_dcp());
    }

    #[test]
    fn test_constraint_ext() {
        let x = variable(5);
        let c = constant(1.0);

        let eq_constr = x.equals(&c).unwrap();
        assert!(eq_constr.is_dcp());

        let leq_constr = x.leq(&c).unwrap();
        assert!(leq_constr.is_dcp());
        assert_eq!(leq_constr.variables(), x.variables());
    }

    #[test]
    fn test_display() {
        let x = named_variable("x", ());
        let c = x.geq(&constant(2.0)).unwrap();
        assert_eq!(c.to_string(), "x + -2 >= 0");
    }
}
