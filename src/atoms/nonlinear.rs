//! Nonlinear atoms for convex optimization.
//!
//! These atoms have specific curvature properties (convex or concave)
//! and require DCP composition rules to be applied correctly.

use super::atom::Atom;
use crate::error::{CvxError, Result};
use crate::expr::{Expr, Shape};

fn scalar_of(atom: Atom, x: &Expr) -> Expr {
    Expr::from_atom(atom, vec![x.clone()], Shape::scalar())
}

// ============================================================================
// Norms (all convex)
// ============================================================================

/// L1 norm: ||x||_1 = sum(|x_i|).
///
/// Properties:
/// - Curvature: Convex
/// - Sign: Non-negative
/// - Monotonicity: Increasing for x >= 0, decreasing for x <= 0
pub fn norm1(x: &Expr) -> Expr {
    scalar_of(Atom::Norm1, x)
}

/// L2 norm: ||x||_2 = sqrt(sum(x_i^2)).
///
/// Properties:
/// - Curvature: Convex
/// - Sign: Non-negative
/// - Monotonicity: Increasing for x >= 0, decreasing for x <= 0
pub fn norm2(x: &Expr) -> Expr {
    scalar_of(Atom::Norm2, x)
}

/// Infinity norm: ||x||_inf = max(|x_i|).
///
/// Properties:
/// - Curvature: Convex
/// - Sign: Non-negative
/// - Monotonicity: Increasing for x >= 0, decreasing for x <= 0
pub fn norm_inf(x: &Expr) -> Expr {
    scalar_of(Atom::NormInf, x)
}

/// Frobenius norm: the 2-norm of all entries of a matrix.
pub fn norm_fro(x: &Expr) -> Expr {
    scalar_of(Atom::NormFro, x)
}

/// General p-norm.
///
/// Supports p = 1, 2, or infinity.
///
/// # Panics
///
/// Panics if p is not 1, 2, or infinity. Use `try_norm()` for explicit error handling.
///
/// # Example
///
/// ```
/// use cvxexpr::prelude::*;
///
/// let x = variable(5);
/// let n = norm(&x, 2.0);  // Same as norm2(&x)
/// assert!(n.is_convex());
/// ```
pub fn norm(x: &Expr, p: f64) -> Expr {
    match try_norm(x, p) {
        Ok(expr) => expr,
        Err(err) => panic!("{}", err),
    }
}

/// General p-norm, returning an error for unsupported p values.
///
/// # Errors
///
/// Returns a `DomainError` (`Invalid value {p} for p.`) if p is not 1, 2,
/// or infinity.
pub fn try_norm(x: &Expr, p: f64) -> Result<Expr> {
    if p == 1.0 {
        Ok(norm1(x))
    } else if p == 2.0 {
        Ok(norm2(x))
    } else if p == f64::INFINITY {
        Ok(norm_inf(x))
    } else {
        tracing::debug!(p, "unsupported norm order");
        Err(CvxError::DomainError(format!("Invalid value {} for p.", p)))
    }
}

// ============================================================================
// Maximum and minimum
// ============================================================================

/// Elementwise maximum of one or more expressions.
///
/// Properties:
/// - Curvature: Convex (when all arguments are convex)
/// - Sign: Non-negative if any argument is, non-positive if all are
/// - Monotonicity: Increasing in all arguments
///
/// # Errors
///
/// Returns an `ArityError` for an empty list and a `ShapeError` if the
/// shapes do not broadcast.
pub fn maximum(exprs: Vec<Expr>) -> Result<Expr> {
    Atom::Maximum.apply(exprs)
}

/// Maximum of two expressions.
pub fn max2(a: &Expr, b: &Expr) -> Result<Expr> {
    maximum(vec![a.clone(), b.clone()])
}

/// Elementwise minimum of one or more expressions.
///
/// Properties:
/// - Curvature: Concave (when all arguments are concave)
/// - Sign: Non-positive if any argument is, non-negative if all are
/// - Monotonicity: Increasing in all arguments
pub fn minimum(exprs: Vec<Expr>) -> Result<Expr> {
    Atom::Minimum.apply(exprs)
}

/// Minimum of two expressions.
pub fn min2(a: &Expr, b: &Expr) -> Result<Expr> {
    minimum(vec![a.clone(), b.clone()])
}

// ============================================================================
// Quadratic atoms
// ============================================================================

/// Quadratic form: x' P x.
///
/// Properties:
/// - Curvature: Convex if P is a constant PSD matrix, Concave if NSD
/// - Sign: Non-negative if P is PSD, Non-positive if P is NSD
/// - Arguments: x is an `(n, 1)` column, P is `(n, n)`
pub fn quad_form(x: &Expr, p: &Expr) -> Result<Expr> {
    Atom::QuadForm.apply(vec![x.clone(), p.clone()])
}

/// Sum of squares: ||x||_2^2 = x' x.
///
/// Properties:
/// - Curvature: Convex
/// - Sign: Non-negative
/// - Monotonicity: Increasing for x >= 0, decreasing for x <= 0
pub fn sum_squares(x: &Expr) -> Expr {
    scalar_of(Atom::SumSquares, x)
}

/// Quadratic over linear: ||x||_2^2 / y.
///
/// Properties:
/// - Curvature: Convex
/// - Sign: Non-negative
/// - Monotonicity: signed in x, decreasing in y
/// - Domain: y > 0
///
/// # Errors
///
/// Returns a `ShapeError` if y is not a scalar.
pub fn quad_over_lin(x: &Expr, y: &Expr) -> Result<Expr> {
    Atom::QuadOverLin.apply(vec![x.clone(), y.clone()])
}
