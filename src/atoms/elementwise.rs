//! Elementwise atoms.
//!
//! Each atom is applied entry by entry, so the result has the shape of its
//! argument.

use super::atom::Atom;
use crate::error::Result;
use crate::expr::Expr;

fn elementwise(atom: Atom, x: &Expr) -> Expr {
    Expr::from_atom(atom, vec![x.clone()], x.shape())
}

/// Absolute value: |x|.
///
/// Properties:
/// - Curvature: Convex
/// - Sign: Non-negative
/// - Monotonicity: Increasing for x >= 0, decreasing for x <= 0
pub fn abs(x: &Expr) -> Expr {
    elementwise(Atom::Abs, x)
}

/// Positive part: max(x, 0).
///
/// Properties:
/// - Curvature: Convex
/// - Sign: Non-negative
/// - Monotonicity: Increasing
pub fn pos(x: &Expr) -> Expr {
    elementwise(Atom::Pos, x)
}

/// Negative part: max(-x, 0).
///
/// Properties:
/// - Curvature: Convex
/// - Sign: Non-negative
/// - Monotonicity: Decreasing
pub fn neg_part(x: &Expr) -> Expr {
    elementwise(Atom::NegPart, x)
}

/// Square: x^2.
///
/// Convex, increasing for x >= 0 and decreasing for x <= 0.
pub fn square(x: &Expr) -> Expr {
    elementwise(Atom::Square, x)
}

/// Square root.
///
/// Concave and increasing; defined for x >= 0.
pub fn sqrt(x: &Expr) -> Expr {
    elementwise(Atom::Sqrt, x)
}

/// Exponential function: exp(x)
///
/// Convex when x is convex.
pub fn exp(x: &Expr) -> Expr {
    elementwise(Atom::Exp, x)
}

/// Natural logarithm: log(x)
///
/// Concave when x is concave.
pub fn log(x: &Expr) -> Expr {
    elementwise(Atom::Log, x)
}

/// Entropy: -x * log(x)
///
/// Concave when x is affine.
pub fn entropy(x: &Expr) -> Expr {
    elementwise(Atom::Entropy, x)
}

/// Power function: x^p
///
/// - p = 1: Affine
/// - p > 1: Convex (increasing for x >= 0, decreasing for x <= 0 when p is
///   an even integer)
/// - 0 < p < 1: Concave, increasing
/// - p < 0: Convex, decreasing
///
/// # Panics
///
/// Panics if p is zero or not finite. Use `try_power()` for explicit error
/// handling.
pub fn power(x: &Expr, p: f64) -> Expr {
    match try_power(x, p) {
        Ok(expr) => expr,
        Err(err) => panic!("{}", err),
    }
}

/// Power function, returning an error for an invalid exponent.
///
/// # Errors
///
/// Returns a `DomainError` if p is zero or not finite.
pub fn try_power(x: &Expr, p: f64) -> Result<Expr> {
    Atom::Power(p).apply(vec![x.clone()])
}
