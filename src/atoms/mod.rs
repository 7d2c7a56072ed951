//! Atom functions for building expressions.
//!
//! Atoms are the building blocks of optimization problems. They include:
//!
//! - **Affine atoms**: Operations that preserve linearity (add, mul, sum, reshape, etc.)
//! - **Elementwise atoms**: abs, square, sqrt, exp, log, power, ...
//! - **Nonlinear atoms**: Operations with specific curvature (norms, quadratic forms, etc.)
//!
//! Every function here is a thin wrapper over [`Atom::apply`] or, when the
//! application cannot fail, over the node constructor directly.

pub mod affine;
pub mod atom;
pub mod elementwise;
pub mod nonlinear;

pub use atom::{Arity, Atom};

// Re-export affine operations
pub use affine::{
    diag, dot, flatten, hstack, matmul, reshape, sum, trace, transpose, vstack,
};

// Re-export elementwise atoms
pub use elementwise::{abs, entropy, exp, log, neg_part, pos, power, sqrt, square, try_power};

// Re-export nonlinear atoms
pub use nonlinear::{
    max2, maximum, min2, minimum, norm, norm1, norm2, norm_fro, norm_inf, quad_form,
    quad_over_lin, sum_squares, try_norm,
};

/// Elementwise maximum of one or more expressions or numeric literals.
///
/// Expands to a call to [`maximum`], so it returns a `Result`.
///
/// ```
/// use cvxexpr::prelude::*;
///
/// let x = variable(());
/// let m = max!(1, &x).unwrap();
/// assert_eq!(m.sign(), Sign::Positive);
/// ```
#[macro_export]
macro_rules! max {
    ($($arg:expr),* $(,)?) => {
        $crate::atoms::maximum(vec![$($crate::expr::Expr::from($arg)),*])
    };
}

/// Elementwise minimum of one or more expressions or numeric literals.
#[macro_export]
macro_rules! min {
    ($($arg:expr),* $(,)?) => {
        $crate::atoms::minimum(vec![$($crate::expr::Expr::from($arg)),*])
    };
}

/// Vertical stack of expressions or numeric literals.
#[macro_export]
macro_rules! vstack {
    ($($arg:expr),* $(,)?) => {
        $crate::atoms::vstack(vec![$($crate::expr::Expr::from($arg)),*])
    };
}

/// Horizontal stack of expressions or numeric literals.
#[macro_export]
macro_rules! hstack {
    ($($arg:expr),* $(,)?) => {
        $crate::atoms::hstack(vec![$($crate::expr::Expr::from($arg)),*])
    };
}
