//! # cvxexpr
//!
//! Expression algebra for Disciplined Convex Programming (DCP).
//!
//! cvxexpr builds immutable expression DAGs over variables and constants and
//! infers, for every node, its shape, its sign and its curvature using the
//! DCP composition rules. Problems assembled from these expressions are
//! verified before they are handed to a numerical backend.
//!
//! ## Quick Start
//!
//! ```
//! use cvxexpr::prelude::*;
//!
//! let x = named_variable("x", 2);
//! let y = named_variable("y", 2);
//!
//! let obj = norm2(&(&x + &y));
//! assert_eq!(obj.shape(), Shape::scalar());
//! assert_eq!(obj.curvature(), Curvature::Convex);
//!
//! let m = max!(-2, &x, 0).unwrap();
//! assert_eq!(m.sign(), Sign::Positive);
//!
//! let err = vstack!().unwrap_err();
//! assert_eq!(err.to_string(), "No arguments given to 'vstack'.");
//!
//! let problem = Problem::minimize(obj)
//!     .subject_to([x.geq(&constant(0.0)).unwrap()])
//!     .build();
//! assert!(problem.is_dcp());
//! ```
//!
//! ## DCP Rules
//!
//! - **Minimization** requires a **convex** objective
//! - **Maximization** requires a **concave** objective
//! - **Equality constraints** require **affine** expressions
//! - **Inequality constraints** (>=) require **concave** left-hand side
//!
//! ## Supported Atoms
//!
//! ### Affine (both convex and concave)
//! - Arithmetic: `+`, `-`, `*`, `/` (by scalar), `matmul`
//! - Aggregation: `sum`, `trace`
//! - Structural: `reshape`, `transpose`, `index`, `vstack`, `hstack`, `diag`
//!
//! ### Convex
//! - Norms: `norm1`, `norm2`, `norm_inf`, `norm_fro`
//! - Element-wise: `abs`, `pos`, `neg_part`, `square`, `exp`, `power`
//! - Aggregation: `max`, `sum_squares`
//! - Quadratic: `quad_form` (with PSD matrix), `quad_over_lin`
//!
//! ### Concave
//! - Element-wise: `sqrt`, `log`, `entropy`
//! - Aggregation: `min`
//! - Quadratic: `quad_form` (with NSD matrix)

pub mod atoms;
pub mod constraints;
pub mod dcp;
pub mod error;
pub mod expr;
pub mod problem;
pub mod solver;

/// Prelude module for convenient imports.
///
/// ```
/// use cvxexpr::prelude::*;
/// ```
pub mod prelude {
    // Expression types
    pub use crate::expr::{
        constant, constant_dmatrix, constant_matrix, constant_sparse, constant_vec, eye,
        named_variable, nonneg_variable, nonpos_variable, ones, variable, zeros, Array, Expr,
        ExprId, IntoConstant, Shape, VariableBuilder,
    };

    // Atoms
    pub use crate::atoms::{
        abs, diag, dot, entropy, exp, flatten, hstack, log, matmul, max2, maximum, min2,
        minimum, neg_part, norm, norm1, norm2, norm_fro, norm_inf, pos, power, quad_form,
        quad_over_lin, reshape, sqrt, square, sum, sum_squares, trace, transpose, try_norm,
        try_power, vstack, Atom,
    };
    pub use crate::{hstack, max, min, vstack};

    // Constraints
    pub use crate::constraints::{Constraint, ConstraintExt};

    // DCP
    pub use crate::dcp::{Curvature, Monotonicity, Sign};

    // Problem
    pub use crate::problem::{Objective, Problem, ProblemBuilder};

    // Solver
    pub use crate::solver::{Settings, Solution, SolveStatus, Solver};

    // Errors
    pub use crate::error::{CvxError, Result};
}

// Re-export main types at crate root
pub use error::{CvxError, Result};
pub use expr::Expr;
pub use problem::Problem;
pub use solver::{Solution, SolveStatus, Solver};
