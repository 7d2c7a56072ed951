//! DCP (Disciplined Convex Programming) analysis.
//!
//! This module provides the lattices the expression nodes carry:
//! - Curvature tracking (constant, affine, convex, concave, unknown)
//! - Sign tracking (positive, negative, zero, unknown)
//! - Monotonicity declarations and the composition rule

pub mod curvature;
pub mod monotonicity;
pub mod sign;

pub use curvature::{add_curvature, arg_curvature, compose, Curvature, PsdStatus};
pub use monotonicity::Monotonicity;
pub use sign::{add_sign, max_sign, min_sign, mul_sign, Sign};
