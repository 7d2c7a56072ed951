//! Affine atoms and operator overloading.
//!
//! Affine atoms are both convex and concave. They include:
//! - Addition, subtraction, negation
//! - Scalar, elementwise and matrix multiplication
//! - Sum, reshape, index, stack operations
//! - Transpose, trace and diag

use std::ops::{Add, Div, Mul, Neg, Range, Sub};

use super::atom::Atom;
use crate::error::{CvxError, Result};
use crate::expr::{constant, Expr, IndexSpec, Shape};

// ============================================================================
// Operator overloading for Expr
// ============================================================================

fn unwrap_op(result: Result<Expr>) -> Expr {
    match result {
        Ok(expr) => expr,
        Err(err) => panic!("{}", err),
    }
}

impl Neg for &Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        Expr::from_atom(Atom::Neg, vec![self.clone()], self.shape())
    }
}

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        -&self
    }
}

// Binary operators panic on incompatible shapes; the `try_*` methods
// report the error instead.
macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $try:ident) => {
        impl $trait<&Expr> for &Expr {
            type Output = Expr;

            fn $method(self, rhs: &Expr) -> Expr {
                unwrap_op(self.$try(rhs))
            }
        }

        impl $trait<Expr> for Expr {
            type Output = Expr;

            fn $method(self, rhs: Expr) -> Expr {
                unwrap_op(self.$try(&rhs))
            }
        }

        impl $trait<&Expr> for Expr {
            type Output = Expr;

            fn $method(self, rhs: &Expr) -> Expr {
                unwrap_op(self.$try(rhs))
            }
        }

        impl $trait<Expr> for &Expr {
            type Output = Expr;

            fn $method(self, rhs: Expr) -> Expr {
                unwrap_op(self.$try(&rhs))
            }
        }

        impl $trait<f64> for Expr {
            type Output = Expr;

            fn $method(self, rhs: f64) -> Expr {
                unwrap_op(self.$try(&constant(rhs)))
            }
        }

        impl $trait<f64> for &Expr {
            type Output = Expr;

            fn $method(self, rhs: f64) -> Expr {
                unwrap_op(self.$try(&constant(rhs)))
            }
        }

        impl $trait<Expr> for f64 {
            type Output = Expr;

            fn $method(self, rhs: Expr) -> Expr {
                unwrap_op(constant(self).$try(&rhs))
            }
        }

        impl $trait<&Expr> for f64 {
            type Output = Expr;

            fn $method(self, rhs: &Expr) -> Expr {
                unwrap_op(constant(self).$try(rhs))
            }
        }
    };
}

impl_binary_op!(Add, add, try_add);
impl_binary_op!(Sub, sub, try_sub);
impl_binary_op!(Mul, mul, try_mul);

// Division by scalar; panics on a zero divisor, see `Expr::try_div`.
impl Div<f64> for Expr {
    type Output = Expr;

    fn div(self, rhs: f64) -> Expr {
        &self / rhs
    }
}

impl Div<f64> for &Expr {
    type Output = Expr;

    fn div(self, rhs: f64) -> Expr {
        unwrap_op(self.try_div(rhs))
    }
}

impl Expr {
    /// Elementwise addition with scalar promotion.
    ///
    /// # Errors
    ///
    /// Returns a `ShapeError` if the shapes are incompatible.
    pub fn try_add(&self, rhs: &Expr) -> Result<Expr> {
        Atom::Add.apply(vec![self.clone(), rhs.clone()])
    }

    /// `self + (-rhs)`.
    pub fn try_sub(&self, rhs: &Expr) -> Result<Expr> {
        Atom::Add.apply(vec![self.clone(), -rhs])
    }

    /// Elementwise multiplication with scalar promotion.
    pub fn try_mul(&self, rhs: &Expr) -> Result<Expr> {
        Atom::Mul.apply(vec![self.clone(), rhs.clone()])
    }

    /// Division by a scalar, built as `self * (1 / rhs)`.
    ///
    /// # Errors
    ///
    /// Returns a `DomainError` if `rhs` is zero.
    pub fn try_div(&self, rhs: f64) -> Result<Expr> {
        if rhs == 0.0 {
            return Err(CvxError::DomainError("Division by zero.".into()));
        }
        self.try_mul(&constant(1.0 / rhs))
    }

    /// Matrix product `self @ rhs`.
    pub fn matmul(&self, rhs: &Expr) -> Result<Expr> {
        matmul(self, rhs)
    }

    /// Transpose.
    pub fn t(&self) -> Expr {
        transpose(self)
    }

    /// Select the entry at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns a `ShapeError` if the entry is out of bounds.
    pub fn index(&self, row: usize, col: usize) -> Result<Expr> {
        Atom::Index(IndexSpec::element(row, col)).apply(vec![self.clone()])
    }

    /// Select the block `rows x cols` (half-open ranges).
    pub fn slice(&self, rows: Range<usize>, cols: Range<usize>) -> Result<Expr> {
        Atom::Index(IndexSpec::block(rows, cols)).apply(vec![self.clone()])
    }

    /// Every entry as its own scalar expression, in column-major order.
    pub fn entries(&self) -> Vec<Expr> {
        let shape = self.shape();
        let mut out = Vec::with_capacity(shape.size());
        for col in 0..shape.cols() {
            for row in 0..shape.rows() {
                out.push(Expr::from_atom(
                    Atom::Index(IndexSpec::element(row, col)),
                    vec![self.clone()],
                    Shape::scalar(),
                ));
            }
        }
        out
    }
}

// ============================================================================
// Affine atom functions
// ============================================================================

/// Sum of all elements.
pub fn sum(expr: &Expr) -> Expr {
    Expr::from_atom(Atom::Sum, vec![expr.clone()], Shape::scalar())
}

/// Reshape an expression to a new shape with the same number of entries.
pub fn reshape(expr: &Expr, shape: impl Into<Shape>) -> Result<Expr> {
    Atom::Reshape(shape.into()).apply(vec![expr.clone()])
}

/// Flatten an expression to a column vector.
pub fn flatten(expr: &Expr) -> Expr {
    let target = Shape::vector(expr.shape().size());
    Expr::from_atom(Atom::Reshape(target), vec![expr.clone()], target)
}

/// Transpose an expression.
pub fn transpose(expr: &Expr) -> Expr {
    Expr::from_atom(Atom::Transpose, vec![expr.clone()], expr.shape().transpose())
}

/// Matrix trace.
pub fn trace(expr: &Expr) -> Result<Expr> {
    Atom::Trace.apply(vec![expr.clone()])
}

/// Diagonal matrix from a vector, or the diagonal of a square matrix.
pub fn diag(expr: &Expr) -> Result<Expr> {
    Atom::Diag.apply(vec![expr.clone()])
}

/// Vertical stack (row-wise concatenation).
///
/// # Errors
///
/// Returns an `ArityError` for an empty list and a `ShapeError` if the
/// column counts differ.
pub fn vstack(exprs: Vec<Expr>) -> Result<Expr> {
    Atom::VStack.apply(exprs)
}

/// Horizontal stack (column-wise concatenation).
pub fn hstack(exprs: Vec<Expr>) -> Result<Expr> {
    Atom::HStack.apply(exprs)
}

/// Matrix-vector or matrix-matrix multiplication.
pub fn matmul(a: &Expr, b: &Expr) -> Result<Expr> {
    Atom::MatMul.apply(vec![a.clone(), b.clone()])
}

/// Dot product of two column vectors, `a' b`.
pub fn dot(a: &Expr, b: &Expr) -> Result<Expr> {
    matmul(&transpose(a), b)
}
