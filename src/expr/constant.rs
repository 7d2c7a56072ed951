//! Constant expression creation.

use nalgebra::DMatrix;
use nalgebra_sparse::CscMatrix;

use super::expression::{Array, ConstantData, Expr, ExprId};
use super::shape::Shape;

fn leaf(value: Array) -> Expr {
    Expr::from_constant(ConstantData {
        id: ExprId::new(),
        value,
    })
}

/// Create a constant expression from a scalar.
pub fn constant(value: f64) -> Expr {
    leaf(Array::Scalar(value))
}

/// Create a constant column vector.
pub fn constant_vec(values: Vec<f64>) -> Expr {
    leaf(Array::from_vec(values))
}

/// Create a constant matrix from column-major values.
pub fn constant_matrix(values: Vec<f64>, rows: usize, cols: usize) -> Expr {
    leaf(Array::Dense(DMatrix::from_vec(rows, cols, values)))
}

/// Create a constant expression from a nalgebra DMatrix.
pub fn constant_dmatrix(matrix: DMatrix<f64>) -> Expr {
    leaf(Array::Dense(matrix))
}

/// Create a constant expression from a sparse CSC matrix.
pub fn constant_sparse(matrix: CscMatrix<f64>) -> Expr {
    leaf(Array::Sparse(matrix))
}

/// Create a zero constant with the given shape.
pub fn zeros(shape: impl Into<Shape>) -> Expr {
    let shape = shape.into();
    if shape.is_scalar() {
        constant(0.0)
    } else {
        constant_dmatrix(DMatrix::zeros(shape.rows(), shape.cols()))
    }
}

/// Create a ones constant with the given shape.
pub fn ones(shape: impl Into<Shape>) -> Expr {
    let shape = shape.into();
    if shape.is_scalar() {
        constant(1.0)
    } else {
        constant_dmatrix(DMatrix::from_element(shape.rows(), shape.cols(), 1.0))
    }
}

/// Create an identity matrix constant.
pub fn eye(n: usize) -> Expr {
    constant_dmatrix(DMatrix::identity(n, n))
}

/// Extension trait for creating constants from various types.
pub trait IntoConstant {
    fn into_constant(self) -> Expr;
}

impl IntoConstant for f64 {
    fn into_constant(self) -> Expr {
        constant(self)
    }
}

impl IntoConstant for i32 {
    fn into_constant(self) -> Expr {
        constant(self as f64)
    }
}

impl IntoConstant for Vec<f64> {
    fn into_constant(self) -> Expr {
        constant_vec(self)
    }
}

impl IntoConstant for &[f64] {
    fn into_constant(self) -> Expr {
        constant_vec(self.to_vec())
    }
}

impl IntoConstant for DMatrix<f64> {
    fn into_constant(self) -> Expr {
        constant_dmatrix(self)
    }
}

impl IntoConstant for CscMatrix<f64> {
    fn into_constant(self) -> Expr {
        constant_sparse(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dcp::{Curvature, Sign};

    #[test]
    fn test_constant_scalar() {
        let c = constant(5.0);
        assert_eq!(c.constant_value().and_then(Array::as_scalar), Some(5.0));
        assert_eq!(c.curvature(), Curvature::Constant);
        assert_eq!(c.shape(), Shape::scalar());
    }

    #[test]
    fn test_constant_vec() {
        let c = constant_vec(vec![1.0, 2.0, 3.0]);
        assert_eq!(c.shape(), Shape::matrix(3, 1));
    }

    #[test]
    fn test_constant_matrix_is_column_major() {
        let c = constant_matrix(vec![1.0, 2.0, 3.0, 4.0], 2, 2);
        assert_eq!(c.name(), "[[1, 3], [2, 4]]");
    }

    #[test]
    fn test_zeros() {
        let z = zeros((3, 4));
        assert_eq!(z.shape(), Shape::matrix(3, 4));
        assert_eq!(z.sign(), Sign::Zero);
    }

    #[test]
    fn test_ones() {
        let o = ones(5);
        assert_eq!(o.shape(), Shape::matrix(5, 1));
        assert_eq!(o.sign(), Sign::Positive);
    }

    #[test]
    fn test_eye() {
        let e = eye(3);
        assert_eq!(e.shape(), Shape::matrix(3, 3));
        // off-diagonal zeros
        assert_eq!(e.sign(), Sign::Unknown);
    }

    #[test]
    fn test_into_constant() {
        assert_eq!(5.0.into_constant().sign(), Sign::Positive);
        assert_eq!(vec![-1.0, -2.0].into_constant().sign(), Sign::Negative);
    }
}
