//! Shape representation for expressions.
//!
//! Every expression is two-dimensional:
//! - `()` is a scalar, `(1, 1)`
//! - `n` or `(n,)` is a column vector, `(n, 1)`
//! - `(m, n)` is an m x n matrix

use std::fmt;

/// Shape of an expression: `(rows, cols)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: usize,
    cols: usize,
}

impl Shape {
    /// Create a shape from its dimensions.
    pub fn new(rows: usize, cols: usize) -> Self {
        Shape { rows, cols }
    }

    /// Create a scalar shape.
    pub fn scalar() -> Self {
        Shape::new(1, 1)
    }

    /// Create a column vector shape.
    pub fn vector(n: usize) -> Self {
        Shape::new(n, 1)
    }

    /// Create a matrix shape.
    pub fn matrix(m: usize, n: usize) -> Self {
        Shape::new(m, n)
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of elements, saturating at `usize::MAX`.
    pub fn size(&self) -> usize {
        self.rows.saturating_mul(self.cols)
    }

    /// Total number of elements, or `None` if it does not fit in a `usize`.
    pub fn checked_size(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }

    /// The shape as a `(rows, cols)` pair.
    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Check if this is a scalar.
    pub fn is_scalar(&self) -> bool {
        self.rows == 1 && self.cols == 1
    }

    /// Check if this is a column vector (scalars included).
    pub fn is_column(&self) -> bool {
        self.cols == 1
    }

    /// Check if this is a square matrix.
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Get the transposed shape.
    pub fn transpose(&self) -> Self {
        Shape::new(self.cols, self.rows)
    }

    /// Shape of an elementwise operation between two operands.
    ///
    /// Equal shapes combine to themselves and a scalar is promoted to the
    /// other operand's shape. Anything else is incompatible.
    pub fn broadcast(&self, other: &Shape) -> Option<Shape> {
        if self == other || other.is_scalar() {
            Some(*self)
        } else if self.is_scalar() {
            Some(*other)
        } else {
            None
        }
    }

    /// Shape of a matrix product, with scalar promotion on either side.
    pub fn matmul(&self, other: &Shape) -> Option<Shape> {
        if self.is_scalar() {
            Some(*other)
        } else if other.is_scalar() {
            Some(*self)
        } else if self.cols == other.rows {
            Some(Shape::new(self.rows, other.cols))
        } else {
            None
        }
    }
}

impl Default for Shape {
    fn default() -> Self {
        Shape::scalar()
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.rows, self.cols)
    }
}

// Conversion traits
impl From<()> for Shape {
    fn from(_: ()) -> Self {
        Shape::scalar()
    }
}

impl From<usize> for Shape {
    fn from(n: usize) -> Self {
        Shape::vector(n)
    }
}

impl From<(usize,)> for Shape {
    fn from((n,): (usize,)) -> Self {
        Shape::vector(n)
    }
}

impl From<(usize, usize)> for Shape {
    fn from((m, n): (usize, usize)) -> Self {
        Shape::matrix(m, n)
    }
}

impl From<Shape> for (usize, usize) {
    fn from(shape: Shape) -> Self {
        shape.dims()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar() {
        let s = Shape::scalar();
        assert!(s.is_scalar());
        assert_eq!(s.size(), 1);
        assert_eq!(s.dims(), (1, 1));
    }

    #[test]
    fn test_vector() {
        let s = Shape::vector(5);
        assert!(s.is_column());
        assert!(!s.is_scalar());
        assert_eq!(s.size(), 5);
        assert_eq!(s.rows(), 5);
        assert_eq!(s.cols(), 1);
    }

    #[test]
    fn test_matrix() {
        let s = Shape::matrix(3, 4);
        assert_eq!(s.size(), 12);
        assert_eq!(s.rows(), 3);
        assert_eq!(s.cols(), 4);
        assert!(!s.is_square());
    }

    #[test]
    fn test_size_overflow() {
        let s = Shape::new(usize::MAX, 2);
        assert_eq!(s.size(), usize::MAX);
        assert_eq!(s.checked_size(), None);
        assert_eq!(Shape::new(3, 4).checked_size(), Some(12));
    }

    #[test]
    fn test_transpose() {
        assert_eq!(Shape::scalar().transpose(), Shape::scalar());
        assert_eq!(Shape::vector(3).transpose(), Shape::matrix(1, 3));
        assert_eq!(Shape::matrix(3, 4).transpose(), Shape::matrix(4, 3));
    }

    #[test]
    fn test_broadcast() {
        assert_eq!(
            Shape::vector(3).broadcast(&Shape::vector(3)),
            Some(Shape::vector(3))
        );

        // Scalar promotes to anything
        assert_eq!(
            Shape::scalar().broadcast(&Shape::matrix(3, 4)),
            Some(Shape::matrix(3, 4))
        );
        assert_eq!(
            Shape::matrix(3, 4).broadcast(&Shape::scalar()),
            Some(Shape::matrix(3, 4))
        );

        // No row/column broadcasting
        assert_eq!(Shape::vector(4).broadcast(&Shape::matrix(4, 3)), None);
        assert_eq!(Shape::vector(3).broadcast(&Shape::vector(4)), None);
    }

    #[test]
    fn test_matmul() {
        assert_eq!(
            Shape::matrix(3, 4).matmul(&Shape::matrix(4, 5)),
            Some(Shape::matrix(3, 5))
        );
        assert_eq!(
            Shape::matrix(3, 4).matmul(&Shape::vector(4)),
            Some(Shape::vector(3))
        );
        assert_eq!(
            Shape::scalar().matmul(&Shape::vector(4)),
            Some(Shape::vector(4))
        );
        assert_eq!(Shape::matrix(3, 4).matmul(&Shape::vector(3)), None);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Shape::from(()), Shape::scalar());
        assert_eq!(Shape::from(5), Shape::new(5, 1));
        assert_eq!(Shape::from((5,)), Shape::new(5, 1));
        assert_eq!(Shape::from((3, 4)), Shape::new(3, 4));
        assert_eq!(Shape::new(3, 4).to_string(), "(3, 4)");
    }
}
