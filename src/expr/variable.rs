//! Variable creation with builder pattern.

use super::expression::{Expr, ExprId, VariableData};
use super::shape::Shape;
use crate::dcp::Sign;

/// Builder for creating variables with various attributes.
///
/// The sign of a variable is part of its declaration: it defaults to
/// [`Sign::Unknown`] and is only changed through this builder.
#[derive(Debug, Clone)]
pub struct VariableBuilder {
    shape: Shape,
    name: Option<String>,
    sign: Sign,
}

impl Default for VariableBuilder {
    fn default() -> Self {
        Self {
            shape: Shape::scalar(),
            name: None,
            sign: Sign::Unknown,
        }
    }
}

impl VariableBuilder {
    /// Create a new variable builder with the given shape.
    pub fn new(shape: impl Into<Shape>) -> Self {
        Self {
            shape: shape.into(),
            ..Default::default()
        }
    }

    /// Create a scalar variable builder.
    pub fn scalar() -> Self {
        Self::new(Shape::scalar())
    }

    /// Create a vector variable builder.
    pub fn vector(n: usize) -> Self {
        Self::new(Shape::vector(n))
    }

    /// Create a matrix variable builder.
    pub fn matrix(m: usize, n: usize) -> Self {
        Self::new(Shape::matrix(m, n))
    }

    /// Set the name of the variable.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Declare the sign of the variable.
    pub fn sign(mut self, sign: Sign) -> Self {
        self.sign = sign;
        self
    }

    /// Declare the variable non-negative (x >= 0).
    pub fn nonneg(self) -> Self {
        self.sign(Sign::Positive)
    }

    /// Declare the variable non-positive (x <= 0).
    pub fn nonpos(self) -> Self {
        self.sign(Sign::Negative)
    }

    /// Build the variable expression.
    pub fn build(self) -> Expr {
        Expr::from_variable(VariableData {
            id: ExprId::new(),
            shape: self.shape,
            name: self.name,
            sign: self.sign,
        })
    }
}

/// Create a variable with the given shape.
///
/// # Examples
///
/// ```
/// use cvxexpr::expr::{variable, Shape};
///
/// // Scalar variable
/// let a = variable(());
/// assert_eq!(a.shape(), Shape::scalar());
///
/// // Column vector
/// let x = variable(5);
/// assert_eq!(x.shape(), Shape::new(5, 1));
///
/// // Matrix variable
/// let z = variable((3, 4));
/// assert_eq!(z.shape(), Shape::new(3, 4));
/// ```
pub fn variable(shape: impl Into<Shape>) -> Expr {
    VariableBuilder::new(shape).build()
}

/// Create a named variable with the given shape.
pub fn named_variable(name: impl Into<String>, shape: impl Into<Shape>) -> Expr {
    VariableBuilder::new(shape).name(name).build()
}

/// Create a non-negative variable with the given shape.
pub fn nonneg_variable(shape: impl Into<Shape>) -> Expr {
    VariableBuilder::new(shape).nonneg().build()
}

/// Create a non-positive variable with the given shape.
pub fn nonpos_variable(shape: impl Into<Shape>) -> Expr {
    VariableBuilder::new(shape).nonpos().build()
}

/// Create a scalar variable.
pub fn scalar_var() -> Expr {
    VariableBuilder::scalar().build()
}

/// Create a vector variable.
pub fn vector_var(n: usize) -> Expr {
    VariableBuilder::vector(n).build()
}

/// Create a matrix variable.
pub fn matrix_var(m: usize, n: usize) -> Expr {
    VariableBuilder::matrix(m, n).build()
}
