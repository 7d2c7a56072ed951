//! Error types for cvxexpr.

use thiserror::Error;

/// Error type for cvxexpr operations.
///
/// The first three variants are raised while an expression is being built.
/// Their `Display` output is exactly the carried message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CvxError {
    /// An atom received fewer or more arguments than it accepts.
    #[error("{0}")]
    ArityError(String),

    /// Argument shapes are incompatible for the atom.
    #[error("{0}")]
    ShapeError(String),

    /// A non-expression parameter is outside the atom's supported set.
    #[error("{0}")]
    DomainError(String),

    /// Problem is not DCP-compliant.
    #[error("Problem is not DCP: {0}")]
    NotDcp(String),

    /// Solver error.
    #[error("Solver error: {0}")]
    SolverError(String),

    /// Invalid problem specification.
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),
}

impl CvxError {
    /// True for the errors raised while building an expression.
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self,
            CvxError::ArityError(_) | CvxError::ShapeError(_) | CvxError::DomainError(_)
        )
    }
}

/// Result type for cvxexpr operations.
pub type Result<T> = std::result::Result<T, CvxError>;
