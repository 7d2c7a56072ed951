//! The atom catalog.
//!
//! Every operator an expression can be built from is a variant of [`Atom`].
//! A variant only declares static facts about itself (name, arity, shape
//! rule, sign rule, base curvature and monotonicity per argument); the
//! curvature of an application is always derived through
//! [`compose`](crate::dcp::compose).

use std::fmt;

use tracing::debug;

use crate::dcp::sign::union_sign;
use crate::dcp::{
    add_sign, compose, max_sign, min_sign, mul_sign, Curvature, Monotonicity, PsdStatus, Sign,
};
use crate::error::{CvxError, Result};
use crate::expr::{Expr, IndexSpec, Shape};

/// Number of arguments an atom accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
}

impl Arity {
    /// Check whether `n` arguments are acceptable.
    pub fn accepts(self, n: usize) -> bool {
        match self {
            Arity::Exact(k) => n == k,
            Arity::AtLeast(k) => n >= k,
        }
    }
}

/// A primitive operator.
#[derive(Debug, Clone, PartialEq)]
pub enum Atom {
    // ========== Affine ==========
    /// Elementwise addition with scalar promotion.
    Add,
    /// Negation.
    Neg,
    /// Elementwise (or scalar) multiplication.
    Mul,
    /// Matrix product.
    MatMul,
    /// Sum of all entries.
    Sum,
    /// Reshape to a target shape with the same number of entries.
    Reshape(Shape),
    /// Transpose.
    Transpose,
    /// Block selection.
    Index(IndexSpec),
    /// Vertical concatenation.
    VStack,
    /// Horizontal concatenation.
    HStack,
    /// Matrix trace.
    Trace,
    /// Vector to diagonal matrix, or diagonal of a square matrix.
    Diag,

    // ========== Elementwise ==========
    Abs,
    /// max(x, 0)
    Pos,
    /// max(-x, 0)
    NegPart,
    Square,
    Sqrt,
    /// x^p for a finite, non-zero exponent.
    Power(f64),
    Exp,
    Log,
    /// -x * log(x)
    Entropy,

    // ========== Nonlinear ==========
    Norm1,
    Norm2,
    NormInf,
    /// Frobenius norm (entrywise 2-norm of a matrix).
    NormFro,
    SumSquares,
    /// ||x||_2^2 / y with scalar y.
    QuadOverLin,
    /// x' P x
    QuadForm,
    /// Elementwise maximum of its arguments.
    Maximum,
    /// Elementwise minimum of its arguments.
    Minimum,
}

// Printing precedence of the root operator of an expression.
const PREC_ADD: u8 = 1;
const PREC_MUL: u8 = 2;
const PREC_NEG: u8 = 3;
const PREC_POSTFIX: u8 = 4;
const PREC_CALL: u8 = 10;

impl Atom {
    /// Name used in diagnostics and in the display of applications.
    pub fn name(&self) -> &'static str {
        match self {
            Atom::Add => "add",
            Atom::Neg => "neg",
            Atom::Mul => "mul",
            Atom::MatMul => "matmul",
            Atom::Sum => "sum",
            Atom::Reshape(_) => "reshape",
            Atom::Transpose => "transpose",
            Atom::Index(_) => "index",
            Atom::VStack => "vstack",
            Atom::HStack => "hstack",
            Atom::Trace => "trace",
            Atom::Diag => "diag",
            Atom::Abs => "abs",
            Atom::Pos => "pos",
            Atom::NegPart => "neg_part",
            Atom::Square => "square",
            Atom::Sqrt => "sqrt",
            Atom::Power(_) => "power",
            Atom::Exp => "exp",
            Atom::Log => "log",
            Atom::Entropy => "entropy",
            Atom::Norm1 => "norm1",
            Atom::Norm2 => "norm2",
            Atom::NormInf => "norm_inf",
            Atom::NormFro => "norm_fro",
            Atom::SumSquares => "sum_squares",
            Atom::QuadOverLin => "quad_over_lin",
            Atom::QuadForm => "quad_form",
            Atom::Maximum => "max",
            Atom::Minimum => "min",
        }
    }

    /// Number of arguments the atom accepts.
    pub fn arity(&self) -> Arity {
        match self {
            Atom::Add | Atom::Mul | Atom::MatMul | Atom::QuadOverLin | Atom::QuadForm => {
                Arity::Exact(2)
            }
            Atom::VStack | Atom::HStack | Atom::Maximum | Atom::Minimum => Arity::AtLeast(1),
            _ => Arity::Exact(1),
        }
    }

    /// Apply the atom to `args`.
    ///
    /// Validates arity, parameters and argument shapes, then builds the node.
    /// Nothing is built when validation fails.
    pub fn apply(self, args: Vec<Expr>) -> Result<Expr> {
        match self.validate(&args) {
            Ok(shape) => Ok(Expr::from_atom(self, args, shape)),
            Err(err) => {
                debug!(atom = self.name(), nargs = args.len(), error = %err, "rejected atom application");
                Err(err)
            }
        }
    }

    /// Check the application and return the shape of the result.
    pub fn validate(&self, args: &[Expr]) -> Result<Shape> {
        self.check_arity(args.len())?;
        self.check_params()?;
        self.infer_shape(args)
    }

    fn check_arity(&self, n: usize) -> Result<()> {
        let arity = self.arity();
        if arity.accepts(n) {
            return Ok(());
        }
        let msg = match arity {
            Arity::AtLeast(_) if n == 0 => format!("No arguments given to '{}'.", self.name()),
            Arity::AtLeast(k) => format!(
                "'{}' takes at least {} {} but {} were given.",
                self.name(),
                k,
                plural(k, "argument", "arguments"),
                n,
            ),
            Arity::Exact(k) => format!(
                "'{}' takes {} {} but {} were given.",
                self.name(),
                k,
                plural(k, "argument", "arguments"),
                n,
            ),
        };
        Err(CvxError::ArityError(msg))
    }

    fn check_params(&self) -> Result<()> {
        match self {
            Atom::Power(p) if !p.is_finite() || *p == 0.0 => {
                Err(CvxError::DomainError(format!("Invalid value {} for p.", p)))
            }
            _ => Ok(()),
        }
    }

    fn infer_shape(&self, args: &[Expr]) -> Result<Shape> {
        let first = args[0].shape();
        match self {
            Atom::Add | Atom::Mul | Atom::Maximum | Atom::Minimum => {
                args[1..].iter().try_fold(first, |acc, arg| {
                    acc.broadcast(&arg.shape())
                        .ok_or_else(|| self.incompatible(acc, arg.shape()))
                })
            }
            Atom::MatMul => {
                let rhs = args[1].shape();
                first.matmul(&rhs).ok_or_else(|| self.incompatible(first, rhs))
            }
            Atom::Neg
            | Atom::Abs
            | Atom::Pos
            | Atom::NegPart
            | Atom::Square
            | Atom::Sqrt
            | Atom::Power(_)
            | Atom::Exp
            | Atom::Log
            | Atom::Entropy => Ok(first),
            Atom::Sum
            | Atom::Norm1
            | Atom::Norm2
            | Atom::NormInf
            | Atom::NormFro
            | Atom::SumSquares => Ok(Shape::scalar()),
            Atom::Reshape(target) => {
                let sizes = (target.checked_size(), first.checked_size());
                if matches!(sizes, (Some(a), Some(b)) if a == b) {
                    Ok(*target)
                } else {
                    Err(CvxError::ShapeError(format!(
                        "Cannot reshape {} into {}.",
                        first, target
                    )))
                }
            }
            Atom::Transpose => Ok(first.transpose()),
            Atom::Index(spec) => {
                if spec.fits(first) {
                    Ok(spec.shape())
                } else {
                    Err(CvxError::ShapeError(format!(
                        "Index {} is out of bounds for expression of shape {}.",
                        spec, first
                    )))
                }
            }
            Atom::VStack => {
                if args.iter().any(|a| a.shape().cols() != first.cols()) {
                    return Err(CvxError::ShapeError(
                        "All arguments to vstack must have the same number of columns.".into(),
                    ));
                }
                let rows = args.iter().map(|a| a.shape().rows()).sum();
                Ok(Shape::new(rows, first.cols()))
            }
            Atom::HStack => {
                if args.iter().any(|a| a.shape().rows() != first.rows()) {
                    return Err(CvxError::ShapeError(
                        "All arguments to hstack must have the same number of rows.".into(),
                    ));
                }
                let cols = args.iter().map(|a| a.shape().cols()).sum();
                Ok(Shape::new(first.rows(), cols))
            }
            Atom::Trace => {
                if first.is_square() {
                    Ok(Shape::scalar())
                } else {
                    Err(CvxError::ShapeError(format!(
                        "Argument to trace must be a square matrix, got {}.",
                        first
                    )))
                }
            }
            Atom::Diag => {
                if first.is_column() {
                    Ok(Shape::new(first.rows(), first.rows()))
                } else if first.is_square() {
                    Ok(Shape::vector(first.rows()))
                } else {
                    Err(CvxError::ShapeError(format!(
                        "Argument to diag must be a vector or a square matrix, got {}.",
                        first
                    )))
                }
            }
            Atom::QuadOverLin => {
                if args[1].shape().is_scalar() {
                    Ok(Shape::scalar())
                } else {
                    Err(CvxError::ShapeError(
                        "The second argument to quad_over_lin must be a scalar.".into(),
                    ))
                }
            }
            Atom::QuadForm => {
                let p = args[1].shape();
                if first.is_column() && p.is_square() && p.rows() == first.rows() {
                    Ok(Shape::scalar())
                } else {
                    Err(CvxError::ShapeError(format!(
                        "Invalid dimensions {} and {} for quad_form.",
                        first, p
                    )))
                }
            }
        }
    }

    fn incompatible(&self, a: Shape, b: Shape) -> CvxError {
        CvxError::ShapeError(format!(
            "Incompatible dimensions {} and {} for {}.",
            a,
            b,
            self.name()
        ))
    }

    /// Sign of an application, from the signs of the arguments.
    pub(crate) fn infer_sign(&self, args: &[Expr]) -> Sign {
        let signs: Vec<Sign> = args.iter().map(Expr::sign).collect();
        let first = signs[0];
        match self {
            Atom::Add => add_sign(first, signs[1]),
            Atom::Neg => first.negate(),
            Atom::Mul | Atom::MatMul => mul_sign(first, signs[1]),
            Atom::Sum
            | Atom::Reshape(_)
            | Atom::Transpose
            | Atom::Index(_)
            | Atom::Trace
            | Atom::Diag => first,
            Atom::VStack | Atom::HStack => union_sign(&signs),
            Atom::Abs
            | Atom::Square
            | Atom::Sqrt
            | Atom::Norm1
            | Atom::Norm2
            | Atom::NormInf
            | Atom::NormFro
            | Atom::SumSquares
            | Atom::QuadOverLin => nonneg_unless_zero(first),
            Atom::Pos => {
                if first.is_nonpos() {
                    Sign::Zero
                } else {
                    Sign::Positive
                }
            }
            Atom::NegPart => {
                if first.is_nonneg() {
                    Sign::Zero
                } else {
                    Sign::Positive
                }
            }
            Atom::Power(p) => {
                let p = *p;
                if p == 1.0 {
                    first
                } else if p < 0.0 {
                    // defined for x > 0 only
                    Sign::Positive
                } else {
                    // curvature of x^p is only certified on x >= 0
                    nonneg_unless_zero(first)
                }
            }
            Atom::Exp => Sign::Positive,
            Atom::Log | Atom::Entropy => Sign::Unknown,
            Atom::QuadForm => {
                if first.is_zero() {
                    return Sign::Zero;
                }
                match args[1].constant_value().map(PsdStatus::of_array) {
                    Some(PsdStatus::Psd) => Sign::Positive,
                    Some(PsdStatus::Nsd) => Sign::Negative,
                    _ => Sign::Unknown,
                }
            }
            Atom::Maximum => max_sign(&signs),
            Atom::Minimum => min_sign(&signs),
        }
    }

    /// Curvature of the atom as a function of its arguments' values.
    pub(crate) fn base_curvature(&self, args: &[Expr]) -> Curvature {
        match self {
            Atom::Add
            | Atom::Neg
            | Atom::Sum
            | Atom::Reshape(_)
            | Atom::Transpose
            | Atom::Index(_)
            | Atom::VStack
            | Atom::HStack
            | Atom::Trace
            | Atom::Diag => Curvature::Affine,
            Atom::Mul | Atom::MatMul => {
                if args.iter().any(|a| a.curvature().is_constant()) {
                    Curvature::Affine
                } else {
                    // product of two non-constants
                    Curvature::Unknown
                }
            }
            Atom::Abs
            | Atom::Pos
            | Atom::NegPart
            | Atom::Square
            | Atom::Exp
            | Atom::Norm1
            | Atom::Norm2
            | Atom::NormInf
            | Atom::NormFro
            | Atom::SumSquares
            | Atom::QuadOverLin
            | Atom::Maximum => Curvature::Convex,
            Atom::Sqrt | Atom::Log | Atom::Entropy | Atom::Minimum => Curvature::Concave,
            Atom::Power(p) => {
                if *p == 1.0 {
                    Curvature::Affine
                } else if *p > 0.0 && *p < 1.0 {
                    Curvature::Concave
                } else {
                    Curvature::Convex
                }
            }
            Atom::QuadForm => match args[1].constant_value().map(PsdStatus::of_array) {
                Some(PsdStatus::Psd) => Curvature::Convex,
                Some(PsdStatus::Nsd) => Curvature::Concave,
                _ => Curvature::Unknown,
            },
        }
    }

    /// Monotonicity of the atom in argument `index`.
    pub(crate) fn monotonicity(&self, index: usize, args: &[Expr]) -> Monotonicity {
        match self {
            Atom::Add
            | Atom::Sum
            | Atom::Reshape(_)
            | Atom::Transpose
            | Atom::Index(_)
            | Atom::Trace
            | Atom::Diag
            | Atom::Pos
            | Atom::Sqrt
            | Atom::Exp
            | Atom::Log
            | Atom::Maximum
            | Atom::Minimum => Monotonicity::Increasing,
            Atom::Neg | Atom::NegPart => Monotonicity::Decreasing,
            Atom::Mul | Atom::MatMul => {
                let other = &args[1 - index];
                if other.curvature().is_constant() {
                    Monotonicity::scaled_by(other.sign())
                } else {
                    Monotonicity::Nonmonotonic
                }
            }
            // stacking is only certified for affine parts
            Atom::VStack | Atom::HStack => Monotonicity::Nonmonotonic,
            Atom::Entropy | Atom::QuadForm => Monotonicity::Nonmonotonic,
            Atom::Abs
            | Atom::Square
            | Atom::Norm1
            | Atom::Norm2
            | Atom::NormInf
            | Atom::NormFro
            | Atom::SumSquares => Monotonicity::Signed,
            Atom::Power(p) => {
                let p = *p;
                if p < 0.0 {
                    Monotonicity::Decreasing
                } else if p > 1.0 && p % 2.0 == 0.0 {
                    Monotonicity::Signed
                } else {
                    Monotonicity::Increasing
                }
            }
            Atom::QuadOverLin => {
                if index == 0 {
                    Monotonicity::Signed
                } else {
                    Monotonicity::Decreasing
                }
            }
        }
    }

    /// Curvature of an application, via the composition rule.
    pub(crate) fn infer_curvature(&self, args: &[Expr]) -> Curvature {
        let base = self.base_curvature(args);
        compose(
            base,
            args.iter()
                .enumerate()
                .map(|(i, arg)| (self.monotonicity(i, args), arg.curvature(), arg.sign())),
        )
    }

    pub(crate) fn precedence(&self) -> u8 {
        match self {
            Atom::Add => PREC_ADD,
            Atom::Mul | Atom::MatMul => PREC_MUL,
            Atom::Neg => PREC_NEG,
            Atom::Transpose | Atom::Index(_) => PREC_POSTFIX,
            _ => PREC_CALL,
        }
    }

    /// Write the display name of this atom applied to `args`.
    pub(crate) fn fmt_application(&self, args: &[Expr], f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Add => {
                write_operand(f, &args[0], PREC_ADD)?;
                f.write_str(" + ")?;
                write_operand(f, &args[1], PREC_ADD)
            }
            Atom::Mul | Atom::MatMul => {
                let op = if matches!(self, Atom::Mul) { " * " } else { " @ " };
                write_operand(f, &args[0], PREC_MUL)?;
                f.write_str(op)?;
                // keep right-nested products explicit
                write_operand(f, &args[1], PREC_MUL + 1)
            }
            Atom::Neg => {
                let inner = args[0].to_string();
                // avoid "--"
                if args[0].precedence() < PREC_NEG || inner.starts_with('-') {
                    write!(f, "-({})", inner)
                } else {
                    write!(f, "-{}", inner)
                }
            }
            Atom::Transpose => {
                write_operand(f, &args[0], PREC_CALL)?;
                f.write_str(".T")
            }
            Atom::Index(spec) => {
                write_operand(f, &args[0], PREC_CALL)?;
                write!(f, "{}", spec)
            }
            Atom::Reshape(shape) => write!(f, "reshape({}, {})", args[0], shape),
            Atom::Power(p) => write!(f, "power({}, {})", args[0], p),
            _ => {
                write!(f, "{}(", self.name())?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, arg: &Expr, min_prec: u8) -> fmt::Result {
    if arg.precedence() < min_prec {
        write!(f, "({})", arg)
    } else {
        write!(f, "{}", arg)
    }
}

fn nonneg_unless_zero(arg: Sign) -> Sign {
    if arg.is_zero() {
        Sign::Zero
    } else {
        Sign::Positive
    }
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 {
        one
    } else {
        many
    }
}
