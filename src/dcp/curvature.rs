//! Curvature tracking for DCP (Disciplined Convex Programming).
//!
//! This module implements the curvature lattice and the composition rule
//! every atom goes through: an atom only declares its own base curvature and
//! its monotonicity in each argument, and [`compose`] derives the curvature of
//! the application.

use super::monotonicity::Monotonicity;
use super::sign::Sign;
use crate::expr::{Array, Expr};

/// Curvature of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Curvature {
    /// Constant value (most restrictive).
    Constant,
    /// Affine function (both convex and concave).
    Affine,
    /// Convex function.
    Convex,
    /// Concave function.
    Concave,
    /// Unknown curvature (not DCP-compliant).
    Unknown,
}

impl Curvature {
    /// Check if the curvature is convex (constant, affine, or convex).
    pub fn is_convex(self) -> bool {
        matches!(self, Curvature::Constant | Curvature::Affine | Curvature::Convex)
    }

    /// Check if the curvature is concave (constant, affine, or concave).
    pub fn is_concave(self) -> bool {
        matches!(self, Curvature::Constant | Curvature::Affine | Curvature::Concave)
    }

    /// Check if the curvature is affine (constant or affine).
    pub fn is_affine(self) -> bool {
        matches!(self, Curvature::Constant | Curvature::Affine)
    }

    /// Check if this is a constant.
    pub fn is_constant(self) -> bool {
        matches!(self, Curvature::Constant)
    }

    /// Check if the curvature is certified (anything but unknown).
    pub fn is_dcp(self) -> bool {
        !matches!(self, Curvature::Unknown)
    }

    /// Negate the curvature (convex <-> concave).
    pub fn negate(self) -> Self {
        match self {
            Curvature::Convex => Curvature::Concave,
            Curvature::Concave => Curvature::Convex,
            other => other,
        }
    }

    /// Partial order of the lattice: `Constant ⊑ Affine ⊑ Convex/Concave ⊑ Unknown`.
    pub fn is_subset_of(self, other: Curvature) -> bool {
        use Curvature::*;
        match (self, other) {
            (a, b) if a == b => true,
            (_, Unknown) => true,
            (Constant, _) => true,
            (Affine, Convex) | (Affine, Concave) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for Curvature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Curvature::Constant => "CONSTANT",
            Curvature::Affine => "AFFINE",
            Curvature::Convex => "CONVEX",
            Curvature::Concave => "CONCAVE",
            Curvature::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

/// Combine curvatures for addition: a + b.
pub fn add_curvature(a: Curvature, b: Curvature) -> Curvature {
    use Curvature::*;
    match (a, b) {
        // Constants don't affect curvature
        (Constant, x) | (x, Constant) => x,
        // Affine doesn't affect non-constant curvature
        (Affine, x) | (x, Affine) => x,
        (Convex, Convex) => Convex,
        (Concave, Concave) => Concave,
        // Convex + Concave, or anything touching Unknown
        _ => Unknown,
    }
}

/// Curvature contributed by a single argument to an atom with curvature `base`.
pub fn arg_curvature(
    base: Curvature,
    monotonicity: Monotonicity,
    arg_curvature: Curvature,
    arg_sign: Sign,
) -> Curvature {
    if arg_curvature.is_constant() {
        return Curvature::Constant;
    }
    match monotonicity.resolve(arg_sign) {
        Monotonicity::Increasing => add_curvature(base, arg_curvature),
        Monotonicity::Decreasing => add_curvature(base, arg_curvature.negate()),
        Monotonicity::Signed | Monotonicity::Nonmonotonic => {
            if arg_curvature.is_affine() {
                base
            } else {
                Curvature::Unknown
            }
        }
    }
}

/// Generalized DCP composition rule.
///
/// `args` holds, per argument, the atom's monotonicity in that argument and
/// the argument's curvature and sign. The result is the curvature-sum of each
/// argument's contribution, so an atom applied to constants only is constant.
pub fn compose(
    base: Curvature,
    args: impl IntoIterator<Item = (Monotonicity, Curvature, Sign)>,
) -> Curvature {
    args.into_iter()
        .map(|(mono, curv, sign)| arg_curvature(base, mono, curv, sign))
        .fold(Curvature::Constant, add_curvature)
}

/// Determine if a matrix is PSD, NSD, or neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PsdStatus {
    Psd,     // Positive semi-definite
    Nsd,     // Negative semi-definite
    Neither, // Indefinite or non-symmetric
}

impl PsdStatus {
    /// Determine PSD status of an array.
    pub fn of_array(arr: &Array) -> Self {
        match arr.is_psd() {
            Some(true) => PsdStatus::Psd,
            Some(false) => match arr {
                Array::Scalar(v) if *v <= 0.0 => PsdStatus::Nsd,
                Array::Dense(m) => {
                    // -M PSD means M is NSD
                    let neg = -m.clone();
                    if neg.cholesky().is_some() {
                        PsdStatus::Nsd
                    } else {
                        PsdStatus::Neither
                    }
                }
                _ => PsdStatus::Neither,
            },
            None => PsdStatus::Neither,
        }
    }
}

impl Expr {
    /// Check if this expression is convex.
    pub fn is_convex(&self) -> bool {
        self.curvature().is_convex()
    }

    /// Check if this expression is concave.
    pub fn is_concave(&self) -> bool {
        self.curvature().is_concave()
    }

    /// Check if this expression is affine.
    pub fn is_affine(&self) -> bool {
        self.curvature().is_affine()
    }

    /// Check if this expression satisfies the DCP rules.
    pub fn is_dcp(&self) -> bool {
        self.curvature().is_dcp()
    }
}
