//! Sign tracking for DCP (Disciplined Convex Programming).
//!
//! Signs describe the range of an expression's entries. `Positive` means every
//! entry is provably `>= 0`, `Negative` means provably `<= 0`, and `Zero` is
//! both. Sign information drives the composition rules for atoms whose
//! monotonicity depends on the sign of their argument.

use crate::expr::{Array, Expr};

/// Sign of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    /// Expression is always >= 0.
    Positive,
    /// Expression is always <= 0.
    Negative,
    /// Expression is always == 0.
    Zero,
    /// Sign is unknown.
    Unknown,
}

impl Sign {
    /// Build a sign from what is provable about the value.
    pub fn from_bounds(nonneg: bool, nonpos: bool) -> Self {
        match (nonneg, nonpos) {
            (true, true) => Sign::Zero,
            (true, false) => Sign::Positive,
            (false, true) => Sign::Negative,
            (false, false) => Sign::Unknown,
        }
    }

    /// Sign of a numeric literal.
    pub fn of_scalar(v: f64) -> Self {
        if v == 0.0 {
            Sign::Zero
        } else if v > 0.0 {
            Sign::Positive
        } else if v < 0.0 {
            Sign::Negative
        } else {
            // NaN
            Sign::Unknown
        }
    }

    /// Sign of a constant value.
    ///
    /// Positive if every entry is > 0, Negative if every entry is < 0, Zero
    /// if every entry is 0, Unknown otherwise. Implicit zeros of sparse
    /// storage count as entries.
    pub fn of_array(arr: &Array) -> Self {
        if arr.all(|v| v == 0.0) {
            Sign::Zero
        } else if arr.all(|v| v > 0.0) {
            Sign::Positive
        } else if arr.all(|v| v < 0.0) {
            Sign::Negative
        } else {
            Sign::Unknown
        }
    }

    /// Check if the sign is non-negative (>= 0).
    pub fn is_nonneg(self) -> bool {
        matches!(self, Sign::Positive | Sign::Zero)
    }

    /// Check if the sign is non-positive (<= 0).
    pub fn is_nonpos(self) -> bool {
        matches!(self, Sign::Negative | Sign::Zero)
    }

    /// Check if the sign is zero.
    pub fn is_zero(self) -> bool {
        matches!(self, Sign::Zero)
    }

    /// Check if the sign is unknown.
    pub fn is_unknown(self) -> bool {
        matches!(self, Sign::Unknown)
    }

    /// Negate the sign.
    pub fn negate(self) -> Self {
        match self {
            Sign::Positive => Sign::Negative,
            Sign::Negative => Sign::Positive,
            Sign::Zero => Sign::Zero,
            Sign::Unknown => Sign::Unknown,
        }
    }
}

impl std::fmt::Display for Sign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Sign::Positive => "POSITIVE",
            Sign::Negative => "NEGATIVE",
            Sign::Zero => "ZERO",
            Sign::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

/// Combine signs for addition: a + b.
pub fn add_sign(a: Sign, b: Sign) -> Sign {
    use Sign::*;
    match (a, b) {
        // Zero doesn't change sign
        (Zero, x) | (x, Zero) => x,
        (Positive, Positive) => Positive,
        (Negative, Negative) => Negative,
        // Opposite signs or unknown
        _ => Unknown,
    }
}

/// Combine signs for multiplication: a * b.
pub fn mul_sign(a: Sign, b: Sign) -> Sign {
    use Sign::*;
    match (a, b) {
        // Zero times anything is zero
        (Zero, _) | (_, Zero) => Zero,
        (Positive, Positive) | (Negative, Negative) => Positive,
        (Positive, Negative) | (Negative, Positive) => Negative,
        (Unknown, _) | (_, Unknown) => Unknown,
    }
}

/// Sign of the elementwise maximum of the given signs.
///
/// The maximum is nonnegative as soon as one input is, and nonpositive only
/// when every input is. An empty slice has no provable sign.
pub fn max_sign(signs: &[Sign]) -> Sign {
    if signs.is_empty() {
        return Sign::Unknown;
    }
    Sign::from_bounds(
        signs.iter().any(|s| s.is_nonneg()),
        signs.iter().all(|s| s.is_nonpos()),
    )
}

/// Sign of the elementwise minimum of the given signs. Dual of [`max_sign`].
pub fn min_sign(signs: &[Sign]) -> Sign {
    if signs.is_empty() {
        return Sign::Unknown;
    }
    Sign::from_bounds(
        signs.iter().all(|s| s.is_nonneg()),
        signs.iter().any(|s| s.is_nonpos()),
    )
}

/// Sign of a concatenation: every entry comes from one of the parts.
pub(crate) fn union_sign(signs: &[Sign]) -> Sign {
    if signs.is_empty() {
        return Sign::Unknown;
    }
    Sign::from_bounds(
        signs.iter().all(|s| s.is_nonneg()),
        signs.iter().all(|s| s.is_nonpos()),
    )
}

impl Expr {
    /// Check if this expression is non-negative.
    pub fn is_nonneg(&self) -> bool {
        self.sign().is_nonneg()
    }

    /// Check if this expression is non-positive.
    pub fn is_nonpos(&self) -> bool {
        self.sign().is_nonpos()
    }

    /// Check if this expression is provably zero.
    pub fn is_zero(&self) -> bool {
        self.sign().is_zero()
    }
}
