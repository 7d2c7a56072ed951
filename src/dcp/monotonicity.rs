//! Per-argument monotonicity of atoms.

use super::sign::Sign;

/// How an atom responds to an increase in one of its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Monotonicity {
    /// Non-decreasing in the argument.
    Increasing,
    /// Non-increasing in the argument.
    Decreasing,
    /// Increasing where the argument is nonnegative, decreasing where it is
    /// nonpositive (e.g. `abs`, `square`, norms).
    Signed,
    /// No monotonicity; the argument must be affine.
    Nonmonotonic,
}

impl Monotonicity {
    /// Monotonicity of a product in one factor, given the sign of the other
    /// (constant) factor.
    pub fn scaled_by(sign: Sign) -> Self {
        if sign.is_nonneg() {
            Monotonicity::Increasing
        } else if sign.is_nonpos() {
            Monotonicity::Decreasing
        } else {
            Monotonicity::Nonmonotonic
        }
    }

    /// Resolve `Signed` against the sign of the argument it is applied to.
    pub fn resolve(self, arg_sign: Sign) -> Self {
        match self {
            Monotonicity::Signed if arg_sign.is_nonneg() => Monotonicity::Increasing,
            Monotonicity::Signed if arg_sign.is_nonpos() => Monotonicity::Decreasing,
            Monotonicity::Signed => Monotonicity::Nonmonotonic,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_by() {
        assert_eq!(Monotonicity::scaled_by(Sign::Positive), Monotonicity::Increasing);
        assert_eq!(Monotonicity::scaled_by(Sign::Zero), Monotonicity::Increasing);
        assert_eq!(Monotonicity::scaled_by(Sign::Negative), Monotonicity::Decreasing);
        assert_eq!(Monotonicity::scaled_by(Sign::Unknown), Monotonicity::Nonmonotonic);
    }

    #[test]
    fn test_resolve_signed() {
        let m = Monotonicity::Signed;
        assert_eq!(m.resolve(Sign::Positive), Monotonicity::Increasing);
        assert_eq!(m.resolve(Sign::Negative), Monotonicity::Decreasing);
        assert_eq!(m.resolve(Sign::Unknown), Monotonicity::Nonmonotonic);
        assert_eq!(
            Monotonicity::Decreasing.resolve(Sign::Positive),
            Monotonicity::Decreasing
        );
    }
}
