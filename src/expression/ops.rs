use crate::expression::errors::ExpressionError;

/// `n!` for every `n` the factorial operator accepts
const FACTORIALS: [f64; 9] = [1., 1., 2., 6., 24., 120., 720., 5040., 40320.];

#[inline]
fn is_zero(value: f64) -> bool {
    value.abs() < f64::EPSILON
}

#[inline]
fn is_integer(value: f64) -> bool {
    if value.abs() > 2_f64.powi(52) {
        true
    } else {
        (value - value.round()).abs() < f64::EPSILON
    }
}

#[inline]
fn finite(value: f64) -> Result<f64, ExpressionError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ExpressionError::NonFinite)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UnaryOp {
    Neg,
    Sqrt,
    Factorial,
}

impl UnaryOp {
    pub const ALL: [UnaryOp; 3] = [UnaryOp::Neg, UnaryOp::Sqrt, UnaryOp::Factorial];

    pub fn cost(self) -> u32 {
        match self {
            UnaryOp::Neg => 2,
            UnaryOp::Sqrt => 4,
            UnaryOp::Factorial => 6,
        }
    }

    /// Whether applying the operator to `value` gives `value` back:
    /// `√0`, `√1`, `1!`, `2!` and `-0`.
    pub fn is_identity(self, value: f64) -> bool {
        self.apply(value).is_ok_and(|result| result == value)
    }

    /// # Errors
    ///
    /// Fails for the square root of a negative number and for factorials
    /// outside `0..=8` or of non-integers.
    pub fn apply(self, value: f64) -> Result<f64, ExpressionError> {
        match self {
            UnaryOp::Neg => finite(-value),
            UnaryOp::Sqrt => {
                if value < 0.0 {
                    Err(ExpressionError::NegativeSqrt)
                } else {
                    finite(value.sqrt())
                }
            }
            UnaryOp::Factorial => {
                if value < 0.0 || !is_integer(value) {
                    return Err(ExpressionError::InvalidFactorial(value));
                }
                FACTORIALS
                    .get(value.round() as usize)
                    .copied()
                    .ok_or(ExpressionError::InvalidFactorial(value))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 5] = [
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Pow,
    ];

    pub fn cost(self) -> u32 {
        match self {
            BinaryOp::Add => 1,
            BinaryOp::Sub => 2,
            BinaryOp::Mul => 3,
            BinaryOp::Div => 4,
            BinaryOp::Pow => 6,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "^",
        }
    }

    /// # Errors
    ///
    /// Fails on division by zero, on a negative base with a fractional
    /// exponent and on results that overflow to infinity.
    pub fn apply(self, left: f64, right: f64) -> Result<f64, ExpressionError> {
        match self {
            BinaryOp::Add => finite(left + right),
            BinaryOp::Sub => finite(left - right),
            BinaryOp::Mul => finite(left * right),
            BinaryOp::Div => {
                if is_zero(right) {
                    Err(ExpressionError::DivisionByZero)
                } else {
                    finite(left / right)
                }
            }
            BinaryOp::Pow => {
                if left < 0.0 && !is_integer(right) {
                    Err(ExpressionError::ComplexResult)
                } else {
                    finite(left.powf(right))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests_inner_helpers {
    use super::{is_integer, is_zero};

    #[test]
    fn test_is_zero() {
        assert!(is_zero(0.0));
        assert!(is_zero(-0.0));
        assert!(is_zero(f64::EPSILON / 2.0));
        assert!(!is_zero(f64::EPSILON * 2.0));
    }

    #[test]
    fn test_identity_applications() {
        use super::UnaryOp;

        assert!(UnaryOp::Sqrt.is_identity(0.0));
        assert!(UnaryOp::Sqrt.is_identity(1.0));
        assert!(!UnaryOp::Sqrt.is_identity(4.0));
        assert!(UnaryOp::Factorial.is_identity(1.0));
        assert!(UnaryOp::Factorial.is_identity(2.0));
        assert!(!UnaryOp::Factorial.is_identity(0.0));
        assert!(UnaryOp::Neg.is_identity(-0.0));
        assert!(!UnaryOp::Neg.is_identity(4.0));
    }

    #[test]
    fn test_is_integer() {
        assert!(is_integer(4.0));
        assert!(is_integer(-17.0));
        assert!(!is_integer(0.5));
        assert!(is_integer(2_f64.powi(53)));
    }
}
