use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Complex result from negative base with fractional exponent")]
    ComplexResult,
    #[error("Square root of negative number")]
    NegativeSqrt,
    #[error("Factorial is only defined here for integers 0 to 8, got {0}")]
    InvalidFactorial(f64),
    #[error("Result is not a finite number")]
    NonFinite,
}
