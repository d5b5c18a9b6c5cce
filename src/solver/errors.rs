use thiserror::Error;

use crate::utils::UtilsError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] UtilsError),
    #[error("Digit string has {len} digits, at most {max} are supported")]
    TooManyDigits { len: usize, max: usize },
}
