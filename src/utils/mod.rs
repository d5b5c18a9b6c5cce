//! Digit string helpers shared by the solver and the front ends

mod digits;
mod errors;
mod validation;

pub use digits::{literal_value, split_points};
pub use errors::UtilsError;
pub use validation::validate_digit_string;

#[cfg(test)]
mod tests;
