use log::{debug, warn};

use crate::utils::errors::UtilsError;

/// # Errors
///
/// Returns an error if the string is empty or contains any non-ASCII-digit characters.
pub fn validate_digit_string(digit_string: &str) -> Result<(), UtilsError> {
    if digit_string.is_empty() {
        warn!("Refusing to search an empty digit string");
        return Err(UtilsError::EmptyDigitString);
    }

    if let Some(bad) = digit_string.chars().find(|c| !c.is_ascii_digit()) {
        warn!("Digit string '{}' contains '{}'", digit_string, bad);
        return Err(UtilsError::InvalidDigitString(digit_string.to_string()));
    }

    debug!("Accepted {} digits", digit_string.len());
    Ok(())
}
