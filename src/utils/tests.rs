use crate::utils::{UtilsError, literal_value, split_points, validate_digit_string};

#[test]
fn test_literal_value_whole_run() {
    assert_eq!(literal_value("4"), Some(4.0));
    assert_eq!(literal_value("44"), Some(44.0));
    assert_eq!(literal_value("0"), Some(0.0));
    assert_eq!(literal_value("1000"), Some(1000.0));
}

#[test]
fn test_literal_value_rejects_leading_zero() {
    assert_eq!(literal_value("04"), None);
    assert_eq!(literal_value("00"), None);
}

#[test]
fn test_literal_value_rejects_garbage() {
    assert_eq!(literal_value(""), None);
    assert_eq!(literal_value("4a"), None);
    assert_eq!(literal_value("-4"), None);
    assert_eq!(literal_value("4.5"), None);
}

#[test]
fn test_split_points_cover_every_cut() {
    let splits: Vec<_> = split_points("1234").collect();
    assert_eq!(splits, vec![("1", "234"), ("12", "34"), ("123", "4")]);
}

#[test]
fn test_split_points_single_digit_has_none() {
    assert_eq!(split_points("7").count(), 0);
    assert_eq!(split_points("").count(), 0);
}

#[test]
fn test_validate_digit_string_valid() {
    assert!(validate_digit_string("4444").is_ok());
    assert!(validate_digit_string("0").is_ok());
    assert!(validate_digit_string("1234567890").is_ok());
}

#[test]
fn test_validate_digit_string_invalid() {
    assert_eq!(validate_digit_string(""), Err(UtilsError::EmptyDigitString));
    assert_eq!(
        validate_digit_string("12a4"),
        Err(UtilsError::InvalidDigitString("12a4".to_string()))
    );
    assert!(validate_digit_string("12.45").is_err());
    assert!(validate_digit_string(" 44").is_err());
    assert!(validate_digit_string("４４").is_err());
}
