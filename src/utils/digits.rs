use log::debug;

/// Read a run of digits as a single literal.
///
/// Returns `None` for an empty run, for anything that is not made of ASCII
/// digits, and for multi-digit runs with a leading zero (`"04"` is not a
/// literal, `"0"` is).
pub fn literal_value(run: &str) -> Option<f64> {
    if run.is_empty() || !run.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    if run.len() > 1 && run.starts_with('0') {
        debug!("Rejecting literal with leading zero: '{}'", run);
        return None;
    }

    run.parse::<f64>().ok()
}

/// Every way of cutting `digits` into a non-empty prefix and suffix.
pub fn split_points(digits: &str) -> impl Iterator<Item = (&str, &str)> + '_ {
    (1..digits.len()).filter_map(move |mid| {
        let left = digits.get(..mid)?;
        let right = digits.get(mid..)?;
        Some((left, right))
    })
}
