//! four-fours - A library for finding arithmetic expressions over a digit string
//!
//! Given digits such as `"4444"`, the solver looks for the cheapest expression
//! that uses every digit once, in order, for each integer target from 0 to
//! 1000. Searches can run on the caller's thread or on a dedicated worker
//! thread, and [`SearchSession`] models the page that displays the results.

pub mod expression;
pub mod session;
pub mod solver;
pub mod utils;
pub mod worker;

// Re-export the main public API
pub use expression::{BinaryOp, Expression, ExpressionError, UnaryOp};
pub use session::{SearchBackend, SearchError, SearchSession};
pub use solver::{Equation, ExpressionSolver, SearchResult, SolverConfig, SolverError};
pub use utils::{UtilsError, validate_digit_string};
pub use worker::{PendingSearch, SearchWorker, WorkerError};

/// Find the cheapest expression for every target from 0 to 1000
///
/// This is a convenience function that searches with the default solver
/// configuration.
///
/// # Errors
///
/// This function will return an error if:
/// * The input digit string is empty
/// * The input digit string contains non-digit characters
/// * The input digit string is longer than the default limit
///
/// # Examples
///
/// ```
/// use four_fours::search;
///
/// let result = search("44").unwrap();
/// assert!(result.contains(16));
/// for line in result.lines() {
///     println!("{}", line);
/// }
/// ```
pub fn search(digits: &str) -> Result<SearchResult, SolverError> {
    ExpressionSolver::new().search(digits)
}

/// Find the cheapest expression over `digits` that evaluates to `target`
///
/// # Errors
///
/// Fails on the same inputs as [`search`].
///
/// # Examples
///
/// ```
/// use four_fours::find_expression;
///
/// match find_expression("44", 16.0) {
///     Ok(Some(equation)) => println!("Found: {}", equation.expression),
///     Ok(None) => println!("No solution found"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
pub fn find_expression(digits: &str, target: f64) -> Result<Option<Equation>, SolverError> {
    ExpressionSolver::new().find_expression(digits, target)
}
