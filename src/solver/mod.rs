mod config;
mod core;
mod equation;
mod errors;
mod knowledge;
mod result;

pub use config::SolverConfig;
pub use core::ExpressionSolver;
pub use equation::Equation;
pub use errors::SolverError;
pub use result::SearchResult;
