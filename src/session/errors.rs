use thiserror::Error;

use crate::solver::SolverError;
use crate::worker::WorkerError;

/// Why a dispatched search produced no result
#[derive(Error, Debug)]
pub enum SearchError {
    #[error(transparent)]
    Solver(#[from] SolverError),
    #[error(transparent)]
    Worker(#[from] WorkerError),
}
