//! Dedicated search thread reached through message passing

mod core;
mod errors;
mod pending;

pub use core::SearchWorker;
pub use errors::WorkerError;
pub use pending::PendingSearch;
