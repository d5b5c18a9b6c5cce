//! Headless model of the search page: input, loading flag and result list

mod backend;
mod core;
mod errors;

pub use backend::SearchBackend;
pub use core::SearchSession;
pub use errors::SearchError;

#[cfg(test)]
mod tests;
