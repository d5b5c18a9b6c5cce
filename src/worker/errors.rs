use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("Failed to start search worker: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("Search worker is no longer running")]
    Disconnected,
    #[error("Search panicked on the worker: {0}")]
    Panicked(String),
}
