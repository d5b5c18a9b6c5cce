use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

use log::{debug, error, info, warn};

use crate::solver::{ExpressionSolver, SearchResult, SolverConfig, SolverError};
use crate::worker::errors::WorkerError;
use crate::worker::pending::{PendingSearch, Reply};

struct Request {
    id: u64,
    digits: String,
    reply: Sender<Reply>,
}

/// Owns one background thread that runs searches in submission order
pub struct SearchWorker {
    requests: Option<Sender<Request>>,
    handle: Option<JoinHandle<()>>,
    next_id: AtomicU64,
}

impl SearchWorker {
    /// # Errors
    ///
    /// Fails if the operating system refuses to create the thread.
    pub fn spawn(config: SolverConfig) -> Result<Self, WorkerError> {
        let solver = ExpressionSolver::with_config(config);
        Self::spawn_with(move |digits| solver.search(digits))
    }

    /// Start a worker around any search function.
    ///
    /// # Errors
    ///
    /// Fails if the operating system refuses to create the thread.
    pub fn spawn_with<F>(search: F) -> Result<Self, WorkerError>
    where
        F: Fn(&str) -> Result<SearchResult, SolverError> + Send + 'static,
    {
        let (requests, inbox) = mpsc::channel::<Request>();

        let handle = thread::Builder::new()
            .name("four-fours-search".to_string())
            .spawn(move || {
                info!("Search worker started");
                for request in inbox {
                    debug!("Worker picked up request #{} for '{}'", request.id, request.digits);
                    let reply = run_guarded(&search, &request.digits);
                    if request.reply.send(reply).is_err() {
                        debug!("Request #{} was abandoned before it finished", request.id);
                    }
                }
                info!("Search worker stopped");
            })?;

        Ok(Self {
            requests: Some(requests),
            handle: Some(handle),
            next_id: AtomicU64::new(0),
        })
    }

    /// Queue a search and return immediately.
    pub fn submit(&self, digits: impl Into<String>) -> PendingSearch {
        let (reply, receiver) = mpsc::channel();
        let request = Request {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            digits: digits.into(),
            reply,
        };

        match &self.requests {
            Some(requests) => {
                if let Err(mpsc::SendError(request)) = requests.send(request) {
                    warn!("Search worker is gone, dropping request #{}", request.id);
                    return PendingSearch::ready(Err(WorkerError::Disconnected.into()));
                }
                PendingSearch::waiting(receiver)
            }
            None => PendingSearch::ready(Err(WorkerError::Disconnected.into())),
        }
    }
}

impl Drop for SearchWorker {
    fn drop(&mut self) {
        // Closing the channel ends the worker loop once queued requests are done
        self.requests.take();
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            error!("Search worker thread panicked");
        }
    }
}

fn run_guarded<F>(search: &F, digits: &str) -> Reply
where
    F: Fn(&str) -> Result<SearchResult, SolverError>,
{
    match panic::catch_unwind(AssertUnwindSafe(|| search(digits))) {
        Ok(result) => result.map_err(Into::into),
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            error!("Search for '{}' panicked: {}", digits, message);
            Err(WorkerError::Panicked(message).into())
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests_inner_helpers {
    use super::panic_message;

    #[test]
    fn test_panic_message_variants() {
        let static_str: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(panic_message(static_str.as_ref()), "boom");

        let owned: Box<dyn std::any::Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(owned.as_ref()), "bang");

        let other: Box<dyn std::any::Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(other.as_ref()), "unknown panic");
    }
}
