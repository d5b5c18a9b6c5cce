use log::{debug, error};

use crate::session::backend::SearchBackend;
use crate::session::errors::SearchError;
use crate::solver::SearchResult;
use crate::worker::PendingSearch;

/// Input, loading state and displayed results for one search box.
///
/// Failures are logged and shown as an empty list; they never reach the caller.
pub struct SearchSession<B> {
    backend: B,
    input: String,
    pending: Option<PendingSearch>,
    result: Option<SearchResult>,
}

impl<B: SearchBackend> SearchSession<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            input: String::new(),
            pending: None,
            result: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replace the input. Clears the displayed results, drops any search
    /// still in flight and, unless the input is empty, starts a new one.
    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
        self.result = None;
        if self.pending.take().is_some() {
            debug!("Superseding the running search");
        }

        if self.input.is_empty() {
            debug!("Input cleared, nothing to search");
            return;
        }

        self.pending = Some(self.backend.dispatch(&self.input));
        self.poll();
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Settle the running search if its reply has arrived. Returns whether
    /// the session is idle afterwards.
    pub fn poll(&mut self) -> bool {
        let reply = match self.pending.as_mut() {
            Some(pending) => pending.try_take(),
            None => return true,
        };

        match reply {
            Some(reply) => {
                self.pending = None;
                self.settle(reply);
                true
            }
            None => false,
        }
    }

    /// Block until the running search, if any, has settled.
    pub fn wait(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.settle(pending.wait());
        }
    }

    pub fn result(&self) -> Option<&SearchResult> {
        self.result.as_ref()
    }

    /// The rendered result list, empty while loading or after a failure
    pub fn lines(&self) -> Vec<String> {
        self.result
            .as_ref()
            .map(SearchResult::lines)
            .unwrap_or_default()
    }

    fn settle(&mut self, reply: Result<SearchResult, SearchError>) {
        match reply {
            Ok(result) => {
                debug!("Showing {} results for '{}'", result.len(), self.input);
                self.result = Some(result);
            }
            Err(e) => {
                error!("Search for '{}' failed: {}", self.input, e);
                self.result = None;
            }
        }
    }
}
