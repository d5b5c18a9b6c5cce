use std::sync::mpsc::{Receiver, TryRecvError};

use crate::session::SearchError;
use crate::solver::SearchResult;
use crate::worker::errors::WorkerError;

pub type Reply = Result<SearchResult, SearchError>;

enum Slot {
    Ready(Option<Reply>),
    Waiting(Receiver<Reply>),
}

/// Handle to a search that may still be running.
///
/// Dropping it abandons the reply; the search itself still runs to completion.
pub struct PendingSearch {
    slot: Slot,
}

impl PendingSearch {
    /// A search that finished before the handle was created
    pub fn ready(reply: Reply) -> Self {
        Self {
            slot: Slot::Ready(Some(reply)),
        }
    }

    pub(crate) fn waiting(receiver: Receiver<Reply>) -> Self {
        Self {
            slot: Slot::Waiting(receiver),
        }
    }

    /// Block until the reply arrives.
    ///
    /// # Errors
    ///
    /// Returns the search error, or [`WorkerError::Disconnected`] if the
    /// worker went away without replying.
    pub fn wait(self) -> Reply {
        match self.slot {
            Slot::Ready(Some(reply)) => reply,
            Slot::Ready(None) => Err(WorkerError::Disconnected.into()),
            Slot::Waiting(receiver) => receiver
                .recv()
                .unwrap_or_else(|_| Err(WorkerError::Disconnected.into())),
        }
    }

    /// Take the reply if it has arrived. Returns `None` while the search is
    /// running and after the reply has been taken once.
    pub fn try_take(&mut self) -> Option<Reply> {
        match &mut self.slot {
            Slot::Ready(reply) => reply.take(),
            Slot::Waiting(receiver) => match receiver.try_recv() {
                Ok(reply) => {
                    self.slot = Slot::Ready(None);
                    Some(reply)
                }
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    self.slot = Slot::Ready(None);
                    Some(Err(WorkerError::Disconnected.into()))
                }
            },
        }
    }
}
