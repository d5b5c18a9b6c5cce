use crate::solver::ExpressionSolver;
use crate::worker::{PendingSearch, SearchWorker};

/// Something that can run a search for a [`SearchSession`](crate::SearchSession).
///
/// In-thread backends return a [`PendingSearch`] that is already settled;
/// threaded ones return immediately and settle later.
pub trait SearchBackend {
    fn dispatch(&self, digits: &str) -> PendingSearch;
}

impl SearchBackend for ExpressionSolver {
    fn dispatch(&self, digits: &str) -> PendingSearch {
        PendingSearch::ready(self.search(digits).map_err(Into::into))
    }
}

impl SearchBackend for SearchWorker {
    fn dispatch(&self, digits: &str) -> PendingSearch {
        self.submit(digits)
    }
}

impl<B: SearchBackend + ?Sized> SearchBackend for &B {
    fn dispatch(&self, digits: &str) -> PendingSearch {
        (**self).dispatch(digits)
    }
}
