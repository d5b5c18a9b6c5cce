use std::cell::Cell;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crate::expression::{BinaryOp, Expression};
use crate::session::{SearchBackend, SearchError, SearchSession};
use crate::solver::{Equation, ExpressionSolver, SearchResult, SolverConfig};
use crate::worker::{PendingSearch, SearchWorker, WorkerError};

fn binary_only() -> SolverConfig {
    SolverConfig {
        unary_ops: Vec::new(),
        ..SolverConfig::default()
    }
}

/// Counts dispatches and answers with a fixed reply
struct ScriptedBackend {
    calls: Cell<usize>,
    fail: bool,
}

impl ScriptedBackend {
    fn new(fail: bool) -> Self {
        Self {
            calls: Cell::new(0),
            fail,
        }
    }
}

impl SearchBackend for ScriptedBackend {
    fn dispatch(&self, digits: &str) -> PendingSearch {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            return PendingSearch::ready(Err(SearchError::Worker(WorkerError::Panicked(
                "scripted failure".to_string(),
            ))));
        }

        let ones = |a: Expression, b: Expression, op| Expression::binary(op, a, b);
        let one = || Expression::Number(1.0);
        let zero = ones(
            ones(ones(one(), one(), BinaryOp::Sub), one(), BinaryOp::Sub),
            one(),
            BinaryOp::Add,
        );
        let four = ones(
            ones(ones(one(), one(), BinaryOp::Add), one(), BinaryOp::Add),
            one(),
            BinaryOp::Add,
        );
        let entries = [(0, zero), (4, four)]
            .into_iter()
            .filter_map(|(target, expr)| Equation::new(expr).ok().map(|e| (target, e)));
        PendingSearch::ready(Ok(SearchResult::from_equations(digits, entries)))
    }
}

#[test]
fn test_empty_input_clears_without_searching() {
    let mut session = SearchSession::new(ScriptedBackend::new(false));
    session.set_input("");
    assert!(session.lines().is_empty());
    assert!(!session.is_loading());
    assert_eq!(session.backend().calls.get(), 0);

    session.set_input("1111");
    assert!(!session.lines().is_empty());
    session.set_input("");
    assert!(session.lines().is_empty());
    assert!(session.result().is_none());
    assert_eq!(session.backend().calls.get(), 1);
}

#[test]
fn test_four_ones_scenario() {
    let mut session = SearchSession::new(ScriptedBackend::new(false));
    session.set_input("1111");
    assert!(!session.is_loading());
    assert_eq!(session.lines(), vec!["0 = 1-1-1+1", "4 = 1+1+1+1"]);
}

#[test]
fn test_failed_search_shows_nothing() {
    let mut session = SearchSession::new(ScriptedBackend::new(true));
    session.set_input("1111");
    assert!(!session.is_loading());
    assert!(session.lines().is_empty());
    assert!(session.poll());
}

#[test]
fn test_invalid_input_is_absorbed() {
    let mut session = SearchSession::new(ExpressionSolver::with_config(binary_only()));
    session.set_input("four");
    assert!(session.lines().is_empty());
    assert!(!session.is_loading());
    assert_eq!(session.input(), "four");
}

#[test]
fn test_inline_backend_settles_immediately() {
    let mut session = SearchSession::new(ExpressionSolver::with_config(binary_only()));
    session.set_input("1111");
    assert!(!session.is_loading());

    let lines = session.lines();
    assert!(lines.contains(&"4 = 1+1+1+1".to_string()));
    let targets: Vec<u32> = lines
        .iter()
        .filter_map(|line| line.split(" = ").next()?.parse().ok())
        .collect();
    assert_eq!(targets.len(), lines.len());
    assert!(targets.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_worker_backend_matches_inline() {
    let worker = SearchWorker::spawn(binary_only());
    assert!(worker.is_ok());
    if let Ok(worker) = worker {
        let mut threaded = SearchSession::new(worker);
        threaded.set_input("1234");
        threaded.wait();
        assert!(!threaded.is_loading());

        let mut inline = SearchSession::new(ExpressionSolver::with_config(binary_only()));
        inline.set_input("1234");

        assert!(!threaded.lines().is_empty());
        assert_eq!(threaded.lines(), inline.lines());
    }
}

#[test]
fn test_loading_until_worker_replies() {
    let (release, gate) = mpsc::channel::<()>();
    let worker = SearchWorker::spawn_with(move |digits| {
        let _ = gate.recv();
        ExpressionSolver::with_config(binary_only()).search(digits)
    });
    assert!(worker.is_ok());
    if let Ok(worker) = worker {
        let mut session = SearchSession::new(worker);
        session.set_input("11");
        assert!(session.is_loading());
        assert!(!session.poll());
        assert!(session.lines().is_empty());

        assert!(release.send(()).is_ok());
        let mut settled = false;
        for _ in 0..500 {
            if session.poll() {
                settled = true;
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }
        assert!(settled);
        assert!(!session.is_loading());
        assert!(session.lines().contains(&"2 = 1+1".to_string()));
    }
}

#[test]
fn test_newer_input_supersedes_pending_search() {
    let (release, gate) = mpsc::channel::<()>();
    let worker = SearchWorker::spawn_with(move |digits| {
        let _ = gate.recv();
        ExpressionSolver::with_config(binary_only()).search(digits)
    });
    assert!(worker.is_ok());
    if let Ok(worker) = worker {
        let mut session = SearchSession::new(worker);
        session.set_input("11");
        session.set_input("111");
        assert!(session.is_loading());

        assert!(release.send(()).is_ok());
        assert!(release.send(()).is_ok());
        session.wait();

        assert_eq!(session.result().map(SearchResult::digits), Some("111"));
    }
}
