use crate::expression::{BinaryOp, UnaryOp};

/// Configuration for expression search
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Largest target reported in a [`SearchResult`](crate::SearchResult); the smallest is 0
    pub max_target: u32,
    /// How many times the unary operators are re-applied at every level
    pub unary_rounds: usize,
    /// Distance from an integer under which a value counts as that integer
    pub epsilon: f64,
    /// Intermediate values beyond this magnitude are dropped
    pub max_magnitude: f64,
    /// Longest digit string accepted
    pub max_digits: usize,
    pub unary_ops: Vec<UnaryOp>,
    pub binary_ops: Vec<BinaryOp>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_target: 1000,
            unary_rounds: 3,
            epsilon: 1e-9,
            max_magnitude: 1e12,
            max_digits: 5,
            unary_ops: UnaryOp::ALL.to_vec(),
            binary_ops: BinaryOp::ALL.to_vec(),
        }
    }
}
