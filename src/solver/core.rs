use std::collections::BTreeMap;
use std::collections::HashMap;
use std::collections::btree_map::Entry;

use log::{debug, info, warn};
use rayon::prelude::*;

use crate::expression::{Expression, UnaryOp};
use crate::solver::config::SolverConfig;
use crate::solver::equation::Equation;
use crate::solver::errors::SolverError;
use crate::solver::knowledge::{
    Knowledge, Node, Source, ValueKey, absorb, merge_into, merge_knowledge,
};
use crate::solver::result::SearchResult;
use crate::utils::{literal_value, split_points, validate_digit_string};

/// Knowledge per proper digit run. Equal runs at different positions share an entry.
type Memo<'a> = HashMap<&'a str, Knowledge>;

/// Tolerance used to decide that a value can no longer become an integer
const PRUNE_TOLERANCE: f64 = 1e-6;

fn near_integer(value: f64, tolerance: f64) -> bool {
    (value - value.round()).abs() < tolerance
}

/// What the whole digit string is being searched for
#[derive(Debug, Clone, Copy)]
enum Goal {
    /// Every integer in `0..=max`
    Targets { max: u32, epsilon: f64 },
    /// One value
    Value { target: f64, epsilon: f64 },
}

impl Goal {
    /// Result slot for `value`, if it satisfies the goal
    fn slot(self, value: f64) -> Option<u32> {
        match self {
            Goal::Targets { max, epsilon } => {
                let rounded = value.round();
                if (value - rounded).abs() >= epsilon {
                    return None;
                }
                if rounded < 0.0 || rounded > f64::from(max) {
                    return None;
                }
                Some(rounded as u32)
            }
            Goal::Value { target, epsilon } => ((value - target).abs() < epsilon).then_some(0),
        }
    }

    /// Negation, square root and factorial never turn a non-integer into an
    /// integer, so such values are dead ends when the goal is an integer.
    fn is_dead_end(self, value: f64) -> bool {
        let integer_goal = match self {
            Goal::Targets { .. } => true,
            Goal::Value { target, .. } => near_integer(target, PRUNE_TOLERANCE),
        };
        integer_goal && !near_integer(value, PRUNE_TOLERANCE)
    }
}

/// Cheapest way found to land in one result slot: a base value for the
/// whole digit string followed by a chain of unary operators.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Landing {
    cost: u32,
    base: Source,
    base_key: ValueKey,
    chain: Vec<UnaryOp>,
}

impl Landing {
    fn is_better_than(&self, other: &Landing) -> bool {
        (self.cost, &self.base, &self.chain) < (other.cost, &other.base, &other.chain)
    }
}

type Landings = BTreeMap<u32, Landing>;

fn offer(acc: &mut Landings, slot: u32, landing: Landing) {
    match acc.entry(slot) {
        Entry::Occupied(mut o) => {
            if landing.is_better_than(o.get()) {
                o.insert(landing);
            }
        }
        Entry::Vacant(v) => {
            v.insert(landing);
        }
    }
}

fn merge_landings(mut a: Landings, b: Landings) -> Landings {
    for (slot, landing) in b {
        offer(&mut a, slot, landing);
    }
    a
}

/// Main solver for finding expressions over a digit string
#[derive(Debug, Clone, Default)]
pub struct ExpressionSolver {
    config: SolverConfig,
}

impl ExpressionSolver {
    /// Create a solver with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Get a reference to the solver configuration
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Find the cheapest expression for every integer target in `0..=max_target`.
    ///
    /// # Errors
    ///
    /// Fails if `digits` is empty, contains anything but ASCII digits, or is
    /// longer than the configured maximum.
    pub fn search(&self, digits: &str) -> Result<SearchResult, SolverError> {
        self.check_input(digits)?;

        info!("Start searching for '{}'", digits);
        let memo = self.prepare(digits);
        let goal = Goal::Targets {
            max: self.config.max_target,
            epsilon: self.config.epsilon,
        };
        let entries: Vec<(u32, Equation)> = self
            .land(&memo, digits, goal)
            .into_iter()
            .filter_map(|(target, landing)| Some((target, self.realize(&memo, digits, &landing)?)))
            .collect();

        info!(
            "Reached {} of {} targets with '{}'",
            entries.len(),
            self.config.max_target as usize + 1,
            digits
        );
        Ok(SearchResult::from_equations(digits, entries))
    }

    /// Find the cheapest expression whose value is within `epsilon` of `target`.
    ///
    /// # Errors
    ///
    /// Fails on the same inputs as [`ExpressionSolver::search`].
    pub fn find_expression(
        &self,
        digits: &str,
        target: f64,
    ) -> Result<Option<Equation>, SolverError> {
        self.check_input(digits)?;

        let memo = self.prepare(digits);
        let goal = Goal::Value {
            target,
            epsilon: self.config.epsilon,
        };
        let found = self
            .land(&memo, digits, goal)
            .remove(&0)
            .and_then(|landing| self.realize(&memo, digits, &landing));

        match &found {
            Some(equation) => info!("Found match for {}: {}", target, equation.expression),
            None => info!("No expression over '{}' reaches {}", digits, target),
        }
        Ok(found)
    }

    fn check_input(&self, digits: &str) -> Result<(), SolverError> {
        validate_digit_string(digits)?;
        if digits.len() > self.config.max_digits {
            warn!(
                "'{}' is longer than the {} digit limit",
                digits, self.config.max_digits
            );
            return Err(SolverError::TooManyDigits {
                len: digits.len(),
                max: self.config.max_digits,
            });
        }
        Ok(())
    }

    /// Build the tables of every proper digit run of `digits`.
    fn prepare<'a>(&self, digits: &'a str) -> Memo<'a> {
        let mut memo = Memo::new();
        for (left, right) in split_points(digits) {
            self.explore(&mut memo, left);
            self.explore(&mut memo, right);
        }
        debug!(
            "Prepared {} sub-tables holding {} values",
            memo.len(),
            memo.values().map(Knowledge::len).sum::<usize>()
        );
        memo
    }

    fn explore<'a>(&self, memo: &mut Memo<'a>, digits: &'a str) {
        if memo.contains_key(digits) {
            return;
        }

        for (left, right) in split_points(digits) {
            self.explore(memo, left);
            self.explore(memo, right);
        }

        let mut knowledge = Knowledge::default();
        if let Some(value) = literal_value(digits) {
            absorb(
                &mut knowledge,
                ValueKey::of(value),
                Node {
                    cost: 0,
                    source: Source::Literal,
                },
            );
        }

        let pairs = Self::split_tables(memo, digits);
        let combined = self.combine(&pairs);
        merge_into(&mut knowledge, combined);
        debug!(
            "Combined {} splits of '{}' into {} values",
            pairs.len(),
            digits,
            knowledge.len()
        );

        self.expand_unary(digits, &mut knowledge);
        memo.insert(digits, knowledge);
    }

    /// The two tables on either side of every cut of `digits`
    fn split_tables<'m>(
        memo: &'m Memo<'_>,
        digits: &str,
    ) -> Vec<(u32, &'m Knowledge, &'m Knowledge)> {
        split_points(digits)
            .filter_map(|(left, right)| {
                let split = u32::try_from(left.len()).ok()?;
                Some((split, memo.get(left)?, memo.get(right)?))
            })
            .collect()
    }

    /// Apply every binary operator to every pair drawn from each split.
    fn combine(&self, pairs: &[(u32, &Knowledge, &Knowledge)]) -> Knowledge {
        let ops = &self.config.binary_ops;
        pairs
            .par_iter()
            .flat_map(|&(split, left, right)| {
                left.par_iter().map(move |(&lk, ln)| (split, lk, ln, right))
            })
            .fold(Knowledge::default, |mut acc, (split, lk, ln, right)| {
                let lhs = lk.value();
                for (&rk, rn) in right {
                    for &op in ops {
                        let Ok(value) = op.apply(lhs, rk.value()) else {
                            continue;
                        };
                        if !self.admits(value) {
                            continue;
                        }
                        let node = Node {
                            cost: ln.cost + rn.cost + op.cost(),
                            source: Source::Binary {
                                op,
                                split,
                                left: lk,
                                right: rk,
                            },
                        };
                        absorb(&mut acc, ValueKey::of(value), node);
                    }
                }
                acc
            })
            .reduce(Knowledge::default, merge_knowledge)
    }

    fn expand_unary(&self, digits: &str, knowledge: &mut Knowledge) {
        let ops = &self.config.unary_ops;
        if ops.is_empty() {
            return;
        }

        for round in 0..self.config.unary_rounds {
            let applied = knowledge
                .par_iter()
                .fold(Knowledge::default, |mut acc, (&key, node)| {
                    for &op in ops {
                        if let Some(value) = self.apply_unary(op, key.value()) {
                            let derived = Node {
                                cost: node.cost + op.cost(),
                                source: Source::Unary(op, key),
                            };
                            absorb(&mut acc, ValueKey::of(value), derived);
                        }
                    }
                    acc
                })
                .reduce(Knowledge::default, merge_knowledge);

            let changed = merge_into(knowledge, applied);
            debug!(
                "Unary round {} on '{}' changed {} values",
                round + 1,
                digits,
                changed
            );
            if changed == 0 {
                break;
            }
        }
    }

    /// Combine the sub-tables one last time for the whole digit string,
    /// keeping only what lands in a result slot.
    fn land(&self, memo: &Memo<'_>, digits: &str, goal: Goal) -> Landings {
        let mut landings = Landings::new();
        let mut chain = Vec::new();
        if let Some(value) = literal_value(digits) {
            let key = ValueKey::of(value);
            let base = (Source::Literal, key);
            self.walk(&mut landings, goal, value, 0, base, &mut chain);
        }

        let ops = &self.config.binary_ops;
        let pairs = Self::split_tables(memo, digits);
        let combined = pairs
            .par_iter()
            .flat_map(|&(split, left, right)| {
                left.par_iter().map(move |(&lk, ln)| (split, lk, ln, right))
            })
            .fold(Landings::new, |mut acc, (split, lk, ln, right)| {
                let lhs = lk.value();
                let mut chain = Vec::new();
                for (&rk, rn) in right {
                    for &op in ops {
                        let Ok(value) = op.apply(lhs, rk.value()) else {
                            continue;
                        };
                        if !self.admits(value) || goal.is_dead_end(value) {
                            continue;
                        }
                        let base = Source::Binary {
                            op,
                            split,
                            left: lk,
                            right: rk,
                        };
                        let cost = ln.cost + rn.cost + op.cost();
                        let base = (base, ValueKey::of(value));
                        self.walk(&mut acc, goal, value, cost, base, &mut chain);
                    }
                }
                acc
            })
            .reduce(Landings::new, merge_landings);

        merge_landings(landings, combined)
    }

    /// Offer `value` to its slot, then follow unary chains from it.
    fn walk(
        &self,
        acc: &mut Landings,
        goal: Goal,
        value: f64,
        cost: u32,
        base: (Source, ValueKey),
        chain: &mut Vec<UnaryOp>,
    ) {
        if let Some(slot) = goal.slot(value) {
            let beaten = acc.get(&slot).is_some_and(|known| known.cost < cost);
            if !beaten {
                let landing = Landing {
                    cost,
                    base: base.0,
                    base_key: base.1,
                    chain: chain.clone(),
                };
                offer(acc, slot, landing);
            }
        }

        if chain.len() >= self.config.unary_rounds {
            return;
        }
        for &op in &self.config.unary_ops {
            if op == UnaryOp::Neg && chain.last() == Some(&UnaryOp::Neg) {
                continue;
            }
            let Some(next) = self.apply_unary(op, value) else {
                continue;
            };
            if goal.is_dead_end(next) {
                continue;
            }
            chain.push(op);
            self.walk(acc, goal, next, cost + op.cost(), base, chain);
            chain.pop();
        }
    }

    fn apply_unary(&self, op: UnaryOp, value: f64) -> Option<f64> {
        if op.is_identity(value) {
            return None;
        }
        op.apply(value).ok().filter(|&v| self.admits(v))
    }

    fn admits(&self, value: f64) -> bool {
        value.abs() <= self.config.max_magnitude
    }

    /// Turn a landing back into an expression tree.
    fn realize(&self, memo: &Memo<'_>, digits: &str, landing: &Landing) -> Option<Equation> {
        let base = match landing.base {
            Source::Literal => Expression::Number(landing.base_key.value()),
            Source::Binary {
                op,
                split,
                left,
                right,
            } => {
                let (l, r) = digits.split_at_checked(split as usize)?;
                Expression::binary(op, rebuild(memo, l, left)?, rebuild(memo, r, right)?)
            }
            Source::Unary(..) => return None,
        };
        let expression = landing
            .chain
            .iter()
            .fold(base, |inner, &op| Expression::unary(op, inner));

        match Equation::new(expression) {
            Ok(equation) => Some(equation),
            Err(e) => {
                warn!(
                    "Dropping a result for '{}' that no longer evaluates: {}",
                    digits, e
                );
                None
            }
        }
    }
}

/// Rebuild the expression stored for `key` in the table of `digits`.
///
/// A unary node always costs more than its child, so following children
/// never revisits a value.
fn rebuild(memo: &Memo<'_>, digits: &str, key: ValueKey) -> Option<Expression> {
    let node = memo.get(digits)?.get(&key)?;
    match node.source {
        Source::Literal => Some(Expression::Number(key.value())),
        Source::Unary(op, child) => Some(Expression::unary(op, rebuild(memo, digits, child)?)),
        Source::Binary {
            op,
            split,
            left,
            right,
        } => {
            let (l, r) = digits.split_at_checked(split as usize)?;
            Some(Expression::binary(
                op,
                rebuild(memo, l, left)?,
                rebuild(memo, r, right)?,
            ))
        }
    }
}
