use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::expression::{BinaryOp, UnaryOp};

/// Hashable identity of a computed value.
///
/// Values are compared bit for bit, except that `-0.0` and `0.0` are the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValueKey(u64);

impl ValueKey {
    pub fn of(value: f64) -> Self {
        if value == 0.0 {
            ValueKey(0.0_f64.to_bits())
        } else {
            ValueKey(value.to_bits())
        }
    }

    pub fn value(self) -> f64 {
        f64::from_bits(self.0)
    }
}

/// How a value was reached, by reference to the values it was built from.
///
/// `Unary` children live in the same table; `Binary` children live in the
/// tables of the two halves of the digit run, cut at `split`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Source {
    Literal,
    Unary(UnaryOp, ValueKey),
    Binary {
        op: BinaryOp,
        split: u32,
        left: ValueKey,
        right: ValueKey,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    pub cost: u32,
    pub source: Source,
}

impl Node {
    /// Lower cost wins; equal costs fall back to the order of the sources
    /// so the outcome does not depend on scheduling.
    pub fn is_better_than(&self, other: &Node) -> bool {
        (self.cost, self.source) < (other.cost, other.source)
    }
}

/// Cheapest known way to reach each value from one digit run
pub type Knowledge = HashMap<ValueKey, Node>;

/// Keep `node` if its value is new or it beats the known one.
pub(crate) fn absorb(knowledge: &mut Knowledge, key: ValueKey, node: Node) -> bool {
    match knowledge.entry(key) {
        Entry::Occupied(mut o) => {
            if node.is_better_than(o.get()) {
                o.insert(node);
                true
            } else {
                false
            }
        }
        Entry::Vacant(v) => {
            v.insert(node);
            true
        }
    }
}

/// Absorb everything from `from`, returning how many entries changed.
pub(crate) fn merge_into(into: &mut Knowledge, from: Knowledge) -> usize {
    let mut changed = 0;
    for (key, node) in from {
        if absorb(into, key, node) {
            changed += 1;
        }
    }
    changed
}

pub(crate) fn merge_knowledge(mut a: Knowledge, mut b: Knowledge) -> Knowledge {
    if a.len() < b.len() {
        std::mem::swap(&mut a, &mut b);
    }
    merge_into(&mut a, b);
    a
}

#[cfg(test)]
mod tests_inner_helpers {
    use super::*;

    #[test]
    fn test_value_key_merges_signed_zero() {
        assert_eq!(ValueKey::of(0.0), ValueKey::of(-0.0));
        assert_eq!(ValueKey::of(-0.0).value(), 0.0);
        assert_ne!(ValueKey::of(1.0), ValueKey::of(-1.0));
        assert_eq!(ValueKey::of(0.25).value(), 0.25);
    }

    #[test]
    fn test_absorb_keeps_cheapest() {
        let mut knowledge = Knowledge::default();
        let key = ValueKey::of(4.0);
        let literal = Node {
            cost: 0,
            source: Source::Literal,
        };
        let negated = Node {
            cost: 4,
            source: Source::Unary(UnaryOp::Neg, ValueKey::of(-4.0)),
        };

        assert!(absorb(&mut knowledge, key, negated));
        assert!(absorb(&mut knowledge, key, literal));
        assert!(!absorb(&mut knowledge, key, negated));
        assert_eq!(knowledge.get(&key), Some(&literal));
    }
}
