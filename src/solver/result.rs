use std::collections::BTreeMap;

use crate::solver::equation::Equation;

/// Cheapest expression found for each reachable integer target.
///
/// Targets with no expression are absent. Iteration is always ascending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResult {
    digits: String,
    entries: BTreeMap<u32, Equation>,
}

impl SearchResult {
    pub fn from_equations(
        digits: impl Into<String>,
        entries: impl IntoIterator<Item = (u32, Equation)>,
    ) -> Self {
        Self {
            digits: digits.into(),
            entries: entries.into_iter().collect(),
        }
    }

    /// The digit string this result was computed for
    pub fn digits(&self) -> &str {
        &self.digits
    }

    pub fn get(&self, target: u32) -> Option<&Equation> {
        self.entries.get(&target)
    }

    pub fn contains(&self, target: u32) -> bool {
        self.entries.contains_key(&target)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &Equation)> {
        self.entries.iter().map(|(target, equation)| (*target, equation))
    }

    /// One `"<target> = <expression>"` line per reachable target
    pub fn lines(&self) -> Vec<String> {
        self.iter()
            .map(|(target, equation)| format!("{} = {}", target, equation.expression))
            .collect()
    }

    pub fn latex_lines(&self) -> Vec<String> {
        self.iter()
            .map(|(target, equation)| format!("{} = {}", target, equation.expression.to_latex()))
            .collect()
    }
}
