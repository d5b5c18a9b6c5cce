use crate::expression::{Expression, ExpressionError};

/// An expression paired with its value and cost
#[derive(Debug, Clone, PartialEq)]
pub struct Equation {
    pub expression: Expression,
    pub value: f64,
    pub cost: u32,
}

impl Equation {
    /// # Errors
    ///
    /// Returns the evaluation error if the expression has no value.
    pub fn new(expression: Expression) -> Result<Self, ExpressionError> {
        let value = expression.evaluate()?;
        let cost = expression.cost();
        Ok(Self {
            expression,
            value,
            cost,
        })
    }
}
