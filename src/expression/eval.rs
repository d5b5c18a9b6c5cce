use log::debug;

use crate::expression::ast::Expression;
use crate::expression::errors::ExpressionError;

impl Expression {
    /// # Errors
    ///
    /// Returns the first operator domain error met while walking the tree:
    /// division by zero, a complex power, a negative square root, a
    /// factorial outside `0..=8`, or a non-finite intermediate value.
    pub fn evaluate(&self) -> Result<f64, ExpressionError> {
        let result = match self {
            Expression::Number(n) => Ok(*n),
            Expression::Unary(op, e) => {
                let value = e.evaluate()?;
                op.apply(value)
            }
            Expression::Binary(op, l, r) => {
                let left = l.evaluate()?;
                let right = r.evaluate()?;
                op.apply(left, right)
            }
        };

        if let Err(e) = &result {
            debug!("Evaluation of {} failed: {}", self, e);
        }

        result
    }
}
