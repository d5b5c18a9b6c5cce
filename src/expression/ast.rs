use crate::expression::ops::{BinaryOp, UnaryOp};

/// Arithmetic expression built from runs of input digits
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// One or more consecutive input digits read as a number
    Number(f64),
    Unary(UnaryOp, Box<Expression>),
    Binary(BinaryOp, Box<Expression>, Box<Expression>),
}

impl Expression {
    pub fn unary(op: UnaryOp, operand: Expression) -> Self {
        Expression::Unary(op, Box::new(operand))
    }

    pub fn binary(op: BinaryOp, left: Expression, right: Expression) -> Self {
        Expression::Binary(op, Box::new(left), Box::new(right))
    }

    /// Sum of the operator costs in this tree. Literals are free.
    pub fn cost(&self) -> u32 {
        match self {
            Expression::Number(_) => 0,
            Expression::Unary(op, e) => op.cost() + e.cost(),
            Expression::Binary(op, l, r) => op.cost() + l.cost() + r.cost(),
        }
    }

    /// The literal digits in left-to-right order, e.g. `44 / 4 - 4` gives `"4444"`.
    pub fn digit_string(&self) -> String {
        fn collect(expr: &Expression, out: &mut String) {
            match expr {
                Expression::Number(n) => out.push_str(&format!("{}", n)),
                Expression::Unary(_, e) => collect(e, out),
                Expression::Binary(_, l, r) => {
                    collect(l, out);
                    collect(r, out);
                }
            }
        }

        let mut out = String::new();
        collect(self, &mut out);
        out
    }
}
