use std::fmt;

use crate::expression::ast::Expression;
use crate::expression::ops::{BinaryOp, UnaryOp};

/// Binding strength, higher binds tighter
fn precedence(expr: &Expression) -> u8 {
    match expr {
        Expression::Number(_) => 6,
        Expression::Unary(UnaryOp::Sqrt | UnaryOp::Factorial, _) => 5,
        Expression::Binary(BinaryOp::Pow, _, _) => 4,
        Expression::Unary(UnaryOp::Neg, _) => 3,
        Expression::Binary(BinaryOp::Mul | BinaryOp::Div, _, _) => 2,
        Expression::Binary(BinaryOp::Add | BinaryOp::Sub, _, _) => 1,
    }
}

fn is_negation(expr: &Expression) -> bool {
    matches!(expr, Expression::Unary(UnaryOp::Neg, _))
}

fn write_with_parens(f: &mut fmt::Formatter, expr: &Expression, need_parens: bool) -> fmt::Result {
    if need_parens {
        write!(f, "(")?;
        fmt_expression(f, expr)?;
        write!(f, ")")
    } else {
        fmt_expression(f, expr)
    }
}

fn fmt_expression(f: &mut fmt::Formatter, expr: &Expression) -> fmt::Result {
    match expr {
        Expression::Number(n) => write!(f, "{}", n),
        Expression::Unary(UnaryOp::Neg, e) => {
            write!(f, "-")?;
            write_with_parens(f, e, precedence(e) < 4)
        }
        Expression::Unary(UnaryOp::Sqrt, e) => {
            write!(f, "√")?;
            let need = !matches!(
                e.as_ref(),
                Expression::Number(_) | Expression::Unary(UnaryOp::Sqrt, _)
            );
            write_with_parens(f, e, need)
        }
        Expression::Unary(UnaryOp::Factorial, e) => {
            // `4!!` would read as a double factorial
            let need = !matches!(e.as_ref(), Expression::Number(_));
            write_with_parens(f, e, need)?;
            write!(f, "!")
        }
        Expression::Binary(op, l, r) => {
            let lp = precedence(l);
            let rp = precedence(r);
            let (need_l, need_r) = match op {
                BinaryOp::Add => (false, is_negation(r)),
                BinaryOp::Sub => (false, rp <= 1 || is_negation(r)),
                BinaryOp::Mul => (lp < 2, rp < 2 || is_negation(r)),
                BinaryOp::Div => (lp < 2, rp <= 2 || is_negation(r)),
                BinaryOp::Pow => (lp <= 4, rp < 4),
            };
            write_with_parens(f, l, need_l)?;
            write!(f, "{}", op.symbol())?;
            write_with_parens(f, r, need_r)
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt_expression(f, self)
    }
}
