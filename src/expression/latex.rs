use crate::expression::ast::Expression;
use crate::expression::ops::{BinaryOp, UnaryOp};

impl Expression {
    /// Render the expression as LaTeX.
    /// - Uses \cdot for multiplication
    /// - Uses \frac for division
    /// - Renders square roots as radicals and factorials as postfix `!`
    pub fn to_latex(&self) -> String {
        fn precedence(expr: &Expression) -> u8 {
            match expr {
                Expression::Binary(BinaryOp::Add | BinaryOp::Sub, _, _) => 1,
                Expression::Binary(BinaryOp::Mul | BinaryOp::Div, _, _) => 2,
                Expression::Unary(UnaryOp::Neg, _) => 3,
                Expression::Binary(BinaryOp::Pow, _, _) => 4,
                Expression::Unary(UnaryOp::Sqrt | UnaryOp::Factorial, _) => 5,
                Expression::Number(_) => 6,
            }
        }

        fn wrap_parens(s: String) -> String {
            format!("\\left({}\\right)", s)
        }

        fn fmt(expr: &Expression) -> String {
            match expr {
                Expression::Number(n) => format!("{}", n),
                Expression::Unary(UnaryOp::Neg, e) => {
                    let mut inner = fmt(e);
                    if precedence(e) < 4 {
                        inner = wrap_parens(inner);
                    }
                    format!("-{}", inner)
                }
                Expression::Unary(UnaryOp::Sqrt, e) => format!("\\sqrt{{{}}}", fmt(e)),
                Expression::Unary(UnaryOp::Factorial, e) => {
                    let mut inner = fmt(e);
                    if !matches!(e.as_ref(), Expression::Number(_)) {
                        inner = wrap_parens(inner);
                    }
                    format!("{}!", inner)
                }
                Expression::Binary(BinaryOp::Div, l, r) => {
                    format!("\\frac{{{}}}{{{}}}", fmt(l), fmt(r))
                }
                Expression::Binary(BinaryOp::Pow, l, r) => {
                    let mut base = fmt(l);
                    if precedence(l) <= 4 {
                        base = wrap_parens(base);
                    }
                    format!("{}^{{{}}}", base, fmt(r))
                }
                Expression::Binary(op, l, r) => {
                    let lp = precedence(l);
                    let rp = precedence(r);
                    let mut ls = fmt(l);
                    let mut rs = fmt(r);
                    let (need_l, need_r, symbol) = match op {
                        BinaryOp::Mul => (lp < 2, rp <= 3, "\\cdot"),
                        BinaryOp::Sub => (false, rp <= 1 || rp == 3, "-"),
                        _ => (false, rp == 3, "+"),
                    };
                    if need_l {
                        ls = wrap_parens(ls);
                    }
                    if need_r {
                        rs = wrap_parens(rs);
                    }
                    format!("{} {} {}", ls, symbol, rs)
                }
            }
        }

        fmt(self)
    }
}
