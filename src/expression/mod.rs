//! Expression trees, operator semantics and rendering

mod ast;
mod display;
mod errors;
mod eval;
mod latex;
mod ops;

pub use ast::Expression;
pub use errors::ExpressionError;
pub use ops::{BinaryOp, UnaryOp};
