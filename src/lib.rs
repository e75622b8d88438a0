pub mod ast_printer;
pub mod calculator;
pub mod environment;
pub mod error;
pub mod expr;
pub mod interpreter;
pub mod literal;
pub mod parser;
pub mod scanner;
pub mod token;
pub mod value;

pub use calculator::{compare, evaluate, Calculation, Comparison, Outcome};
pub use error::{CalcError, Result};
pub use expr::{BinaryOp, Expr, UnaryOp};
pub use interpreter::VariableSource;
