//! Centralised error hierarchy for the **complex calculator**.
//!
//! Every stage (scanner, parser, literal notation, evaluator, CLI) converts its
//! failure modes into one of the variants defined here.  This gives a uniform
//! `Result<T>` alias throughout the crate and ergonomic inter‑operation with
//! `anyhow` in the binary, while keeping the column of the offending token.
//!
//! The module **does not** print diagnostics itself.

use std::io;
use thiserror::Error;

use log::info;

use crate::literal::LiteralError;

/// Canonical error type used throughout the calculator.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CalcError {
    /// Lexical (scanner) error with its source column.
    #[error("[col {col}] Error: {message}")]
    Lex {
        /// Human‑readable description.
        message: String,

        /// 1‑based character column in the normalised expression.
        col: usize,
    },

    /// Syntactic (parser) error.
    #[error("[col {col}] Error: {message}")]
    Syntax { message: String, col: usize },

    /// A number token that does not convert to an `f64`.
    #[error("[col {col}] Error: invalid numeric literal '{lexeme}'")]
    InvalidLiteral { lexeme: String, col: usize },

    /// The variable source answered with text that is not a complex number.
    #[error("invalid value for variable '{name}': {source}")]
    UnboundVariable {
        name: String,
        #[source]
        source: LiteralError,
    },

    /// The variable source could not produce any answer.
    #[error("no value for variable '{name}': {message}")]
    Unresolved { name: String, message: String },

    /// Division by a divisor whose real and imaginary parts are both zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Any other operation outside its domain.
    #[error("{0}")]
    Domain(String),

    /// A symbol that names no known operator.
    #[error("invalid operator '{0}'")]
    InvalidOperator(String),

    /// Wrapper around `std::io::Error` (transparent).  Enables `?` on I/O ops.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl CalcError {
    /// Helper constructor for the **scanner**.
    pub fn lex<S: Into<String>>(col: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Lex error: col={}, msg={}", col, message);

        CalcError::Lex { message, col }
    }

    /// Helper constructor for the **parser**.
    pub fn syntax<S: Into<String>>(col: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Syntax error: col={}, msg={}", col, message);

        CalcError::Syntax { message, col }
    }

    /// `true` for failures raised before evaluation starts (lexing, parsing,
    /// literal conversion).
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            CalcError::Lex { .. } | CalcError::Syntax { .. } | CalcError::InvalidLiteral { .. }
        )
    }
}

/// Crate‑wide `Result` alias.
pub type Result<T> = std::result::Result<T, CalcError>;
