use std::fmt;

use num_complex::Complex64;
use serde::Serialize;

use crate::ast_printer::TreePrinter;
use crate::error::{CalcError, Result};
use crate::token::{Token, TokenType};

/// Prefix operators with a single operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOp {
    /// Principal square root, written `√` or `sqrt`.
    Sqrt,

    /// Complex conjugate, written `conj(...)`.
    Conj,

    /// Negation, written `-`.
    Neg,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Sqrt => "√",
            UnaryOp::Conj => "conj",
            UnaryOp::Neg => "-",
        }
    }
}

/// Infix operators.  All of them associate to the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "**",
        }
    }
}

impl TryFrom<&Token<'_>> for BinaryOp {
    type Error = CalcError;

    fn try_from(token: &Token<'_>) -> Result<Self> {
        match token.token_type {
            TokenType::PLUS => Ok(BinaryOp::Add),

            TokenType::MINUS => Ok(BinaryOp::Sub),

            TokenType::STAR => Ok(BinaryOp::Mul),

            TokenType::SLASH => Ok(BinaryOp::Div),

            TokenType::STAR_STAR => Ok(BinaryOp::Pow),

            _ => Err(CalcError::InvalidOperator(token.lexeme.to_string())),
        }
    }
}

/// A node of the expression tree.
///
/// The number of children follows from the variant: none for literals and
/// variables, one for unary operators, two for binary operators.  Trees are
/// built once by the parser and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    /// A constant, e.g. `3`, `2.5i` or `i`.
    Literal(Complex64),

    /// A free variable, resolved when the tree is evaluated.
    Variable(String),

    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },

    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(left: Expr, op: BinaryOp, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Number of child nodes.
    pub fn arity(&self) -> usize {
        match self {
            Expr::Literal(_) | Expr::Variable(_) => 0,

            Expr::Unary { .. } => 1,

            Expr::Binary { .. } => 2,
        }
    }

    /// Distinct variable names in the order they are first reached by a
    /// left‑to‑right walk, which is also the order evaluation asks for them.
    pub fn variables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        self.collect_variables(&mut names);
        names
    }

    fn collect_variables<'e>(&'e self, names: &mut Vec<&'e str>) {
        match self {
            Expr::Literal(_) => {}

            Expr::Variable(name) => {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }

            Expr::Unary { operand, .. } => operand.collect_variables(names),

            Expr::Binary { left, right, .. } => {
                left.collect_variables(names);
                right.collect_variables(names);
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&TreePrinter::print(self))
    }
}
