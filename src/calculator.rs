//! Evaluation sessions: one expression string, one tree, one binding table.

use log::{debug, info};
use num_complex::Complex64;
use serde::Serialize;

use crate::environment::Bindings;
use crate::error::Result;
use crate::expr::Expr;
use crate::interpreter::{Interpreter, VariableSource};
use crate::parser::parse_expression;

/// Two results closer than this are reported as equivalent.
pub const EQUIVALENCE_TOLERANCE: f64 = 1e-9;

/// A parsed expression together with the variables bound while evaluating it.
#[derive(Debug, Clone)]
pub struct Calculation {
    source: String,
    tree: Expr,
    bindings: Bindings,
}

/// What a finished session hands back to its caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub value: Complex64,

    /// Canonical rendering of the tree that produced `value`.
    pub tree: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Comparison {
    Equivalent(Complex64),
    Different(Complex64, Complex64),
}

impl Calculation {
    /// Parse `source`; fails on the first lexical or syntax error.
    pub fn new(source: &str) -> Result<Self> {
        info!("Creating calculation for {:?}", source);

        let tree: Expr = parse_expression(source)?;

        Ok(Self {
            source: source.to_string(),
            tree,
            bindings: Bindings::new(),
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tree(&self) -> &Expr {
        &self.tree
    }

    pub fn render(&self) -> String {
        self.tree.to_string()
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Evaluate the tree, asking `source` for variables not bound yet.
    pub fn execute(&mut self, source: &mut dyn VariableSource) -> Result<Complex64> {
        let value: Complex64 = Interpreter::new(&mut self.bindings, source).evaluate(&self.tree)?;

        info!("{:?} evaluated to {}", self.source, value);

        Ok(value)
    }
}

/// Parse and evaluate `expression` in a fresh session.
pub fn evaluate(expression: &str, source: &mut dyn VariableSource) -> Result<Outcome> {
    let mut calculation: Calculation = Calculation::new(expression)?;
    let value: Complex64 = calculation.execute(source)?;

    Ok(Outcome {
        value,
        tree: calculation.render(),
    })
}

/// Evaluate two expressions in separate sessions and compare the results.
///
/// Both strings are parsed before either is evaluated, so a syntax error in
/// the second one is reported before any variable is requested.
pub fn compare(first: &str, second: &str, source: &mut dyn VariableSource) -> Result<Comparison> {
    let mut a: Calculation = Calculation::new(first)?;
    let mut b: Calculation = Calculation::new(second)?;

    let x: Complex64 = a.execute(source)?;
    let y: Complex64 = b.execute(source)?;

    debug!("Comparing {} with {}", x, y);

    if (x - y).norm() < EQUIVALENCE_TOLERANCE {
        Ok(Comparison::Equivalent(x))
    } else {
        Ok(Comparison::Different(x, y))
    }
}
