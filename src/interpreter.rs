use std::collections::HashMap;

use log::{debug, info};
use num_complex::Complex64;

use crate::environment::Bindings;
use crate::error::{CalcError, Result};
use crate::expr::{BinaryOp, Expr, UnaryOp};
use crate::literal::parse_complex;

/// Integral real exponents up to this magnitude use repeated multiplication.
const MAX_EXACT_EXPONENT: f64 = 100.0;

/// Supplies text for variables that are not bound yet.
///
/// The answer is parsed with [`parse_complex`]; a source that cannot answer at
/// all returns [`CalcError::Unresolved`].
pub trait VariableSource {
    fn value_for(&mut self, name: &str) -> Result<String>;
}

impl VariableSource for HashMap<String, String> {
    fn value_for(&mut self, name: &str) -> Result<String> {
        self.get(name).cloned().ok_or_else(|| CalcError::Unresolved {
            name: name.to_string(),
            message: "no value supplied".into(),
        })
    }
}

impl<F> VariableSource for F
where
    F: FnMut(&str) -> Result<String>,
{
    fn value_for(&mut self, name: &str) -> Result<String> {
        self(name)
    }
}

/// Tree‑walking evaluator over complex numbers.
///
/// Borrows the session's bindings and the variable source for the duration of
/// one evaluation; each unbound name is requested from the source once.
pub struct Interpreter<'s> {
    bindings: &'s mut Bindings,
    source: &'s mut dyn VariableSource,
}

impl<'s> Interpreter<'s> {
    pub fn new(bindings: &'s mut Bindings, source: &'s mut dyn VariableSource) -> Self {
        info!("Initializing Interpreter with {} bindings", bindings.len());

        Self { bindings, source }
    }

    /// Evaluate `expr` bottom‑up.
    pub fn evaluate(&mut self, expr: &Expr) -> Result<Complex64> {
        match expr {
            Expr::Literal(z) => Ok(*z),

            Expr::Variable(name) => self.lookup(name),

            Expr::Unary { op, operand } => {
                let value: Complex64 = self.evaluate(operand)?;

                let result: Complex64 = match op {
                    UnaryOp::Sqrt => principal_sqrt(value),
                    UnaryOp::Conj => value.conj(),
                    UnaryOp::Neg => -value,
                };

                debug!("{} {} = {}", op.symbol(), value, result);

                Ok(result)
            }

            Expr::Binary { left, op, right } => {
                let l: Complex64 = self.evaluate(left)?;
                let r: Complex64 = self.evaluate(right)?;

                let result: Complex64 = match op {
                    BinaryOp::Add => l + r,
                    BinaryOp::Sub => l - r,
                    BinaryOp::Mul => l * r,
                    BinaryOp::Div => {
                        if r.re == 0.0 && r.im == 0.0 {
                            return Err(CalcError::DivisionByZero);
                        }

                        l / r
                    }
                    BinaryOp::Pow => complex_pow(l, r)?,
                };

                debug!("{} {} {} = {}", l, op.symbol(), r, result);

                Ok(result)
            }
        }
    }

    fn lookup(&mut self, name: &str) -> Result<Complex64> {
        if let Some(value) = self.bindings.get(name) {
            debug!("Variable '{}' already bound to {}", name, value);

            return Ok(value);
        }

        debug!("Requesting a value for '{}'", name);

        let text: String = self.source.value_for(name)?;
        let value: Complex64 = parse_complex(&text).map_err(|source| CalcError::UnboundVariable {
            name: name.to_string(),
            source,
        })?;

        info!("Bound variable '{}' to {}", name, value);

        Ok(self.bindings.define(name, value))
    }
}

/// Principal square root: non‑negative real part, and non‑negative imaginary
/// part when the real part is zero.  Signed zeros are cleared first so that
/// `√(-4)` is `2i` whatever the sign of the zero imaginary part.
pub fn principal_sqrt(z: Complex64) -> Complex64 {
    Complex64::new(z.re + 0.0, z.im + 0.0).sqrt()
}

/// Principal power `exp(w · Log z)` with `Arg z ∈ (-π, π]`.
///
/// * `z ** 0` is `1` for every `z`, including `0 ** 0`.
/// * `0 ** w` is `0` for real `w > 0` and a domain error otherwise.
/// * Real integral exponents with `|n| ≤ 100` are computed by repeated
///   multiplication.
///
/// Signed zeros in the base are cleared first, so `(-8) ** (1/3)` and
/// `(0-8) ** (1/3)` both take `Arg = π`.
pub fn complex_pow(base: Complex64, exponent: Complex64) -> Result<Complex64> {
    let base = Complex64::new(base.re + 0.0, base.im + 0.0);

    if exponent.re == 0.0 && exponent.im == 0.0 {
        return Ok(Complex64::new(1.0, 0.0));
    }

    if base.re == 0.0 && base.im == 0.0 {
        if exponent.im == 0.0 && exponent.re > 0.0 {
            return Ok(Complex64::new(0.0, 0.0));
        }

        return Err(CalcError::Domain(
            "zero raised to a negative or complex power".into(),
        ));
    }

    if exponent.im == 0.0 && exponent.re.fract() == 0.0 && exponent.re.abs() <= MAX_EXACT_EXPONENT {
        return Ok(base.powi(exponent.re as i32));
    }

    Ok(base.powc(exponent))
}
