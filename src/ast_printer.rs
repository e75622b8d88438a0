use num_complex::Complex64;

use crate::expr::Expr;
use crate::value::{format_part, Value};

/// Converts an expression tree to its canonical, fully parenthesised infix
/// form, e.g. `(2 + (3 * 4))` or `(conj (3 + 4i))`.
pub struct TreePrinter;

impl TreePrinter {
    pub fn print(expr: &Expr) -> String {
        match expr {
            // ── literals ────────────────────────────────────────────────
            Expr::Literal(z) => Self::literal(*z),

            // ── variables ───────────────────────────────────────────────
            Expr::Variable(name) => name.clone(),

            // ── unary operator ──────────────────────────────────────────
            Expr::Unary { op, operand } => format!("({} {})", op.symbol(), Self::print(operand)),

            // ── binary operator ─────────────────────────────────────────
            Expr::Binary { left, op, right } => format!(
                "({} {} {})",
                Self::print(left),
                op.symbol(),
                Self::print(right)
            ),
        }
    }

    /// Real literals print as the bare number and pure‑imaginary ones with an
    /// `i` suffix; anything else is wrapped as `(a+bi)` so it re‑parses.
    fn literal(z: Complex64) -> String {
        let real_only: bool = z.im == 0.0 && z.re >= 0.0;
        let imaginary_only: bool = z.re == 0.0 && z.im > 0.0;

        if real_only {
            format_part(z.re)
        } else if imaginary_only && z.im == 1.0 {
            "i".into()
        } else if imaginary_only {
            format!("{}i", format_part(z.im))
        } else {
            format!("({})", Value(z))
        }
    }
}
