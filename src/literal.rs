//! Parser for the complex‑number notation answered by variable sources.
//!
//! ```text
//! literal := ws* ( '(' body ')' | body ) ws*
//! body    := real
//!          | [real] sign? imag? ('i' | 'j')
//! ```
//!
//! `real` and `imag` are anything `str::parse::<f64>` accepts.  The real and
//! imaginary parts are split at the last `+`/`-` that is neither the first
//! character nor part of an exponent.  A missing imaginary coefficient means
//! `1`, so `"i"`, `"-i"` and `"3+i"` are all valid.

use log::debug;
use num_complex::Complex64;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiteralError {
    #[error("empty input is not a complex number")]
    Empty,

    #[error("'{0}' is not a complex number (expected e.g. 3+2i, -1.5i or 4)")]
    Malformed(String),
}

/// Parse `text` as a complex number.
pub fn parse_complex(text: &str) -> Result<Complex64, LiteralError> {
    let trimmed: &str = text.trim();

    let body: &str = match trimmed.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        Some(inner) => inner.trim(),
        None => trimmed,
    };

    if body.is_empty() {
        return Err(LiteralError::Empty);
    }

    let malformed = || LiteralError::Malformed(text.to_string());

    let value: Complex64 = match body.strip_suffix(['i', 'j']) {
        Some(coefficients) => {
            let (real, imag): (&str, &str) = match split_index(coefficients) {
                Some(at) => coefficients.split_at(at),
                None => ("", coefficients),
            };

            let re: f64 = if real.is_empty() {
                0.0
            } else {
                real.parse().map_err(|_| malformed())?
            };

            let im: f64 = match imag {
                "" | "+" => 1.0,
                "-" => -1.0,
                _ => imag.parse().map_err(|_| malformed())?,
            };

            Complex64::new(re, im)
        }

        None => Complex64::new(body.parse().map_err(|_| malformed())?, 0.0),
    };

    debug!("Parsed complex literal {:?} as {}", text, value);

    Ok(value)
}

/// Byte index of the sign that starts the imaginary part, if any.
fn split_index(s: &str) -> Option<usize> {
    let bytes: &[u8] = s.as_bytes();

    (1..bytes.len())
        .rev()
        .find(|&k| matches!(bytes[k], b'+' | b'-') && !matches!(bytes[k - 1], b'e' | b'E'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_and_imaginary_parts() {
        assert_eq!(parse_complex("3+2i"), Ok(Complex64::new(3.0, 2.0)));
        assert_eq!(parse_complex("3-2i"), Ok(Complex64::new(3.0, -2.0)));
        assert_eq!(parse_complex("-3.5-0.5i"), Ok(Complex64::new(-3.5, -0.5)));
    }

    #[test]
    fn pure_forms() {
        assert_eq!(parse_complex("4"), Ok(Complex64::new(4.0, 0.0)));
        assert_eq!(parse_complex("-1.5i"), Ok(Complex64::new(0.0, -1.5)));
        assert_eq!(parse_complex("i"), Ok(Complex64::new(0.0, 1.0)));
        assert_eq!(parse_complex("-i"), Ok(Complex64::new(0.0, -1.0)));
        assert_eq!(parse_complex("2+i"), Ok(Complex64::new(2.0, 1.0)));
    }

    #[test]
    fn exponents_are_not_split_points() {
        assert_eq!(parse_complex("1e-3-2e+1i"), Ok(Complex64::new(0.001, -20.0)));
        assert_eq!(parse_complex("1e-3i"), Ok(Complex64::new(0.0, 0.001)));
    }

    #[test]
    fn parentheses_whitespace_and_j_suffix() {
        assert_eq!(parse_complex(" (2-j) "), Ok(Complex64::new(2.0, -1.0)));
        assert_eq!(parse_complex("\t7\n"), Ok(Complex64::new(7.0, 0.0)));
    }

    #[test]
    fn empty_input() {
        assert_eq!(parse_complex(""), Err(LiteralError::Empty));
        assert_eq!(parse_complex("   "), Err(LiteralError::Empty));
        assert_eq!(parse_complex("()"), Err(LiteralError::Empty));
    }

    #[test]
    fn malformed_input() {
        for text in ["abc", "3+", "3+2", "2ii", "1+2i+3i", "3 + 2i"] {
            assert!(
                matches!(parse_complex(text), Err(LiteralError::Malformed(_))),
                "expected {:?} to be rejected",
                text
            );
        }
    }
}
