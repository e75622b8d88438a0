use num_complex::Complex64;

/// Display wrapper for a complex result: `14+0i`, `3-4i`, `0+2i`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Value(pub Complex64);

/// Format one component: integral values without a fractional part, others
/// in Rust's shortest round‑trip form.  Negative zero prints as `0`.
pub fn format_part(n: f64) -> String {
    if n == 0.0 {
        return "0".into();
    }

    if n.fract() == 0.0 && n.abs() < 1e15 {
        let mut buf: itoa::Buffer = itoa::Buffer::new();

        return buf.format(n as i64).to_owned();
    }

    n.to_string()
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Complex64 { re, im } = self.0;

        if im < 0.0 {
            write!(f, "{}-{}i", format_part(re), format_part(-im))
        } else {
            write!(f, "{}+{}i", format_part(re), format_part(im))
        }
    }
}

impl From<Complex64> for Value {
    fn from(z: Complex64) -> Self {
        Value(z)
    }
}
