use num_complex::Complex64;
use std::collections::HashMap;

/// Per‑session variable bindings.  Grow‑only: a name is bound at most once
/// and never rebound or removed.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    values: HashMap<String, Complex64>,
}

impl Bindings {
    pub fn new() -> Self {
        Bindings {
            values: HashMap::new(),
        }
    }

    /// Bind `name` unless it is already bound; returns the value now bound.
    pub fn define(&mut self, name: &str, value: Complex64) -> Complex64 {
        *self.values.entry(name.to_string()).or_insert(value)
    }

    pub fn get(&self, name: &str) -> Option<Complex64> {
        self.values.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All bindings, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Complex64)> {
        let mut entries: Vec<(&str, Complex64)> =
            self.values.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries.into_iter()
    }
}
