use std::collections::HashMap;

/// Key of the per-item factor used when a line carries no unit.
pub const PIECE_UNIT: &str = "piece";

/// Read-only mapping from unit name to grams per unit.
///
/// Keys are stored lower-cased with single spaces, so `"Fluid  Ounce"` and
/// `"fluid ounce"` register the same unit.
#[derive(Debug, Clone, Default)]
pub struct UnitTable {
    factors: HashMap<String, f64>,
    // Longest key first, ties broken alphabetically, so "fluid ounce" is
    // tried before "fluid" and the scan order never depends on hashing.
    scan_order: Vec<String>,
}

impl UnitTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let mut table = Self::new();
        for (name, grams) in entries {
            table.insert(name.as_ref(), grams);
        }
        table
    }

    /// Register a unit. Returns the previous factor when the key existed.
    ///
    /// Factors that are not finite and positive are ignored, leaving the
    /// table unchanged.
    pub fn insert(&mut self, name: &str, grams_per_unit: f64) -> Option<f64> {
        let key = unit_key(name);
        if !is_valid_factor(grams_per_unit) {
            tracing::warn!(unit = %key, grams_per_unit, "ignoring non-positive unit factor");
            return None;
        }
        let previous = self.factors.insert(key.clone(), grams_per_unit);
        if previous.is_none() {
            self.scan_order.push(key);
            self.scan_order
                .sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        }
        previous
    }

    pub fn get(&self, unit: &str) -> Option<f64> {
        self.factors.get(&unit_key(unit)).copied()
    }

    pub fn contains(&self, unit: &str) -> bool {
        self.factors.contains_key(&unit_key(unit))
    }

    pub fn piece_factor(&self) -> Option<f64> {
        self.factors.get(PIECE_UNIT).copied()
    }

    /// Find the registered unit that `text` starts with, bounded by whitespace
    /// or end of text. Returns the unit key and the trimmed rest.
    ///
    /// `text` is expected lower-cased with collapsed whitespace.
    pub fn match_prefix<'t>(&self, text: &'t str) -> Option<(&str, &'t str)> {
        self.scan_order.iter().find_map(|key| {
            let rest = text.strip_prefix(key.as_str())?;
            match rest.chars().next() {
                None => Some((key.as_str(), rest)),
                Some(c) if c.is_whitespace() => Some((key.as_str(), rest.trim())),
                Some(_) => None,
            }
        })
    }

    /// Entries sorted by key.
    pub fn entries(&self) -> Vec<(&str, f64)> {
        let mut entries: Vec<(&str, f64)> = self
            .factors
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }
}

/// Grams-per-unit factors must be finite and greater than zero.
pub fn is_valid_factor(grams_per_unit: f64) -> bool {
    grams_per_unit.is_finite() && grams_per_unit > 0.0
}

/// Canonical form of a unit name: lower-cased, whitespace collapsed.
pub fn unit_key(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
