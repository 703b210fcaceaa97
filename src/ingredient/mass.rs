use crate::reference::units::{is_valid_factor, UnitTable};

/// Grams per unit assumed when a unit is unknown or no piece factor exists.
pub const DEFAULT_FALLBACK_GRAMS: f64 = 100.0;

/// Converts a parsed quantity and unit into grams. Never fails: missing
/// data degrades to the fallback factor.
#[derive(Debug, Clone, Copy)]
pub struct MassConverter<'a> {
    units: &'a UnitTable,
    fallback_grams: f64,
}

impl<'a> MassConverter<'a> {
    pub fn new(units: &'a UnitTable) -> Self {
        Self {
            units,
            fallback_grams: DEFAULT_FALLBACK_GRAMS,
        }
    }

    /// A fallback that is not finite and positive is replaced by
    /// [`DEFAULT_FALLBACK_GRAMS`].
    pub fn with_fallback(units: &'a UnitTable, fallback_grams: f64) -> Self {
        let fallback_grams = if is_valid_factor(fallback_grams) {
            fallback_grams
        } else {
            tracing::warn!(fallback_grams, "invalid fallback factor, using default");
            DEFAULT_FALLBACK_GRAMS
        };
        Self {
            units,
            fallback_grams,
        }
    }

    pub fn units(&self) -> &'a UnitTable {
        self.units
    }

    pub fn fallback_grams(&self) -> f64 {
        self.fallback_grams
    }

    /// Grams per one `unit`, or per piece when `unit` is `None`.
    pub fn factor(&self, unit: Option<&str>) -> f64 {
        match unit {
            Some(unit) => self.units.get(unit).unwrap_or_else(|| {
                tracing::debug!(unit, fallback = self.fallback_grams, "unknown unit");
                self.fallback_grams
            }),
            None => self.units.piece_factor().unwrap_or(self.fallback_grams),
        }
    }

    pub fn to_grams(&self, quantity: f64, unit: Option<&str>) -> f64 {
        quantity * self.factor(unit)
    }
}

/// Free-function form of [`MassConverter::to_grams`] with the default
/// fallback.
pub fn to_grams(quantity: f64, unit: Option<&str>, units: &UnitTable) -> f64 {
    MassConverter::new(units).to_grams(quantity, unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units() -> UnitTable {
        UnitTable::from_entries([("g", 1.0), ("cup", 240.0), ("tsp", 4.2), ("piece", 50.0)])
    }

    #[test]
    fn test_registered_unit_multiplies_exactly() {
        let units = units();
        for quantity in [0.25, 1.0, 1.5, 3.0, 150.0] {
            assert_eq!(to_grams(quantity, Some("tsp"), &units), quantity * 4.2);
            assert_eq!(to_grams(quantity, Some("cup"), &units), quantity * 240.0);
        }
    }

    #[test]
    fn test_no_unit_uses_piece_factor() {
        assert_eq!(to_grams(2.0, None, &units()), 100.0);
    }

    #[test]
    fn test_no_unit_without_piece_uses_fallback() {
        let units = UnitTable::from_entries([("g", 1.0)]);
        assert_eq!(to_grams(2.0, None, &units), 200.0);
    }

    #[test]
    fn test_unknown_unit_uses_fallback() {
        assert_eq!(to_grams(3.0, Some("handful"), &units()), 300.0);
    }

    #[test]
    fn test_custom_fallback() {
        let empty = UnitTable::new();
        let converter = MassConverter::with_fallback(&empty, 80.0);
        assert_eq!(converter.to_grams(2.0, Some("bunch")), 160.0);
        assert_eq!(converter.to_grams(1.0, None), 80.0);
    }

    #[test]
    fn test_non_positive_fallback_is_replaced() {
        let empty = UnitTable::new();
        for bad in [-50.0, 0.0, f64::NAN, f64::INFINITY] {
            let converter = MassConverter::with_fallback(&empty, bad);
            assert_eq!(converter.fallback_grams(), DEFAULT_FALLBACK_GRAMS);
            assert_eq!(converter.to_grams(2.0, None), 200.0);
            assert_eq!(converter.to_grams(1.0, Some("bunch")), 100.0);
        }
    }
}
