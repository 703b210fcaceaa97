use crate::reference::nutrients::NutrientProfile;

/// Round half away from zero to one decimal place.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Scale a per-100 g profile to `grams`, rounding every field to one
/// decimal. Totals are summed from these rounded values.
pub fn scale_profile(profile: &NutrientProfile, grams: f64) -> NutrientProfile {
    let multiplier = grams / 100.0;
    profile.map(|value| round_one_decimal(value * multiplier))
}
