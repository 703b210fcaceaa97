use crate::ingredient::matcher::MatchResult;
use crate::ingredient::parser::ParsedLine;
use crate::recipe::scaler::scale_profile;
use crate::reference::nutrients::NutrientProfile;
use serde::Serialize;

/// Outcome for one ingredient line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineResult {
    pub original_text: String,
    pub quantity: f64,
    pub unit: Option<String>,
    pub normalized_name: String,
    pub grams: f64,
    pub matched: MatchResult,
    /// Present iff `matched` is `Found`.
    pub scaled_profile: Option<NutrientProfile>,
}

impl LineResult {
    pub fn new(parsed: ParsedLine, grams: f64, matched: MatchResult) -> Self {
        let scaled_profile = matched.profile().map(|profile| scale_profile(profile, grams));
        Self {
            original_text: parsed.original_text,
            quantity: parsed.quantity,
            unit: parsed.unit,
            normalized_name: parsed.normalized_name,
            grams,
            matched,
            scaled_profile,
        }
    }

    pub fn is_found(&self) -> bool {
        self.matched.is_found()
    }
}

/// Recipe-level sums over matched lines plus match counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub matched_count: usize,
    pub total_count: usize,
}

impl Totals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one line in. Unmatched lines count toward `total_count` only.
    pub fn add_line(&mut self, line: &LineResult) {
        self.total_count += 1;
        if let Some(scaled) = &line.scaled_profile {
            self.matched_count += 1;
            self.calories += scaled.calories;
            self.protein += scaled.protein;
            self.carbs += scaled.carbs;
            self.fat += scaled.fat;
            self.fiber += scaled.fiber;
        }
    }

    pub fn from_lines<'r, I>(lines: I) -> Self
    where
        I: IntoIterator<Item = &'r LineResult>,
    {
        lines.into_iter().fold(Self::new(), |mut totals, line| {
            totals.add_line(line);
            totals
        })
    }

    pub fn nutrients(&self) -> NutrientProfile {
        NutrientProfile::new(self.calories, self.protein, self.carbs, self.fat, self.fiber)
    }

    pub fn unmatched_count(&self) -> usize {
        self.total_count - self.matched_count
    }

    /// True when at least one line had no nutrition match; callers show a
    /// note that totals are partial.
    pub fn has_unmatched(&self) -> bool {
        self.matched_count < self.total_count
    }
}
