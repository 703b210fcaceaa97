use crate::ingredient::mass::{MassConverter, DEFAULT_FALLBACK_GRAMS};
use crate::ingredient::matcher::{IngredientMatcher, DEFAULT_MIN_WORD_LENGTH};
use crate::ingredient::parser::parse_line_with;
use crate::recipe::aggregator::{LineResult, Totals};
use crate::reference::defaults;
use crate::reference::error::TableError;
use crate::reference::nutrients::NutritionTable;
use crate::reference::units::UnitTable;
use crate::reference::validation::ValidationResult;
use serde::Serialize;

/// Tunables for a calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculatorOptions {
    pub min_word_length: usize,
    pub fallback_grams: f64,
}

impl Default for CalculatorOptions {
    fn default() -> Self {
        Self {
            min_word_length: DEFAULT_MIN_WORD_LENGTH,
            fallback_grams: DEFAULT_FALLBACK_GRAMS,
        }
    }
}

/// Totals plus the per-line detail list, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Calculation {
    pub totals: Totals,
    pub lines: Vec<LineResult>,
}

/// Run one raw line through parse, normalize, convert, match and scale.
/// Returns `None` for blank lines.
pub fn evaluate_line(
    line: &str,
    units: &UnitTable,
    nutrition: &NutritionTable,
    options: &CalculatorOptions,
) -> Option<LineResult> {
    let converter = MassConverter::with_fallback(units, options.fallback_grams);
    let parsed = parse_line_with(line, &converter)?;
    let grams = converter.to_grams(parsed.quantity, parsed.unit.as_deref());
    let matched = IngredientMatcher::with_min_word_length(nutrition, options.min_word_length)
        .find(&parsed.normalized_name);

    tracing::debug!(
        line = %parsed.original_text,
        grams,
        found = matched.is_found(),
        "evaluated ingredient line"
    );

    Some(LineResult::new(parsed, grams, matched))
}

/// Evaluate every non-blank line in order and fold the results.
pub fn aggregate_lines<I, S>(
    lines: I,
    units: &UnitTable,
    nutrition: &NutritionTable,
    options: &CalculatorOptions,
) -> Calculation
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let lines: Vec<LineResult> = lines
        .into_iter()
        .filter_map(|line| evaluate_line(line.as_ref(), units, nutrition, options))
        .collect();
    let totals = Totals::from_lines(&lines);
    Calculation { totals, lines }
}

/// Owns the two reference tables and turns recipe text into a
/// [`Calculation`]. Holds no mutable state, so one instance can serve
/// concurrent callers.
#[derive(Debug, Clone)]
pub struct Calculator {
    units: UnitTable,
    nutrition: NutritionTable,
    options: CalculatorOptions,
}

impl Calculator {
    pub fn new(units: UnitTable, nutrition: NutritionTable) -> Self {
        Self::with_options(units, nutrition, CalculatorOptions::default())
    }

    pub fn with_options(
        units: UnitTable,
        nutrition: NutritionTable,
        options: CalculatorOptions,
    ) -> Self {
        Self {
            units,
            nutrition,
            options,
        }
    }

    /// Calculator over the embedded reference data.
    pub fn builtin() -> Result<(Self, ValidationResult), TableError> {
        let (units, mut validation) = defaults::unit_table()?;
        let (nutrition, nutrition_validation) = defaults::nutrition_table()?;
        validation.merge(nutrition_validation);
        Ok((Self::new(units, nutrition), validation))
    }

    pub fn units(&self) -> &UnitTable {
        &self.units
    }

    pub fn nutrition(&self) -> &NutritionTable {
        &self.nutrition
    }

    pub fn options(&self) -> &CalculatorOptions {
        &self.options
    }

    pub fn matcher(&self) -> IngredientMatcher<'_> {
        IngredientMatcher::with_min_word_length(&self.nutrition, self.options.min_word_length)
    }

    pub fn evaluate_line(&self, line: &str) -> Option<LineResult> {
        evaluate_line(line, &self.units, &self.nutrition, &self.options)
    }

    /// Split `text` into lines and evaluate them all. Blank lines are
    /// skipped; nothing aborts the batch.
    pub fn calculate(&self, text: &str) -> Calculation {
        aggregate_lines(text.lines(), &self.units, &self.nutrition, &self.options)
    }
}
