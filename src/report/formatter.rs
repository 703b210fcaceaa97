//! Plain-text and JSON renderings of a calculation for the command line.

use crate::ingredient::matcher::MatchResult;
use crate::recipe::aggregator::{LineResult, Totals};
use crate::recipe::calculator::Calculation;
use crate::reference::units::UnitTable;
use std::fmt::Write;

pub const UNMATCHED_NOTE: &str = "Note: Some ingredients were not found in the nutrition table. \
Try more common names or check spelling. The totals only include matched ingredients.";

pub fn format_calculation_json(calculation: &Calculation) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(calculation)
}

pub fn format_calculation_text(calculation: &Calculation) -> String {
    let mut out = String::new();
    write_totals(&mut out, &calculation.totals);

    let _ = writeln!(
        out,
        "\nIngredient Details ({}/{} matched)",
        calculation.totals.matched_count, calculation.totals.total_count
    );
    for line in &calculation.lines {
        write_line(&mut out, line);
    }

    if calculation.totals.has_unmatched() {
        let _ = writeln!(out, "\n{}", UNMATCHED_NOTE);
    }
    out
}

fn write_totals(out: &mut String, totals: &Totals) {
    let _ = writeln!(out, "Total Calories: {}", totals.calories.round());
    let _ = writeln!(
        out,
        "Protein: {:.1}g  Carbs: {:.1}g  Fat: {:.1}g  Fiber: {:.1}g",
        totals.protein, totals.carbs, totals.fat, totals.fiber
    );
}

fn write_line(out: &mut String, line: &LineResult) {
    match (&line.matched, &line.scaled_profile) {
        (MatchResult::Found { canonical_name, .. }, Some(scaled)) => {
            let _ = writeln!(out, "  {}", canonical_name);
            let _ = writeln!(out, "    {}g - {}", line.grams, line.original_text);
            let _ = writeln!(
                out,
                "    {:.1} cal | {:.1}g protein | {:.1}g carbs | {:.1}g fat | {:.1}g fiber",
                scaled.calories, scaled.protein, scaled.carbs, scaled.fat, scaled.fiber
            );
        }
        _ => {
            let _ = writeln!(out, "  Unknown Ingredient");
            let _ = writeln!(out, "    {}", line.original_text);
            let _ = writeln!(out, "    Not in the nutrition table; not included in totals.");
        }
    }
}

/// One-line description of a lookup result.
pub fn format_lookup(normalized_name: &str, result: &MatchResult) -> String {
    match result {
        MatchResult::Found {
            canonical_name,
            tier,
            ..
        } => format!(
            "'{}' -> '{}' ({} match)",
            normalized_name,
            canonical_name,
            tier.label()
        ),
        MatchResult::NotFound => format!("'{}' -> not found", normalized_name),
    }
}

pub fn format_units(units: &UnitTable) -> String {
    let mut out = String::new();
    for (name, grams) in units.entries() {
        let _ = writeln!(out, "{:<14} {} g", name, grams);
    }
    out
}
