//! Reference data shipped with the crate, embedded at build time.

use crate::reference::error::TableError;
use crate::reference::loader::*;
use crate::reference::nutrients::NutritionTable;
use crate::reference::units::UnitTable;
use crate::reference::validation::ValidationResult;

pub static UNITS_TOML: &str = include_str!("../../data/units.toml");
pub static NUTRITION_TOML: &str = include_str!("../../data/nutrition.toml");
pub static EXAMPLE_RECIPE: &str = include_str!("../../data/example_recipe.txt");

pub fn unit_table() -> Result<(UnitTable, ValidationResult), TableError> {
    load_units_from_str(UNITS_TOML, DataFormat::Toml, "builtin units.toml")
}

pub fn nutrition_table() -> Result<(NutritionTable, ValidationResult), TableError> {
    load_nutrition_from_str(NUTRITION_TOML, DataFormat::Toml, "builtin nutrition.toml")
}
