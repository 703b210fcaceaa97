use crate::reference::error::TableError;
use crate::reference::nutrients::*;
use crate::reference::units::*;
use crate::reference::validation::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Toml,
    Json,
}

impl DataFormat {
    pub fn from_path(path: &Path) -> Result<Self, TableError> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => Ok(DataFormat::Toml),
            Some("json") => Ok(DataFormat::Json),
            _ => Err(TableError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

// On-disk shape of a unit file: `[units]` with `name = grams`.
#[derive(Debug, Deserialize)]
struct UnitFile {
    #[serde(default)]
    units: HashMap<String, f64>,
}

// On-disk shape of a nutrition file: `[[ingredient]]` rows, order preserved.
#[derive(Debug, Deserialize)]
struct NutritionFile {
    #[serde(default, rename = "ingredient")]
    ingredients: Vec<IngredientRow>,
}

#[derive(Debug, Deserialize)]
struct IngredientRow {
    name: String,
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
    fiber: f64,
}

fn decode<T: for<'de> Deserialize<'de>>(
    content: &str,
    format: DataFormat,
    origin: &str,
) -> Result<T, TableError> {
    match format {
        DataFormat::Toml => toml::from_str(content).map_err(|source| TableError::Toml {
            origin: origin.to_string(),
            source,
        }),
        DataFormat::Json => serde_json::from_str(content).map_err(|source| TableError::Json {
            origin: origin.to_string(),
            source,
        }),
    }
}

fn read_file(path: &Path) -> Result<(String, DataFormat), TableError> {
    let format = DataFormat::from_path(path)?;
    let content = fs::read_to_string(path).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok((content, format))
}

pub fn load_units_from_file<P: AsRef<Path>>(
    path: P,
) -> Result<(UnitTable, ValidationResult), TableError> {
    let path = path.as_ref();
    let (content, format) = read_file(path)?;
    load_units_from_str(&content, format, &path.display().to_string())
}

/// Build a unit table from file contents. `origin` labels validation
/// issues (usually the file name).
pub fn load_units_from_str(
    content: &str,
    format: DataFormat,
    origin: &str,
) -> Result<(UnitTable, ValidationResult), TableError> {
    let file: UnitFile = decode(content, format, origin)?;
    let mut validation = ValidationResult::new();
    let mut table = UnitTable::new();

    // Sorted so duplicate resolution does not depend on map order
    let mut rows: Vec<(String, f64)> = file.units.into_iter().collect();
    rows.sort_by(|a, b| a.0.cmp(&b.0));

    for (name, grams) in rows {
        let location = Some(format!("{}: units.{}", origin, name));
        let key = unit_key(&name);

        if key.is_empty() {
            validation.add_error(DataTable::Units, "Unit name is empty".to_string(), location);
            continue;
        }
        if !is_valid_factor(grams) {
            validation.add_error(
                DataTable::Units,
                format!("Unit '{}' has non-positive factor {}", key, grams),
                location,
            );
            continue;
        }
        if table.contains(&key) {
            validation.add_warning(
                DataTable::Units,
                format!("Unit '{}' registered more than once; keeping first", key),
                location,
            );
            continue;
        }
        table.insert(&key, grams);
    }

    if table.piece_factor().is_none() {
        validation.add_warning(
            DataTable::Units,
            format!(
                "No '{}' unit registered; lines without a unit use the fallback factor",
                PIECE_UNIT
            ),
            Some(origin.to_string()),
        );
    }

    tracing::debug!(origin, units = table.len(), "loaded unit table");
    Ok((table, validation))
}

pub fn load_nutrition_from_file<P: AsRef<Path>>(
    path: P,
) -> Result<(NutritionTable, ValidationResult), TableError> {
    let path = path.as_ref();
    let (content, format) = read_file(path)?;
    load_nutrition_from_str(&content, format, &path.display().to_string())
}

/// Build a nutrition table from file contents, keeping row order as the
/// table's enumeration order.
pub fn load_nutrition_from_str(
    content: &str,
    format: DataFormat,
    origin: &str,
) -> Result<(NutritionTable, ValidationResult), TableError> {
    let file: NutritionFile = decode(content, format, origin)?;
    let mut validation = ValidationResult::new();
    let mut table = NutritionTable::new();

    for (i, row) in file.ingredients.into_iter().enumerate() {
        let location = Some(format!("{}: ingredient[{}]", origin, i));
        let name = row.name.trim().to_lowercase();

        if name.is_empty() {
            validation.add_error(DataTable::Nutrition, "Ingredient name is empty".to_string(), location);
            continue;
        }

        let profile = NutrientProfile::new(row.calories, row.protein, row.carbs, row.fat, row.fiber);
        let bad: Vec<&str> = profile
            .fields()
            .iter()
            .filter(|(_, v)| !v.is_finite() || *v < 0.0)
            .map(|(field, _)| *field)
            .collect();
        if !bad.is_empty() {
            validation.add_error(
                DataTable::Nutrition,
                format!(
                    "Ingredient '{}' has invalid values for: {}",
                    name,
                    bad.join(", ")
                ),
                location,
            );
            continue;
        }

        if !table.push(&name, profile) {
            validation.add_warning(
                DataTable::Nutrition,
                format!("Ingredient '{}' listed more than once; keeping first", name),
                location,
            );
        }
    }

    validation.merge(validate_nutrition_order(&table));

    tracing::debug!(origin, ingredients = table.len(), "loaded nutrition table");
    Ok((table, validation))
}

/// Warn about entries the substring tier can never select because an
/// earlier key is contained in them (`chicken` listed before
/// `chicken breast`). Such entries stay reachable by exact name only.
pub fn validate_nutrition_order(table: &NutritionTable) -> ValidationResult {
    let mut validation = ValidationResult::new();
    let entries = table.entries();

    for (j, later) in entries.iter().enumerate() {
        if let Some(earlier) = entries[..j]
            .iter()
            .find(|earlier| later.name.contains(earlier.name.as_str()))
        {
            validation.add_warning(
                DataTable::Nutrition,
                format!(
                    "'{}' is shadowed by earlier entry '{}'; it only matches by exact name",
                    later.name, earlier.name
                ),
                Some(format!("ingredient[{}]", j)),
            );
        }
    }

    validation
}
