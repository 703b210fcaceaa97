use serde::Serialize;
use std::fmt;

/// Issues collected while loading reference data. Entries with errors are
/// skipped; warnings leave the entry in place. Every issue names the table
/// it came from so reports can say how much of each table was dropped.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub table: DataTable,
    pub severity: IssueSeverity,
    pub message: String,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataTable {
    Units,
    Nutrition,
}

impl DataTable {
    /// Noun for `count` entries of this table: "1 unit", "3 ingredients".
    fn entries(self, count: usize) -> String {
        let noun = match (self, count) {
            (DataTable::Units, 1) => "unit",
            (DataTable::Units, _) => "units",
            (DataTable::Nutrition, 1) => "ingredient",
            (DataTable::Nutrition, _) => "ingredients",
        };
        format!("{} {}", count, noun)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Record an entry of `table` that was left out of the loaded table.
    pub fn add_error(&mut self, table: DataTable, message: String, location: Option<String>) {
        tracing::warn!(?table, location = location.as_deref(), "{}", message);
        self.errors.push(ValidationIssue {
            table,
            severity: IssueSeverity::Error,
            message,
            location,
        });
    }

    pub fn add_warning(&mut self, table: DataTable, message: String, location: Option<String>) {
        self.warnings.push(ValidationIssue {
            table,
            severity: IssueSeverity::Warning,
            message,
            location,
        });
    }

    /// Fold another result into this one, keeping issue order.
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_issues(&self) -> bool {
        !self.errors.is_empty() || !self.warnings.is_empty()
    }

    /// Number of `table` entries skipped because of an error.
    pub fn skipped(&self, table: DataTable) -> usize {
        self.errors.iter().filter(|issue| issue.table == table).count()
    }

    /// "1 unit and 2 ingredients" style summary of skipped entries.
    pub fn skipped_summary(&self) -> String {
        format!(
            "{} and {}",
            DataTable::Units.entries(self.skipped(DataTable::Units)),
            DataTable::Nutrition.entries(self.skipped(DataTable::Nutrition))
        )
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.errors.is_empty() {
            writeln!(f, "Skipped {}:", self.skipped_summary())?;
            for error in &self.errors {
                write_issue(f, error)?;
            }
        }

        if !self.warnings.is_empty() {
            writeln!(f, "Warnings:")?;
            for warning in &self.warnings {
                write_issue(f, warning)?;
            }
        }

        Ok(())
    }
}

fn write_issue(f: &mut fmt::Formatter<'_>, issue: &ValidationIssue) -> fmt::Result {
    match &issue.location {
        Some(loc) => writeln!(f, "  [{}] {}", loc, issue.message),
        None => writeln!(f, "  {}", issue.message),
    }
}
