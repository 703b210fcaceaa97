use crate::ingredient::mass::MassConverter;
use crate::ingredient::normalizer::normalize_name;
use crate::reference::units::UnitTable;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    /// Number at the start of the line, followed by whitespace, a letter
    /// (as in "150g") or nothing.
    /// Examples: "2 cups rice", "150g chicken", "1.5 tbsp oil"
    static ref LEADING_NUMBER: Regex = Regex::new(
        r"^(\d+(?:\.\d+)?)(?:\s+(.*)|(\p{Alphabetic}.*))?$"
    ).unwrap();

    /// Name, then a number, then one or two words at the end of the line.
    /// Examples: "chicken breast 150 g", "milk 2 fluid ounces"
    static ref TRAILING_QUANTITY: Regex = Regex::new(
        r"^(.+?)\s+(\d+(?:\.\d+)?)\s*(\p{Alphabetic}+(?:\s\p{Alphabetic}+)?)$"
    ).unwrap();
}

/// One ingredient line split into its parts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedLine {
    /// Trimmed, lower-cased input line.
    pub original_text: String,
    /// Always greater than zero.
    pub quantity: f64,
    /// A key of the unit table, or `None` when the line has no known unit.
    pub unit: Option<String>,
    pub raw_name: String,
    pub normalized_name: String,
    pub shape: LineShape,
}

/// Fields a shape pulls out of a line, before name normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct LineFields {
    pub quantity: f64,
    pub unit: Option<String>,
    pub raw_name: String,
}

/// The line layouts the parser understands, tried in [`LineShape::PRIORITY`]
/// order. The first shape that accepts a line decides how it is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineShape {
    /// "2 cups rice", "150g chicken", "2 eggs"
    LeadingNumber,
    /// "rice 2 cups"; only accepted when the trailing words are a known unit
    TrailingQuantity,
    /// "salt"; quantity 1, no unit
    BareName,
}

impl LineShape {
    pub const PRIORITY: [LineShape; 3] = [
        LineShape::LeadingNumber,
        LineShape::TrailingQuantity,
        LineShape::BareName,
    ];

    /// Try to read `line` in this shape. `line` must already be trimmed,
    /// lower-cased and whitespace-collapsed.
    pub fn extract(self, line: &str, units: &UnitTable) -> Option<LineFields> {
        match self {
            LineShape::LeadingNumber => {
                let caps = LEADING_NUMBER.captures(line)?;
                let quantity = parse_quantity(&caps[1])?;
                let rest = caps
                    .get(2)
                    .or_else(|| caps.get(3))
                    .map(|m| m.as_str())
                    .unwrap_or("");

                let (unit, raw_name) = match units.match_prefix(rest) {
                    Some((unit, name)) => (Some(unit.to_string()), name.to_string()),
                    None => (None, rest.to_string()),
                };
                Some(LineFields {
                    quantity,
                    unit,
                    raw_name,
                })
            }
            LineShape::TrailingQuantity => {
                let caps = TRAILING_QUANTITY.captures(line)?;
                let unit = &caps[3];
                // An unknown trailing word is not a unit; give up on this
                // shape entirely rather than keep half of it.
                if !units.contains(unit) {
                    return None;
                }
                Some(LineFields {
                    quantity: parse_quantity(&caps[2])?,
                    unit: Some(unit.to_string()),
                    raw_name: caps[1].trim().to_string(),
                })
            }
            LineShape::BareName => Some(LineFields {
                quantity: 1.0,
                unit: None,
                raw_name: line.to_string(),
            }),
        }
    }
}

/// Zero, overflowing or otherwise unusable numbers are not quantities.
fn parse_quantity(text: &str) -> Option<f64> {
    text.parse::<f64>()
        .ok()
        .filter(|q| q.is_finite() && *q > 0.0)
}

/// Parse one raw ingredient line. Returns `None` only for blank input;
/// every other line yields a result through the bare-name fallback.
pub fn parse_line(line: &str, units: &UnitTable) -> Option<ParsedLine> {
    parse_line_with(line, &MassConverter::new(units))
}

/// Like [`parse_line`], but also rejects a shape whose quantity and unit
/// would convert to a non-finite mass under `converter` ("1e306 kg" style
/// overflow). Such lines fall through to the next shape.
pub fn parse_line_with(line: &str, converter: &MassConverter<'_>) -> Option<ParsedLine> {
    let original_text = line.trim().to_lowercase();
    if original_text.is_empty() {
        return None;
    }

    let working = original_text.split_whitespace().collect::<Vec<_>>().join(" ");

    LineShape::PRIORITY.iter().find_map(|&shape| {
        let fields = shape.extract(&working, converter.units())?;
        if !converter
            .to_grams(fields.quantity, fields.unit.as_deref())
            .is_finite()
        {
            tracing::debug!(line = %working, ?shape, "quantity overflows grams, trying next shape");
            return None;
        }
        let normalized_name = normalize_name(&fields.raw_name);

        tracing::debug!(
            line = %working,
            ?shape,
            quantity = fields.quantity,
            unit = fields.unit.as_deref(),
            name = %normalized_name,
            "parsed ingredient line"
        );

        Some(ParsedLine {
            original_text: original_text.clone(),
            quantity: fields.quantity,
            unit: fields.unit,
            raw_name: fields.raw_name,
            normalized_name,
            shape,
        })
    })
}
