//! Value coercers.
//!
//! Each coercer takes one cell and returns either a typed cell or
//! `None` ("could not coerce"). Coercers never look at other cells
//! and never error. Already-typed cells pass through unchanged so
//! that re-running a normalizer on its own output is a no-op.

use chrono::{NaiveDate, NaiveDateTime};
use mrdc_model::CellValue;

/// Date formats accepted for single-column date coercion, tried in
/// order. Anything else is a coercion failure, not a best-effort
/// guess.
const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%Y %B %d", "%d %B %Y"];

/// Pattern for composite date-time assembly.
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Grams per ounce.
const OZ_GRAMS: f64 = 28.3495;

/// Trim surrounding whitespace. Numeric-looking cells are
/// stringified (card numbers arrive as integers from some sources).
pub fn trim_text(cell: &CellValue) -> Option<CellValue> {
    match cell {
        CellValue::Text(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(CellValue::Text(trimmed.to_string()))
            }
        }
        CellValue::Int(value) => Some(CellValue::Text(value.to_string())),
        CellValue::Float(value) => Some(CellValue::Text(format_numeric(*value))),
        CellValue::Missing => None,
        other => Some(other.clone()),
    }
}

/// Trim and capitalize: first character uppercased, the rest lowered.
pub fn capitalize(cell: &CellValue) -> Option<CellValue> {
    let trimmed = trim_text(cell)?;
    let CellValue::Text(value) = trimmed else {
        return Some(trimmed);
    };
    let mut chars = value.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => value,
    };
    Some(CellValue::Text(capitalized))
}

/// Parse to floating point. Handles thousands separators and
/// surrounding whitespace; non-numeric content fails.
pub fn parse_number(cell: &CellValue) -> Option<CellValue> {
    match cell {
        CellValue::Float(value) => Some(CellValue::Float(*value)),
        CellValue::Int(value) => Some(CellValue::Float(*value as f64)),
        CellValue::Text(value) => parse_f64(value).map(CellValue::Float),
        _ => None,
    }
}

/// Parse to integer. Integral floats are accepted; fractional values
/// fail rather than truncate.
pub fn parse_integer(cell: &CellValue) -> Option<CellValue> {
    match cell {
        CellValue::Int(value) => Some(CellValue::Int(*value)),
        CellValue::Float(value) if value.fract() == 0.0 => Some(CellValue::Int(*value as i64)),
        CellValue::Text(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed
                .parse::<i64>()
                .ok()
                .map(CellValue::Int)
                .or_else(|| parse_integer(&CellValue::Float(parse_f64(trimmed)?)))
        }
        _ => None,
    }
}

/// Parse a date against the accepted formats.
///
/// Also accepts the composite `YYYY-MM-DD HH:MM:SS` pattern so that
/// already-assembled date-times survive re-normalization from text.
pub fn parse_date(cell: &CellValue) -> Option<CellValue> {
    match cell {
        CellValue::Date(value) => Some(CellValue::Date(*value)),
        CellValue::DateTime(value) => Some(CellValue::DateTime(*value)),
        CellValue::Text(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return None;
            }
            for format in DATE_FORMATS {
                if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                    return Some(CellValue::Date(date));
                }
            }
            NaiveDateTime::parse_from_str(trimmed, DATETIME_FORMAT)
                .ok()
                .map(CellValue::DateTime)
        }
        _ => None,
    }
}

/// Assemble a date-time from four separate cells joined with fixed
/// separators and parsed strictly as `YYYY-MM-DD HH:MM:SS`.
///
/// Any missing or malformed component fails the whole composite; an
/// out-of-range month or day is rejected by the parse itself.
pub fn parse_composite_datetime(
    year: &CellValue,
    month: &CellValue,
    day: &CellValue,
    time: &CellValue,
) -> Option<CellValue> {
    let assembled = format!(
        "{}-{}-{} {}",
        component_text(year)?,
        component_text(month)?,
        component_text(day)?,
        component_text(time)?,
    );
    NaiveDateTime::parse_from_str(&assembled, DATETIME_FORMAT)
        .ok()
        .map(CellValue::DateTime)
}

/// Convert a weight to kilograms.
///
/// Unit tokens are matched by substring containment, so the check
/// order is load-bearing: `kg` before `g`, otherwise every kilogram
/// value would be read as grams. Order: kg, g, ml, oz, then no unit.
/// A unit-less value (including an already-numeric cell) is taken as
/// already being in kilograms.
pub fn parse_weight_kg(cell: &CellValue) -> Option<CellValue> {
    let text = match cell {
        CellValue::Float(value) => return Some(CellValue::Float(*value)),
        CellValue::Int(value) => return Some(CellValue::Float(*value as f64)),
        CellValue::Text(value) => value.trim().to_lowercase(),
        _ => return None,
    };
    let (stripped, scale) = if text.contains("kg") {
        (text.replace("kg", ""), 1.0)
    } else if text.contains('g') {
        (text.replace('g', ""), 1.0 / 1000.0)
    } else if text.contains("ml") {
        // Density assumption: 1 ml ~ 1 g.
        (text.replace("ml", ""), 1.0 / 1000.0)
    } else if text.contains("oz") {
        (text.replace("oz", ""), OZ_GRAMS / 1000.0)
    } else {
        (text, 1.0)
    };
    let value = stripped.trim().parse::<f64>().ok()?;
    Some(CellValue::Float(value * scale))
}

/// Currency symbols recognised by [`parse_currency`].
const CURRENCY_SYMBOLS: [char; 3] = ['£', '$', '€'];

/// Strip a known currency symbol and parse the remainder.
///
/// A text value without any known symbol fails; an already-numeric
/// cell passes through (its symbol was stripped on a previous run).
pub fn parse_currency(cell: &CellValue) -> Option<CellValue> {
    match cell {
        CellValue::Float(value) => Some(CellValue::Float(*value)),
        CellValue::Int(value) => Some(CellValue::Float(*value as f64)),
        CellValue::Text(value) => {
            let symbol = CURRENCY_SYMBOLS.iter().find(|symbol| value.contains(**symbol))?;
            let remainder: String = value.chars().filter(|ch| ch != symbol).collect();
            parse_f64(&remainder).map(CellValue::Float)
        }
        _ => None,
    }
}

/// Parse a string to f64, tolerating thousands separators and
/// whitespace.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let cleaned = trimmed.replace([',', ' ', '\u{a0}'], "");
    cleaned.parse().ok()
}

/// Minimal numeric rendering: integral floats print without a
/// trailing `.0`.
pub fn format_numeric(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn component_text(cell: &CellValue) -> Option<String> {
    match cell {
        CellValue::Text(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        CellValue::Int(value) => Some(value.to_string()),
        _ => None,
    }
}
