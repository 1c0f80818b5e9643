// ============================================================
// CELL TYPES
// ============================================================
// Typed cell values and per-column type inference

use serde::{Deserialize, Serialize};

/// Tokens read as missing values, matching the spreadsheet/pandas defaults
const MISSING_VALUE_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A single typed value in a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Integer(i64),
    Float(f64),
    Text(String),
    Empty,
}

/// Type shared by every cell of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Integer,
    Float,
    Text,
    /// Every cell is missing
    Empty,
}

impl ColumnType {
    pub fn is_numeric(self) -> bool {
        !matches!(self, ColumnType::Text)
    }
}

impl Cell {
    /// Numeric view of the cell; `None` for text and missing values
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Integer(value) => Some(*value as f64),
            Cell::Float(value) => Some(*value),
            Cell::Text(_) | Cell::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Render the cell the way it is written back to CSV
    pub fn render(&self) -> String {
        match self {
            Cell::Integer(value) => value.to_string(),
            Cell::Float(value) => format_float(*value),
            Cell::Text(value) => value.clone(),
            Cell::Empty => String::new(),
        }
    }
}

/// Shortest round-trip form, always with a fractional part ("2.0").
/// Values below 1e-4 or from 1e16 up use a signed, two-digit-minimum
/// exponent ("1e-05", "1e+16"). NaN is written as a missing value.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return String::new();
    }
    if value.is_infinite() {
        let token = if value.is_sign_positive() { "inf" } else { "-inf" };
        return token.to_string();
    }

    let shortest = format!("{:?}", value);
    match shortest.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => shortest,
    }
}

/// Whether a raw value would be read as a number
pub fn is_numeric_text(raw: &str) -> bool {
    parse_scalar(raw).is_some()
}

fn is_missing(raw: &str) -> bool {
    raw.trim().is_empty() || MISSING_VALUE_TOKENS.contains(&raw)
}

enum Scalar {
    Integer(i64),
    Float(f64),
}

fn parse_scalar(raw: &str) -> Option<Scalar> {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return Some(Scalar::Integer(value));
    }
    trimmed.parse::<f64>().ok().map(Scalar::Float)
}

/// Infer the column type from raw values and convert them into cells.
///
/// A column is numeric only if every non-missing value parses as a number;
/// one float makes the whole column float. Anything else is kept as raw text.
pub fn infer_column(raw_values: &[&str]) -> (ColumnType, Vec<Cell>) {
    let mut saw_value = false;
    let mut saw_float = false;
    let mut scalars = Vec::with_capacity(raw_values.len());

    for raw in raw_values {
        if is_missing(raw) {
            scalars.push(None);
            continue;
        }
        saw_value = true;
        match parse_scalar(raw) {
            Some(scalar) => {
                saw_float |= matches!(scalar, Scalar::Float(_));
                scalars.push(Some(scalar));
            }
            None => return (ColumnType::Text, text_cells(raw_values)),
        }
    }

    if !saw_value {
        return (ColumnType::Empty, vec![Cell::Empty; raw_values.len()]);
    }

    let cells = scalars
        .into_iter()
        .map(|scalar| match scalar {
            None => Cell::Empty,
            Some(Scalar::Integer(value)) if saw_float => Cell::Float(value as f64),
            Some(Scalar::Integer(value)) => Cell::Integer(value),
            Some(Scalar::Float(value)) => Cell::Float(value),
        })
        .collect();

    let column_type = if saw_float {
        ColumnType::Float
    } else {
        ColumnType::Integer
    };
    (column_type, cells)
}

fn text_cells(raw_values: &[&str]) -> Vec<Cell> {
    raw_values
        .iter()
        .map(|raw| {
            if is_missing(raw) {
                Cell::Empty
            } else {
                Cell::Text((*raw).to_string())
            }
        })
        .collect()
}
