// ============================================================
// COLUMN DERIVATION
// ============================================================
// Apply a DerivedColumn rule to a parsed table

use crate::domain::csv::{is_numeric_text, Cell, ColumnType, DerivedColumn, Table};
use crate::domain::error::AppError;

/// Outcome of applying a rule to one table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Derivation {
    Applied,
    /// One of the source columns is absent; the table is untouched
    Skipped,
}

/// Compute `rule.output` for every row when both source columns exist.
///
/// Source columns must be numeric. Rows with a missing source value get a
/// missing result.
pub fn derive_column(table: &mut Table, rule: &DerivedColumn) -> Result<Derivation, AppError> {
    let numerator = table.column(&rule.numerator);
    let denominator = table.column(&rule.denominator);
    let (numerator, denominator) = match (numerator, denominator) {
        (Some(numerator), Some(denominator)) => (numerator, denominator),
        _ => return Ok(Derivation::Skipped),
    };

    for column in [denominator, numerator] {
        if !column.column_type.is_numeric() {
            return Err(non_numeric_error(&column.name, &column.cells));
        }
    }

    let cells: Vec<Cell> = numerator
        .cells
        .iter()
        .zip(&denominator.cells)
        .map(|(n, d)| match (n.as_f64(), d.as_f64()) {
            (Some(n), Some(d)) => Cell::Float(rule.compute(n, d)),
            _ => Cell::Empty,
        })
        .collect();

    let column_type = if cells.iter().all(Cell::is_empty) {
        ColumnType::Empty
    } else {
        ColumnType::Float
    };
    table.set_column(&rule.output, column_type, cells);

    Ok(Derivation::Applied)
}

fn non_numeric_error(name: &str, cells: &[Cell]) -> AppError {
    // A text column keeps its numeric-looking values as text too.
    let offending = cells.iter().enumerate().find_map(|(row, cell)| match cell {
        Cell::Text(value) if !is_numeric_text(value) => Some((row, value.as_str())),
        _ => None,
    });

    match offending {
        Some((row, value)) => AppError::TypeError(format!(
            "column '{}' must be numeric, found '{}' in row {}",
            name,
            value,
            row + 1
        )),
        None => AppError::TypeError(format!("column '{}' must be numeric", name)),
    }
}
