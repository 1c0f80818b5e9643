// ============================================================
// TABLE
// ============================================================
// In-memory table with named, typed columns in parse order

use serde::{Deserialize, Serialize};

use super::cell::{infer_column, Cell, ColumnType};

/// A named column and its cells, one per row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub column_type: ColumnType,
    pub cells: Vec<Cell>,
}

/// Parsed tabular data. Every column holds exactly `row_count` cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Build a table from a header and raw records, inferring column types.
    ///
    /// Records shorter than the header are padded with missing values.
    pub fn from_records(headers: Vec<String>, records: &[Vec<String>]) -> Self {
        let columns = headers
            .into_iter()
            .enumerate()
            .map(|(idx, name)| {
                let raw_values: Vec<&str> = records
                    .iter()
                    .map(|record| record.get(idx).map(String::as_str).unwrap_or(""))
                    .collect();
                let (column_type, cells) = infer_column(&raw_values);
                Column {
                    name,
                    column_type,
                    cells,
                }
            })
            .collect();

        Self {
            columns,
            row_count: records.len(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Exact, case-sensitive lookup
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        self.column(column).and_then(|c| c.cells.get(row))
    }

    /// Cells of one row in column order
    pub fn row(&self, row: usize) -> Option<Vec<&Cell>> {
        if row >= self.row_count {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.cells[row]).collect())
    }

    /// Replace the column with the same name in place, or append it at the end.
    pub fn set_column(&mut self, name: &str, column_type: ColumnType, cells: Vec<Cell>) {
        debug_assert_eq!(cells.len(), self.row_count);
        match self.columns.iter_mut().find(|c| c.name == name) {
            Some(existing) => {
                existing.column_type = column_type;
                existing.cells = cells;
            }
            None => self.columns.push(Column {
                name: name.to_string(),
                column_type,
                cells,
            }),
        }
    }
}
