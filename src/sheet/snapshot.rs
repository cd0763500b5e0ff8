use crate::sheet::address::{CellAddress, column_index};

/// Full-grid copy of the worksheet, read once per run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    rows: Vec<Vec<String>>,
}

impl Snapshot {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Cell value; cells outside a ragged grid read as empty.
    pub fn cell(&self, address: &CellAddress) -> &str {
        self.rows
            .get(address.row_index())
            .and_then(|r| r.get(address.column_index()))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Whole column, top to bottom, with trailing empty cells trimmed.
    pub fn column(&self, letters: &str) -> Vec<String> {
        let idx = column_index(letters);
        let mut cells: Vec<String> = self
            .rows
            .iter()
            .map(|r| r.get(idx).cloned().unwrap_or_default())
            .collect();

        while cells.last().is_some_and(|c| c.is_empty()) {
            cells.pop();
        }
        cells
    }
}
