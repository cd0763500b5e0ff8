use crate::errors::AppResult;
use crate::sheet::SheetSource;
use crate::sheet::address::CellAddress;

/// In-process worksheet, for tests and callers that build the grid
/// themselves.
#[derive(Debug, Clone, Default)]
pub struct MemorySheet {
    pub rows: Vec<Vec<String>>,
    /// Every write, in order.
    pub writes: Vec<(String, String)>,
}

impl MemorySheet {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows,
            writes: Vec::new(),
        }
    }

    /// Build a grid from string literals.
    pub fn from_rows(rows: &[&[&str]]) -> Self {
        Self::new(
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    pub fn value(&self, address: &str) -> Option<&str> {
        let addr: CellAddress = address.parse().ok()?;
        self.rows
            .get(addr.row_index())?
            .get(addr.column_index())
            .map(String::as_str)
    }
}

impl SheetSource for MemorySheet {
    fn title(&self) -> &str {
        "memory"
    }

    fn fetch_values(&mut self) -> AppResult<Vec<Vec<String>>> {
        Ok(self.rows.clone())
    }

    fn update_cell(&mut self, address: &CellAddress, value: &str) -> AppResult<()> {
        super::put_cell(&mut self.rows, address, value);
        self.writes.push((address.to_string(), value.to_string()));
        Ok(())
    }
}
