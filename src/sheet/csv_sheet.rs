//! Worksheet backed by a local CSV file (an exported or hand-kept copy of
//! the spreadsheet). Every cell write is flushed back to the file.

use crate::errors::AppResult;
use crate::sheet::SheetSource;
use crate::sheet::address::CellAddress;
use std::path::{Path, PathBuf};

pub struct CsvSheet {
    path: PathBuf,
    title: String,
    rows: Vec<Vec<String>>,
}

impl CsvSheet {
    pub fn open(path: &Path) -> AppResult<Self> {
        let title = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "sheet".to_string());

        let mut sheet = Self {
            path: path.to_path_buf(),
            title,
            rows: Vec::new(),
        };
        sheet.rows = sheet.read_rows()?;
        Ok(sheet)
    }

    fn read_rows(&self) -> AppResult<Vec<Vec<String>>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)?;

        // The reader skips blank lines; put them back as empty rows so a
        // row's index always matches its line in the file.
        let mut rows = Vec::new();
        let mut next_line: u64 = 1;
        for record in reader.records() {
            let record = record?;
            if let Some(line) = record.position().map(|p| p.line()) {
                while next_line < line {
                    rows.push(Vec::new());
                    next_line += 1;
                }
                let embedded: u64 = record.iter().map(|f| f.matches('\n').count() as u64).sum();
                next_line = line + embedded + 1;
            }
            rows.push(record.iter().map(|c| c.to_string()).collect());
        }
        Ok(rows)
    }

    fn write_rows(&self) -> AppResult<()> {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_path(&self.path)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl SheetSource for CsvSheet {
    fn title(&self) -> &str {
        &self.title
    }

    fn fetch_values(&mut self) -> AppResult<Vec<Vec<String>>> {
        self.rows = self.read_rows()?;
        Ok(self.rows.clone())
    }

    fn update_cell(&mut self, address: &CellAddress, value: &str) -> AppResult<()> {
        super::put_cell(&mut self.rows, address, value);
        self.write_rows()
    }
}
