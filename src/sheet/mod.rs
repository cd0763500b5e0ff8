//! External worksheet boundary.
//!
//! The core only needs four things from a worksheet: open it, read the
//! whole grid, read a cell by address and write a cell by address. Reads
//! always go through the in-memory [`Snapshot`] taken at the start of a
//! run; writes go straight to the source.

pub mod address;
pub mod csv_sheet;
pub mod google;
pub mod layout;
pub mod memory;
pub mod snapshot;

use crate::config::{Config, SheetBackend};
use crate::core::segmenter::{self, GroupRanges};
use crate::errors::{AppError, AppResult};
use address::CellAddress;
use snapshot::Snapshot;

pub trait SheetSource {
    /// Worksheet title, for messages.
    fn title(&self) -> &str;

    /// Read the full grid as rows of string cells.
    fn fetch_values(&mut self) -> AppResult<Vec<Vec<String>>>;

    /// Write a single cell.
    fn update_cell(&mut self, address: &CellAddress, value: &str) -> AppResult<()>;
}

/// Store `value` into a row-major grid, growing it as needed.
pub(crate) fn put_cell(rows: &mut Vec<Vec<String>>, address: &CellAddress, value: &str) {
    let (r, c) = (address.row_index(), address.column_index());
    if rows.len() <= r {
        rows.resize_with(r + 1, Vec::new);
    }
    let row = &mut rows[r];
    if row.len() <= c {
        row.resize(c + 1, String::new());
    }
    row[c] = value.to_string();
}

/// Open the worksheet selected by the configuration.
pub fn open_from_config(cfg: &Config) -> AppResult<Box<dyn SheetSource>> {
    match cfg.sheet.backend {
        SheetBackend::Csv => {
            let path = cfg.csv_path();
            if !path.exists() {
                return Err(AppError::Config(format!(
                    "CSV sheet not found: {}",
                    path.display()
                )));
            }
            Ok(Box::new(csv_sheet::CsvSheet::open(&path)?))
        }
        SheetBackend::Google => {
            let token = std::env::var(&cfg.sheet.token_env).map_err(|_| {
                AppError::Config(format!(
                    "environment variable {} with the Google access token is not set",
                    cfg.sheet.token_env
                ))
            })?;
            Ok(Box::new(google::GoogleSheet::open(
                &cfg.sheet.name,
                &token,
                cfg.sheet.timeout_secs,
            )?))
        }
    }
}

/// A worksheet plus its snapshot and the memoized group ranges derived
/// from that snapshot.
pub struct SheetView<S: SheetSource + ?Sized> {
    snapshot: Snapshot,
    groups: Option<GroupRanges>,
    source: Box<S>,
}

impl<S: SheetSource + ?Sized> SheetView<S> {
    /// Take the initial snapshot.
    pub fn open(mut source: Box<S>) -> AppResult<Self> {
        let snapshot = Snapshot::new(source.fetch_values()?);
        Ok(Self {
            snapshot,
            groups: None,
            source,
        })
    }

    /// Re-read the grid; drops the cached group ranges.
    pub fn refresh(&mut self) -> AppResult<()> {
        self.snapshot = Snapshot::new(self.source.fetch_values()?);
        self.invalidate_groups();
        Ok(())
    }

    pub fn invalidate_groups(&mut self) {
        self.groups = None;
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn title(&self) -> &str {
        self.source.title()
    }

    /// Group ranges of the current snapshot, computed on first use.
    pub fn groups(&mut self) -> AppResult<GroupRanges> {
        if let Some(groups) = self.groups {
            return Ok(groups);
        }
        let labels = self.snapshot.column(layout::LABEL_COLUMN);
        let groups = segmenter::segment(&labels)?;
        self.groups = Some(groups);
        Ok(groups)
    }

    /// Snapshot value of `column` at `row`.
    pub fn cell(&self, column: &str, row: u32) -> AppResult<&str> {
        Ok(self.snapshot.cell(&CellAddress::new(column, row)?))
    }

    pub fn write(&mut self, column: &str, row: u32, value: &str) -> AppResult<()> {
        self.source.update_cell(&CellAddress::new(column, row)?, value)
    }

    pub fn into_source(self) -> Box<S> {
        self.source
    }
}
