use crate::errors::{AppError, AppResult};
use std::fmt;
use std::str::FromStr;

/// A1-style cell address: column letters plus a 1-based row number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellAddress {
    pub column: String,
    pub row: u32,
}

impl CellAddress {
    pub fn new(column: &str, row: u32) -> AppResult<Self> {
        if column.is_empty() || !column.chars().all(|c| c.is_ascii_alphabetic()) || row == 0 {
            return Err(AppError::InvalidAddress(format!("{column}{row}")));
        }
        Ok(Self {
            column: column.to_ascii_uppercase(),
            row,
        })
    }

    /// 0-based column index (`A` → 0, `Z` → 25, `AA` → 26).
    pub fn column_index(&self) -> usize {
        column_index(&self.column)
    }

    /// 0-based row index into a snapshot grid.
    pub fn row_index(&self) -> usize {
        (self.row - 1) as usize
    }
}

pub fn column_index(letters: &str) -> usize {
    letters
        .bytes()
        .map(|b| (b.to_ascii_uppercase() - b'A') as usize + 1)
        .fold(0, |acc, v| acc * 26 + v)
        - 1
}

impl FromStr for CellAddress {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let split = s
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| AppError::InvalidAddress(s.to_string()))?;
        let (letters, digits) = s.split_at(split);
        let row = digits
            .parse::<u32>()
            .map_err(|_| AppError::InvalidAddress(s.to_string()))?;
        CellAddress::new(letters, row)
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column, self.row)
    }
}
