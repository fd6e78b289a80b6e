// src/extractors/sheet.rs
use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};

use crate::utils::error::ExtractError;

/// A rectangular worksheet with every cell coerced to a string.
///
/// The grid is anchored at A1: leading empty rows and columns that the
/// workbook omits are padded back in, so column indexes are absolute.
/// Row 1 is the sheet's title row (EDGAR puts the statement name and the
/// period headings there). It is kept apart as `header` and is never
/// searched for labels; `cell`, `row` and `height` see only the rows
/// below it. Empty cells are empty strings.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub name: String,
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    width: usize,
}

impl Sheet {
    /// Builds a sheet from string rows, the first being the title row.
    /// Short rows are padded to a common width.
    pub fn new<S: Into<String>>(name: S, mut rows: Vec<Vec<String>>) -> Self {
        let mut header = if rows.is_empty() { Vec::new() } else { rows.remove(0) };
        let width = rows.iter().map(Vec::len).chain([header.len()]).max().unwrap_or(0);
        header.resize(width, String::new());
        for row in &mut rows {
            row.resize(width, String::new());
        }
        Self { name: name.into(), header, rows, width }
    }

    #[cfg(test)]
    pub fn from_rows(name: &str, rows: &[&[&str]]) -> Self {
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect();
        Self::new(name, rows)
    }

    pub fn from_range(name: &str, range: &Range<Data>) -> Self {
        let (row_offset, col_offset) = range
            .start()
            .map(|(r, c)| (r as usize, c as usize))
            .unwrap_or((0, 0));

        let mut rows = vec![Vec::new(); if range.is_empty() { 0 } else { row_offset }];
        for cells in range.rows() {
            let mut row = vec![String::new(); col_offset];
            row.extend(cells.iter().map(cell_text));
            rows.push(row);
        }
        Self::new(name, rows)
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows below the title row.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Cell text, or "" outside the grid.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn row(&self, row: usize) -> &[String] {
        self.rows.get(row).map(Vec::as_slice).unwrap_or(&[])
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.to_string())
            .unwrap_or_else(|| dt.as_f64().to_string()),
        Data::Error(e) => e.to_string(),
    }
}

/// Reads every worksheet of a workbook, in workbook order.
pub fn load_workbook(path: &Path) -> Result<Vec<Sheet>, ExtractError> {
    let mut workbook = open_workbook_auto(path)?;
    let names = workbook.sheet_names();
    if names.is_empty() {
        return Err(ExtractError::EmptyWorkbook(path.display().to_string()));
    }

    let mut sheets = Vec::with_capacity(names.len());
    for name in names {
        let range = workbook.worksheet_range(&name)?;
        tracing::trace!("Loaded sheet '{}' ({} x {})", name, range.height(), range.width());
        sheets.push(Sheet::from_range(&name, &range));
    }
    Ok(sheets)
}
