// src/extractors/fixtures.rs
use std::path::Path;

use rust_xlsxwriter::Workbook;

/// Writes a workbook with one worksheet per `(name, rows)` entry, in order.
/// Empty strings leave the cell blank.
pub fn write_workbook(path: &Path, sheets: &[(&str, &[&[&str]])]) {
    let mut workbook = Workbook::new();
    for (name, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name).unwrap();
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if !cell.is_empty() {
                    worksheet.write_string(r as u32, c as u16, *cell).unwrap();
                }
            }
        }
    }
    workbook.save(path).unwrap();
}
