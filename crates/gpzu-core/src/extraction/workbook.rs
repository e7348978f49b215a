use std::io::Cursor;
use std::path::PathBuf;

use calamine::{Reader, Xlsx};

use crate::error::GpzuError;
use crate::extraction::table::{Cell, Table};
use crate::extraction::TableExtractor;

/// Table backend reading pre-extracted tables from an xlsx workbook, one
/// worksheet per table in sheet order. The PDF bytes are ignored.
pub struct WorkbookTables {
    path: PathBuf,
}

impl WorkbookTables {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        WorkbookTables { path: path.into() }
    }
}

impl TableExtractor for WorkbookTables {
    fn extract_tables(&self, _pdf_bytes: &[u8]) -> Result<Vec<Table>, GpzuError> {
        let bytes = std::fs::read(&self.path)?;
        read_workbook_tables(&bytes)
    }

    fn backend_name(&self) -> &str {
        "xlsx"
    }
}

/// Read every worksheet of an xlsx workbook as a table.
pub fn read_workbook_tables(bytes: &[u8]) -> Result<Vec<Table>, GpzuError> {
    let cursor = Cursor::new(bytes);
    let mut workbook: Xlsx<_> = calamine::open_workbook_from_rs(cursor)
        .map_err(|e| GpzuError::Extraction(format!("failed to open xlsx: {e}")))?;

    let mut tables = Vec::new();
    for name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| GpzuError::Extraction(format!("sheet '{name}' unreadable: {e}")))?;

        let grid: Vec<Vec<Cell>> = range
            .rows()
            .map(|row| row.iter().map(data_to_cell).collect())
            .collect();
        if !grid.is_empty() {
            tables.push(Table::from_grid(grid));
        }
    }

    Ok(tables)
}

fn data_to_cell(cell: &calamine::Data) -> Cell {
    match cell {
        calamine::Data::String(s) => Cell::text(s.as_str()),
        calamine::Data::Float(f) => Cell::Number(*f),
        calamine::Data::Int(i) => Cell::Number(*i as f64),
        calamine::Data::Empty => Cell::Empty,
        other => Cell::text(format!("{other}")),
    }
}
