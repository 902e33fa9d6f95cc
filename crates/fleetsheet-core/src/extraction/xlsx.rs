use std::path::Path;

use calamine::{Data, Range, Reader};

use crate::error::FleetsheetError;
use crate::extraction::{SheetGrid, WorkbookReader};
use crate::model::{CellRef, CellValue};

/// Workbook reader backed by calamine. Handles `.xlsx` and legacy `.xls`.
pub struct CalamineReader;

impl CalamineReader {
    pub fn new() -> Self {
        CalamineReader
    }
}

impl Default for CalamineReader {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkbookReader for CalamineReader {
    fn read_first_sheet(&self, path: &Path) -> Result<SheetGrid, FleetsheetError> {
        let mut workbook = calamine::open_workbook_auto(path).map_err(|e| workbook_error(path, e))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| FleetsheetError::Workbook {
                path: path.to_path_buf(),
                reason: "workbook has no sheets".into(),
            })?
            .map_err(|e| workbook_error(path, e))?;

        Ok(grid_from_range(&range))
    }

    fn backend_name(&self) -> &str {
        "calamine"
    }
}

/// Read every worksheet of a workbook, in tab order.
pub fn read_all_sheets(path: &Path) -> Result<Vec<(String, SheetGrid)>, FleetsheetError> {
    let mut workbook = calamine::open_workbook_auto(path).map_err(|e| workbook_error(path, e))?;

    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| workbook_error(path, e))?;
        sheets.push((name, grid_from_range(&range)));
    }
    Ok(sheets)
}

/// Copy a calamine range into a grid, keeping absolute coordinates.
pub fn grid_from_range(range: &Range<Data>) -> SheetGrid {
    let mut grid = SheetGrid::new();
    let Some((first_row, first_col)) = range.start() else {
        return grid;
    };

    for (row, col, cell) in range.used_cells() {
        if let Some(value) = cell_value(cell) {
            grid.set(
                CellRef::new(first_row + row as u32, first_col + col as u32),
                value,
            );
        }
    }
    grid
}

fn cell_value(cell: &Data) -> Option<CellValue> {
    match cell {
        Data::Empty => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(CellValue::Text(s.clone())),
        Data::Int(i) => Some(CellValue::Int(*i)),
        Data::Float(f) => Some(CellValue::Float(*f)),
        Data::Bool(b) => Some(CellValue::Bool(*b)),
        _ => Some(CellValue::Text(format!("{cell}"))),
    }
}

fn workbook_error(path: &Path, e: impl std::fmt::Display) -> FleetsheetError {
    FleetsheetError::Workbook {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}
