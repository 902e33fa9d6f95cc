//! Primitive lookups over a service file's sheet.
//!
//! Service reports have no schema: facts are found by searching for a
//! label and reading a neighbouring cell. Every lookup here is a pure
//! function of the grid and returns `None` when nothing matches.

use tracing::warn;

use crate::extraction::SheetGrid;
use crate::model::{CellRef, CellValue, VesselEntry};

/// Column holding the labels for same-row lookups (C).
pub const LABEL_COLUMN: u32 = 2;
/// Column holding the value next to a label (D).
pub const VALUE_COLUMN: u32 = 3;

/// Read one cell. An unset reference yields `None`.
pub fn value_at(grid: &SheetGrid, at: Option<CellRef>) -> Option<CellValue> {
    grid.cell(at?).cloned()
}

/// Find the first row whose label column equals `label` and return the
/// value column of that row.
pub fn value_right_of(grid: &SheetGrid, label: &str) -> Option<CellValue> {
    (0..grid.height())
        .find(|&row| is_label(grid, row, LABEL_COLUMN, label))
        .and_then(|row| grid.get(row, VALUE_COLUMN).cloned())
}

/// Scan from `scan_start_row` (1-based) downward, columns C rightward, for
/// a cell equal to `label` and return the cell directly below it.
///
/// Rows above `scan_start_row` are skipped because they carry the same
/// labels in an unrelated header block.
pub fn value_below(grid: &SheetGrid, label: &str, scan_start_row: u32) -> Option<CellValue> {
    let first = scan_start_row.saturating_sub(1);
    for row in first..grid.height() {
        for col in LABEL_COLUMN..grid.width() {
            if is_label(grid, row, col, label) {
                return grid.get(row + 1, col).cloned();
            }
        }
    }
    None
}

/// Collect the vessel block: every non-blank cell in `name_col` after the
/// `marker` cell, up to the first blank. Each name is paired with the cell
/// `operator_offset` columns to its right.
pub fn vessel_entry_refs(
    grid: &SheetGrid,
    marker: &str,
    name_col: u32,
    operator_offset: u32,
) -> Vec<VesselEntry> {
    let mut entries = Vec::new();
    let mut extracting = false;

    for row in 0..grid.height() {
        if extracting {
            if grid.is_blank(row, name_col) {
                break;
            }
            let name = CellRef::new(row, name_col);
            entries.push(VesselEntry {
                name,
                operator: name.offset_cols(operator_offset),
            });
        } else if is_label(grid, row, name_col, marker) {
            extracting = true;
        }
    }

    if let Some(first) = entries.first() {
        match first.operator {
            Some(operator) if operator.col >= grid.width() => warn!(
                operator_column = %operator,
                "operator column lies outside the populated sheet area"
            ),
            Some(_) => {}
            None => warn!(
                name_column = name_col,
                operator_offset,
                "operator offset runs past the last sheet column"
            ),
        }
    }

    entries
}

/// Values of `col` from the first row down to the first blank cell.
pub fn column_values(grid: &SheetGrid, col: u32) -> Vec<CellValue> {
    (0..grid.height())
        .map_while(|row| grid.get(row, col).cloned())
        .collect()
}

/// Non-blank values in `col` whose right-hand neighbour equals `label`.
pub fn values_labelled(grid: &SheetGrid, col: u32, label: &str) -> Vec<CellValue> {
    (0..grid.height())
        .filter(|&row| is_label(grid, row, col + 1, label))
        .filter_map(|row| grid.get(row, col).cloned())
        .collect()
}

fn is_label(grid: &SheetGrid, row: u32, col: u32, label: &str) -> bool {
    grid.get(row, col).is_some_and(|v| v.is_text(label))
}
