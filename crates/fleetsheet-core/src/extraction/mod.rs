pub mod convert;
pub mod xlsx;

use std::path::Path;

use crate::error::FleetsheetError;
use crate::model::{CellRef, CellValue};

/// The cells of one worksheet, addressed by absolute 0-based coordinates.
///
/// Blank cells are never stored, so `get` returning `None` means the cell
/// is empty or lies outside the populated area.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetGrid {
    rows: Vec<Vec<Option<CellValue>>>,
    width: u32,
}

impl SheetGrid {
    pub fn new() -> SheetGrid {
        SheetGrid::default()
    }

    /// Build a grid from A1 references, mainly for tests and fixtures.
    pub fn from_cells<'a, I>(cells: I) -> Result<SheetGrid, FleetsheetError>
    where
        I: IntoIterator<Item = (&'a str, CellValue)>,
    {
        let mut grid = SheetGrid::new();
        for (reference, value) in cells {
            grid.set(reference.parse()?, value);
        }
        Ok(grid)
    }

    pub fn set(&mut self, at: CellRef, value: CellValue) {
        let row = at.row as usize;
        let col = at.col as usize;
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize(col + 1, None);
        }
        cells[col] = Some(value);
        self.width = self.width.max(at.col + 1);
    }

    pub fn get(&self, row: u32, col: u32) -> Option<&CellValue> {
        self.rows
            .get(row as usize)
            .and_then(|cells| cells.get(col as usize))
            .and_then(Option::as_ref)
    }

    pub fn cell(&self, at: CellRef) -> Option<&CellValue> {
        self.get(at.row, at.col)
    }

    pub fn is_blank(&self, row: u32, col: u32) -> bool {
        self.get(row, col).is_none()
    }

    /// Number of rows up to and including the last populated one.
    pub fn height(&self) -> u32 {
        self.rows.len() as u32
    }

    /// Number of columns up to and including the last populated one.
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Populated cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (CellRef, &CellValue)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, cells)| {
            cells.iter().enumerate().filter_map(move |(c, value)| {
                value
                    .as_ref()
                    .map(|v| (CellRef::new(r as u32, c as u32), v))
            })
        })
    }

    /// A copy of this grid with the first `count` rows removed.
    pub fn without_leading_rows(&self, count: u32) -> SheetGrid {
        let rows: Vec<_> = self.rows.iter().skip(count as usize).cloned().collect();
        let width = rows.iter().map(|r| r.len() as u32).max().unwrap_or(0);
        SheetGrid { rows, width }
    }
}

/// Trait for workbook reading backends.
pub trait WorkbookReader: Send + Sync {
    /// Read the first worksheet in tab order of the workbook at `path`.
    /// Converted service files only ever hold that one sheet.
    fn read_first_sheet(&self, path: &Path) -> Result<SheetGrid, FleetsheetError>;

    /// Name of this reading backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
