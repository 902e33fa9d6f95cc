use std::io::Write;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use tracing::{info, warn};

use crate::error::FleetsheetError;
use crate::extraction::xlsx::read_all_sheets;
use crate::extraction::SheetGrid;
use crate::model::CellValue;
use crate::output::{OutputSheet, SheetWriter};

/// Writes the output sheet as an `.xlsx` workbook.
///
/// With a template, the template's other sheets are carried over (values
/// only) and any sheet with the output sheet's name is replaced.
#[derive(Debug, Clone, Default)]
pub struct XlsxSheetWriter {
    template: Option<PathBuf>,
}

impl XlsxSheetWriter {
    pub fn new() -> Self {
        XlsxSheetWriter { template: None }
    }

    pub fn with_template(template: Option<PathBuf>) -> Self {
        XlsxSheetWriter { template }
    }
}

impl SheetWriter for XlsxSheetWriter {
    fn persist(&self, sheet: &OutputSheet, output: &Path) -> Result<(), FleetsheetError> {
        let mut workbook = Workbook::new();

        if let Some(template) = &self.template {
            if template.exists() {
                carry_template_sheets(&mut workbook, template, sheet.name(), output)?;
            } else {
                warn!(template = %template.display(), "template workbook not found, starting empty");
            }
        }

        let worksheet = workbook.add_worksheet();
        write_output_sheet(worksheet, sheet).map_err(|e| output_error(output, e))?;

        let buffer = workbook
            .save_to_buffer()
            .map_err(|e| output_error(output, e))?;
        persist_bytes(&buffer, output)?;

        info!(
            sheet = sheet.name(),
            rows = sheet.len(),
            path = %output.display(),
            "workbook saved"
        );
        Ok(())
    }
}

fn carry_template_sheets(
    workbook: &mut Workbook,
    template: &Path,
    replaced: &str,
    output: &Path,
) -> Result<(), FleetsheetError> {
    for (name, grid) in read_all_sheets(template)? {
        if name == replaced {
            continue;
        }
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(&name)
            .map_err(|e| output_error(output, e))?;
        write_grid_values(worksheet, &grid).map_err(|e| output_error(output, e))?;
    }
    Ok(())
}

fn write_output_sheet(worksheet: &mut Worksheet, sheet: &OutputSheet) -> Result<(), XlsxError> {
    worksheet.set_name(sheet.name())?;

    let header_format = Format::new().set_bold();
    for (col, header) in sheet.header().iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (i, values) in sheet.rows().iter().enumerate() {
        let row = i as u32 + 1;
        for (col, value) in values.iter().enumerate() {
            if let Some(value) = value {
                write_value(worksheet, row, col as u16, value)?;
            }
        }
    }

    worksheet.set_freeze_panes(1, 0)?;
    worksheet.autofit();
    worksheet.set_active(true);
    Ok(())
}

fn write_value(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
) -> Result<(), XlsxError> {
    match value {
        CellValue::Text(s) if s.is_empty() => {}
        CellValue::Text(s) => {
            worksheet.write_string(row, col, s)?;
        }
        CellValue::Int(i) => {
            worksheet.write_number(row, col, *i as f64)?;
        }
        CellValue::Float(f) => {
            worksheet.write_number(row, col, *f)?;
        }
        CellValue::Bool(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
    }
    Ok(())
}

/// Copy every populated cell of `grid` to the same position.
pub fn write_grid_values(worksheet: &mut Worksheet, grid: &SheetGrid) -> Result<(), XlsxError> {
    for (at, value) in grid.cells() {
        write_value(worksheet, at.row, at.col as u16, value)?;
    }
    Ok(())
}

/// Save `grid` as the only sheet of a new workbook at `path`.
pub fn save_grid_workbook(grid: &SheetGrid, path: &Path) -> Result<(), FleetsheetError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    write_grid_values(worksheet, grid).map_err(|e| output_error(path, e))?;
    let buffer = workbook
        .save_to_buffer()
        .map_err(|e| output_error(path, e))?;
    persist_bytes(&buffer, path)
}

/// Write through a temporary file in the target directory and rename it
/// into place, so the target is either the old file or the complete new one.
fn persist_bytes(bytes: &[u8], path: &Path) -> Result<(), FleetsheetError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.persist(path).map_err(|e| output_error(path, e))?;
    Ok(())
}

fn output_error(path: &Path, e: impl std::fmt::Display) -> FleetsheetError {
    FleetsheetError::Output {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::xlsx::CalamineReader;
    use crate::extraction::WorkbookReader;
    use crate::model::{Field, RowData};

    #[test]
    fn test_grid_workbook_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Service_A.xlsx");
        let grid = SheetGrid::from_cells([
            ("C3", CellValue::text("Vessel name")),
            ("D9", CellValue::Float(2500.0)),
        ])
        .unwrap();

        save_grid_workbook(&grid, &path).unwrap();
        let back = CalamineReader::new().read_first_sheet(&path).unwrap();
        assert!(back.get(2, 2).unwrap().is_text("Vessel name"));
        assert_eq!(back.get(8, 3), Some(&CellValue::Float(2500.0)));
    }

    #[test]
    fn test_output_sheet_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("Service Overview.xlsx");

        let mut sheet = OutputSheet::new("raw");
        let mut row = RowData::new();
        row.set(Field::Port, Some(CellValue::text("ATI")));
        row.set(Field::VesselsPerRowCount, Some(CellValue::Int(1)));
        row.set(Field::VesselName, Some(CellValue::text("-")));
        sheet.append(&row);

        XlsxSheetWriter::new().persist(&sheet, &path).unwrap();

        let sheets = read_all_sheets(&path).unwrap();
        assert_eq!(sheets.len(), 1);
        let (name, grid) = &sheets[0];
        assert_eq!(name, "raw");
        assert!(grid.get(0, 0).unwrap().is_text("PORT"));
        assert!(grid.get(0, 16).unwrap().is_text("VESSEL NAME"));
        assert!(grid.get(1, 0).unwrap().is_text("ATI"));
        assert_eq!(grid.get(1, 10), Some(&CellValue::Float(1.0)));
        assert!(grid.get(1, 16).unwrap().is_text("-"));
        assert_eq!(grid.get(1, 1), None);
    }

    #[test]
    fn test_template_sheets_kept_and_same_name_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Service Overview.xlsx");

        let mut template = Workbook::new();
        template
            .add_worksheet()
            .set_name("Pivot")
            .unwrap()
            .write_string(0, 0, "summary")
            .unwrap();
        template
            .add_worksheet()
            .set_name("raw")
            .unwrap()
            .write_string(0, 0, "stale")
            .unwrap();
        template.save(&path).unwrap();

        let sheet = OutputSheet::new("raw");
        XlsxSheetWriter::with_template(Some(path.clone()))
            .persist(&sheet, &path)
            .unwrap();

        let sheets = read_all_sheets(&path).unwrap();
        let names: Vec<&str> = sheets.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["Pivot", "raw"]);
        assert!(sheets[0].1.get(0, 0).unwrap().is_text("summary"));
        assert!(sheets[1].1.get(0, 0).unwrap().is_text("PORT"));
    }

    #[test]
    fn test_missing_template_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        let writer = XlsxSheetWriter::with_template(Some(dir.path().join("missing.xlsx")));
        writer.persist(&OutputSheet::new("raw"), &path).unwrap();
        assert!(path.exists());
    }
}
