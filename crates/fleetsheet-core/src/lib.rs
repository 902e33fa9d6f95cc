pub mod classify;
pub mod config;
pub mod error;
pub mod expand;
pub mod extraction;
pub mod locate;
pub mod model;
pub mod output;
pub mod parsing;
pub mod schema;

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use classify::ReferenceServiceSet;
use config::RunConfig;
use error::FleetsheetError;
use expand::{expand_service, Expansion, ServiceRows};
use extraction::convert::{convert_legacy_files, list_service_files};
use extraction::{SheetGrid, WorkbookReader};
use output::{OutputSheet, SheetWriter};
use schema::builtin::service_report_schema;
use schema::Schema;

/// Outcome of a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub files: usize,
    pub rows: usize,
    /// Files that listed no vessels and got a single placeholder row.
    pub files_without_vessels: usize,
    pub manual_checks: usize,
    pub output_path: PathBuf,
}

/// Main API entry point: build the raw sheet from every service file and
/// persist it.
///
/// Missing source files and an unreadable reference list abort the run
/// before the output workbook is touched. Problems inside a single file
/// only blank the affected fields.
pub fn build_report(
    config: &RunConfig,
    reader: &dyn WorkbookReader,
    writer: &dyn SheetWriter,
) -> Result<BatchSummary, FleetsheetError> {
    config.validate()?;

    let files = service_files(config, reader)?;
    let services = ReferenceServiceSet::load(reader, &config.reference_file)?;
    let schema = service_report_schema(&config.layout)?;

    let mut sheet = OutputSheet::new(config.sheet_name.trim());
    let mut summary = BatchSummary {
        files: files.len(),
        rows: 0,
        files_without_vessels: 0,
        manual_checks: 0,
        output_path: config.output_path.clone(),
    };

    for path in &files {
        let service_rows = process_service_file(path, reader, &schema, config, &services)?;
        if service_rows.expansion == Expansion::NoVessels {
            summary.files_without_vessels += 1;
        }
        summary.manual_checks += service_rows.manual_checks();
        for row in &service_rows.rows {
            sheet.append(row);
        }
    }
    summary.rows = sheet.len();

    writer.persist(&sheet, &config.output_path)?;

    info!(
        files = summary.files,
        rows = summary.rows,
        manual_checks = summary.manual_checks,
        "raw sheet built"
    );
    Ok(summary)
}

/// Resolve a single service file into its rows without writing anything.
pub fn inspect_service_file(
    path: &Path,
    reader: &dyn WorkbookReader,
    config: &RunConfig,
    services: &ReferenceServiceSet,
) -> Result<ServiceRows, FleetsheetError> {
    config.layout.validate()?;
    let schema = service_report_schema(&config.layout)?;
    process_service_file(path, reader, &schema, config, services)
}

/// The ordered list of service files the rows are built from.
fn service_files(
    config: &RunConfig,
    reader: &dyn WorkbookReader,
) -> Result<Vec<PathBuf>, FleetsheetError> {
    let files = if config.convert {
        convert_legacy_files(
            &config.source_dir,
            &config.dest_dir,
            &config.file_prefix,
            config.drop_first_row,
            reader,
        )?
    } else {
        list_service_files(&config.dest_dir, &config.file_prefix, "xlsx")?
    };

    if files.is_empty() {
        let dir = if config.convert {
            &config.source_dir
        } else {
            &config.dest_dir
        };
        return Err(FleetsheetError::NoServiceFiles { dir: dir.clone() });
    }
    Ok(files)
}

fn process_service_file(
    path: &Path,
    reader: &dyn WorkbookReader,
    schema: &Schema,
    config: &RunConfig,
    services: &ReferenceServiceSet,
) -> Result<ServiceRows, FleetsheetError> {
    // An unreadable file still yields its placeholder row.
    let grid = reader.read_first_sheet(path).unwrap_or_else(|e| {
        warn!(file = %path.display(), error = %e, "could not read service file, fields left blank");
        SheetGrid::new()
    });

    let service_rows = expand_service(&grid, schema, &config.layout, services)?;
    info!(
        file = %path.display(),
        rows = service_rows.rows.len(),
        "processed service file"
    );
    Ok(service_rows)
}
