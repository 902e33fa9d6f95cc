use fleetsheet_core::classify::ReferenceServiceSet;
use fleetsheet_core::config::RunConfig;
use fleetsheet_core::error::FleetsheetError;
use fleetsheet_core::extraction::xlsx::CalamineReader;
use std::path::PathBuf;
use tracing::warn;

use crate::output;

pub fn run(
    input_file: PathBuf,
    reference: Option<PathBuf>,
    config_file: Option<PathBuf>,
    output_format: &str,
) -> Result<(), FleetsheetError> {
    let config = match &config_file {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    let reader = CalamineReader::new();

    // Without a reference list every MICT service is flagged.
    let reference = reference.unwrap_or_else(|| config.reference_file.clone());
    let services = if reference.exists() {
        ReferenceServiceSet::load(&reader, &reference)?
    } else {
        warn!(reference = %reference.display(), "reference workbook not found, using an empty list");
        ReferenceServiceSet::new()
    };

    let rows = fleetsheet_core::inspect_service_file(&input_file, &reader, &config, &services)?;

    match output_format {
        "json" => output::json::print(&rows)?,
        _ => output::table::print(&input_file, &rows),
    }

    Ok(())
}
