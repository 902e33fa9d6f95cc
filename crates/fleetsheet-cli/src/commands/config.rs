use fleetsheet_core::config::RunConfig;
use fleetsheet_core::error::FleetsheetError;

pub fn run() -> Result<(), FleetsheetError> {
    print!("{}", RunConfig::default().to_toml_string()?);
    Ok(())
}
