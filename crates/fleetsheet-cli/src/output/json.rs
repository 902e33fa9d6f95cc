use fleetsheet_core::error::FleetsheetError;
use fleetsheet_core::expand::ServiceRows;

pub fn print(rows: &ServiceRows) -> Result<(), FleetsheetError> {
    let json = serde_json::to_string_pretty(rows)?;
    println!("{json}");
    Ok(())
}
