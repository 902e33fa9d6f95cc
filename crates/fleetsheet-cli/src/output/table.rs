use fleetsheet_core::expand::{Expansion, ServiceRows};
use fleetsheet_core::model::{Field, RowData};
use std::path::Path;

pub fn print(path: &Path, rows: &ServiceRows) {
    println!("=== {} ===\n", path.display());
    match rows.expansion {
        Expansion::NoVessels => println!("  No vessels listed, placeholder row only\n"),
        Expansion::PerVessel(n) => println!("  {n} vessel(s)\n"),
    }
    print!("{}", format_rows(&rows.rows));

    let flagged = rows.manual_checks();
    if flagged > 0 {
        println!("  {flagged} row(s) need a manual service name check");
    }
}

/// One block per row, header names aligned on the left.
pub fn format_rows(rows: &[RowData]) -> String {
    let width = Field::ALL
        .iter()
        .map(|f| f.header().len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (i, row) in rows.iter().enumerate() {
        out.push_str(&format!("--- Row {} ---\n", i + 1));
        for field in Field::ALL {
            let value = row.get(field).map(|v| v.to_string()).unwrap_or_default();
            out.push_str(&format!("  {:<width$}  {}\n", field.header(), value));
        }
        out.push('\n');
    }
    out
}
