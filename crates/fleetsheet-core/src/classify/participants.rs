use crate::extraction::SheetGrid;
use crate::locate::values_labelled;

/// Participant roles, in the order they are listed.
pub const PARTICIPANT_TYPES: [&str; 2] = ["Vessel provider", "Slotter"];

/// Summarise the carriers in `col` by role, e.g.
/// "Vessel providers: A / B / Slotters: C".
///
/// A role with no carriers is left out entirely.
pub fn format_participants(grid: &SheetGrid, col: u32) -> String {
    PARTICIPANT_TYPES
        .iter()
        .filter_map(|&kind| {
            let names: Vec<String> = values_labelled(grid, col, kind)
                .iter()
                .map(|v| v.to_text())
                .collect();
            if names.is_empty() {
                None
            } else {
                Some(format!("{kind}s: {}", names.join(" / ")))
            }
        })
        .collect::<Vec<_>>()
        .join(" / ")
}
