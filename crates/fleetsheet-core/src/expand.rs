//! Turns one service file into its output rows.
//!
//! Per file: resolve every non-vessel field in dependency order, find the
//! vessel block, then emit one row per vessel (or a single placeholder row
//! when the file lists none). Rows only leave this module fully resolved.

use serde::Serialize;
use tracing::{debug, warn};

use crate::classify::{ReferenceServiceSet, MANUAL_CHECK};
use crate::config::Layout;
use crate::error::FleetsheetError;
use crate::extraction::SheetGrid;
use crate::locate::{value_at, vessel_entry_refs};
use crate::model::{CellValue, Field, RowData, VesselEntry};
use crate::schema::{ResolveContext, Schema};

/// Vessel name written when a file lists no vessels.
pub const NO_VESSEL: &str = "-";

/// Which branch the expansion took for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Expansion {
    NoVessels,
    PerVessel(usize),
}

/// Output rows for one service file.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceRows {
    pub expansion: Expansion,
    pub rows: Vec<RowData>,
}

impl ServiceRows {
    /// Rows whose MICT service name needs a manual check.
    pub fn manual_checks(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| {
                r.get(Field::MictServiceName)
                    .is_some_and(|v| v.is_text(MANUAL_CHECK))
            })
            .count()
    }
}

/// Resolve the file-level fields shared by every row of the file.
pub fn resolve_fields(
    grid: &SheetGrid,
    schema: &Schema,
    layout: &Layout,
    services: &ReferenceServiceSet,
) -> RowData {
    let ctx = ResolveContext {
        grid,
        layout,
        services,
    };

    let mut row = RowData::new();
    for spec in schema.ordered() {
        let value = spec.resolver.resolve(&ctx, &row);
        debug!(field = %spec.field, resolver = ?spec.resolver, value = ?value, "resolved");
        row.set(spec.field, value);
    }

    if row
        .get(Field::MictServiceName)
        .is_some_and(|v| v.is_text(MANUAL_CHECK))
    {
        warn!(
            service = %row.text(Field::ServiceName).unwrap_or_default(),
            "service name not in reference list, flagged for manual check"
        );
    }
    row
}

/// Fan the shared fields out into one row per vessel entry.
pub fn expand_rows(base: &RowData, grid: &SheetGrid, entries: &[VesselEntry]) -> ServiceRows {
    if entries.is_empty() {
        let mut row = base.clone();
        row.set(Field::VesselName, Some(CellValue::text(NO_VESSEL)));
        return ServiceRows {
            expansion: Expansion::NoVessels,
            rows: vec![row],
        };
    }

    let rows = entries
        .iter()
        .map(|entry| {
            let mut row = base.clone();
            let name = value_at(grid, Some(entry.name));
            let operator = value_at(grid, entry.operator);
            debug!(vessel = %entry.name, operator = ?entry.operator, "expanding vessel entry");
            row.set(Field::VesselName, name);
            row.set(Field::VesselOperator, operator);
            row
        })
        .collect();

    ServiceRows {
        expansion: Expansion::PerVessel(entries.len()),
        rows,
    }
}

/// Resolve one service sheet into its output rows.
pub fn expand_service(
    grid: &SheetGrid,
    schema: &Schema,
    layout: &Layout,
    services: &ReferenceServiceSet,
) -> Result<ServiceRows, FleetsheetError> {
    let base = resolve_fields(grid, schema, layout, services);
    let entries = vessel_entry_refs(
        grid,
        &layout.vessel_marker,
        layout.vessel_name_col()?,
        layout.operator_offset,
    );
    Ok(expand_rows(&base, grid, &entries))
}
